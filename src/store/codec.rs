//! Item codec: typed records to and from DynamoDB attribute maps, through `serde_json::Value`.

use super::{AttributeValue, Item};
use crate::error::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Number, Value};

/// Encodes `value`, which must serialize to a JSON object.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, StoreError> {
    match serde_json::to_value(value).map_err(|e| StoreError::marshal(e.to_string()))? {
        Value::Object(map) => Ok(map.into_iter().map(|(k, v)| (k, to_attribute(v))).collect()),
        other => Err(StoreError::marshal(format!(
            "item must be an object, got {}",
            kind(&other)
        ))),
    }
}

/// Decodes an attribute map into `T`. Fails when the stored shape does not fit `T`.
pub fn from_item<T: DeserializeOwned>(item: &Item) -> Result<T, StoreError> {
    let map = item
        .iter()
        .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
        .collect::<Result<Map<String, Value>, StoreError>>()?;
    serde_json::from_value(Value::Object(map)).map_err(|e| StoreError::unmarshal(e.to_string()))
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(to_attribute).collect()),
        Value::Object(m) => {
            AttributeValue::M(m.into_iter().map(|(k, v)| (k, to_attribute(v))).collect())
        }
    }
}

fn to_json(attr: &AttributeValue) -> Result<Value, StoreError> {
    Ok(match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n)?,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => {
            Value::Array(list.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
                .collect::<Result<Map<String, Value>, StoreError>>()?,
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| parse_number(n))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(_) | AttributeValue::Bs(_) => {
            return Err(StoreError::unmarshal("binary attributes are not supported"))
        }
        _ => return Err(StoreError::unmarshal("unknown attribute type")),
    })
}

fn parse_number(n: &str) -> Result<Value, StoreError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::unmarshal(format!("invalid number attribute: {}", n)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
