//! Key-value backend seam: keys, items, scan pages and the [`KvStore`] trait.
//!
//! Items are DynamoDB attribute maps. Every table is addressed by a single string partition
//! key named [`PARTITION_KEY`].

pub mod codec;
pub mod dynamodb;
pub mod memory;

use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;

pub use aws_sdk_dynamodb::types::AttributeValue;
pub use codec::{from_item, to_item};
pub use dynamodb::DynamoDbStore;
pub use memory::InMemoryStore;

#[cfg(test)]
use mockall::automock;

/// Partition key attribute of every table.
pub const PARTITION_KEY: &str = "pk";

/// Key of an item. Point operations need exactly `{"pk": S(id)}`; an empty key starts a scan.
pub type Key = HashMap<String, AttributeValue>;

/// A stored record in the backend's native representation.
pub type Item = HashMap<String, AttributeValue>;

/// Builds the single-attribute key for `id`.
pub fn k1(id: impl Into<String>) -> Key {
    HashMap::from([(PARTITION_KEY.to_string(), AttributeValue::S(id.into()))])
}

/// The partition key value of `key` (or of an item), if present and a string.
pub fn key_id(key: &Key) -> Option<&str> {
    key.get(PARTITION_KEY)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
}

/// True when `key` holds the partition attribute and nothing else.
pub fn is_point_key(key: &Key) -> bool {
    key.len() == 1 && key_id(key).is_some()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScanRequest {
    pub table_name: String,
    pub limit: i32,
    /// Resume strictly after this key. `None` or an empty key starts at the beginning.
    pub exclusive_start_key: Option<Key>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Absent once the end of the table has been reached.
    pub last_evaluated_key: Option<Key>,
    pub scanned_count: i32,
}

/// One backend round trip per call. Implementations hold no per-call state.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError>;

    async fn get_item(&self, table_name: &str, key: Key) -> Result<Option<Item>, StoreError>;

    /// Unconditional put: replaces any item stored under the same key.
    async fn put_item(&self, table_name: &str, item: Item) -> Result<(), StoreError>;

    /// Succeeds whether or not the key exists.
    async fn delete_item(&self, table_name: &str, key: Key) -> Result<(), StoreError>;
}
