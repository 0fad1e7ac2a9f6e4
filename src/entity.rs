//! Entities served over HTTP: identity access plus the sample `Website`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record type stored under a single string partition key.
///
/// The identity field serializes as `pk` so the marshaled item carries its own key.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular name used in log lines and error messages.
    const NAME: &'static str;

    /// Empty when not yet assigned.
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    #[serde(rename = "pk", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Entity for Website {
    const NAME: &'static str = "website";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
