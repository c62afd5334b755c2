use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storegate_core::UserId;

/// Key that addresses the document; it can never be written by a client.
const ID_KEY: &str = "_id";

/// A stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl User {
    pub fn new(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            fields: fields.sanitized().into_inner(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.fields.get("email").and_then(Value::as_str)
    }

    /// Partial update: every supplied field overwrites (or adds) its key,
    /// every other key is left alone.
    pub fn merge(&mut self, patch: UserFields) {
        for (key, value) in patch.sanitized().into_inner() {
            self.fields.insert(key, value);
        }
    }
}

/// Client-supplied fields for create (`POST /usuarios`) and partial update
/// (`PUT /usuarios/{id}`). Only JSON objects deserialize into this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserFields(Map<String, Value>);

impl UserFields {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Drop `_id`; the id is generated by the store and immutable. Any
    /// other key, `id` included, is ordinary data.
    pub fn sanitized(mut self) -> Self {
        self.0.remove(ID_KEY);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for UserFields {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
