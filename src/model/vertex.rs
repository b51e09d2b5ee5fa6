//! Vertex in the property graph.

use serde::{Deserialize, Serialize};
use super::{Document, Value};

/// Vertex identifier, `collection/key` by convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub String);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A vertex document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(rename = "_id")]
    pub id: VertexId,
    #[serde(flatten)]
    pub attributes: Document,
}

impl Vertex {
    pub fn new(id: impl Into<VertexId>) -> Self {
        Self { id: id.into(), attributes: Document::new() }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The vertex as a query value: its attributes plus `_id`.
    pub fn to_value(&self) -> Value {
        let mut doc = self.attributes.clone();
        doc.insert("_id".into(), Value::String(self.id.0.clone()));
        Value::Document(doc)
    }
}
