//! Edge in the property graph.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use super::{Document, Value, VertexId};
use crate::Error;

/// Opaque edge identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Traversal direction, seen from the vertex being expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow `_from → _to`.
    #[default]
    Outbound,
    /// Follow `_to → _from`.
    Inbound,
    Any,
}

impl Direction {
    pub fn includes_outbound(self) -> bool {
        matches!(self, Direction::Outbound | Direction::Any)
    }

    pub fn includes_inbound(self) -> bool {
        matches!(self, Direction::Inbound | Direction::Any)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "outbound" => Ok(Direction::Outbound),
            "inbound" => Ok(Direction::Inbound),
            "any" => Ok(Direction::Any),
            other => Err(Error::InvalidTraversalSpec(format!("unknown direction '{other}'"))),
        }
    }
}

/// A directed edge document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "_id")]
    pub id: EdgeId,
    #[serde(rename = "_from")]
    pub from: VertexId,
    #[serde(rename = "_to")]
    pub to: VertexId,
    #[serde(flatten)]
    pub attributes: Document,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, from: impl Into<VertexId>, to: impl Into<VertexId>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            attributes: Document::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Vertices reachable over this edge from `vertex` when moving in
    /// `direction`. An endpoint equal to `vertex` itself is never a target,
    /// so a self-loop yields nothing and an edge yields at most one target
    /// per endpoint.
    pub fn targets(&self, vertex: &VertexId, direction: Direction) -> impl Iterator<Item = &VertexId> {
        let out = (direction.includes_outbound() && self.to != *vertex).then_some(&self.to);
        let inb = (direction.includes_inbound() && self.from != *vertex).then_some(&self.from);
        out.into_iter().chain(inb)
    }

    /// The edge as a query value: its attributes plus `_id`, `_from`, `_to`.
    pub fn to_value(&self) -> Value {
        let mut doc = self.attributes.clone();
        doc.insert("_id".into(), Value::String(self.id.0.clone()));
        doc.insert("_from".into(), Value::String(self.from.0.clone()));
        doc.insert("_to".into(), Value::String(self.to.0.clone()));
        Value::Document(doc)
    }
}
