//! PathResult: one enumerated path: alternating vertices and edges.

use serde::{Deserialize, Serialize};
use super::{Edge, Value, Vertex};

/// A path in the graph: vertex -[edge]-> vertex -[edge]-> vertex ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Vertices along the path. Always has one more element than `edges`.
    pub vertices: Vec<Vertex>,
    /// Edges connecting consecutive vertices.
    pub edges: Vec<Edge>,
    pub source: Vertex,
    pub destination: Vertex,
}

impl PathResult {
    /// Build a result from a branch's vertex and edge sequences.
    ///
    /// Returns `None` for an empty vertex list; a path always holds its
    /// start vertex.
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Option<Self> {
        let source = vertices.first()?.clone();
        let destination = vertices.last()?.clone();
        Some(Self { vertices, edges, source, destination })
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The path as a query value, shaped like the document the query
    /// language exposes: `{vertices, edges, source, destination}`.
    pub fn to_value(&self) -> Value {
        [
            ("vertices", Value::List(self.vertices.iter().map(Vertex::to_value).collect())),
            ("edges", Value::List(self.edges.iter().map(Edge::to_value).collect())),
            ("source", self.source.to_value()),
            ("destination", self.destination.to_value()),
        ]
        .into_iter()
        .collect()
    }
}
