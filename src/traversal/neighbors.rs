//! Single-hop lookups: connected edges and adjacent vertices.

use serde::{Deserialize, Serialize};

use crate::model::{Direction, Edge, Value, Vertex, VertexId};
use crate::storage::GraphSource;
use crate::Result;
use super::fetch_vertex;

/// An adjacent vertex and the edge that reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub edge: Edge,
    pub vertex: Vertex,
}

impl Neighbor {
    pub fn to_value(&self) -> Value {
        [("edge", self.edge.to_value()), ("vertex", self.vertex.to_value())]
            .into_iter()
            .collect()
    }
}

/// Edges connected to `vertex` in `direction`.
pub fn edges<S: GraphSource>(source: &S, vertex: &VertexId, direction: Direction) -> Result<Vec<Edge>> {
    source.edges(vertex, direction)
}

/// Vertices adjacent to `vertex` in `direction`, one entry per edge.
///
/// The vertex itself is never its own neighbour, so self-loops are skipped.
/// Neighbours that cannot be fetched are left out.
pub fn neighbors<S: GraphSource>(source: &S, vertex: &VertexId, direction: Direction) -> Result<Vec<Neighbor>> {
    let mut result = Vec::new();
    for edge in source.edges(vertex, direction)? {
        let Some(target) = edge.targets(vertex, direction).next().cloned() else {
            continue;
        };
        match fetch_vertex(source, &target)? {
            Some(v) => result.push(Neighbor { edge, vertex: v }),
            None => tracing::trace!(vertex = %target, "skipping missing neighbour"),
        }
    }
    Ok(result)
}
