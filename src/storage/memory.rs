//! In-memory graph source.
//!
//! This is the reference implementation of `GraphSource`.
//! It uses simple HashMaps protected by RwLock.
//!
//! ## Limitations
//!
//! - **No transactions**: writes are applied immediately.
//! - **Dangling edges allowed**: `remove_vertex()` keeps the vertex's edges,
//!   the same state a concurrent delete leaves behind between edge listing
//!   and vertex fetch. The enumerator must cope with it.
//!
//! Use this source for:
//! - Testing the comparator and path enumerator
//! - Embedding in applications that don't need persistence

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;

use crate::model::*;
use crate::{Error, Result};
use super::GraphSource;

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory vertex and edge collections. Cloning shares the same tables.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    vertices: RwLock<HashMap<VertexId, Vertex>>,
    edges: RwLock<HashMap<EdgeId, Edge>>,
    /// vertex → outgoing edge IDs, in insertion order
    outgoing: RwLock<HashMap<VertexId, Vec<EdgeId>>>,
    /// vertex → incoming edge IDs, in insertion order
    incoming: RwLock<HashMap<VertexId, Vec<EdgeId>>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex. Fails if the ID is taken.
    pub fn add_vertex(&self, vertex: Vertex) -> Result<VertexId> {
        let mut vertices = self.inner.vertices.write();
        if vertices.contains_key(&vertex.id) {
            return Err(Error::StorageError(format!("duplicate vertex {}", vertex.id)));
        }
        let id = vertex.id.clone();
        vertices.insert(id.clone(), vertex);
        Ok(id)
    }

    /// Insert an edge. Both endpoints must exist.
    pub fn add_edge(&self, edge: Edge) -> Result<EdgeId> {
        {
            let vertices = self.inner.vertices.read();
            for end in [&edge.from, &edge.to] {
                if !vertices.contains_key(end) {
                    return Err(Error::MissingVertex(end.clone()));
                }
            }
        }

        // Adjacency before the edge table, the order readers lock in. All
        // three stay held so the duplicate check and the insert are atomic.
        let mut outgoing = self.inner.outgoing.write();
        let mut incoming = self.inner.incoming.write();
        let mut edges = self.inner.edges.write();
        if edges.contains_key(&edge.id) {
            return Err(Error::StorageError(format!("duplicate edge {}", edge.id)));
        }

        let id = edge.id.clone();
        outgoing.entry(edge.from.clone()).or_default().push(id.clone());
        incoming.entry(edge.to.clone()).or_default().push(id.clone());
        edges.insert(id.clone(), edge);

        Ok(id)
    }

    /// Remove a vertex document. Its edges stay in place.
    pub fn remove_vertex(&self, id: &VertexId) -> bool {
        self.inner.vertices.write().remove(id).is_some()
    }

    /// Remove an edge and its adjacency entries.
    pub fn remove_edge(&self, id: &EdgeId) -> bool {
        let mut outgoing = self.inner.outgoing.write();
        let mut incoming = self.inner.incoming.write();
        let Some(edge) = self.inner.edges.write().remove(id) else {
            return false;
        };
        if let Some(ids) = outgoing.get_mut(&edge.from) {
            ids.retain(|eid| eid != id);
        }
        if let Some(ids) = incoming.get_mut(&edge.to) {
            ids.retain(|eid| eid != id);
        }
        true
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.vertices.read().len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edges.read().len()
    }

    fn collect(&self, adjacency: &RwLock<HashMap<VertexId, Vec<EdgeId>>>, vertex: &VertexId) -> Vec<Edge> {
        let adj = adjacency.read();
        let edges = self.inner.edges.read();
        adj.get(vertex)
            .map(|ids| ids.iter().filter_map(|id| edges.get(id).cloned()).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ============================================================================
// GraphSource impl
// ============================================================================

impl GraphSource for MemoryGraph {
    fn out_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
        Ok(self.collect(&self.inner.outgoing, vertex))
    }

    fn in_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
        Ok(self.collect(&self.inner.incoming, vertex))
    }

    fn vertex(&self, id: &VertexId) -> Result<Option<Vertex>> {
        Ok(self.inner.vertices.read().get(id).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================
