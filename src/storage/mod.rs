//! # Graph Source Trait
//!
//! The contract between the path enumerator and whatever stores the
//! vertex and edge collections. The enumerator only ever asks three
//! questions: which edges leave a vertex, which edges enter it, and what
//! the vertex document is.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory graph for testing/embedding |

pub mod memory;

use crate::model::*;
use crate::Result;

pub use memory::MemoryGraph;

/// Edge and vertex lookup, provided by storage.
///
/// Calls are synchronous from the enumerator's point of view. Edges must be
/// returned in a stable order; path enumeration order follows it.
pub trait GraphSource {
    /// Edges whose `_from` is `vertex`.
    fn out_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>>;

    /// Edges whose `_to` is `vertex`.
    fn in_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>>;

    /// Fetch a vertex document. `Ok(None)` when it does not exist (for
    /// example, deleted after its edges were listed).
    fn vertex(&self, id: &VertexId) -> Result<Option<Vertex>>;

    /// Edges touching `vertex` in `direction`.
    ///
    /// Default: outbound edges first, then inbound ones; for `Any`, a
    /// self-loop appears once.
    fn edges(&self, vertex: &VertexId, direction: Direction) -> Result<Vec<Edge>> {
        let mut result = Vec::new();
        if direction.includes_outbound() {
            result.extend(self.out_edges(vertex)?);
        }
        if direction.includes_inbound() {
            let seen_loop = direction.includes_outbound();
            result.extend(
                self.in_edges(vertex)?
                    .into_iter()
                    .filter(|e| !(seen_loop && e.is_self_loop())),
            );
        }
        Ok(result)
    }
}

impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn out_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
        (**self).out_edges(vertex)
    }

    fn in_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
        (**self).in_edges(vertex)
    }

    fn vertex(&self, id: &VertexId) -> Result<Option<Vertex>> {
        (**self).vertex(id)
    }

    fn edges(&self, vertex: &VertexId, direction: Direction) -> Result<Vec<Edge>> {
        (**self).edges(vertex, direction)
    }
}
