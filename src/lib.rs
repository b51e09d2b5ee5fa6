//! # aql-core: Value Ordering and Graph Paths for a Multi-Model Query Runtime
//!
//! The part of a document/graph query runtime that every operator leans on:
//! how dynamically typed values are classified, compared and combined, and
//! how paths through a vertex/edge graph are enumerated.
//!
//! ## Design Principles
//!
//! 1. **Closed value model**: `Value` is a sum type; adding a variant forces
//!    the classifier, comparator and reconciler to be updated.
//! 2. **Total comparison**: every pair of values has an order; comparison
//!    never fails, so SORT and GROUP can use it unconditionally.
//! 3. **Strict arithmetic**: no implicit casts, no NaN or Infinity results.
//! 4. **Trait-first storage**: `GraphSource` is the contract between the
//!    path enumerator and whatever holds the collections.
//!
//! ## Quick Start
//!
//! ```rust
//! use aql_core::{compare, enumerate_paths, Direction, Edge, MemoryGraph, TraversalSpec, Value, Vertex};
//!
//! # fn example() -> aql_core::Result<()> {
//! // Mixed-type ordering: null < bool < number < string < list < document
//! let mut values = vec![Value::from("x"), Value::from(1), Value::Null];
//! compare::sort_values(&mut values);
//! assert!(values[0].is_null());
//!
//! // Path enumeration
//! let graph = MemoryGraph::new();
//! graph.add_vertex(Vertex::new("people/ada"))?;
//! graph.add_vertex(Vertex::new("people/bob"))?;
//! graph.add_edge(Edge::new("knows/1", "people/ada", "people/bob"))?;
//!
//! let spec = TraversalSpec::new(&graph, Direction::Outbound).max_length(3);
//! let paths = enumerate_paths([Vertex::new("people/ada")], &spec)?;
//! assert_eq!(paths.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod compare;
pub mod eval;
pub mod storage;
pub mod traversal;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Value, Number, Document, Key, TypeWeight, classify,
    Vertex, VertexId, Edge, EdgeId, Direction, PathResult,
};

// ============================================================================
// Re-exports: Evaluation
// ============================================================================

pub use eval::{BinaryOp, UnaryOp, evaluate_binary, evaluate_unary};

// ============================================================================
// Re-exports: Storage and traversal
// ============================================================================

pub use storage::{GraphSource, MemoryGraph};
pub use traversal::{
    TraversalOptions, TraversalSpec, PathIter, PathSearchState, TraversalStats,
    Neighbor, enumerate_paths, paths, edges, neighbors,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid operand for '{operator}': expected {expected}, got {got}")]
    InvalidOperandType {
        operator: &'static str,
        expected: TypeWeight,
        got: TypeWeight,
    },

    #[error("Numeric result of '{operator}' is out of range")]
    NumericOutOfRange { operator: &'static str },

    #[error("Division by zero in '{operator}'")]
    DivisionByZero { operator: &'static str },

    #[error("'{operator}' expects a list, got {got}")]
    ListExpected { operator: &'static str, got: TypeWeight },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid traversal spec: {0}")]
    InvalidTraversalSpec(String),

    #[error("Vertex not found: {0}")]
    MissingVertex(VertexId),

    #[error("Traversal visited more than {limit} branches")]
    VisitLimitExceeded { limit: usize },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
