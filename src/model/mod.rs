//! # Value and Graph Model
//!
//! Plain DTOs shared by the comparator, the evaluator and the path
//! enumerator: runtime values, their type weights, and the vertex/edge/path
//! records of the property graph.
//!
//! Design rule: this module is pure data. No I/O, no state.

pub mod value;
pub mod type_weight;
pub mod vertex;
pub mod edge;
pub mod path;

pub use value::{Value, Number, Document, Key};
pub use type_weight::{TypeWeight, classify};
pub use vertex::{Vertex, VertexId};
pub use edge::{Edge, EdgeId, Direction};
pub use path::PathResult;
