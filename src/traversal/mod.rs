//! # Graph Traversal
//!
//! Depth-bounded path enumeration over a [`GraphSource`], plus the
//! single-hop `edges` / `neighbors` lookups.
//!
//! ## Bounds
//!
//! The number of branches grows exponentially with `max_length` and the
//! average out-degree. `follow_cycles = false` and `max_length` are the
//! built-in bounds; with `follow_cycles = true` on a dense graph a large
//! `max_length` can run for practically forever. Set `max_visits` to cap
//! the number of branches a single enumeration may enter.

pub mod neighbors;
pub mod paths;

use serde::{Deserialize, Serialize};

use crate::model::{Direction, Vertex, VertexId};
use crate::storage::GraphSource;
use crate::{Error, Result};

pub use neighbors::{edges, neighbors, Neighbor};
pub use paths::{enumerate_paths, paths, PathIter, PathSearchState, TraversalStats};

/// Default upper path length when none is configured.
pub const DEFAULT_MAX_LENGTH: usize = 10;

// ============================================================================
// Options (untyped, as received from a query)
// ============================================================================

/// Traversal options in their loosely typed, deserializable form.
///
/// Missing fields take the query language's defaults: outbound, no cycles,
/// lengths `0..=10`, no visit cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalOptions {
    pub direction: String,
    pub follow_cycles: bool,
    pub min_length: i64,
    pub max_length: i64,
    pub max_visits: Option<usize>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            direction: "outbound".into(),
            follow_cycles: false,
            min_length: 0,
            max_length: DEFAULT_MAX_LENGTH as i64,
            max_visits: None,
        }
    }
}

impl TraversalOptions {
    /// Parse options from their JSON form, e.g. `{"direction": "any", "maxLength": 3}`.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// ============================================================================
// TraversalSpec
// ============================================================================

/// Validated, read-only traversal configuration bound to a graph source.
#[derive(Debug, Clone)]
pub struct TraversalSpec<S> {
    source: S,
    direction: Direction,
    min_length: usize,
    max_length: usize,
    follow_cycles: bool,
    max_visits: Option<usize>,
}

impl<S: GraphSource> TraversalSpec<S> {
    /// Spec with default bounds (`0..=10`, no cycles).
    pub fn new(source: S, direction: Direction) -> Self {
        Self {
            source,
            direction,
            min_length: 0,
            max_length: DEFAULT_MAX_LENGTH,
            follow_cycles: false,
            max_visits: None,
        }
    }

    /// Build from loosely typed options. Rejects unknown directions,
    /// negative lengths and `min_length > max_length`.
    pub fn from_options(source: S, options: &TraversalOptions) -> Result<Self> {
        let direction = options.direction.parse()?;
        let length = |name: &str, v: i64| {
            usize::try_from(v).map_err(|_| {
                Error::InvalidTraversalSpec(format!("{name} must not be negative, got {v}"))
            })
        };
        let spec = Self {
            source,
            direction,
            min_length: length("minLength", options.min_length)?,
            max_length: length("maxLength", options.max_length)?,
            follow_cycles: options.follow_cycles,
            max_visits: options.max_visits,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = n;
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = n;
        self
    }

    /// Exact path length: `min_length = max_length = n`.
    pub fn length(self, n: usize) -> Self {
        self.min_length(n).max_length(n)
    }

    pub fn follow_cycles(mut self, follow: bool) -> Self {
        self.follow_cycles = follow;
        self
    }

    pub fn max_visits(mut self, limit: usize) -> Self {
        self.max_visits = Some(limit);
        self
    }

    /// Check the bounds. Called before any traversal work starts.
    pub fn validate(&self) -> Result<()> {
        if self.min_length > self.max_length {
            tracing::warn!(
                min_length = self.min_length,
                max_length = self.max_length,
                "rejecting traversal spec"
            );
            return Err(Error::InvalidTraversalSpec(format!(
                "minLength {} exceeds maxLength {}",
                self.min_length, self.max_length
            )));
        }
        if self.max_visits == Some(0) {
            return Err(Error::InvalidTraversalSpec("maxVisits must be positive".into()));
        }
        Ok(())
    }

    pub fn source(&self) -> &S { &self.source }
    pub fn direction(&self) -> Direction { self.direction }
    pub fn bounds(&self) -> (usize, usize) { (self.min_length, self.max_length) }
    pub fn follows_cycles(&self) -> bool { self.follow_cycles }
    pub fn visit_limit(&self) -> Option<usize> { self.max_visits }
}

/// Fetch a vertex, treating "not found" reported as an error the same as
/// an absent one.
pub(crate) fn fetch_vertex<S: GraphSource>(source: &S, id: &VertexId) -> Result<Option<Vertex>> {
    match source.vertex(id) {
        Err(Error::MissingVertex(_)) => Ok(None),
        other => other,
    }
}
