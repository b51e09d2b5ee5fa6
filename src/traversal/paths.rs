//! All-paths enumeration.
//!
//! Depth-first, one descent per start vertex. Every branch owns its own
//! copy of the visited set and of the path so far; a child branch is a clone
//! of its parent plus one edge and one vertex. Nothing is shared between
//! branches, so no bookkeeping has to be undone when a branch returns.
//!
//! [`PathIter`] streams results lazily in exactly the order a recursive
//! implementation would emit them: start vertices in order, then each
//! branch before its children, children in the order the source lists
//! their edges.

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::model::{Edge, PathResult, Vertex, VertexId};
use crate::storage::GraphSource;
use crate::{Error, Result};
use super::{fetch_vertex, TraversalSpec};

// ============================================================================
// Branch state
// ============================================================================

/// One DFS branch: the path walked so far and the vertices it has seen.
///
/// Built only by [`PathSearchState::start`] and [`PathSearchState::branch`],
/// so the vertex list is never empty.
#[derive(Debug, Clone)]
pub struct PathSearchState {
    visited: HashSet<VertexId>,
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    depth: usize,
}

impl PathSearchState {
    pub fn start(vertex: Vertex) -> Self {
        let mut visited = HashSet::new();
        visited.insert(vertex.id.clone());
        Self { visited, edges: Vec::new(), vertices: vec![vertex], depth: 0 }
    }

    /// The vertex this branch currently ends at.
    pub fn tip(&self) -> &Vertex {
        self.vertices.last().expect("branch always holds its start vertex")
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_visited(&self, id: &VertexId) -> bool {
        self.visited.contains(id)
    }

    /// Clone this branch and extend the copy by one hop.
    pub fn branch(&self, edge: Edge, target: Vertex, track_visited: bool) -> Self {
        let mut child = self.clone();
        if track_visited {
            child.visited.insert(target.id.clone());
        }
        child.edges.push(edge);
        child.vertices.push(target);
        child.depth += 1;
        child
    }

    pub fn to_path(&self) -> Option<PathResult> {
        PathResult::new(self.vertices.clone(), self.edges.clone())
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters for one enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Branches entered, start vertices included.
    pub branches: usize,
    pub paths_emitted: usize,
    /// Targets skipped because the branch had already visited them.
    pub cycles_skipped: usize,
    /// Targets dropped because their vertex could not be fetched.
    pub missing_vertices: usize,
}

// ============================================================================
// Iterator
// ============================================================================

struct Frame {
    state: PathSearchState,
    /// Filled on first visit, so edges are fetched only after the branch
    /// itself has been emitted.
    candidates: Option<std::vec::IntoIter<(Edge, VertexId)>>,
}

/// Lazy path enumeration. Yields `Err` at most once, then stops.
pub struct PathIter<'a, S> {
    spec: &'a TraversalSpec<S>,
    starts: std::vec::IntoIter<Vertex>,
    frames: Vec<Frame>,
    stats: TraversalStats,
    finished: bool,
}

impl<'a, S: GraphSource> PathIter<'a, S> {
    fn new(starts: Vec<Vertex>, spec: &'a TraversalSpec<S>) -> Self {
        Self {
            spec,
            starts: starts.into_iter(),
            frames: Vec::new(),
            stats: TraversalStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Count the branch, emit it if long enough, and schedule its children
    /// if it may grow further.
    fn enter(&mut self, state: PathSearchState) -> Result<Option<PathResult>> {
        self.stats.branches += 1;
        if let Some(limit) = self.spec.visit_limit() {
            if self.stats.branches > limit {
                return Err(Error::VisitLimitExceeded { limit });
            }
        }

        let (min_length, max_length) = self.spec.bounds();
        let emitted = (state.depth >= min_length).then(|| state.to_path()).flatten();
        if emitted.is_some() {
            self.stats.paths_emitted += 1;
        }
        if state.depth < max_length {
            self.frames.push(Frame { state, candidates: None });
        }
        Ok(emitted)
    }

    fn step(&mut self) -> Result<Option<PathResult>> {
        loop {
            if self.frames.is_empty() {
                let Some(start) = self.starts.next() else {
                    return Ok(None);
                };
                debug!(start = %start.id, direction = ?self.spec.direction(), "enumerating paths");
                if let Some(path) = self.enter(PathSearchState::start(start))? {
                    return Ok(Some(path));
                }
                continue;
            }

            let spec = self.spec;
            let Some(frame) = self.frames.last_mut() else { continue };
            if frame.candidates.is_none() {
                frame.candidates = Some(candidates(spec, frame.state.tip())?.into_iter());
            }

            let Some((edge, target)) = frame.candidates.as_mut().and_then(Iterator::next) else {
                self.frames.pop();
                continue;
            };

            let follow_cycles = spec.follows_cycles();
            if !follow_cycles && frame.state.has_visited(&target) {
                trace!(vertex = %target, "skipping visited vertex");
                self.stats.cycles_skipped += 1;
                continue;
            }

            let Some(vertex) = fetch_vertex(spec.source(), &target)? else {
                trace!(vertex = %target, edge = %edge.id, "dropping branch into missing vertex");
                self.stats.missing_vertices += 1;
                continue;
            };

            let child = frame.state.branch(edge, vertex, !follow_cycles);
            if let Some(path) = self.enter(child)? {
                return Ok(Some(path));
            }
        }
    }
}

impl<S: GraphSource> Iterator for PathIter<'_, S> {
    type Item = Result<PathResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(path)) => Some(Ok(path)),
            Ok(None) => {
                self.finished = true;
                debug!(
                    branches = self.stats.branches,
                    paths = self.stats.paths_emitted,
                    cycles_skipped = self.stats.cycles_skipped,
                    missing_vertices = self.stats.missing_vertices,
                    "path enumeration finished"
                );
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// `(edge, target)` pairs to descend into from `tip`, in source order.
fn candidates<S: GraphSource>(spec: &TraversalSpec<S>, tip: &Vertex) -> Result<Vec<(Edge, VertexId)>> {
    let direction = spec.direction();
    let edges = spec.source().edges(&tip.id, direction)?;
    let mut out = Vec::with_capacity(edges.len());
    for edge in edges {
        let targets: Vec<VertexId> = edge.targets(&tip.id, direction).cloned().collect();
        for target in targets {
            out.push((edge.clone(), target));
        }
    }
    Ok(out)
}

// ============================================================================
// Entry points
// ============================================================================

/// Validate `spec` and return a lazy enumeration from `starts`.
pub fn paths<S: GraphSource>(
    starts: impl IntoIterator<Item = Vertex>,
    spec: &TraversalSpec<S>,
) -> Result<PathIter<'_, S>> {
    spec.validate()?;
    Ok(PathIter::new(starts.into_iter().collect(), spec))
}

/// Every path from each start vertex whose length lies within the spec's
/// bounds, in DFS emission order.
///
/// An invalid spec fails before any lookup. A target vertex that cannot be
/// fetched drops only the branch that leads into it.
pub fn enumerate_paths<S: GraphSource>(
    starts: impl IntoIterator<Item = Vertex>,
    spec: &TraversalSpec<S>,
) -> Result<Vec<PathResult>> {
    paths(starts, spec)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::model::Direction;
    use crate::storage::MemoryGraph;

    fn graph(vertices: &[&str], edges: &[(&str, &str)]) -> MemoryGraph {
        let g = MemoryGraph::new();
        for v in vertices {
            g.add_vertex(Vertex::new(*v)).unwrap();
        }
        for (i, (from, to)) in edges.iter().enumerate() {
            g.add_edge(Edge::new(format!("e/{i}"), *from, *to)).unwrap();
        }
        g
    }

    fn ids(paths: &[PathResult]) -> Vec<Vec<&str>> {
        paths
            .iter()
            .map(|p| p.vertices.iter().map(|v| v.id.0.as_str()).collect())
            .collect()
    }

    fn start(g: &MemoryGraph, id: &str) -> Vertex {
        g.vertex(&VertexId::from(id)).unwrap().unwrap()
    }

    /// Counts every call that reaches the wrapped source.
    struct Counting<'g> {
        inner: &'g MemoryGraph,
        calls: Cell<usize>,
    }

    impl GraphSource for Counting<'_> {
        fn out_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.out_edges(vertex)
        }
        fn in_edges(&self, vertex: &VertexId) -> Result<Vec<Edge>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.in_edges(vertex)
        }
        fn vertex(&self, id: &VertexId) -> Result<Option<Vertex>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.vertex(id)
        }
    }

    #[test]
    fn test_cycle_is_not_revisited() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let spec = TraversalSpec::new(&g, Direction::Outbound).max_length(5);
        let paths = enumerate_paths([start(&g, "a")], &spec).unwrap();
        assert_eq!(ids(&paths), vec![vec!["a"], vec!["a", "b"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_follow_cycles_bounded_by_max_length() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let spec = TraversalSpec::new(&g, Direction::Outbound).max_length(4).follow_cycles(true);
        let paths = enumerate_paths([start(&g, "a")], &spec).unwrap();
        assert_eq!(
            ids(&paths),
            vec![
                vec!["a"],
                vec!["a", "b"],
                vec!["a", "b", "c"],
                vec!["a", "b", "c", "a"],
                vec!["a", "b", "c", "a", "b"],
            ]
        );
    }

    #[test]
    fn test_exact_length() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
        let spec = TraversalSpec::new(&g, Direction::Outbound).length(2);
        let paths = enumerate_paths([start(&g, "a")], &spec).unwrap();
        assert_eq!(ids(&paths), vec![vec!["a", "b", "c"]]);
        assert_eq!(paths[0].edges.len(), 2);
        assert_eq!(paths[0].source.id.0, "a");
        assert_eq!(paths[0].destination.id.0, "c");
    }

    #[test]
    fn test_depth_first_emission_order() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "e")],
        );
        let spec = TraversalSpec::new(&g, Direction::Outbound);
        let paths = enumerate_paths([start(&g, "a"), start(&g, "c")], &spec).unwrap();
        assert_eq!(
            ids(&paths),
            vec![
                vec!["a"],
                vec!["a", "b"],
                vec!["a", "b", "d"],
                vec!["a", "c"],
                vec!["a", "c", "e"],
                vec!["c"],
                vec!["c", "e"],
            ]
        );
    }

    #[test]
    fn test_inbound_and_any() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("c", "b")]);

        let inbound = TraversalSpec::new(&g, Direction::Inbound).min_length(1);
        let paths = enumerate_paths([start(&g, "b")], &inbound).unwrap();
        assert_eq!(ids(&paths), vec![vec!["b", "a"], vec!["b", "c"]]);

        let any = TraversalSpec::new(&g, Direction::Any).min_length(1);
        let paths = enumerate_paths([start(&g, "a")], &any).unwrap();
        assert_eq!(ids(&paths), vec![vec!["a", "b"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_self_loop_is_never_followed() {
        let g = graph(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let spec = TraversalSpec::new(&g, Direction::Any).follow_cycles(true).max_length(1);
        let paths = enumerate_paths([start(&g, "a")], &spec).unwrap();
        assert_eq!(ids(&paths), vec![vec!["a"], vec!["a", "b"]]);
    }

    #[test]
    fn test_missing_vertex_drops_only_its_branch() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("a", "e")],
        );
        g.remove_vertex(&VertexId::from("c"));

        let spec = TraversalSpec::new(&g, Direction::Outbound);
        let mut iter = paths([start(&g, "a")], &spec).unwrap();
        let found: Vec<PathResult> = iter.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(ids(&found), vec![vec!["a"], vec!["a", "b"], vec!["a", "e"]]);
        assert_eq!(iter.stats().missing_vertices, 1);
        assert_eq!(iter.stats().paths_emitted, 3);
    }

    #[test]
    fn test_invalid_spec_fails_before_any_lookup() {
        let g = graph(&["a", "b"], &[("a", "b")]);
        let counting = Counting { inner: &g, calls: Cell::new(0) };
        let spec = TraversalSpec::new(&counting, Direction::Outbound).min_length(3).max_length(1);

        let err = enumerate_paths([Vertex::new("a")], &spec).unwrap_err();
        assert!(matches!(err, Error::InvalidTraversalSpec(_)));
        assert_eq!(counting.calls.get(), 0);
    }

    #[test]
    fn test_visit_limit() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let spec = TraversalSpec::new(&g, Direction::Outbound)
            .follow_cycles(true)
            .max_length(1_000)
            .max_visits(10);

        let results: Vec<Result<PathResult>> = paths([start(&g, "a")], &spec).unwrap().collect();
        assert_eq!(results.len(), 11);
        assert!(results[..10].iter().all(Result::is_ok));
        assert!(matches!(results[10], Err(Error::VisitLimitExceeded { limit: 10 })));
    }

    #[test]
    fn test_branch_state() {
        let root = PathSearchState::start(Vertex::new("a"));
        let child = root.branch(Edge::new("e/0", "a", "b"), Vertex::new("b"), true);

        assert_eq!(root.depth(), 0);
        assert_eq!(root.tip().id.0, "a");
        assert!(!root.has_visited(&VertexId::from("b")));

        assert_eq!(child.depth(), 1);
        assert_eq!(child.tip().id.0, "b");
        assert!(child.has_visited(&VertexId::from("a")));
        assert!(child.has_visited(&VertexId::from("b")));
        assert_eq!(child.edges().len(), 1);

        let path = child.to_path().unwrap();
        assert_eq!(path, PathResult::new(child.vertices().to_vec(), child.edges().to_vec()).unwrap());
        assert_eq!(path.source.id.0, "a");
        assert_eq!(path.destination.id.0, "b");

        let untracked = root.branch(Edge::new("e/1", "a", "c"), Vertex::new("c"), false);
        assert!(!untracked.has_visited(&VertexId::from("c")));
    }

    #[test]
    fn test_branches_do_not_share_visited_sets() {
        // a→b→d and a→c→d: d is reachable through both siblings
        let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let spec = TraversalSpec::new(&g, Direction::Outbound).length(2);
        let paths = enumerate_paths([start(&g, "a")], &spec).unwrap();
        assert_eq!(ids(&paths), vec![vec!["a", "b", "d"], vec!["a", "c", "d"]]);
    }
}
