//! Counting source-to-vertex paths with a dynamic program over a topological order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};

pub type PathCount = u64;

/// Number of distinct edge sequences from the source to every vertex.
///
/// The source itself counts the trivial path, unreachable vertices count zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathCounts {
    source: VertexId,
    counts: BTreeMap<VertexId, PathCount>,
}

/// The vertex with the greatest path count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MostReachable {
    pub vertex: VertexId,
    pub count: PathCount,
}

/// Runs the path-counting pass.
///
/// `order` must be a topological order of `graph`, as produced by
/// [`topological_order`](crate::graph::topology::topological_order).
pub fn count_paths(graph: &Graph, order: &[VertexId], source: VertexId) -> Result<PathCounts> {
    graph.require(source)?;

    let mut counts: BTreeMap<VertexId, PathCount> =
        graph.vertices().iter().map(|&v| (v, 0)).collect();
    counts.insert(source, 1);

    for &vertex in order {
        let paths_here = counts.get(&vertex).copied().unwrap_or(0);
        if paths_here == 0 {
            continue;
        }

        for &(next, _) in graph.out_edges(vertex) {
            let slot = counts.entry(next).or_default();
            *slot = slot
                .checked_add(paths_here)
                .ok_or(GraphError::CountOverflow { vertex: next })?;
        }
    }

    debug!(?counts, "path counts from {source}");
    Ok(PathCounts { source, counts })
}

impl PathCounts {
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn get(&self, vertex: VertexId) -> Option<PathCount> {
        self.counts.get(&vertex).copied()
    }

    /// Path count of `vertex`, zero when the vertex is unknown.
    pub fn count(&self, vertex: VertexId) -> PathCount {
        self.get(vertex).unwrap_or(0)
    }

    /// Iterates `(vertex, count)` in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, PathCount)> + '_ {
        self.counts.iter().map(|(&v, &c)| (v, c))
    }

    pub fn as_map(&self) -> &BTreeMap<VertexId, PathCount> {
        &self.counts
    }

    /// Sum of counts over `vertices`.
    pub fn total(&self, vertices: impl IntoIterator<Item = VertexId>) -> PathCount {
        vertices
            .into_iter()
            .map(|v| self.count(v))
            .fold(0, PathCount::saturating_add)
    }

    /// The vertex with the greatest count.
    ///
    /// Ties go to the smallest vertex id.
    pub fn most_reachable(&self) -> MostReachable {
        self.iter()
            .min_by_key(|&(vertex, count)| (Reverse(count), vertex))
            .map(|(vertex, count)| MostReachable { vertex, count })
            .unwrap_or(MostReachable {
                vertex: self.source,
                count: 1,
            })
    }

    /// Whether `vertex` holds a count strictly greater than every other vertex.
    pub fn is_strict_maximum(&self, vertex: VertexId) -> bool {
        let own = self.count(vertex);
        self.iter().all(|(other, count)| other == vertex || count < own)
    }
}
