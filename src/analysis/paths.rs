//! Enumeration and cost ranking of source-to-target paths.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use super::counting::PathCounts;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId, Weight};

/// A path from the source to a target with its accumulated edge weight.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PathRecord {
    pub vertices: Vec<VertexId>,
    pub cost: Weight,
}

impl PathRecord {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Enumerates every path from `source` to `target` by depth-first search.
///
/// Branches stop on arrival at `target`. Parallel edges yield separate
/// records. Exponential in the worst case. Fails with
/// [`GraphError::CostOverflow`] when a path cost leaves the `i64` range.
pub fn enumerate_paths(graph: &Graph, source: VertexId, target: VertexId) -> Result<Vec<PathRecord>> {
    graph.require(source)?;
    graph.require(target)?;

    let mut paths = Vec::new();
    let mut current = vec![source];
    descend(graph, target, source, 0, &mut current, &mut paths)?;

    trace!(count = paths.len(), "enumerated paths {source} -> {target}");
    Ok(paths)
}

fn descend(
    graph: &Graph,
    target: VertexId,
    vertex: VertexId,
    cost: Weight,
    current: &mut Vec<VertexId>,
    paths: &mut Vec<PathRecord>,
) -> Result<()> {
    if vertex == target {
        paths.push(PathRecord {
            vertices: current.clone(),
            cost,
        });
        return Ok(());
    }

    for &(next, weight) in graph.out_edges(vertex) {
        let cost = cost
            .checked_add(weight)
            .ok_or(GraphError::CostOverflow { target })?;
        current.push(next);
        descend(graph, target, next, cost, current, paths)?;
        current.pop();
    }
    Ok(())
}

/// Rebuilds every path to `target` by walking backwards through `counts`.
///
/// Predecessors with a zero count cannot lie on a path from the source and
/// are never visited. Produces the same records as [`enumerate_paths`],
/// possibly in a different order.
pub fn reconstruct_paths(
    graph: &Graph,
    counts: &PathCounts,
    target: VertexId,
) -> Result<Vec<PathRecord>> {
    graph.require(target)?;

    let mut paths = Vec::new();
    if counts.count(target) == 0 {
        return Ok(paths);
    }

    let mut suffix = vec![target];
    ascend(graph, counts, target, 0, &mut suffix, &mut paths)?;
    Ok(paths)
}

fn ascend(
    graph: &Graph,
    counts: &PathCounts,
    vertex: VertexId,
    cost: Weight,
    suffix: &mut Vec<VertexId>,
    paths: &mut Vec<PathRecord>,
) -> Result<()> {
    if vertex == counts.source() {
        paths.push(PathRecord {
            vertices: suffix.iter().rev().copied().collect(),
            cost,
        });
        return Ok(());
    }

    for &(previous, weight) in graph.in_edges(vertex) {
        if counts.count(previous) == 0 {
            continue;
        }
        // suffix[0] is the target
        let cost = cost
            .checked_add(weight)
            .ok_or(GraphError::CostOverflow { target: suffix[0] })?;
        suffix.push(previous);
        ascend(graph, counts, previous, cost, suffix, paths)?;
        suffix.pop();
    }
    Ok(())
}

/// Sorts paths by cost, most expensive first. Equal costs keep their relative order.
pub fn rank_by_cost(paths: Vec<PathRecord>) -> Vec<PathRecord> {
    paths
        .into_iter()
        .sorted_by_key(|path| Reverse(path.cost))
        .collect()
}
