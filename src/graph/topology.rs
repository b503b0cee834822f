//! Topological ordering of a [`Graph`] using Kahn's algorithm.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use super::{Graph, VertexId};
use crate::error::{GraphError, Result};

/// Computes an order in which every edge `u -> v` has `u` before `v`.
///
/// Vertices become available in ascending id order, so the result is
/// deterministic. Fails with [`GraphError::Cyclic`] if some vertices
/// could not be ordered.
pub fn topological_order(graph: &Graph) -> Result<Vec<VertexId>> {
    let mut in_degree: BTreeMap<VertexId, usize> =
        graph.vertices().iter().map(|&v| (v, 0)).collect();
    for edge in graph.edges() {
        *in_degree.entry(edge.to).or_default() += 1;
    }

    let mut queue: VecDeque<VertexId> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&v, _)| v)
        .collect();
    let mut order = Vec::with_capacity(graph.num_vertices());

    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);
        for &(next, _) in graph.out_edges(vertex) {
            let Some(degree) = in_degree.get_mut(&next) else {
                continue;
            };
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < graph.num_vertices() {
        return Err(GraphError::Cyclic {
            ordered: order.len(),
            total: graph.num_vertices(),
        });
    }

    debug!(?order, "topological order");
    Ok(order)
}

/// Checks that `order` is a valid linearization of `graph`.
pub fn is_topological(graph: &Graph, order: &[VertexId]) -> bool {
    let position: BTreeMap<VertexId, usize> =
        order.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    order.len() == graph.num_vertices()
        && graph.edges().iter().all(|edge| {
            matches!(
                (position.get(&edge.from), position.get(&edge.to)),
                (Some(from), Some(to)) if from < to
            )
        })
}
