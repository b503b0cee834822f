//! Undirected neighborhoods and forward reachability.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::graph::{Graph, VertexId};

/// Vertices sharing an edge with `vertex` in either direction.
pub fn undirected_neighbors(graph: &Graph, vertex: VertexId) -> Result<BTreeSet<VertexId>> {
    graph.require(vertex)?;

    let outgoing = graph.out_edges(vertex).iter().map(|&(v, _)| v);
    let incoming = graph.in_edges(vertex).iter().map(|&(u, _)| u);
    Ok(outgoing.chain(incoming).collect())
}

/// Vertices reachable from `source` along forward edges, `source` included.
pub fn reachable_from(graph: &Graph, source: VertexId) -> Result<BTreeSet<VertexId>> {
    graph.require(source)?;

    let mut seen = BTreeSet::new();
    let mut stack = vec![source];
    while let Some(vertex) = stack.pop() {
        if !seen.insert(vertex) {
            continue;
        }
        stack.extend(
            graph
                .out_edges(vertex)
                .iter()
                .map(|&(next, _)| next)
                .filter(|next| !seen.contains(next)),
        );
    }

    Ok(seen)
}
