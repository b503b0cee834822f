//! A module for representing weighted directed graphs given as edge lists.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GraphError, Result};

pub mod topology;

pub type VertexId = i64;
pub type Weight = i64;

/// A directed, weighted edge `from -> to`.
///
/// Serialized as a `[from, to, weight]` triple, the same shape the edge lists use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(VertexId, VertexId, Weight)",
    into = "(VertexId, VertexId, Weight)"
)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}

impl From<(VertexId, VertexId, Weight)> for Edge {
    fn from((from, to, weight): (VertexId, VertexId, Weight)) -> Self {
        Self::new(from, to, weight)
    }
}

impl From<Edge> for (VertexId, VertexId, Weight) {
    fn from(edge: Edge) -> Self {
        (edge.from, edge.to, edge.weight)
    }
}

impl fmt::Display for Edge {
    /// Formats the edge in the `{u, v, w}` input format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.from, self.to, self.weight)
    }
}

/// An adjacency entry: the vertex on the other end and the edge weight.
pub type Adjacent = (VertexId, Weight);

/// An immutable directed graph built from an edge list.
///
/// Every vertex mentioned by an edge is a key of both adjacency maps, with an
/// empty list when it has no outgoing or incoming edges. Parallel edges are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    edges: Vec<Edge>,
    vertices: Vec<VertexId>,
    adjacency: BTreeMap<VertexId, Vec<Adjacent>>,
    rev_adjacency: BTreeMap<VertexId, Vec<Adjacent>>,
}

impl Graph {
    /// Builds forward and reverse adjacency from an edge list.
    ///
    /// Fails on an empty edge list or a negative vertex id.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let edges: Vec<Edge> = edges.into_iter().collect();
        if edges.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut adjacency: BTreeMap<VertexId, Vec<Adjacent>> = BTreeMap::new();
        let mut rev_adjacency: BTreeMap<VertexId, Vec<Adjacent>> = BTreeMap::new();

        for edge in &edges {
            for vertex in [edge.from, edge.to] {
                if vertex < 0 {
                    return Err(GraphError::NegativeVertex(vertex));
                }
                adjacency.entry(vertex).or_default();
                rev_adjacency.entry(vertex).or_default();
            }

            adjacency
                .entry(edge.from)
                .or_default()
                .push((edge.to, edge.weight));
            rev_adjacency
                .entry(edge.to)
                .or_default()
                .push((edge.from, edge.weight));
        }

        let vertices: Vec<VertexId> = adjacency.keys().copied().collect();
        trace!(
            vertices = vertices.len(),
            edges = edges.len(),
            "built adjacency"
        );

        Ok(Self {
            edges,
            vertices,
            adjacency,
            rev_adjacency,
        })
    }

    /// Builds a new graph holding this graph's edges followed by `extra`.
    ///
    /// The adjacency maps are rebuilt from scratch; `self` is left untouched.
    pub fn extended(&self, extra: &[Edge]) -> Result<Self> {
        Self::from_edges(self.edges.iter().chain(extra).copied())
    }

    /// Returns the distinct vertices in ascending order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns the number of vertices in the graph.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Fails with [`GraphError::UnknownVertex`] when `vertex` is absent.
    pub fn require(&self, vertex: VertexId) -> Result<()> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex))
        }
    }

    /// Returns the outgoing `(destination, weight)` pairs of a vertex.
    pub fn out_edges(&self, vertex: VertexId) -> &[Adjacent] {
        self.adjacency.get(&vertex).map_or(&[], |v| v.as_slice())
    }

    /// Returns the incoming `(source, weight)` pairs of a vertex.
    pub fn in_edges(&self, vertex: VertexId) -> &[Adjacent] {
        self.rev_adjacency.get(&vertex).map_or(&[], |v| v.as_slice())
    }

    /// The smallest id strictly greater than every existing vertex.
    ///
    /// Fails with [`GraphError::VertexIdExhausted`] when the largest vertex is `i64::MAX`.
    pub fn next_vertex_id(&self) -> Result<VertexId> {
        match self.vertices.last() {
            Some(&max) => max.checked_add(1).ok_or(GraphError::VertexIdExhausted(max)),
            None => Ok(0),
        }
    }

    /// Returns a string in DOT format representing the graph.
    pub fn dot(&self) -> String {
        self.dot_highlighting(&BTreeSet::new())
    }

    /// Like [`Self::dot`], drawing the given vertices and their incoming edges bold.
    pub fn dot_highlighting(&self, highlighted: &BTreeSet<VertexId>) -> String {
        let mut dot = String::new();
        dot.push_str("digraph G {\n");
        for vertex in &self.vertices {
            if highlighted.contains(vertex) {
                dot.push_str(&format!("    {vertex} [style=bold];\n"));
            } else {
                dot.push_str(&format!("    {vertex};\n"));
            }
        }
        for edge in &self.edges {
            let Edge { from, to, weight } = edge;
            if highlighted.contains(to) {
                dot.push_str(&format!(
                    "    {from} -> {to} [label=\"{weight}\", style=bold];\n"
                ));
            } else {
                dot.push_str(&format!("    {from} -> {to} [label=\"{weight}\"];\n"));
            }
        }
        dot.push('}');
        dot
    }
}
