//! Path analysis of a DAG seen from a single source vertex.
//!
//! [`Analysis`] runs the build, sort and count passes once and answers the
//! three queries on top of them: the most reachable vertex, the ranked
//! paths to a vertex, and the plan for inserting a new most reachable vertex.

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::topology::topological_order;
use crate::graph::{Edge, Graph, VertexId};

pub mod counting;
pub mod insertion;
pub mod neighborhood;
pub mod paths;

use self::counting::{MostReachable, PathCounts, count_paths};
use self::insertion::{InsertionConfig, InsertionPlan, plan_insertion};
use self::paths::{PathRecord, enumerate_paths, rank_by_cost};

/// A graph together with its topological order and path counts from `source`.
#[derive(Clone, Debug)]
pub struct Analysis {
    graph: Graph,
    order: Vec<VertexId>,
    counts: PathCounts,
}

impl Analysis {
    pub fn new(graph: Graph, source: VertexId) -> Result<Self> {
        graph.require(source)?;
        let order = topological_order(&graph)?;
        let counts = count_paths(&graph, &order, source)?;
        Ok(Self {
            graph,
            order,
            counts,
        })
    }

    pub fn from_edges(edges: impl IntoIterator<Item = Edge>, source: VertexId) -> Result<Self> {
        Self::new(Graph::from_edges(edges)?, source)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn source(&self) -> VertexId {
        self.counts.source()
    }

    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    pub fn counts(&self) -> &PathCounts {
        &self.counts
    }

    /// The vertex reachable by the most paths; ties go to the smallest id.
    pub fn most_reachable(&self) -> MostReachable {
        self.counts.most_reachable()
    }

    /// All paths from the source to `target`, most expensive first.
    ///
    /// The number of enumerated paths is checked against the count table.
    pub fn ranked_paths(&self, target: VertexId) -> Result<Vec<PathRecord>> {
        let paths = enumerate_paths(&self.graph, self.source(), target)?;

        let counted = self.counts.count(target);
        if paths.len() as u64 != counted {
            return Err(GraphError::EnumerationMismatch {
                target,
                enumerated: paths.len(),
                counted,
            });
        }

        debug!(target, paths = paths.len(), "ranking paths");
        Ok(rank_by_cost(paths))
    }

    pub fn ranked_paths_to_most_reachable(&self) -> Result<Vec<PathRecord>> {
        self.ranked_paths(self.most_reachable().vertex)
    }

    pub fn plan_insertion(&self, config: &InsertionConfig) -> Result<InsertionPlan> {
        plan_insertion(self, config)
    }
}
