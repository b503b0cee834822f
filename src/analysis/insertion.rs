//! Planning the insertion of a new vertex that overtakes the most reachable one.
//!
//! The new vertex `V'` is a sink fed by zero-weight edges from a set of
//! *allowed* parents: vertices reachable from the source that share no edge
//! with the current most reachable vertex `V`. Under [`InsertionPolicy::Strict`]
//! `V` itself is excluded as well.
//!
//! Since `V'` has no outgoing edges, its path count is the sum of its parents'
//! counts and every other count is unchanged. The sum over all allowed
//! parents (the *cap*) therefore bounds what `V'` can reach; when the cap does
//! not exceed `count[V]` the plan is [`InsertionPlan::Infeasible`].

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::Analysis;
use super::counting::PathCount;
use super::neighborhood::{reachable_from, undirected_neighbors};
use crate::error::{GraphError, Result};
use crate::graph::{Edge, VertexId};

/// Which vertices may become parents of the new vertex.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InsertionPolicy {
    /// Neither `V` nor its neighbors may be parents.
    #[default]
    Strict,
    /// `V` may be a parent, its neighbors may not.
    Permissive,
}

impl fmt::Display for InsertionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionConfig {
    pub policy: InsertionPolicy,
    /// Id for the new vertex. Defaults to one past the largest existing id.
    pub vertex_id: Option<VertexId>,
}

impl InsertionConfig {
    pub fn with_policy(policy: InsertionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }
}

/// What the planner found out about the original graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Baseline {
    pub policy: InsertionPolicy,
    /// The most reachable vertex `V`.
    pub most_reachable: VertexId,
    /// Path count of `V`.
    pub count: PathCount,
    /// Undirected neighbors of `V`.
    pub neighbors: BTreeSet<VertexId>,
    /// Candidate parents under the active policy.
    pub allowed: BTreeSet<VertexId>,
    /// Sum of path counts over `allowed`.
    pub cap: PathCount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Infeasibility {
    #[serde(flatten)]
    pub baseline: Baseline,
    pub reason: String,
}

/// Result of recounting paths on the augmented graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verification {
    /// The new vertex holds the strictly greatest count.
    Confirmed,
    /// Another vertex matches or beats the new vertex.
    Contested {
        rival: VertexId,
        rival_count: PathCount,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InsertionProposal {
    #[serde(flatten)]
    pub baseline: Baseline,
    /// The new vertex `V'`.
    pub vertex: VertexId,
    /// Chosen parents, largest count first.
    pub parents: Vec<VertexId>,
    /// One zero-weight edge `parent -> V'` per parent.
    pub edges: Vec<Edge>,
    /// Path count of `V'` in the augmented graph.
    pub new_count: PathCount,
    pub verification: Verification,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum InsertionPlan {
    Feasible(InsertionProposal),
    Infeasible(Infeasibility),
}

impl InsertionPlan {
    /// Whether a new vertex was planned and confirmed to be the unique most reachable.
    pub fn is_possible(&self) -> bool {
        matches!(
            self,
            Self::Feasible(InsertionProposal {
                verification: Verification::Confirmed,
                ..
            })
        )
    }

    pub fn baseline(&self) -> &Baseline {
        match self {
            Self::Feasible(proposal) => &proposal.baseline,
            Self::Infeasible(infeasibility) => &infeasibility.baseline,
        }
    }

    pub fn proposal(&self) -> Option<&InsertionProposal> {
        match self {
            Self::Feasible(proposal) => Some(proposal),
            Self::Infeasible(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Feasible(_) => None,
            Self::Infeasible(infeasibility) => Some(&infeasibility.reason),
        }
    }
}

/// Plans the insertion of a new vertex into the analysed graph.
pub fn plan_insertion(analysis: &Analysis, config: &InsertionConfig) -> Result<InsertionPlan> {
    let graph = analysis.graph();
    let counts = analysis.counts();

    match config.vertex_id {
        Some(id) if id < 0 => return Err(GraphError::NegativeVertex(id)),
        Some(id) if graph.contains(id) => return Err(GraphError::VertexInUse(id)),
        _ => {}
    }

    let best = counts.most_reachable();
    let neighbors = undirected_neighbors(graph, best.vertex)?;
    let mut allowed: BTreeSet<VertexId> = reachable_from(graph, counts.source())?
        .difference(&neighbors)
        .copied()
        .collect();
    if config.policy == InsertionPolicy::Strict {
        allowed.remove(&best.vertex);
    }
    let cap = counts.total(allowed.iter().copied());

    debug!(
        v = best.vertex,
        count = best.count,
        ?neighbors,
        ?allowed,
        cap,
        policy = %config.policy,
        "insertion baseline"
    );

    let baseline = Baseline {
        policy: config.policy,
        most_reachable: best.vertex,
        count: best.count,
        neighbors,
        allowed,
        cap,
    };

    if cap <= best.count {
        let reason = format!(
            "cannot make a new vertex the most reachable without sharing an edge with a \
             neighbor of {v}: path count sum {cap} over the allowed parents does not exceed \
             count[{v}] = {count}",
            v = best.vertex,
            count = best.count,
        );
        info!("{reason}");
        return Ok(InsertionPlan::Infeasible(Infeasibility { baseline, reason }));
    }

    let vertex = match config.vertex_id {
        Some(id) => id,
        None => graph.next_vertex_id()?,
    };

    let mut parents = Vec::new();
    let mut accumulated: PathCount = 0;
    for candidate in baseline
        .allowed
        .iter()
        .copied()
        .sorted_by_key(|&v| Reverse(counts.count(v)))
    {
        parents.push(candidate);
        accumulated = accumulated.saturating_add(counts.count(candidate));
        if accumulated > best.count {
            break;
        }
    }

    let edges: Vec<Edge> = parents.iter().map(|&p| Edge::new(p, vertex, 0)).collect();

    let augmented = Analysis::new(graph.extended(&edges)?, counts.source())?;
    let new_counts = augmented.counts();
    let new_count = new_counts.count(vertex);
    let verification = if new_counts.is_strict_maximum(vertex) {
        Verification::Confirmed
    } else {
        let (rival, rival_count) = new_counts
            .iter()
            .filter(|&(v, _)| v != vertex)
            .min_by_key(|&(v, count)| (Reverse(count), v))
            .unwrap_or((best.vertex, best.count));
        warn!(rival, rival_count, new_count, "inserted vertex is not the unique maximum");
        Verification::Contested { rival, rival_count }
    };

    info!(vertex, ?parents, new_count, "planned insertion");
    Ok(InsertionPlan::Feasible(InsertionProposal {
        baseline,
        vertex,
        parents,
        edges,
        new_count,
        verification,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::GraphInput;
    use crate::macros::edges;

    fn reference() -> Analysis {
        let input = GraphInput::reference();
        Analysis::from_edges(input.edges, input.source).unwrap()
    }

    fn diamond() -> Analysis {
        Analysis::from_edges(edges![0 => 1: 0, 0 => 2: 0, 1 => 3: 0, 2 => 3: 0], 0).unwrap()
    }

    #[test]
    fn strict_policy_is_infeasible_on_reference_graph() {
        let plan = plan_insertion(&reference(), &InsertionConfig::default()).unwrap();

        assert!(!plan.is_possible());
        let baseline = plan.baseline();
        assert_eq!(baseline.most_reachable, 8);
        assert_eq!(baseline.count, 10);
        assert_eq!(baseline.neighbors, BTreeSet::from([3, 4, 5, 7]));
        assert_eq!(baseline.allowed, BTreeSet::from([0, 1, 2, 6]));
        assert_eq!(baseline.cap, 4);

        let reason = plan.reason().unwrap();
        assert!(reason.contains("path count sum 4"));
        assert!(reason.contains("count[8] = 10"));
    }

    #[test]
    fn permissive_policy_uses_v_as_parent() {
        let config = InsertionConfig::with_policy(InsertionPolicy::Permissive);
        let plan = plan_insertion(&reference(), &config).unwrap();

        assert!(plan.is_possible());
        let proposal = plan.proposal().unwrap();
        assert_eq!(proposal.vertex, 9);
        assert_eq!(proposal.parents, vec![8, 0]);
        assert_eq!(proposal.edges, vec![Edge::new(8, 9, 0), Edge::new(0, 9, 0)]);
        assert_eq!(proposal.new_count, 11);
        assert_eq!(proposal.verification, Verification::Confirmed);
        assert_eq!(proposal.baseline.allowed, BTreeSet::from([0, 1, 2, 6, 8]));
    }

    #[test]
    fn diamond_is_infeasible_under_strict_policy() {
        let plan = plan_insertion(&diamond(), &InsertionConfig::default()).unwrap();
        let baseline = plan.baseline();

        assert!(!plan.is_possible());
        assert_eq!(baseline.most_reachable, 3);
        assert_eq!(baseline.count, 2);
        assert_eq!(baseline.neighbors, BTreeSet::from([1, 2]));
        assert_eq!(baseline.allowed, BTreeSet::from([0]));
        assert_eq!(baseline.cap, 1);
    }

    #[test]
    fn infeasible_plan_does_not_need_a_fresh_id() {
        let analysis = Analysis::from_edges(
            edges![
                0 => 1: 0,
                0 => 2: 0,
                1 => 9223372036854775807: 0,
                2 => 9223372036854775807: 0,
            ],
            0,
        )
        .unwrap();
        let plan = plan_insertion(&analysis, &InsertionConfig::default()).unwrap();

        assert!(!plan.is_possible());
        assert_eq!(plan.baseline().most_reachable, VertexId::MAX);
        assert_eq!(plan.baseline().cap, 1);
        assert_eq!(plan.baseline().count, 2);
    }

    #[test]
    fn feasible_plan_after_largest_id_needs_explicit_id() {
        let analysis = Analysis::from_edges(
            edges![
                0 => 1: 0,
                0 => 2: 0,
                1 => 9223372036854775807: 0,
                2 => 9223372036854775807: 0,
            ],
            0,
        )
        .unwrap();
        let config = InsertionConfig::with_policy(InsertionPolicy::Permissive);
        assert_eq!(
            plan_insertion(&analysis, &config),
            Err(GraphError::VertexIdExhausted(VertexId::MAX))
        );

        let config = InsertionConfig {
            vertex_id: Some(3),
            ..config
        };
        let plan = plan_insertion(&analysis, &config).unwrap();
        assert!(plan.is_possible());
        assert_eq!(plan.proposal().unwrap().vertex, 3);
    }

    #[test]
    fn diamond_admits_v_as_parent_under_permissive_policy() {
        let config = InsertionConfig::with_policy(InsertionPolicy::Permissive);
        let plan = plan_insertion(&diamond(), &config).unwrap();
        let proposal = plan.proposal().unwrap();

        assert_eq!(proposal.baseline.allowed, BTreeSet::from([0, 3]));
        assert_eq!(proposal.parents, vec![3, 0]);
        assert_eq!(proposal.new_count, 3);
    }

    #[test]
    fn selects_fewest_parents_by_largest_count() {
        // V = 6 (count 5) fed by 4 and 5; 1 and 2 are not neighbors of 6.
        let analysis = Analysis::from_edges(
            edges![
                0 => 1: 0,
                0 => 1: 0,
                0 => 1: 0,
                0 => 2: 0,
                0 => 2: 0,
                0 => 3: 0,
                1 => 4: 0,
                2 => 5: 0,
                4 => 6: 0,
                5 => 6: 0,
            ],
            0,
        )
        .unwrap();
        let counts = analysis.counts();
        assert_eq!(counts.count(4), 3);
        assert_eq!(counts.count(5), 2);
        assert_eq!(counts.count(6), 5);

        let plan = plan_insertion(&analysis, &InsertionConfig::default()).unwrap();
        let proposal = plan.proposal().unwrap();

        assert_eq!(proposal.baseline.most_reachable, 6);
        assert_eq!(proposal.baseline.allowed, BTreeSet::from([0, 1, 2, 3]));
        assert_eq!(proposal.parents, vec![1, 2, 0]);
        assert_eq!(proposal.new_count, 6);
        assert_eq!(proposal.vertex, 7);
        assert!(plan.is_possible());
    }

    #[test]
    fn explicit_vertex_id_is_used() {
        let config = InsertionConfig {
            policy: InsertionPolicy::Permissive,
            vertex_id: Some(42),
        };
        let plan = plan_insertion(&reference(), &config).unwrap();
        let proposal = plan.proposal().unwrap();

        assert_eq!(proposal.vertex, 42);
        assert!(proposal.edges.iter().all(|e| e.to == 42 && e.weight == 0));
    }

    #[test]
    fn explicit_vertex_id_must_be_fresh() {
        let config = InsertionConfig {
            policy: InsertionPolicy::Permissive,
            vertex_id: Some(3),
        };
        assert_eq!(
            plan_insertion(&reference(), &config),
            Err(GraphError::VertexInUse(3))
        );

        let config = InsertionConfig {
            vertex_id: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            plan_insertion(&reference(), &config),
            Err(GraphError::NegativeVertex(-1))
        );
    }

    #[test]
    fn plan_serializes_with_outcome_tag() {
        let plan = plan_insertion(&diamond(), &InsertionConfig::default()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["outcome"], "infeasible");
        assert_eq!(json["cap"], 1);
        assert_eq!(json["most_reachable"], 3);
    }
}
