//! Error types for graph construction and analysis.

use crate::graph::VertexId;

/// Errors raised while building or analysing a graph.
///
/// An infeasible insertion is not an error; see
/// [`InsertionPlan`](crate::analysis::insertion::InsertionPlan).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("graph contains a cycle: only {ordered} of {total} vertices could be ordered")]
    Cyclic { ordered: usize, total: usize },

    #[error("graph has no edges")]
    EmptyGraph,

    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),

    #[error("vertex ids must be non-negative, got {0}")]
    NegativeVertex(VertexId),

    #[error("vertex {0} already exists and cannot be used for a new vertex")]
    VertexInUse(VertexId),

    #[error("vertex {0} is the largest possible id, no fresh id follows it")]
    VertexIdExhausted(VertexId),

    #[error("path count into vertex {vertex} does not fit in 64 bits")]
    CountOverflow { vertex: VertexId },

    #[error("cost of a path to vertex {target} does not fit in 64 bits")]
    CostOverflow { target: VertexId },

    #[error(
        "enumerated {enumerated} paths to vertex {target}, but the count table holds {counted}"
    )]
    EnumerationMismatch {
        target: VertexId,
        enumerated: usize,
        counted: u64,
    },
}

impl GraphError {
    /// Whether the error stems from malformed caller input rather than graph structure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyGraph
                | Self::UnknownVertex(_)
                | Self::NegativeVertex(_)
                | Self::VertexInUse(_)
                | Self::VertexIdExhausted(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while loading a graph description.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("syntax error in edge list:\n{0}")]
    Syntax(String),

    #[error("integer out of range: {0}")]
    Integer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::Cyclic {
            ordered: 2,
            total: 5,
        };
        assert!(err.to_string().contains("cycle"));
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn invalid_input_grouping() {
        assert!(GraphError::UnknownVertex(3).is_invalid_input());
        assert!(GraphError::NegativeVertex(-1).is_invalid_input());
        assert!(GraphError::VertexInUse(0).is_invalid_input());
        assert!(GraphError::EmptyGraph.is_invalid_input());
        assert!(
            !GraphError::Cyclic {
                ordered: 0,
                total: 1
            }
            .is_invalid_input()
        );
        assert!(GraphError::VertexIdExhausted(i64::MAX).is_invalid_input());
        assert!(!GraphError::CountOverflow { vertex: 1 }.is_invalid_input());
        assert!(!GraphError::CostOverflow { target: 1 }.is_invalid_input());
    }
}
