//! Row types shared by the table and CSV renderers.

use itertools::Itertools;
use serde::Serialize;
use tabled::Tabled;

use crate::analysis::counting::{PathCount, PathCounts};
use crate::analysis::paths::PathRecord;
use crate::graph::{Edge, VertexId, Weight};

fn format_marker(marked: &bool) -> String {
    if *marked { "*".to_string() } else { String::new() }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tabled)]
pub struct CountRow {
    #[tabled(rename = "Vertex")]
    pub vertex: VertexId,
    #[tabled(rename = "Paths")]
    pub paths: PathCount,
    #[tabled(rename = "Most Reachable", display_with = "format_marker")]
    pub most_reachable: bool,
}

impl CountRow {
    pub fn from_counts(counts: &PathCounts) -> Vec<Self> {
        let best = counts.most_reachable().vertex;
        counts
            .iter()
            .map(|(vertex, paths)| Self {
                vertex,
                paths,
                most_reachable: vertex == best,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tabled)]
pub struct PathRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Cost")]
    pub cost: Weight,
}

impl PathRow {
    pub fn from_ranked(paths: &[PathRecord]) -> Vec<Self> {
        paths
            .iter()
            .enumerate()
            .map(|(i, record)| Self {
                rank: i + 1,
                path: record.vertices.iter().join(" -> "),
                cost: record.cost,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tabled)]
pub struct EdgeRow {
    #[tabled(rename = "From")]
    pub from: VertexId,
    #[tabled(rename = "To")]
    pub to: VertexId,
    #[tabled(rename = "Weight")]
    pub weight: Weight,
}

impl From<&Edge> for EdgeRow {
    fn from(edge: &Edge) -> Self {
        Self {
            from: edge.from,
            to: edge.to,
            weight: edge.weight,
        }
    }
}

/// A named value, used to lay out records that are not naturally tabular.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Formats a set of vertices as `{a, b, c}`.
pub fn format_set<'a>(vertices: impl IntoIterator<Item = &'a VertexId>) -> String {
    format!("{{{}}}", vertices.into_iter().join(", "))
}
