//! The `{u, v, w}` edge-list text format.
//!
//! ```text
//! # comment
//! source = 0
//! {0, 1, 2}
//! {1, 2, -4}
//! ```

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::{DEFAULT_SOURCE, GraphInput};
use crate::error::DatasetError;
use crate::graph::{Edge, VertexId};

#[derive(Parser)]
#[grammar = "dataset/edges.pest"]
struct EdgeListParser;

/// Parses an edge list. Without a `source = N` line the source is vertex 0.
pub fn parse_edge_list(text: &str) -> Result<GraphInput, DatasetError> {
    let pairs = EdgeListParser::parse(Rule::file, text)
        .map_err(|err| DatasetError::Syntax(err.to_string()))?;

    let mut input = GraphInput::new(Vec::new(), DEFAULT_SOURCE);
    for pair in pairs.flat_map(|file| file.into_inner()) {
        match pair.as_rule() {
            Rule::edge => {
                let [from, to, weight] = integers(pair)?;
                input.edges.push(Edge::new(from, to, weight));
            }
            Rule::source => {
                let [source] = integers(pair)?;
                input.source = source;
            }
            _ => {}
        }
    }

    Ok(input)
}

fn integers<const N: usize>(pair: Pair<'_, Rule>) -> Result<[VertexId; N], DatasetError> {
    let values = pair
        .into_inner()
        .map(|integer| {
            integer
                .as_str()
                .parse::<VertexId>()
                .map_err(|_| DatasetError::Integer(integer.as_str().to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    values
        .try_into()
        .map_err(|values: Vec<_>| DatasetError::Syntax(format!("expected {N} integers, got {values:?}")))
}

/// Renders edges one per line in the `{u, v, w}` format.
pub fn render_edge_list<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> String {
    edges
        .into_iter()
        .map(|edge| format!("{edge}\n"))
        .collect()
}
