//! Graph descriptions handed to the analysis: an edge list and a source vertex.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatasetError;
use crate::graph::{Edge, VertexId};
use crate::utils::json::load_json;

pub mod text;

pub use self::text::{parse_edge_list, render_edge_list};

pub const DEFAULT_SOURCE: VertexId = 0;

fn default_source() -> VertexId {
    DEFAULT_SOURCE
}

/// An edge list together with the vertex paths are counted from.
///
/// In JSON, edges are `[from, to, weight]` triples:
/// `{"source": 0, "edges": [[0, 1, 2], [1, 2, -1]]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    #[serde(default = "default_source")]
    pub source: VertexId,
    pub edges: Vec<Edge>,
}

impl GraphInput {
    pub fn new(edges: Vec<Edge>, source: VertexId) -> Self {
        Self { source, edges }
    }

    /// The nine-vertex example graph, analysed from vertex 0.
    pub fn reference() -> Self {
        Self::new(
            crate::edges![
                0 => 1: 2,
                0 => 2: 4,
                0 => 4: -2,
                0 => 5: 1,
                0 => 6: 5,
                2 => 3: 3,
                2 => 4: 2,
                3 => 8: -4,
                4 => 3: 5,
                4 => 8: 1,
                4 => 7: 2,
                5 => 7: -1,
                5 => 8: -3,
                6 => 7: 6,
                7 => 8: 2,
            ],
            DEFAULT_SOURCE,
        )
    }

    /// Loads a graph from a `.json` file, or from an edge list in `{u, v, w}` format otherwise.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let input: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => load_json(path)?,
            _ => parse_edge_list(&std::fs::read_to_string(path)?)?,
        };
        debug!(
            ?path,
            edges = input.edges.len(),
            source = input.source,
            "loaded graph"
        );
        Ok(input)
    }
}

impl Default for GraphInput {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_graph_shape() {
        let input = GraphInput::reference();
        assert_eq!(input.source, 0);
        assert_eq!(input.edges.len(), 15);
        assert_eq!(input.edges[2], Edge::new(0, 4, -2));
        assert_eq!(GraphInput::default(), input);
    }

    #[test]
    fn json_uses_triples_and_default_source() {
        let input: GraphInput = serde_json::from_str(r#"{"edges": [[0, 1, 2], [1, 2, -1]]}"#).unwrap();
        assert_eq!(input.source, DEFAULT_SOURCE);
        assert_eq!(input.edges, vec![Edge::new(0, 1, 2), Edge::new(1, 2, -1)]);

        let json = serde_json::to_string(&GraphInput::new(vec![Edge::new(3, 4, 5)], 3)).unwrap();
        assert_eq!(json, r#"{"source":3,"edges":[[3,4,5]]}"#);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("graph.json");
        crate::utils::json::save_json(&GraphInput::reference(), &json_path).unwrap();
        assert_eq!(GraphInput::load(&json_path).unwrap(), GraphInput::reference());

        let text_path = dir.path().join("graph.txt");
        std::fs::write(&text_path, "source = 1\n{1, 2, 3}\n").unwrap();
        assert_eq!(
            GraphInput::load(&text_path).unwrap(),
            GraphInput::new(vec![Edge::new(1, 2, 3)], 1)
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GraphInput::load("/nonexistent/dagreach/graph.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
