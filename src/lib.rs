//! Path counting, path ranking and constrained vertex insertion on small DAGs.
//!
//! ```
//! use dagreach::analysis::Analysis;
//! use dagreach::dataset::GraphInput;
//!
//! let input = GraphInput::reference();
//! let analysis = Analysis::from_edges(input.edges, input.source).unwrap();
//! assert_eq!(analysis.most_reachable().vertex, 8);
//! ```

pub mod macros;

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod logging;
pub mod report;
pub mod utils;
