//! Rendering analysis results as tables, CSV or JSON.

use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::analysis::counting::{MostReachable, PathCount};
use crate::analysis::insertion::{InsertionPlan, Verification};
use crate::analysis::paths::PathRecord;
use crate::graph::VertexId;

pub mod formatter;
pub mod rows;

use self::formatter::{CsvFormatter, PrettyFormatter};
use self::rows::{CountRow, EdgeRow, FieldRow, PathRow, format_set};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Csv,
    Json,
}

#[derive(Serialize)]
struct CountsSummary<'a> {
    source: VertexId,
    most_reachable: MostReachable,
    counts: &'a std::collections::BTreeMap<VertexId, PathCount>,
}

#[derive(Serialize)]
struct PathsSummary<'a> {
    source: VertexId,
    target: VertexId,
    paths: &'a [PathRecord],
}

/// The path-count table and the most reachable vertex.
pub fn counts_report(analysis: &Analysis, format: OutputFormat) -> anyhow::Result<String> {
    let counts = analysis.counts();
    let best = counts.most_reachable();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&CountsSummary {
            source: analysis.source(),
            most_reachable: best,
            counts: counts.as_map(),
        })?),
        OutputFormat::Csv => CsvFormatter::format(&CountRow::from_counts(counts)),
        OutputFormat::Pretty => {
            let mut buffer = String::new();
            writeln!(
                buffer,
                "{} {} with {} paths from {}",
                "Most reachable:".bold(),
                best.vertex,
                best.count,
                analysis.source()
            )?;
            buffer.push_str(&PrettyFormatter::format(&CountRow::from_counts(counts)));
            buffer.push('\n');
            Ok(buffer)
        }
    }
}

/// Paths to `target`, already ranked by cost.
pub fn paths_report(
    source: VertexId,
    target: VertexId,
    paths: &[PathRecord],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&PathsSummary {
            source,
            target,
            paths,
        })?),
        OutputFormat::Csv => CsvFormatter::format(&PathRow::from_ranked(paths)),
        OutputFormat::Pretty => {
            let mut buffer = String::new();
            writeln!(
                buffer,
                "{} {} paths from {} to {}",
                "Total:".bold(),
                paths.len(),
                source,
                target
            )?;
            buffer.push_str(&PrettyFormatter::format(&PathRow::from_ranked(paths)));
            buffer.push('\n');
            Ok(buffer)
        }
    }
}

fn plan_fields(plan: &InsertionPlan) -> Vec<FieldRow> {
    let baseline = plan.baseline();
    let mut fields = vec![
        FieldRow::new("possible", plan.is_possible()),
        FieldRow::new("policy", baseline.policy),
        FieldRow::new("V", baseline.most_reachable),
        FieldRow::new("paths to V", baseline.count),
        FieldRow::new("N(V)", format_set(&baseline.neighbors)),
        FieldRow::new("allowed", format_set(&baseline.allowed)),
        FieldRow::new("cap", baseline.cap),
    ];

    match plan {
        InsertionPlan::Infeasible(infeasibility) => {
            fields.push(FieldRow::new("reason", &infeasibility.reason));
        }
        InsertionPlan::Feasible(proposal) => {
            fields.push(FieldRow::new("V'", proposal.vertex));
            fields.push(FieldRow::new("parents", format_set(&proposal.parents)));
            fields.push(FieldRow::new("paths to V'", proposal.new_count));
            let verification = match proposal.verification {
                Verification::Confirmed => "confirmed".to_string(),
                Verification::Contested { rival, rival_count } => {
                    format!("contested by {rival} with {rival_count} paths")
                }
            };
            fields.push(FieldRow::new("most reachable after insertion", verification));
        }
    }

    fields
}

/// An insertion plan with its justification.
pub fn plan_report(plan: &InsertionPlan, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Csv => CsvFormatter::format(&plan_fields(plan)),
        OutputFormat::Pretty => {
            let mut buffer = String::new();
            let verdict = match plan {
                InsertionPlan::Infeasible(_) => "Insertion is not possible".red().bold(),
                InsertionPlan::Feasible(_) if plan.is_possible() => {
                    "Insertion is possible".green().bold()
                }
                InsertionPlan::Feasible(_) => {
                    "Insertion planned, but the new vertex is not the unique maximum"
                        .yellow()
                        .bold()
                }
            };
            writeln!(buffer, "{verdict}")?;
            buffer.push_str(&PrettyFormatter::format(&plan_fields(plan)));
            buffer.push('\n');

            if let Some(proposal) = plan.proposal() {
                let edges: Vec<EdgeRow> = proposal.edges.iter().map(EdgeRow::from).collect();
                writeln!(buffer, "{}", "Edges to insert:".bold())?;
                buffer.push_str(&PrettyFormatter::format(&edges));
                buffer.push('\n');
            }

            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::insertion::{InsertionConfig, InsertionPolicy};
    use crate::dataset::GraphInput;

    fn reference() -> Analysis {
        let input = GraphInput::reference();
        Analysis::from_edges(input.edges, input.source).unwrap()
    }

    #[test]
    fn counts_as_json() {
        let json = counts_report(&reference(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["most_reachable"]["vertex"], 8);
        assert_eq!(value["most_reachable"]["count"], 10);
        assert_eq!(value["counts"]["7"], 4);
    }

    #[test]
    fn counts_as_csv() {
        let csv = counts_report(&reference(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("vertex,paths,most_reachable"));
        assert_eq!(lines.next(), Some("0,1,false"));
        assert_eq!(csv.lines().last(), Some("8,10,true"));
    }

    #[test]
    fn pretty_counts_name_the_winner() {
        let text = counts_report(&reference(), OutputFormat::Pretty).unwrap();
        assert!(text.contains("8 with 10 paths from 0"));
        assert!(text.contains("Most Reachable"));
    }

    #[test]
    fn paths_as_csv_are_ranked() {
        let analysis = reference();
        let paths = analysis.ranked_paths(8).unwrap();
        let csv = paths_report(0, 8, &paths, OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("rank,path,cost"));
        assert_eq!(lines.next(), Some("1,0 -> 6 -> 7 -> 8,13"));
        assert_eq!(csv.lines().last(), Some("10,0 -> 5 -> 8,-2"));
    }

    #[test]
    fn infeasible_plan_reports_reason() {
        let plan = reference()
            .plan_insertion(&InsertionConfig::default())
            .unwrap();
        let text = plan_report(&plan, OutputFormat::Pretty).unwrap();

        assert!(text.contains("not possible"));
        assert!(text.contains("{0, 1, 2, 6}"));
        assert!(!text.contains("Edges to insert"));
    }

    #[test]
    fn feasible_plan_lists_edges() {
        let plan = reference()
            .plan_insertion(&InsertionConfig::with_policy(InsertionPolicy::Permissive))
            .unwrap();
        let text = plan_report(&plan, OutputFormat::Pretty).unwrap();
        assert!(text.contains("Edges to insert"));
        assert!(text.contains("confirmed"));

        let csv = plan_report(&plan, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("field,value\n"));
        assert!(csv.contains("parents,\"{8, 0}\""));
    }
}
