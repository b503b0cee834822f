//! Command-line driver: loads a graph, runs one query and prints the result.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use dagreach::analysis::Analysis;
use dagreach::analysis::insertion::{InsertionConfig, InsertionPlan, InsertionPolicy};
use dagreach::dataset::{GraphInput, render_edge_list};
use dagreach::graph::VertexId;
use dagreach::logging::init_subscriber;
use dagreach::report::{OutputFormat, counts_report, paths_report, plan_report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Path counting and vertex insertion on small DAGs", long_about = None)]
struct Cli {
    /// Graph file: `.json` with `source` and `edges`, otherwise `{u, v, w}` lines.
    /// Defaults to the built-in nine-vertex example.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Source vertex, overriding the one given by the input.
    #[arg(short, long, global = true)]
    source: Option<VertexId>,

    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Log analysis steps to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct InsertionArgs {
    #[arg(long, value_enum, default_value_t = InsertionPolicy::Strict)]
    policy: InsertionPolicy,

    /// Id of the new vertex. Defaults to one past the largest existing id.
    #[arg(long)]
    vertex_id: Option<VertexId>,
}

impl From<InsertionArgs> for InsertionConfig {
    fn from(args: InsertionArgs) -> Self {
        Self {
            policy: args.policy,
            vertex_id: args.vertex_id,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Path counts from the source and the most reachable vertex.
    Counts,
    /// Every path to a vertex, most expensive first.
    Paths {
        /// Target vertex. Defaults to the most reachable one.
        #[arg(short, long)]
        target: Option<VertexId>,
    },
    /// Plan a new vertex that becomes the most reachable.
    Insert(InsertionArgs),
    /// Explain why a strict insertion is impossible, if it is.
    Explain,
    /// Print the edges of a planned insertion in `{u, v, w}` format.
    Emit(InsertionArgs),
    /// Print the graph in DOT format, including a feasible insertion.
    Dot {
        #[arg(long, value_enum)]
        policy: Option<InsertionPolicy>,
    },
}

fn load_input(cli: &Cli) -> anyhow::Result<GraphInput> {
    let mut input = match &cli.input {
        Some(path) => GraphInput::load(path)
            .with_context(|| format!("loading graph from {}", path.display()))?,
        None => GraphInput::reference(),
    };
    if let Some(source) = cli.source {
        input.source = source;
    }
    Ok(input)
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let input = load_input(cli)?;
    let analysis = Analysis::from_edges(input.edges, input.source)
        .context("analysing graph")?;
    info!(
        vertices = analysis.graph().num_vertices(),
        source = analysis.source(),
        "graph ready"
    );

    match &cli.command {
        Command::Counts => {
            print!("{}", counts_report(&analysis, cli.format)?);
        }
        Command::Paths { target } => {
            let target = target.unwrap_or(analysis.most_reachable().vertex);
            let paths = analysis.ranked_paths(target)?;
            print!(
                "{}",
                paths_report(analysis.source(), target, &paths, cli.format)?
            );
        }
        Command::Insert(args) => {
            let plan = analysis.plan_insertion(&InsertionConfig::from(*args))?;
            print!("{}", plan_report(&plan, cli.format)?);
            return Ok(plan_exit_code(&plan));
        }
        Command::Explain => {
            let plan = analysis.plan_insertion(&InsertionConfig::default())?;
            match plan.reason() {
                Some(reason) => println!("{reason}"),
                None => println!(
                    "A new vertex can become the most reachable without touching the neighbors of {}.",
                    plan.baseline().most_reachable
                ),
            }
        }
        Command::Emit(args) => {
            let plan = analysis.plan_insertion(&InsertionConfig::from(*args))?;
            match &plan {
                InsertionPlan::Feasible(proposal) => print!("{}", render_edge_list(&proposal.edges)),
                InsertionPlan::Infeasible(infeasibility) => eprintln!("{}", infeasibility.reason),
            }
            return Ok(plan_exit_code(&plan));
        }
        Command::Dot { policy } => {
            let dot = match policy {
                Some(policy) => {
                    let plan = analysis.plan_insertion(&InsertionConfig::with_policy(*policy))?;
                    match plan.proposal() {
                        Some(proposal) => analysis
                            .graph()
                            .extended(&proposal.edges)?
                            .dot_highlighting(&BTreeSet::from([proposal.vertex])),
                        None => analysis.graph().dot(),
                    }
                }
                None => analysis.graph().dot(),
            };
            println!("{dot}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Infeasible plans exit with 1, plans failing verification with 2.
fn plan_exit_code(plan: &InsertionPlan) -> ExitCode {
    match plan {
        InsertionPlan::Infeasible(_) => ExitCode::from(1),
        InsertionPlan::Feasible(_) if plan.is_possible() => ExitCode::SUCCESS,
        InsertionPlan::Feasible(_) => ExitCode::from(2),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_subscriber(cli.verbose);
    run(&cli)
}
