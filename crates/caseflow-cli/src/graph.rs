//! # Graph Subcommand
//!
//! Exports the transition graph, one edge per `(from, event, to)`, in DOT
//! (Graphviz) or JSON adjacency format.

use anyhow::Result;
use clap::{Args, ValueEnum};

use caseflow_core::WorkflowConfig;
use caseflow_state::TransitionGraph;

use crate::registry_for;

/// Arguments for `caseflow graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Output format for the graph.
    #[arg(long, value_enum, default_value = "dot")]
    pub format: GraphFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz DOT graph (renderable with `dot -Tsvg`).
    Dot,
    /// JSON adjacency representation.
    Json,
}

/// Execute `caseflow graph`.
pub fn run_graph(args: &GraphArgs, config: &WorkflowConfig) -> Result<u8> {
    let registry = registry_for(config)?;
    let graph = registry.graph();
    eprintln!(
        "Transition graph: {} edges, {} states unreachable from Draft",
        graph.edges().len(),
        graph.unreachable_from_draft().len()
    );
    println!("{}", render(graph, args.format)?);
    Ok(0)
}

pub fn render(graph: &TransitionGraph, format: GraphFormat) -> Result<String> {
    Ok(match format {
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Json => serde_json::to_string_pretty(&graph.to_adjacency_json())?,
    })
}
