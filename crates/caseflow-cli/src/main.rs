//! # caseflow CLI entry point
//!
//! Parses command-line arguments, loads configuration, initialises logging,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use caseflow_cli::acl::{run_acl, AclArgs};
use caseflow_cli::check::{run_check, CheckArgs};
use caseflow_cli::events::{run_events, EventsArgs};
use caseflow_cli::graph::{run_graph, GraphArgs};
use caseflow_cli::run::{run_case, RunArgs};
use caseflow_cli::{load_config, ENVIRONMENT_VAR};

/// Case workflow core toolchain.
///
/// Inspects the divorce and dissolution event registry and drives single
/// events against local case files.
#[derive(Parser, Debug)]
#[command(name = "caseflow", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered events.
    Events(EventsArgs),

    /// Export the transition graph.
    Graph(GraphArgs),

    /// Show the permission table for one event.
    Acl(AclArgs),

    /// Build the registry and report inconsistencies, lints, and unreachable states.
    Check(CheckArgs),

    /// Run one event against a JSON case file.
    Run(RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let override_env = std::env::var(ENVIRONMENT_VAR).ok();
    let config = match load_config(cli.config.as_deref(), override_env.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };

    // Verbosity flags win over the configured filter.
    let filter = match cli.verbose {
        0 => EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs || config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(environment = %config.environment, "caseflow starting");

    let result = match &cli.command {
        Commands::Events(args) => run_events(args, &config),
        Commands::Graph(args) => run_graph(args, &config),
        Commands::Acl(args) => run_acl(args, &config),
        Commands::Check(args) => run_check(args, &config),
        Commands::Run(args) => run_case(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
