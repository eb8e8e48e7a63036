//! # Run Subcommand
//!
//! Drives one event through the full pipeline against a case stored as a
//! JSON file. Collaborators record and log their calls instead of sending
//! anything, so the command is safe to point at real case exports.
//!
//! On success the committed record is written to `--out` (if given) and
//! the new state and side-effect outcomes are printed. On rejection every
//! validation message is printed and nothing is written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use caseflow_core::{CaseRecord, ExecutionContext, Party, Role, Timestamp, WorkflowConfig};
use caseflow_dispatch::{Collaborators, Dispatcher, RecordingCollaborators};
use caseflow_pipeline::{InMemoryCaseStore, PipelineDriver, PipelinePhase, RunOutcome};

use crate::registry_for;

/// Arguments for `caseflow run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Event to run.
    #[arg(long)]
    pub event: String,
    /// Case record as JSON.
    #[arg(long)]
    pub case: PathBuf,
    /// Role of the caller: `creator`, `case-worker`, ... or a platform role code.
    #[arg(long)]
    pub role: Role,
    /// Which applicant the caller is on the case (`a1` or `a2`).
    #[arg(long)]
    pub party: Option<Party>,
    /// Where to write the committed record.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Invocation time (RFC 3339, UTC). Defaults to now.
    #[arg(long, value_parser = Timestamp::parse)]
    pub now: Option<Timestamp>,
}

/// Execute `caseflow run`.
pub fn run_case(args: &RunArgs, config: &WorkflowConfig) -> Result<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(drive(args, config))?;
    print!("{}", report(&args.event, &outcome));

    if outcome.phase == PipelinePhase::Rejected {
        return Ok(1);
    }
    if let Some(out) = &args.out {
        write_case(out, &outcome.record)?;
    }
    Ok(0)
}

async fn drive(args: &RunArgs, config: &WorkflowConfig) -> Result<RunOutcome> {
    let record = read_case(&args.case)?;
    let case_id = record.id();
    let store = InMemoryCaseStore::with_cases([record]);

    let registry = Arc::new(registry_for(config)?);
    let recorder = Arc::new(RecordingCollaborators::new());
    let driver = PipelineDriver::new(
        registry,
        Dispatcher::new(&config.dispatch),
        Collaborators::recording(recorder),
    );

    let mut ctx = ExecutionContext::from_config(
        Arc::new(config.clone()),
        args.role,
        args.now.unwrap_or_else(Timestamp::now),
    );
    if let Some(party) = args.party {
        ctx = ctx.with_party(party);
    }

    tracing::debug!(event = %args.event, %case_id, role = %args.role, "running event");
    driver
        .run(&store, &args.event, case_id, &ctx)
        .await
        .with_context(|| format!("{} on case {case_id}", args.event))
}

fn read_case(path: &Path) -> Result<CaseRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read case file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid case record in {}", path.display()))
}

fn write_case(path: &Path, record: &CaseRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write case file: {}", path.display()))
}

fn report(event: &str, outcome: &RunOutcome) -> String {
    let mut out = String::new();
    if outcome.phase == PipelinePhase::Rejected {
        out.push_str(&format!(
            "REJECTED: {event} ({} errors, case stays in {})\n",
            outcome.errors.len(),
            outcome.record.state
        ));
        for error in &outcome.errors {
            out.push_str(&format!("  - {error}\n"));
        }
        return out;
    }
    out.push_str(&format!("OK: {event} → {}\n", outcome.record.state));
    for job in &outcome.outcomes {
        match &job.reason {
            Some(reason) => out.push_str(&format!("  FAILED {}: {reason}\n", job.job)),
            None => out.push_str(&format!("  ok     {}\n", job.job)),
        }
    }
    out
}
