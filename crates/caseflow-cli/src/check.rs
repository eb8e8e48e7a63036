//! # Check Subcommand
//!
//! Builds the registry the way the service does at startup and reports
//! every configuration inconsistency at once. Access lints and states no
//! event path reaches from `Draft` are reported as warnings.
//!
//! Exit code `2` means the registry would refuse to build.

use anyhow::Result;
use clap::Args;

use caseflow_core::{Environment, WorkflowConfig};
use caseflow_state::{EventDefinition, RegistryBuilder};

/// Arguments for `caseflow check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Treat access lints as failures.
    #[arg(long)]
    pub strict: bool,
}

/// Execute `caseflow check`.
pub fn run_check(args: &CheckArgs, config: &WorkflowConfig) -> Result<u8> {
    let (code, report) = check_events(config.environment, caseflow_events::catalog(), args.strict);
    print!("{report}");
    Ok(code)
}

/// Check `events` as a registry for `environment`; returns the exit code
/// and the report.
pub fn check_events(environment: Environment, events: Vec<EventDefinition>, strict: bool) -> (u8, String) {
    let mut builder = RegistryBuilder::new(environment);
    builder.register_all(events);
    let registry = match builder.build() {
        Ok(registry) => registry,
        Err(e) => {
            let mut report = format!(
                "FAIL: {} configuration inconsistencies ({environment})\n",
                e.inconsistencies.len()
            );
            for inconsistency in &e.inconsistencies {
                report.push_str(&format!("  {inconsistency}\n"));
            }
            return (2, report);
        }
    };

    let mut report = String::new();
    let lints = registry.access().lints();
    for lint in &lints {
        report.push_str(&format!("WARN: {lint}\n"));
    }
    let unreachable = registry.graph().unreachable_from_draft();
    if !unreachable.is_empty() {
        let names: Vec<String> = unreachable.iter().map(|s| s.to_string()).collect();
        report.push_str(&format!("INFO: unreachable from Draft: {}\n", names.join(", ")));
    }
    report.push_str(&format!(
        "OK: {} events registered ({environment})\n",
        registry.len()
    ));
    let code = if strict && !lints.is_empty() { 1 } else { 0 };
    (code, report)
}
