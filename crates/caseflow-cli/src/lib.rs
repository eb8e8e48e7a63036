//! # caseflow-cli — Command-Line Tool for the Case Workflow Core
//!
//! Provides the `caseflow` binary for inspecting the event registry and
//! driving single events against local case files.
//!
//! ## Subcommands
//!
//! - `caseflow events` — List registered events.
//! - `caseflow graph` — Export the transition graph as DOT or JSON.
//! - `caseflow acl` — Show the permission table for one event.
//! - `caseflow check` — Build the registry and report every inconsistency,
//!   access lint, and unreachable state.
//! - `caseflow run` — Run one event through the full pipeline against a
//!   JSON case file, with recording collaborators.
//!
//! ```bash
//! caseflow graph --format dot | dot -Tsvg > states.svg
//! caseflow run --event citizen-resubmit-answers --case case.json --role creator --party a1
//! ```
//!
//! ## Exit codes
//!
//! `0` success, `1` failure (including a rejected event), `2` registry
//! inconsistencies found by `check`.

pub mod acl;
pub mod check;
pub mod events;
pub mod graph;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use caseflow_core::{Environment, WorkflowConfig};
use caseflow_state::Registry;

/// Environment variable that overrides the configured environment.
pub const ENVIRONMENT_VAR: &str = "CASEFLOW_ENVIRONMENT";

/// Load the config file, or defaults when no path is given, then apply an
/// environment override.
pub fn load_config(path: Option<&Path>, environment_override: Option<&str>) -> Result<WorkflowConfig> {
    let mut config = match path {
        Some(path) => WorkflowConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => WorkflowConfig::default(),
    };
    if let Some(name) = environment_override {
        config.environment = name
            .parse::<Environment>()
            .with_context(|| format!("invalid {ENVIRONMENT_VAR}"))?;
    }
    Ok(config)
}

/// Build the registry for the configured environment.
pub fn registry_for(config: &WorkflowConfig) -> Result<Registry> {
    caseflow_events::build_registry(config.environment)
        .with_context(|| format!("failed to build registry for {}", config.environment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, WorkflowConfig::default());
    }

    #[test]
    fn test_environment_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caseflow.yaml");
        std::fs::write(&path, "environment: staging\n").unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        let config = load_config(Some(&path), Some("production")).unwrap();
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let err = load_config(None, Some("moon")).unwrap_err();
        assert!(format!("{err:#}").contains(ENVIRONMENT_VAR));
    }

    #[test]
    fn test_missing_config_file_names_path() {
        let err = load_config(Some(Path::new("/nonexistent/caseflow.yaml")), None).unwrap_err();
        assert!(format!("{err:#}").contains("caseflow.yaml"));
    }

    #[test]
    fn test_production_registry_builds() {
        let config = load_config(None, Some("production")).unwrap();
        let registry = registry_for(&config).unwrap();
        assert!(registry.get(caseflow_events::names::EXPEDITE_HOLDING).is_none());
    }
}
