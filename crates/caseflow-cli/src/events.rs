//! # Events Subcommand
//!
//! Lists every registered event with its display name, source states, and
//! the roles that may trigger it.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use caseflow_core::{Role, WorkflowConfig};
use caseflow_state::{EventDefinition, Registry};

use crate::registry_for;

/// Arguments for `caseflow events`.
#[derive(Args, Debug)]
pub struct EventsArgs {
    #[arg(long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct EventSummary {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    sources: Vec<String>,
    triggered_by: Vec<Role>,
    test_only: bool,
}

impl From<&EventDefinition> for EventSummary {
    fn from(def: &EventDefinition) -> Self {
        Self {
            id: def.id,
            name: def.name,
            description: def.description,
            sources: def.transition.sources().iter().map(|s| s.to_string()).collect(),
            triggered_by: def.grants.triggerers().collect(),
            test_only: def.test_only,
        }
    }
}

/// Execute `caseflow events`.
pub fn run_events(args: &EventsArgs, config: &WorkflowConfig) -> Result<u8> {
    let registry = registry_for(config)?;
    print!("{}", render(&registry, args.format)?);
    Ok(0)
}

pub fn render(registry: &Registry, format: ListFormat) -> Result<String> {
    let summaries: Vec<EventSummary> = registry.events().map(EventSummary::from).collect();
    match format {
        ListFormat::Json => Ok(serde_json::to_string_pretty(&summaries)? + "\n"),
        ListFormat::Table => {
            let width = summaries.iter().map(|s| s.id.len()).max().unwrap_or(0);
            let mut out = String::new();
            for s in &summaries {
                let roles: Vec<&str> = s.triggered_by.iter().map(|r| r.as_str()).collect();
                let sources = if s.sources.len() > 3 {
                    format!("{} states", s.sources.len())
                } else {
                    s.sources.join(", ")
                };
                out.push_str(&format!(
                    "{:<width$}  {:<30}  from {:<40}  by {}\n",
                    s.id,
                    s.name,
                    sources,
                    roles.join(", ")
                ));
            }
            out.push_str(&format!("{} events ({})\n", summaries.len(), registry.environment()));
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::Environment;

    fn registry() -> Registry {
        caseflow_events::build_registry(Environment::Test).unwrap()
    }

    #[test]
    fn test_table_lists_every_event() {
        let registry = registry();
        let table = render(&registry, ListFormat::Table).unwrap();
        assert_eq!(table.lines().count(), registry.len() + 1);
        assert!(table.contains("citizen-resubmit-answers"));
        assert!(table.ends_with("events (test)\n"));
    }

    #[test]
    fn test_json_is_an_array_of_events() {
        let registry = registry();
        let json: serde_json::Value =
            serde_json::from_str(&render(&registry, ListFormat::Json).unwrap()).unwrap();
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), registry.len());
        let resubmit = events
            .iter()
            .find(|e| e["id"] == "citizen-resubmit-answers")
            .unwrap();
        assert_eq!(resubmit["sources"][0], "AwaitingApplicant1Response");
        assert_eq!(resubmit["triggered_by"][0], "creator");
    }
}
