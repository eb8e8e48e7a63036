//! # ACL Subcommand
//!
//! Prints the permission table for one event: every role with a grant,
//! its platform role code, and its level.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use caseflow_core::{Permission, Role, WorkflowConfig};
use caseflow_state::{AccessGrants, Registry};

use crate::events::ListFormat;
use crate::registry_for;

/// Arguments for `caseflow acl`.
#[derive(Args, Debug)]
pub struct AclArgs {
    /// Event to show grants for.
    #[arg(long)]
    pub event: String,
    #[arg(long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

#[derive(Debug, Serialize)]
struct GrantRow {
    role: Role,
    code: &'static str,
    permission: Permission,
    can_trigger: bool,
}

/// Execute `caseflow acl`.
pub fn run_acl(args: &AclArgs, config: &WorkflowConfig) -> Result<u8> {
    let registry = registry_for(config)?;
    print!("{}", render(&registry, &args.event, args.format)?);
    Ok(0)
}

pub fn render(registry: &Registry, event: &str, format: ListFormat) -> Result<String> {
    let Some(grants) = registry.permissions_for(event) else {
        bail!("unknown event: {event}");
    };
    let rows = rows(grants);
    match format {
        ListFormat::Json => Ok(serde_json::to_string_pretty(&rows)? + "\n"),
        ListFormat::Table => {
            let mut out = format!("{event}\n");
            for row in &rows {
                out.push_str(&format!(
                    "  {:<22} {:<18} {:<5}{}\n",
                    row.role.as_str(),
                    row.code,
                    row.permission.to_string(),
                    if row.can_trigger { "  trigger" } else { "" }
                ));
            }
            Ok(out)
        }
    }
}

fn rows(grants: &AccessGrants) -> Vec<GrantRow> {
    grants
        .iter()
        .map(|(role, permission)| GrantRow {
            role,
            code: role.platform_code(),
            permission,
            can_trigger: permission.can_trigger(),
        })
        .collect()
}
