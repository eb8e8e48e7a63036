//! # Access Control Table
//!
//! Per event, a map from [`Role`] to [`Permission`]. The platform consults
//! the table before it lets a caller start an event; the core publishes it
//! and asserts its own invariants over it (every event has a triggering
//! role). Grants for one event are independent of every other event's.
//!
//! ## Lints
//!
//! [`AccessLint`] flags grants that are legal but suspicious: a `system-*`
//! event the system user cannot trigger, a `citizen-*` event no citizen can
//! trigger, or delete rights outside the superuser role. They are reported
//! by `caseflow check`, never enforced.

use std::collections::BTreeMap;
use std::fmt;

use caseflow_core::{Permission, Role};
use serde::Serialize;

/// Role → permission grants for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessGrants(BTreeMap<Role, Permission>);

impl AccessGrants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `level` to each of `roles`.
    ///
    /// A role granted twice keeps the higher level.
    pub fn grant(&mut self, level: Permission, roles: &[Role]) {
        for role in roles {
            let entry = self.0.entry(*role).or_default();
            if level > *entry {
                *entry = level;
            }
        }
    }

    /// Grant read-only (case history) access to each of `roles`.
    pub fn history_only(&mut self, roles: &[Role]) {
        self.grant(Permission::Read, roles);
    }

    /// The level held by `role`; [`Permission::None`] if not granted.
    pub fn permission_for(&self, role: Role) -> Permission {
        self.0.get(&role).copied().unwrap_or_default()
    }

    /// Whether `role` may start the event.
    pub fn can_trigger(&self, role: Role) -> bool {
        self.permission_for(role).can_trigger()
    }

    /// Roles that may start the event.
    pub fn triggerers(&self) -> impl Iterator<Item = Role> + '_ {
        self.0
            .iter()
            .filter(|(_, p)| p.can_trigger())
            .map(|(r, _)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, Permission)> + '_ {
        self.0.iter().map(|(r, p)| (*r, *p))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Suspicious but legal grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "lint", rename_all = "snake_case")]
pub enum AccessLint {
    /// A `system-*` event the system user cannot trigger.
    SystemEventNotSystemTriggerable { event: String },
    /// A `citizen-*` event no citizen role can trigger.
    CitizenEventNotCitizenTriggerable { event: String },
    /// Delete rights held by a role other than the superuser.
    DeleteGranted { event: String, role: Role },
}

impl fmt::Display for AccessLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemEventNotSystemTriggerable { event } => {
                write!(f, "{event}: system event not triggerable by {}", Role::SystemUpdate)
            }
            Self::CitizenEventNotCitizenTriggerable { event } => {
                write!(f, "{event}: citizen event not triggerable by any citizen role")
            }
            Self::DeleteGranted { event, role } => {
                write!(f, "{event}: delete granted to {role}")
            }
        }
    }
}

/// Lint one event's grants.
pub fn lint_grants(event: &str, grants: &AccessGrants) -> Vec<AccessLint> {
    let mut lints = Vec::new();
    if event.starts_with("system-") && !grants.can_trigger(Role::SystemUpdate) {
        lints.push(AccessLint::SystemEventNotSystemTriggerable {
            event: event.to_string(),
        });
    }
    if event.starts_with("citizen-") && !grants.triggerers().any(|r| r.is_citizen()) {
        lints.push(AccessLint::CitizenEventNotCitizenTriggerable {
            event: event.to_string(),
        });
    }
    for (role, level) in grants.iter() {
        if level == Permission::CreateReadUpdateDelete && role != Role::SuperUser {
            lints.push(AccessLint::DeleteGranted {
                event: event.to_string(),
                role,
            });
        }
    }
    lints
}

/// Immutable event → grants table, built with the registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessControlTable(BTreeMap<&'static str, AccessGrants>);

impl AccessControlTable {
    pub(crate) fn insert(&mut self, event: &'static str, grants: AccessGrants) {
        self.0.insert(event, grants);
    }

    /// Grants for `event`; `None` for an unregistered event.
    pub fn permissions_for(&self, event: &str) -> Option<&AccessGrants> {
        self.0.get(event)
    }

    /// Whether `role` may start `event`. Unregistered events are never
    /// permitted.
    pub fn can_trigger(&self, event: &str, role: Role) -> bool {
        self.permissions_for(event)
            .is_some_and(|grants| grants.can_trigger(role))
    }

    /// Lints across every event, in event-name order.
    pub fn lints(&self) -> Vec<AccessLint> {
        self.0
            .iter()
            .flat_map(|(event, grants)| lint_grants(event, grants))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
