//! # Execution Context
//!
//! Everything an event invocation needs that is not on the case record:
//! the deployment environment, the caller's role, a way to tell which
//! applicant the caller is, the clock, and the workflow settings. The
//! context is built by the caller (the platform adapter or the CLI) and
//! passed explicitly; nothing downstream reads process-wide state.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Fees, Timelines, WorkflowConfig};
use crate::error::CaseflowError;
use crate::identity::CaseId;
use crate::role::Role;
use crate::temporal::Timestamp;

// ─── Environment ─────────────────────────────────────────────────────

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Whether test-only events must be withheld.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CaseflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "staging" | "aat" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(CaseflowError::UnknownEnvironment(other.to_string())),
        }
    }
}

// ─── Party ───────────────────────────────────────────────────────────

/// Which applicant on a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Party {
    Applicant1,
    Applicant2,
}

impl Party {
    /// The other applicant.
    pub fn other(self) -> Self {
        match self {
            Self::Applicant1 => Self::Applicant2,
            Self::Applicant2 => Self::Applicant1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applicant1 => "applicant1",
            Self::Applicant2 => "applicant2",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Party {
    type Err = CaseflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant1" | "a1" => Ok(Self::Applicant1),
            "applicant2" | "a2" => Ok(Self::Applicant2),
            other => Err(CaseflowError::UnknownParty(other.to_string())),
        }
    }
}

// ─── Party resolution ────────────────────────────────────────────────

/// Identity boundary: is the current caller applicant 1 or applicant 2 on
/// this case?
///
/// Implemented by the platform adapter, which knows the caller's case
/// roles. `None` means the caller is not a party (caseworkers, the system).
pub trait ActingPartyResolver: Send + Sync {
    fn resolve(&self, case_id: CaseId) -> Option<Party>;
}

/// Resolver that gives the same answer for every case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPartyResolver(pub Option<Party>);

impl ActingPartyResolver for FixedPartyResolver {
    fn resolve(&self, _case_id: CaseId) -> Option<Party> {
        self.0
    }
}

// ─── Context ─────────────────────────────────────────────────────────

/// Ambient inputs to one event invocation.
#[derive(Clone)]
pub struct ExecutionContext {
    pub environment: Environment,
    pub acting_role: Role,
    pub party_resolver: Arc<dyn ActingPartyResolver>,
    /// Time of the invocation. Every "now" and "today" derives from this.
    pub now: Timestamp,
    pub settings: Arc<WorkflowConfig>,
}

impl ExecutionContext {
    /// Context with default settings and no acting party.
    pub fn new(acting_role: Role, now: Timestamp) -> Self {
        Self::from_config(Arc::new(WorkflowConfig::default()), acting_role, now)
    }

    /// Context whose environment comes from `settings`.
    pub fn from_config(settings: Arc<WorkflowConfig>, acting_role: Role, now: Timestamp) -> Self {
        Self {
            environment: settings.environment,
            acting_role,
            party_resolver: Arc::new(FixedPartyResolver(None)),
            now,
            settings,
        }
    }

    /// Replace the party resolver.
    pub fn with_party_resolver(mut self, resolver: Arc<dyn ActingPartyResolver>) -> Self {
        self.party_resolver = resolver;
        self
    }

    /// Shorthand for a resolver that always answers `party`.
    pub fn with_party(self, party: Party) -> Self {
        self.with_party_resolver(Arc::new(FixedPartyResolver(Some(party))))
    }

    /// Replace the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Which applicant the caller is on `case_id`, if any.
    pub fn acting_party(&self, case_id: CaseId) -> Option<Party> {
        self.party_resolver.resolve(case_id)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn timelines(&self) -> &Timelines {
        &self.settings.timelines
    }

    pub fn fees(&self) -> &Fees {
        &self.settings.fees
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("environment", &self.environment)
            .field("acting_role", &self.acting_role)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_id() -> CaseId {
        CaseId::new(4_111_111_111_111_111).unwrap()
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("AAT".parse::<Environment>().unwrap(), Environment::Staging);
        assert!("mars".parse::<Environment>().is_err());
        assert!(Environment::Production.is_production());
        assert!(!Environment::Test.is_production());
    }

    #[test]
    fn test_party_other_and_parse() {
        assert_eq!(Party::Applicant1.other(), Party::Applicant2);
        assert_eq!("a2".parse::<Party>().unwrap(), Party::Applicant2);
        assert_eq!(Party::Applicant1.to_string(), "applicant1");
    }

    #[test]
    fn test_context_defaults_have_no_party() {
        let ctx = ExecutionContext::new(Role::CaseWorker, Timestamp::now());
        assert_eq!(ctx.acting_party(case_id()), None);
        assert_eq!(ctx.environment, Environment::Local);
        assert_eq!(ctx.timelines().applicant_response_days, 14);
    }

    #[test]
    fn test_with_party_resolves() {
        let ctx = ExecutionContext::new(Role::Applicant2, Timestamp::now())
            .with_party(Party::Applicant2);
        assert_eq!(ctx.acting_party(case_id()), Some(Party::Applicant2));
    }

    #[test]
    fn test_environment_follows_config() {
        let config = WorkflowConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        let ctx = ExecutionContext::from_config(Arc::new(config), Role::SystemUpdate, Timestamp::now());
        assert!(ctx.environment.is_production());
    }
}
