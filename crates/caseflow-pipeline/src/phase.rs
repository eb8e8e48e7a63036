//! Pipeline phases and the responses each phase returns.

use std::fmt;

use caseflow_core::CaseRecord;
use caseflow_dispatch::DispatchOutcome;
use serde::Serialize;

/// Where one event invocation has got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelinePhase {
    NotStarted,
    PreValidated,
    Transitioned,
    SideEffectsDispatched,
    Rejected,
}

impl PipelinePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::PreValidated => "pre-validated",
            Self::Transitioned => "transitioned",
            Self::SideEffectsDispatched => "side-effects-dispatched",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further phase can follow.
    pub fn is_final(self) -> bool {
        matches!(self, Self::SideEffectsDispatched | Self::Rejected)
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an about-to-start or about-to-submit call hands back to the
/// platform.
///
/// On rejection `record` is the input record, unmodified, and `errors`
/// holds every validation message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackResponse {
    pub phase: PipelinePhase,
    pub record: CaseRecord,
    pub errors: Vec<String>,
}

impl CallbackResponse {
    pub(crate) fn accepted(phase: PipelinePhase, record: CaseRecord) -> Self {
        Self {
            phase,
            record,
            errors: Vec::new(),
        }
    }

    pub(crate) fn rejected(record: CaseRecord, errors: Vec<String>) -> Self {
        Self {
            phase: PipelinePhase::Rejected,
            record,
            errors,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.phase == PipelinePhase::Rejected
    }
}

/// Result of [`PipelineDriver::run`](crate::PipelineDriver::run).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub phase: PipelinePhase,
    /// The committed record, or the stored record if rejected.
    pub record: CaseRecord,
    pub errors: Vec<String>,
    /// One entry per post-commit job, in declaration order.
    pub outcomes: Vec<DispatchOutcome>,
}

impl RunOutcome {
    pub(crate) fn rejected(record: CaseRecord, errors: Vec<String>) -> Self {
        Self {
            phase: PipelinePhase::Rejected,
            record,
            errors,
            outcomes: Vec::new(),
        }
    }

    /// Number of post-commit jobs that failed.
    pub fn failed_jobs(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_phases() {
        assert!(PipelinePhase::Rejected.is_final());
        assert!(PipelinePhase::SideEffectsDispatched.is_final());
        assert!(!PipelinePhase::Transitioned.is_final());
        assert!(!PipelinePhase::NotStarted.is_final());
    }

    #[test]
    fn test_phase_serializes_kebab_case() {
        let json = serde_json::to_string(&PipelinePhase::SideEffectsDispatched).unwrap();
        assert_eq!(json, "\"side-effects-dispatched\"");
        assert_eq!(PipelinePhase::PreValidated.to_string(), "pre-validated");
    }
}
