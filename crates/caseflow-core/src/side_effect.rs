//! # Side-Effect Job Specifications
//!
//! A post-commit planner looks at the committed case and returns a list of
//! [`JobSpec`]s: plain data describing what to send, generate, or trigger.
//! The dispatcher turns each spec into a running job against the
//! collaborator traits. Keeping the plan as data lets the pipeline and
//! tests inspect what an event *would* do without running anything.

use std::fmt;

use serde::Serialize;

use crate::case::DocumentType;
use crate::context::Party;
use crate::role::Role;

/// A downstream event an event may trigger after commit, and the role it
/// is submitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Downstream {
    pub event: &'static str,
    pub actor: Role,
}

/// One side-effect job planned for a committed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobSpec {
    /// Send a notification to one applicant.
    Notify {
        recipient: Party,
        template: &'static str,
    },
    /// Generate a document and attach it to the case.
    GenerateDocument {
        document_type: DocumentType,
        template: &'static str,
    },
    /// Submit a follow-on event for the case.
    TriggerEvent(Downstream),
}

impl JobSpec {
    /// Shorthand for a notification job.
    pub fn notify(recipient: Party, template: &'static str) -> Self {
        Self::Notify {
            recipient,
            template,
        }
    }

    /// Shorthand for a document-generation job.
    pub fn generate(document_type: DocumentType, template: &'static str) -> Self {
        Self::GenerateDocument {
            document_type,
            template,
        }
    }

    /// Shorthand for a downstream-event job.
    pub fn trigger(event: &'static str, actor: Role) -> Self {
        Self::TriggerEvent(Downstream { event, actor })
    }

    /// Metric label for the job kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Notify { .. } => "notify",
            Self::GenerateDocument { .. } => "generate_document",
            Self::TriggerEvent(_) => "trigger_event",
        }
    }
}

impl fmt::Display for JobSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notify {
                recipient,
                template,
            } => write!(f, "notify {recipient} ({template})"),
            Self::GenerateDocument { template, .. } => write!(f, "generate {template}"),
            Self::TriggerEvent(d) => write!(f, "trigger {} as {}", d.event, d.actor),
        }
    }
}
