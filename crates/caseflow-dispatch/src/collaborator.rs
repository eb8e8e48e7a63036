//! # Collaborator Boundaries
//!
//! The services the core calls after a commit. Each is a narrow async
//! trait; the platform adapter supplies real implementations (GOV.UK
//! Notify, the document assembly service, the platform's event API).
//! [`RecordingCollaborators`] implements all three in memory and is what
//! the CLI and the test suites use.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use caseflow_core::{CaseDocument, CaseId, CaseRecord, DocumentType, Party, Role, Timestamp};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// A collaborator call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The recipient has no usable contact details.
    #[error("no contact details for {0}")]
    NoContactDetails(Party),
}

/// Sends templated notifications to an applicant.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(
        &self,
        case: &CaseRecord,
        recipient: Party,
        template: &str,
    ) -> Result<(), CollaboratorError>;
}

/// Renders a document from a template and stores it against the case.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(
        &self,
        case: &CaseRecord,
        document_type: DocumentType,
        template: &str,
    ) -> Result<CaseDocument, CollaboratorError>;
}

/// Submits a follow-on event for a case. Fire-and-forget from the core's
/// point of view.
#[async_trait]
pub trait EventSubmitter: Send + Sync {
    async fn submit(&self, case_id: CaseId, event: &str, actor: Role)
        -> Result<(), CollaboratorError>;
}

// ─── Recording implementation ────────────────────────────────────────

/// One call received by [`RecordingCollaborators`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum CollaboratorCall {
    Notification {
        case_id: CaseId,
        recipient: Party,
        template: String,
    },
    Document {
        case_id: CaseId,
        document_type: DocumentType,
        template: String,
    },
    Event {
        case_id: CaseId,
        event: String,
        actor: Role,
    },
}

/// In-memory collaborator that logs and records every call.
#[derive(Debug, Default)]
pub struct RecordingCollaborators {
    calls: Mutex<Vec<CollaboratorCall>>,
}

impl RecordingCollaborators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: CollaboratorCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl NotificationSender for RecordingCollaborators {
    async fn send(
        &self,
        case: &CaseRecord,
        recipient: Party,
        template: &str,
    ) -> Result<(), CollaboratorError> {
        info!(case_id = %case.id(), %recipient, template, "notification sent");
        self.record(CollaboratorCall::Notification {
            case_id: case.id(),
            recipient,
            template: template.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl DocumentGenerator for RecordingCollaborators {
    async fn generate(
        &self,
        case: &CaseRecord,
        document_type: DocumentType,
        template: &str,
    ) -> Result<CaseDocument, CollaboratorError> {
        let document = CaseDocument::new(document_type, format!("{template}.pdf"), Timestamp::now());
        info!(case_id = %case.id(), document_id = %document.id, template, "document generated");
        self.record(CollaboratorCall::Document {
            case_id: case.id(),
            document_type,
            template: template.to_string(),
        });
        Ok(document)
    }
}

#[async_trait]
impl EventSubmitter for RecordingCollaborators {
    async fn submit(
        &self,
        case_id: CaseId,
        event: &str,
        actor: Role,
    ) -> Result<(), CollaboratorError> {
        info!(%case_id, event, %actor, "downstream event submitted");
        self.record(CollaboratorCall::Event {
            case_id,
            event: event.to_string(),
            actor,
        });
        Ok(())
    }
}
