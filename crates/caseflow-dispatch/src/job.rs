//! # Side-Effect Jobs
//!
//! A [`SideEffectJob`] is one unit of post-commit work. The three built-in
//! jobs wrap a collaborator and a [`JobSpec`]; [`Collaborators::jobs_for`]
//! turns an event's planned specs into runnable jobs.

use std::sync::Arc;

use async_trait::async_trait;
use caseflow_core::{CaseRecord, DocumentType, Downstream, JobSpec, Party};

use crate::collaborator::{
    CollaboratorError, DocumentGenerator, EventSubmitter, NotificationSender,
    RecordingCollaborators,
};

/// One post-commit unit of work.
#[async_trait]
pub trait SideEffectJob: Send + Sync {
    /// Identity used in logs and outcomes, e.g. `notify applicant1 (template)`.
    fn id(&self) -> String;

    /// Metric label for the job kind.
    fn kind(&self) -> &'static str;

    /// Run against the committed case.
    async fn run(&self, case: Arc<CaseRecord>) -> Result<(), CollaboratorError>;
}

/// Notify one applicant.
pub struct NotifyJob {
    sender: Arc<dyn NotificationSender>,
    recipient: Party,
    template: &'static str,
}

#[async_trait]
impl SideEffectJob for NotifyJob {
    fn id(&self) -> String {
        JobSpec::notify(self.recipient, self.template).to_string()
    }

    fn kind(&self) -> &'static str {
        "notify"
    }

    async fn run(&self, case: Arc<CaseRecord>) -> Result<(), CollaboratorError> {
        self.sender.send(&case, self.recipient, self.template).await
    }
}

/// Generate a document for the case.
pub struct GenerateDocumentJob {
    generator: Arc<dyn DocumentGenerator>,
    document_type: DocumentType,
    template: &'static str,
}

#[async_trait]
impl SideEffectJob for GenerateDocumentJob {
    fn id(&self) -> String {
        JobSpec::generate(self.document_type, self.template).to_string()
    }

    fn kind(&self) -> &'static str {
        "generate_document"
    }

    async fn run(&self, case: Arc<CaseRecord>) -> Result<(), CollaboratorError> {
        self.generator
            .generate(&case, self.document_type, self.template)
            .await
            .map(|_| ())
    }
}

/// Submit a downstream event.
pub struct TriggerEventJob {
    submitter: Arc<dyn EventSubmitter>,
    downstream: Downstream,
}

#[async_trait]
impl SideEffectJob for TriggerEventJob {
    fn id(&self) -> String {
        JobSpec::TriggerEvent(self.downstream).to_string()
    }

    fn kind(&self) -> &'static str {
        "trigger_event"
    }

    async fn run(&self, case: Arc<CaseRecord>) -> Result<(), CollaboratorError> {
        self.submitter
            .submit(case.id(), self.downstream.event, self.downstream.actor)
            .await
    }
}

/// The three collaborator boundaries, bundled.
#[derive(Clone)]
pub struct Collaborators {
    pub notifications: Arc<dyn NotificationSender>,
    pub documents: Arc<dyn DocumentGenerator>,
    pub events: Arc<dyn EventSubmitter>,
}

impl Collaborators {
    /// Use one in-memory recorder for all three boundaries.
    pub fn recording(recorder: Arc<RecordingCollaborators>) -> Self {
        Self {
            notifications: recorder.clone(),
            documents: recorder.clone(),
            events: recorder,
        }
    }

    /// Runnable job for one spec.
    pub fn job_for(&self, spec: &JobSpec) -> Box<dyn SideEffectJob> {
        match *spec {
            JobSpec::Notify {
                recipient,
                template,
            } => Box::new(NotifyJob {
                sender: self.notifications.clone(),
                recipient,
                template,
            }),
            JobSpec::GenerateDocument {
                document_type,
                template,
            } => Box::new(GenerateDocumentJob {
                generator: self.documents.clone(),
                document_type,
                template,
            }),
            JobSpec::TriggerEvent(downstream) => Box::new(TriggerEventJob {
                submitter: self.events.clone(),
                downstream,
            }),
        }
    }

    /// Runnable jobs for `specs`, in order.
    pub fn jobs_for(&self, specs: &[JobSpec]) -> Vec<Box<dyn SideEffectJob>> {
        specs.iter().map(|spec| self.job_for(spec)).collect()
    }
}
