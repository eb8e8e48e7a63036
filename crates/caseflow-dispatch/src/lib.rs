//! # caseflow-dispatch — Post-Commit Side Effects
//!
//! After the platform confirms a commit, an event's post-commit planner
//! produces a list of [`JobSpec`](caseflow_core::JobSpec)s. This crate turns
//! them into [`SideEffectJob`]s bound to the collaborator boundaries and runs
//! them with per-job failure isolation.
//!
//! ## Failure model
//!
//! - A failing job (error, panic, or timeout) is logged with the case id
//!   and job identity and reported as a failed [`DispatchOutcome`].
//! - Later jobs still run. The committed transition is never undone.
//! - Nothing is retried by the core.
//!
//! Outcomes are counted in `caseflow_side_effects_total{job_kind, outcome}`.

pub mod collaborator;
pub mod dispatcher;
pub mod job;

pub use collaborator::{
    CollaboratorCall, CollaboratorError, DocumentGenerator, EventSubmitter, NotificationSender,
    RecordingCollaborators,
};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use job::{Collaborators, GenerateDocumentJob, NotifyJob, SideEffectJob, TriggerEventJob};
