//! Errors that stop a pipeline invocation before it produces a response.
//!
//! Validation failures are not errors here: they come back as a rejected
//! [`CallbackResponse`](crate::CallbackResponse) so every message reaches
//! the caller.

use caseflow_core::Role;
use caseflow_state::{GuardFailure, TransitionError};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Unknown event, state not permitted, or an undeclared computed target.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The acting role holds no trigger-level grant for the event.
    #[error("role {role} may not trigger {event}")]
    AccessDenied { event: String, role: Role },

    #[error("case store: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// The guard failure, if that is what stopped the invocation.
    pub fn guard_failure(&self) -> Option<&GuardFailure> {
        match self {
            Self::Transition(TransitionError::Guard(failure)) => Some(failure),
            _ => None,
        }
    }
}
