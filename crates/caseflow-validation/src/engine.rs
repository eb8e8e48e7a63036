//! # Validation Engine
//!
//! Runs the guards an event wires and accumulates every message. There is
//! no short-circuit between guards: a case with three independent defects
//! yields (at least) three messages, so the user can fix them in one pass.
//!
//! Start guards (about-to-start) and submit guards (about-to-submit) are
//! run separately; the start guard answers "can this event even begin for
//! this caller", the submit guards answer "is the entered data complete".

use std::sync::Arc;

use caseflow_core::{CaseRecord, ExecutionContext};
use caseflow_state::{Registry, TransitionError};
use tracing::debug;

/// Runs event guards against the registry's event table.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: Arc<Registry>,
}

impl ValidationEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Run every submit guard of `event`; empty means pass.
    pub fn validate(
        &self,
        event: &str,
        record: &CaseRecord,
        ctx: &ExecutionContext,
    ) -> Result<Vec<String>, TransitionError> {
        let def = self.registry.event(event)?;
        let errors: Vec<String> = def
            .stages
            .guards
            .iter()
            .flat_map(|guard| guard(record, ctx))
            .collect();
        if !errors.is_empty() {
            debug!(
                event,
                case_id = %record.id(),
                errors = errors.len(),
                "validation failed"
            );
        }
        Ok(errors)
    }

    /// Run the start guard of `event`, if it has one.
    pub fn check_start(
        &self,
        event: &str,
        record: &CaseRecord,
        ctx: &ExecutionContext,
    ) -> Result<Vec<String>, TransitionError> {
        let def = self.registry.event(event)?;
        Ok(def
            .stages
            .start_guard
            .map(|guard| guard(record, ctx))
            .unwrap_or_default())
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}
