//! # Event Definitions
//!
//! An [`EventDefinition`] is one row of the event table: name, display
//! text, transition, grants, hooks, and declared downstream events. Built
//! with chained setters:
//!
//! ```ignore
//! EventDefinition::new("citizen-withdraw", "Withdraw", "Applicant withdraws the case",
//!         Transition::fixed(SourceStates::AllExcept(TERMINAL), State::Withdrawn))
//!     .grant(Permission::CreateReadUpdate, &[Role::Creator])
//!     .history_only(&[Role::CaseWorker, Role::SuperUser])
//!     .post_commit(plan_withdrawal_notices)
//! ```

use caseflow_core::{Downstream, Permission, Role};

use crate::access::AccessGrants;
use crate::stages::{Guard, Mutation, PipelineStages, Planner};
use crate::transition::Transition;

/// Platform limit on an event's display name.
pub const MAX_NAME_LEN: usize = 30;

/// Platform limit on an event's description.
pub const MAX_DESCRIPTION_LEN: usize = 65;

/// One event in the table.
#[derive(Debug, Clone)]
pub struct EventDefinition {
    /// Unique key, e.g. `citizen-resubmit-answers`.
    pub id: &'static str,
    /// Display name shown in the platform's event picker.
    pub name: &'static str,
    pub description: &'static str,
    pub transition: Transition,
    pub grants: AccessGrants,
    pub stages: PipelineStages,
    /// Events this event submits after commit, and as whom.
    pub downstream: Vec<Downstream>,
    /// Registered outside production only.
    pub test_only: bool,
}

impl EventDefinition {
    pub fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        transition: Transition,
    ) -> Self {
        Self {
            id,
            name,
            description,
            transition,
            grants: AccessGrants::new(),
            stages: PipelineStages::default(),
            downstream: Vec::new(),
            test_only: false,
        }
    }

    pub fn grant(mut self, level: Permission, roles: &[Role]) -> Self {
        self.grants.grant(level, roles);
        self
    }

    pub fn history_only(mut self, roles: &[Role]) -> Self {
        self.grants.history_only(roles);
        self
    }

    pub fn start_guard(mut self, guard: Guard) -> Self {
        self.stages.start_guard = Some(guard);
        self
    }

    pub fn pre_validate(mut self, mutation: Mutation) -> Self {
        self.stages.pre_validate = Some(mutation);
        self
    }

    /// Append validation guards; all of them run on every submit.
    pub fn guards(mut self, guards: &[Guard]) -> Self {
        self.stages.guards.extend_from_slice(guards);
        self
    }

    pub fn on_transition(mut self, mutation: Mutation) -> Self {
        self.stages.transition = Some(mutation);
        self
    }

    pub fn post_commit(mut self, planner: Planner) -> Self {
        self.stages.post_commit = Some(planner);
        self
    }

    /// Declare a downstream event the post-commit planner may trigger.
    pub fn downstream(mut self, event: &'static str, actor: Role) -> Self {
        self.downstream.push(Downstream { event, actor });
        self
    }

    pub fn test_only(mut self) -> Self {
        self.test_only = true;
        self
    }
}
