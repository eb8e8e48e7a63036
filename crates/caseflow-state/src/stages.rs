//! # Pipeline Stage Hooks
//!
//! Every event wires the same five optional hooks; the pipeline driver
//! calls them uniformly.
//!
//! | Hook          | Phase          | May mutate | Output                  |
//! |---------------|----------------|------------|-------------------------|
//! | `start_guard` | about-to-start | no         | errors                  |
//! | `pre_validate`| about-to-start | yes        | (working copy)          |
//! | `guards`      | about-to-submit| no         | errors, accumulated     |
//! | `transition`  | about-to-submit| yes        | (working copy)          |
//! | `post_commit` | submitted      | no         | planned side effects    |
//!
//! Hooks are plain function pointers: they carry no state, so an event
//! table is `Send + Sync` and can be shared behind an `Arc`.

use caseflow_core::{CaseData, CaseId, CaseRecord, ExecutionContext, JobSpec, Party, State};

/// Read-only check over a case. Returns human-readable errors; empty
/// means pass. Guards never mutate.
pub type Guard = fn(&CaseRecord, &ExecutionContext) -> Vec<String>;

/// Data mutation applied to the working copy of a case.
pub type Mutation = fn(&mut CaseData, &StageContext<'_>);

/// Plans the side effects of a committed case.
pub type Planner = fn(&CaseRecord, &ExecutionContext) -> Vec<JobSpec>;

/// What a [`Mutation`] may know besides the data it mutates.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub case_id: CaseId,
    /// State before the event.
    pub current_state: State,
    /// Resolved target; `None` during about-to-start.
    pub target_state: Option<State>,
    pub ctx: &'a ExecutionContext,
}

impl StageContext<'_> {
    /// Which applicant is acting, if any.
    pub fn acting_party(&self) -> Option<Party> {
        self.ctx.acting_party(self.case_id)
    }

    /// The resolved target, or the current state outside about-to-submit.
    pub fn target(&self) -> State {
        self.target_state.unwrap_or(self.current_state)
    }
}

/// The hooks an event runs.
#[derive(Debug, Clone, Default)]
pub struct PipelineStages {
    pub start_guard: Option<Guard>,
    pub pre_validate: Option<Mutation>,
    pub guards: Vec<Guard>,
    pub transition: Option<Mutation>,
    pub post_commit: Option<Planner>,
}

impl PipelineStages {
    /// Whether the event has nothing to run beyond the state change.
    pub fn is_empty(&self) -> bool {
        self.start_guard.is_none()
            && self.pre_validate.is_none()
            && self.guards.is_empty()
            && self.transition.is_none()
            && self.post_commit.is_none()
    }
}
