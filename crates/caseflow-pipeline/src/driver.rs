//! # Pipeline Driver
//!
//! Runs the five event hooks in order across the three platform callbacks.
//!
//! ## About-to-submit ordering
//!
//! 1. Source guard. A state outside the event's sources is a
//!    [`GuardFailure`] and nothing else runs.
//! 2. Every submit guard, messages accumulated. Any message halts in
//!    `Rejected` with the input record unmodified.
//! 3. Target resolution against the validated, pre-mutation data. Fields
//!    a transition mutation clears are read here, before they go.
//! 4. The transition mutation, on a working copy.
//! 5. `state` is set last, on the same working copy that is returned.
//!
//! The driver logs when the acting role holds no trigger grant but does
//! not block: enforcing the access table is the platform's job, and
//! [`PipelineDriver::run`] does it when playing the platform.

use std::sync::Arc;

use caseflow_core::{CaseId, CaseRecord, ExecutionContext, JobSpec, State};
use caseflow_dispatch::{Collaborators, DispatchOutcome, Dispatcher};
use caseflow_state::{EventDefinition, GuardFailure, Registry, StageContext, TransitionError};
use caseflow_validation::ValidationEngine;
use tracing::{debug, field, info, info_span, warn, Instrument};

use crate::error::PipelineError;
use crate::phase::{CallbackResponse, PipelinePhase, RunOutcome};
use crate::store::CaseStore;

fn count(event: &str, outcome: &'static str) {
    metrics::counter!(
        "caseflow_events_total",
        "event" => event.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Drives events through the callback pipeline.
#[derive(Clone)]
pub struct PipelineDriver {
    engine: ValidationEngine,
    dispatcher: Dispatcher,
    collaborators: Collaborators,
}

impl PipelineDriver {
    pub fn new(registry: Arc<Registry>, dispatcher: Dispatcher, collaborators: Collaborators) -> Self {
        Self {
            engine: ValidationEngine::new(registry),
            dispatcher,
            collaborators,
        }
    }

    pub fn registry(&self) -> &Registry {
        self.engine.registry()
    }

    // ─── About-to-start ─────────────────────────────────────────────

    /// Check the event can begin and run its setup mutation.
    ///
    /// The returned record never differs from the input in `state`.
    pub fn about_to_start(
        &self,
        event: &str,
        record: &CaseRecord,
        ctx: &ExecutionContext,
    ) -> Result<CallbackResponse, PipelineError> {
        let _span = info_span!("about_to_start", event, case_id = %record.id(), from = %record.state)
            .entered();
        let def = self.source_guard(event, record)?;
        let errors = self.engine.check_start(event, record, ctx)?;
        if !errors.is_empty() {
            debug!(errors = errors.len(), "start guard refused");
            count(event, "start_refused");
            return Ok(CallbackResponse::rejected(record.clone(), errors));
        }

        let mut working = record.clone();
        if let Some(setup) = def.stages.pre_validate {
            setup(&mut working.data, &stage_context(record, None, ctx));
        }
        Ok(CallbackResponse::accepted(PipelinePhase::PreValidated, working))
    }

    // ─── About-to-submit ────────────────────────────────────────────

    /// Validate and transition. See the module docs for the ordering.
    pub fn about_to_submit(
        &self,
        event: &str,
        record: &CaseRecord,
        ctx: &ExecutionContext,
    ) -> Result<CallbackResponse, PipelineError> {
        let span = info_span!(
            "about_to_submit",
            event,
            case_id = %record.id(),
            from = %record.state,
            to = field::Empty
        );
        let _entered = span.enter();

        let def = self.source_guard(event, record)?;
        if !def.grants.can_trigger(ctx.acting_role) {
            warn!(role = %ctx.acting_role, "acting role holds no trigger grant for event");
        }

        let errors = self.engine.validate(event, record, ctx)?;
        if !errors.is_empty() {
            info!(errors = errors.len(), "rejected");
            count(event, "rejected");
            return Ok(CallbackResponse::rejected(record.clone(), errors));
        }

        let target = match self.registry().transition_for(event, record.state, &record.data) {
            Ok(target) => target,
            Err(e) => {
                count(event, "undeclared_target");
                return Err(e.into());
            }
        };

        let mut working = record.clone();
        if let Some(mutation) = def.stages.transition {
            mutation(&mut working.data, &stage_context(record, Some(target), ctx));
        }
        working.state = target;

        span.record("to", field::display(target));
        info!("transitioned");
        count(event, "transitioned");
        Ok(CallbackResponse::accepted(PipelinePhase::Transitioned, working))
    }

    // ─── Submitted ──────────────────────────────────────────────────

    /// Plan and dispatch the post-commit side effects of `committed`.
    pub async fn submitted(
        &self,
        event: &str,
        committed: &CaseRecord,
        ctx: &ExecutionContext,
    ) -> Result<Vec<DispatchOutcome>, PipelineError> {
        let def = self.registry().event(event)?;
        let specs: Vec<JobSpec> = def
            .stages
            .post_commit
            .map(|plan| plan(committed, ctx))
            .unwrap_or_default();
        if specs.is_empty() {
            return Ok(Vec::new());
        }
        let jobs = self.collaborators.jobs_for(&specs);
        let outcomes = self
            .dispatcher
            .dispatch(committed, jobs)
            .instrument(info_span!("submitted", event, case_id = %committed.id()))
            .await;
        Ok(outcomes)
    }

    // ─── End to end ─────────────────────────────────────────────────

    /// Run `event` on a stored case the way the platform would.
    ///
    /// Refuses roles without a trigger grant, then runs about-to-start and
    /// about-to-submit on the stored snapshot, commits, and dispatches. A
    /// rejection leaves the store untouched and returns the stored record.
    pub async fn run(
        &self,
        store: &dyn CaseStore,
        event: &str,
        case_id: CaseId,
        ctx: &ExecutionContext,
    ) -> Result<RunOutcome, PipelineError> {
        let def = self.registry().event(event)?;
        if !def.grants.can_trigger(ctx.acting_role) {
            count(event, "access_denied");
            return Err(PipelineError::AccessDenied {
                event: event.to_string(),
                role: ctx.acting_role,
            });
        }

        let before = store.load(case_id).await?;
        let started = self.about_to_start(event, &before, ctx)?;
        if started.is_rejected() {
            return Ok(RunOutcome::rejected(before, started.errors));
        }
        let submitted = self.about_to_submit(event, &started.record, ctx)?;
        if submitted.is_rejected() {
            return Ok(RunOutcome::rejected(before, submitted.errors));
        }

        store.commit(&submitted.record, before.state).await?;
        let outcomes = self.submitted(event, &submitted.record, ctx).await?;
        Ok(RunOutcome {
            phase: PipelinePhase::SideEffectsDispatched,
            record: submitted.record,
            errors: Vec::new(),
            outcomes,
        })
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn source_guard(&self, event: &str, record: &CaseRecord) -> Result<&EventDefinition, PipelineError> {
        let def = self.registry().event(event)?;
        if def.transition.sources().contains(record.state) {
            return Ok(def);
        }
        let failure = GuardFailure::state_not_permitted(def.id, record.state);
        warn!(reason = %failure.reason, "guard failure");
        count(event, "guard_failure");
        Err(TransitionError::Guard(failure).into())
    }
}

fn stage_context<'a>(
    record: &CaseRecord,
    target_state: Option<State>,
    ctx: &'a ExecutionContext,
) -> StageContext<'a> {
    StageContext {
        case_id: record.id(),
        current_state: record.state,
        target_state,
        ctx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::{CaseData, Environment, Permission, Role, StateSet, Timestamp};
    use caseflow_dispatch::RecordingCollaborators;
    use caseflow_state::{RegistryBuilder, SourceStates, Transition};

    fn stamp_note(data: &mut CaseData, sc: &StageContext<'_>) {
        data.due_date = Some(sc.ctx.today());
        data.state_override = None;
    }

    fn quote(data: &mut CaseData, _sc: &StageContext<'_>) {
        data.input.note = Some("quoted".into());
    }

    fn read_override(data: &CaseData, current: State) -> State {
        data.state_override.unwrap_or(current)
    }

    fn needs_note(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
        if record.data.input.note.is_none() {
            vec!["Note is required".to_string()]
        } else {
            Vec::new()
        }
    }

    fn driver() -> PipelineDriver {
        let mut builder = RegistryBuilder::new(Environment::Test);
        builder.register(
            EventDefinition::new(
                "move",
                "Move",
                "Move to the stored override",
                Transition::computed(
                    State::Holding,
                    StateSet::of(&[State::Holding, State::AwaitingConditionalOrder]),
                    read_override,
                ),
            )
            .grant(Permission::CreateReadUpdate, &[Role::CaseWorker])
            .pre_validate(quote)
            .guards(&[needs_note])
            .on_transition(stamp_note),
        );
        builder.register(
            EventDefinition::new("noop", "No-op", "Does nothing", Transition::stay(SourceStates::All))
                .grant(Permission::CreateReadUpdate, &[Role::SuperUser]),
        );
        let recorder = Arc::new(RecordingCollaborators::new());
        PipelineDriver::new(
            Arc::new(builder.build().unwrap()),
            Dispatcher::default(),
            Collaborators::recording(recorder),
        )
    }

    fn record(state: State) -> CaseRecord {
        CaseRecord::new(
            CaseId::new(4_111_111_111_111_111).unwrap(),
            state,
            CaseData::default(),
            Timestamp::parse("2026-01-10T09:00:00Z").unwrap(),
        )
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(Role::CaseWorker, Timestamp::parse("2026-03-02T12:00:00Z").unwrap())
    }

    #[test]
    fn test_pre_validate_never_moves_state() {
        let response = driver().about_to_start("move", &record(State::Holding), &ctx()).unwrap();
        assert_eq!(response.phase, PipelinePhase::PreValidated);
        assert_eq!(response.record.state, State::Holding);
        assert_eq!(response.record.data.input.note.as_deref(), Some("quoted"));
    }

    #[test]
    fn test_target_reads_field_before_mutation_clears_it() {
        let mut case = record(State::Holding);
        case.data.input.note = Some("go".into());
        case.data.state_override = Some(State::AwaitingConditionalOrder);
        let response = driver().about_to_submit("move", &case, &ctx()).unwrap();
        assert_eq!(response.record.state, State::AwaitingConditionalOrder);
        assert_eq!(response.record.data.state_override, None);
        assert_eq!(
            response.record.data.due_date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 2)
        );
    }

    #[test]
    fn test_rejection_returns_input_unmodified() {
        let case = record(State::Holding);
        let response = driver().about_to_submit("move", &case, &ctx()).unwrap();
        assert!(response.is_rejected());
        assert_eq!(response.errors, vec!["Note is required"]);
        assert_eq!(response.record, case);
    }

    #[test]
    fn test_state_outside_sources_is_guard_failure() {
        let err = driver()
            .about_to_submit("move", &record(State::Draft), &ctx())
            .unwrap_err();
        let failure = err.guard_failure().unwrap();
        assert_eq!(failure.state, State::Draft);
        assert_eq!(failure.event, "move");
    }

    #[test]
    fn test_unknown_event() {
        let err = driver()
            .about_to_start("nope", &record(State::Draft), &ctx())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transition(TransitionError::UnknownEvent(_))
        ));
    }

    #[test]
    fn test_missing_grant_is_logged_not_blocked() {
        let response = driver().about_to_submit("noop", &record(State::Draft), &ctx()).unwrap();
        assert_eq!(response.phase, PipelinePhase::Transitioned);
        assert_eq!(response.record.state, State::Draft);
    }

    #[tokio::test]
    async fn test_event_without_planner_dispatches_nothing() {
        let outcomes = driver()
            .submitted("noop", &record(State::Draft), &ctx())
            .await
            .unwrap();
        assert!(outcomes.is_empty());
    }
}
