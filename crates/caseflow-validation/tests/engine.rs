//! The engine runs every guard and keeps every message.

use std::sync::Arc;

use caseflow_core::{
    CaseData, CaseId, CaseRecord, Environment, ExecutionContext, Party, Permission, Role, State,
    Timestamp,
};
use caseflow_state::{EventDefinition, RegistryBuilder, SourceStates, Transition, TransitionError};
use caseflow_validation::guards;
use caseflow_validation::ValidationEngine;

fn engine() -> ValidationEngine {
    let mut builder = RegistryBuilder::new(Environment::Test);
    builder.register(
        EventDefinition::new(
            "submit-application",
            "Submit application",
            "Applicant submits the application",
            Transition::fixed(State::Draft, State::AwaitingPayment),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .start_guard(guards::acting_party_is_party)
        .guards(&[
            guards::basic_case,
            guards::jurisdiction,
            guards::statement_of_truth,
            guards::prayer,
        ]),
    );
    builder.register(
        EventDefinition::new("add-note", "Add note", "Add a note", Transition::stay(SourceStates::All))
            .grant(Permission::CreateReadUpdate, &[Role::CaseWorker]),
    );
    ValidationEngine::new(Arc::new(builder.build().unwrap()))
}

fn empty_case() -> CaseRecord {
    CaseRecord::new(
        CaseId::new(4_111_111_111_111_111).unwrap(),
        State::Draft,
        CaseData::default(),
        Timestamp::parse("2026-01-10T09:00:00Z").unwrap(),
    )
}

fn ctx() -> ExecutionContext {
    ExecutionContext::new(Role::Creator, Timestamp::parse("2026-06-01T12:00:00Z").unwrap())
}

#[test]
fn test_all_guards_run_and_accumulate() {
    let errors = engine().validate("submit-application", &empty_case(), &ctx()).unwrap();
    // basic_case: 4 names + marriage name + marriage date; jurisdiction: 1;
    // statement of truth: 1; prayer: 2.
    assert_eq!(errors.len(), 10);
    assert!(errors.contains(&"JurisdictionConnections cannot be empty or null".to_string()));
    assert!(errors.contains(&"Applicant1StatementOfTruth must be confirmed".to_string()));
}

#[test]
fn test_event_without_guards_passes() {
    assert!(engine().validate("add-note", &empty_case(), &ctx()).unwrap().is_empty());
}

#[test]
fn test_unknown_event() {
    assert!(matches!(
        engine().validate("nope", &empty_case(), &ctx()),
        Err(TransitionError::UnknownEvent(_))
    ));
}

#[test]
fn test_start_guard_checks_party() {
    let engine = engine();
    let case = empty_case();
    assert_eq!(engine.check_start("submit-application", &case, &ctx()).unwrap().len(), 1);
    let as_party = ctx().with_party(Party::Applicant1);
    assert!(engine
        .check_start("submit-application", &case, &as_party)
        .unwrap()
        .is_empty());
    assert!(engine.check_start("add-note", &case, &ctx()).unwrap().is_empty());
}

#[test]
fn test_validation_does_not_touch_record() {
    let case = empty_case();
    let before = serde_json::to_vec(&case).unwrap();
    let _ = engine().validate("submit-application", &case, &ctx()).unwrap();
    assert_eq!(serde_json::to_vec(&case).unwrap(), before);
}
