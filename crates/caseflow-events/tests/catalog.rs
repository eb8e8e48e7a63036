//! Whole-catalog checks: the production table builds cleanly, every event
//! is reachable by the right roles, and the table is internally connected.

use caseflow_core::{
    CaseData, Environment, InterimApplicationType, Party, Permission, Role, State, StateSet,
};
use caseflow_events::{build_registry, catalog, names};
use caseflow_state::{
    ConfigurationInconsistency, EventDefinition, RegistryBuilder, SourceStates, Transition,
    TransitionGraph, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
};

#[test]
fn test_catalog_builds_in_every_environment() {
    for environment in [
        Environment::Local,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ] {
        let registry = build_registry(environment)
            .unwrap_or_else(|e| panic!("{environment}: {e}"));
        assert_eq!(registry.environment(), environment);
        assert!(!registry.is_empty());
    }
}

#[test]
fn test_catalog_has_no_access_lints() {
    let registry = build_registry(Environment::Local).unwrap();
    let lints = registry.access().lints();
    assert!(lints.is_empty(), "unexpected lints: {lints:?}");
}

#[test]
fn test_test_only_events_are_dropped_in_production() {
    let local = build_registry(Environment::Local).unwrap();
    let production = build_registry(Environment::Production).unwrap();
    assert!(local.get(names::EXPEDITE_HOLDING).is_some());
    assert!(production.get(names::EXPEDITE_HOLDING).is_none());
    assert_eq!(local.len(), production.len() + 1);
}

#[test]
fn test_display_text_fits_platform_limits() {
    for def in catalog() {
        assert!(def.name.chars().count() <= MAX_NAME_LEN, "{}: name too long", def.id);
        assert!(
            def.description.chars().count() <= MAX_DESCRIPTION_LEN,
            "{}: description too long",
            def.id
        );
    }
}

#[test]
fn test_every_event_has_a_trigger_role() {
    let registry = build_registry(Environment::Local).unwrap();
    for def in registry.events() {
        let grants = registry.permissions_for(def.id).unwrap();
        assert!(grants.triggerers().next().is_some(), "{} has no trigger role", def.id);
    }
}

#[test]
fn test_only_superuser_may_change_state() {
    let registry = build_registry(Environment::Production).unwrap();
    let grants = registry.permissions_for(names::CHANGE_STATE).unwrap();
    assert_eq!(
        grants.permission_for(Role::SuperUser),
        Permission::CreateReadUpdateDelete
    );
    assert_eq!(grants.permission_for(Role::CaseWorker), Permission::Read);
    assert_eq!(grants.permission_for(Role::Creator), Permission::None);
}

#[test]
fn test_downstream_referral_is_triggerable_by_system() {
    let registry = build_registry(Environment::Production).unwrap();
    let paid = registry
        .get("citizen-general-application-payment-made")
        .unwrap();
    assert_eq!(paid.downstream.len(), 1);
    let downstream = paid.downstream[0];
    assert_eq!(downstream.event, names::GENERAL_REFERRAL);
    assert!(registry
        .access()
        .can_trigger(downstream.event, downstream.actor));
}

#[test]
fn test_terminal_states_only_left_by_catch_all_events() {
    let registry = build_registry(Environment::Production).unwrap();
    let terminal: StateSet = State::ALL.into_iter().filter(|s| s.is_terminal()).collect();
    for edge in registry.graph().edges() {
        if terminal.contains(edge.from) && edge.from != edge.to {
            assert!(
                edge.event == names::CHANGE_STATE || edge.event == "system-archive-case",
                "{} leaves terminal state {}",
                edge.event,
                edge.from
            );
        }
    }
}

#[test]
fn test_only_externally_created_states_are_unreachable() {
    let events: Vec<EventDefinition> = catalog()
        .into_iter()
        .filter(|def| def.id != names::CHANGE_STATE)
        .collect();
    let graph = TransitionGraph::from_events(&events);
    assert_eq!(
        graph.unreachable_from_draft(),
        StateSet::of(&[State::OfflineDocumentReceived, State::NewPaperCase])
    );
    assert!(graph.is_reachable(State::Draft, State::FinalOrderComplete));
    assert!(graph.is_reachable(State::OfflineDocumentReceived, State::Holding));
}

#[test]
fn test_change_state_reaches_everything() {
    let registry = build_registry(Environment::Production).unwrap();
    assert!(registry.graph().unreachable_from_draft().is_empty());
}

#[test]
fn test_resubmission_is_available_awaiting_applicant1() {
    let registry = build_registry(Environment::Production).unwrap();
    let events = registry
        .graph()
        .events_from(State::AwaitingApplicant1Response);
    assert!(events.contains(&names::RESUBMIT_ANSWERS));
    assert!(events.contains(&"citizen-switch-to-sole"));
}

/// Placeholder event kept only to prove the builder rejects it: display
/// text over the platform limits and nobody able to trigger it.
fn invalid_fixture() -> EventDefinition {
    EventDefinition::new(
        "invalid-placeholder-event",
        "An event name far longer than the platform allows",
        "A description that runs on well past the sixty-five characters the platform permits",
        Transition::stay(SourceStates::All),
    )
    .history_only(&[Role::CaseWorker])
    .test_only()
}

#[test]
fn test_invalid_fixture_is_rejected() {
    let mut builder = RegistryBuilder::new(Environment::Local);
    builder.register_all(catalog()).register(invalid_fixture());
    let err = builder.build().unwrap_err();
    assert_eq!(err.inconsistencies.len(), 3);
    assert!(err.inconsistencies.iter().any(|i| matches!(
        i,
        ConfigurationInconsistency::NameTooLong { max, .. } if *max == MAX_NAME_LEN
    )));
    assert!(err
        .inconsistencies
        .iter()
        .any(|i| matches!(i, ConfigurationInconsistency::DescriptionTooLong { .. })));
    assert!(err.inconsistencies.contains(&ConfigurationInconsistency::NoTriggerRole(
        "invalid-placeholder-event".to_string()
    )));
}

#[test]
fn test_invalid_fixture_never_reaches_production() {
    let mut builder = RegistryBuilder::new(Environment::Production);
    builder.register_all(catalog()).register(invalid_fixture());
    let registry = builder.build().unwrap();
    assert!(registry.get("invalid-placeholder-event").is_none());
}

#[test]
fn test_general_application_target_reads_the_staged_applicant() {
    let registry = build_registry(Environment::Local).unwrap();
    let mut data = CaseData::default();
    let stale = &mut data.applicant1.interim_application_options;
    stale.application_type = Some(InterimApplicationType::GeneralApplication);
    let current = &mut data.applicant2.interim_application_options;
    current.application_type = Some(InterimApplicationType::GeneralApplication);
    current.help_with_fees_reference = Some("HWF-123-ABC".into());

    data.input.general_applicant = Some(Party::Applicant2);
    let target = registry
        .transition_for("citizen-general-application", State::Holding, &data)
        .unwrap();
    assert_eq!(target, State::GeneralApplicationReceived);

    data.input.general_applicant = Some(Party::Applicant1);
    let target = registry
        .transition_for("citizen-general-application", State::Holding, &data)
        .unwrap();
    assert_eq!(target, State::AwaitingGeneralApplicationPayment);
}

#[test]
fn test_exported_names_are_registered() {
    let registry = build_registry(Environment::Local).unwrap();
    for name in [
        names::CHANGE_STATE,
        names::EXPEDITE_HOLDING,
        names::RESUBMIT_ANSWERS,
        names::PAYMENT_MADE,
        names::SUBMIT_CONDITIONAL_ORDER,
        names::APPLY_FOR_FINAL_ORDER,
        names::GENERAL_REFERRAL,
        names::GENERAL_CONSIDERATION,
        names::SUBMIT_AOS,
    ] {
        assert!(registry.get(name).is_some(), "{name} is not registered");
    }
}
