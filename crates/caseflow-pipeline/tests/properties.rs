//! Pipeline-wide guarantees checked across the whole catalog.

mod support;

use caseflow_core::{ApplicationType, Role, State};
use caseflow_pipeline::PipelinePhase;
use caseflow_state::STATE_NOT_PERMITTED;
use caseflow_validation::guards::empty_or_null;
use proptest::prelude::*;
use proptest::sample::select;

use support::{complete_case, ctx, driver};

const ROLES: [Role; 4] = [Role::Creator, Role::Applicant2, Role::CaseWorker, Role::SystemUpdate];

#[test]
fn test_guard_failure_leaves_record_byte_identical() {
    let (driver, recorder) = driver();
    let caseworker = ctx(Role::SuperUser);
    let events: Vec<_> = driver.registry().events().map(|e| (e.id, e.transition.sources())).collect();
    for (event, sources) in events {
        for state in State::ALL {
            if sources.contains(state) {
                continue;
            }
            let case = complete_case(state);
            let before = serde_json::to_vec(&case).unwrap();

            let start = driver.about_to_start(event, &case, &caseworker).unwrap_err();
            let submit = driver.about_to_submit(event, &case, &caseworker).unwrap_err();
            for err in [start, submit] {
                let failure = err.guard_failure().unwrap();
                assert_eq!(failure.reason, STATE_NOT_PERMITTED, "{event} from {state}");
                assert_eq!(failure.state, state);
            }
            assert_eq!(serde_json::to_vec(&case).unwrap(), before, "{event} from {state}");
        }
    }
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_independent_defects_each_reported() {
    let (driver, _) = driver();
    let applicant = support::applicant1();
    let complete = complete_case(State::Draft);
    let baseline = driver
        .about_to_submit("citizen-submit-application", &complete, &applicant)
        .unwrap();
    assert_eq!(baseline.phase, PipelinePhase::Transitioned, "{:?}", baseline.errors);

    let mut case = complete;
    case.data.applicant1.first_name = None;
    case.data.application.jurisdiction_connections.clear();
    case.data.application.applicant1_statement_of_truth = false;
    let response = driver
        .about_to_submit("citizen-submit-application", &case, &applicant)
        .unwrap();
    assert!(response.is_rejected());
    assert_eq!(response.errors.len(), 3, "{:?}", response.errors);
    assert!(response.errors.contains(&empty_or_null("Applicant1FirstName")));
    assert!(response.errors.contains(&empty_or_null("JurisdictionConnections")));
    assert_eq!(response.record, case);
}

#[test]
fn test_joint_submission_reports_both_applicants_defects() {
    let (driver, _) = driver();
    let mut case = complete_case(State::Applicant2Approved);
    case.data.application_type = ApplicationType::JointApplication;
    case.data.application.applicant1_statement_of_truth = false;
    let response = driver
        .about_to_submit("citizen-submit-application", &case, &support::applicant1())
        .unwrap();
    assert!(response.errors.len() >= 2, "{:?}", response.errors);
    assert!(response
        .errors
        .iter()
        .any(|e| e.starts_with("Applicant1StatementOfTruth")));
    assert!(response
        .errors
        .iter()
        .any(|e| e.starts_with("Applicant2StatementOfTruth")));
}

fn any_event() -> impl Strategy<Value = &'static str> {
    let (driver, _) = driver();
    let names: Vec<&'static str> = driver.registry().events().map(|e| e.id).collect();
    select(names)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Whatever happens, the returned state is one the event's entry
    /// permits from the prior state, or the prior state itself.
    #[test]
    fn prop_returned_state_follows_the_event_entry(
        event in any_event(),
        state in select(State::ALL.to_vec()),
        role in select(ROLES.to_vec()),
        joint in any::<bool>(),
    ) {
        let (driver, _) = driver();
        let mut case = complete_case(state);
        if joint {
            case.data.application_type = ApplicationType::JointApplication;
        }
        let def = driver.registry().get(event).unwrap();
        match driver.about_to_submit(event, &case, &ctx(role)) {
            Ok(response) if response.phase == PipelinePhase::Transitioned => {
                prop_assert!(def.transition.permits(state, response.record.state));
            }
            Ok(response) => {
                prop_assert_eq!(response.phase, PipelinePhase::Rejected);
                prop_assert_eq!(&response.record, &case);
                prop_assert!(!response.errors.is_empty());
            }
            Err(err) => {
                prop_assert!(err.guard_failure().is_some());
                prop_assert!(!def.transition.sources().contains(state));
            }
        }
    }
}
