//! Shared fixtures for the pipeline integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use caseflow_core::{
    Applicant, ApplicationType, CaseData, CaseId, CaseRecord, Environment, ExecutionContext, Party,
    Payment, PaymentPurpose, PaymentStatus, Role, State, Timestamp,
};
use caseflow_dispatch::{Collaborators, Dispatcher, RecordingCollaborators};
use caseflow_events::build_registry;
use caseflow_pipeline::PipelineDriver;
use chrono::NaiveDate;

pub fn case_id() -> CaseId {
    CaseId::new(4_111_111_111_111_111).unwrap()
}

/// A sole case with every basic field filled in.
pub fn complete_case(state: State) -> CaseRecord {
    let mut data = CaseData::default();
    data.applicant1 = Applicant {
        first_name: Some("Alex".into()),
        last_name: Some("Jones".into()),
        email: Some("alex.jones@example.com".into()),
        postcode: Some("SW1A 1AA".into()),
        ..Default::default()
    };
    data.applicant2 = Applicant {
        first_name: Some("Sam".into()),
        last_name: Some("Jones".into()),
        email: Some("sam.jones@example.com".into()),
        address: Some("1 High Street, London".into()),
        ..Default::default()
    };
    let app = &mut data.application;
    app.marriage.date = NaiveDate::from_ymd_opt(2015, 6, 20);
    app.marriage.applicant1_name = Some("Alex Jones".into());
    app.marriage.applicant2_name = Some("Sam Jones".into());
    app.jurisdiction_connections = vec!["A".into(), "C".into()];
    app.applicant1_statement_of_truth = true;
    app.applicant1_prayer = true;
    app.applicant1_screen_has_marriage_broken = true;
    app.applicant1_knows_applicant2_address = true;
    CaseRecord::new(
        case_id(),
        state,
        data,
        Timestamp::parse("2026-01-10T09:00:00Z").unwrap(),
    )
}

pub fn joint_case(state: State) -> CaseRecord {
    let mut case = complete_case(state);
    case.data.application_type = ApplicationType::JointApplication;
    case
}

pub fn now() -> Timestamp {
    Timestamp::parse("2026-06-01T12:00:00Z").unwrap()
}

pub fn ctx(role: Role) -> ExecutionContext {
    ExecutionContext::new(role, now()).with_environment(Environment::Test)
}

pub fn applicant1() -> ExecutionContext {
    ctx(Role::Creator).with_party(Party::Applicant1)
}

pub fn payment(reference: &str, status: PaymentStatus) -> Payment {
    Payment {
        reference: reference.into(),
        purpose: PaymentPurpose::Application,
        amount_pence: 59_300,
        status,
        created: Timestamp::parse("2026-05-30T10:00:00Z").unwrap(),
        channel: Some("online".into()),
    }
}

/// Driver over the full event catalog with a recorder at every boundary.
pub fn driver() -> (PipelineDriver, Arc<RecordingCollaborators>) {
    let recorder = Arc::new(RecordingCollaborators::new());
    let driver = driver_with(Collaborators::recording(recorder.clone()));
    (driver, recorder)
}

pub fn driver_with(collaborators: Collaborators) -> PipelineDriver {
    let registry = build_registry(Environment::Test).unwrap();
    PipelineDriver::new(Arc::new(registry), Dispatcher::default(), collaborators)
}
