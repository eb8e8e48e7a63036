//! Service of the application on the respondent.

use caseflow_core::{CaseRecord, ExecutionContext, ServiceMethod};

use super::{empty_or_null, require};

/// How the papers will be served is coherent with what applicant 1 knows.
pub fn service_details(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let data = &record.data;
    let app = &data.application;
    let mut errors = Vec::new();
    if data.is_sole()
        && app.service_method == ServiceMethod::CourtService
        && app.applicant1_knows_applicant2_address
    {
        require(&mut errors, "Applicant2Address", data.applicant2.address.as_ref());
    }
    if app.service_method == ServiceMethod::SolicitorService && !data.applicant1.represented {
        errors.push("Solicitor service requires applicant 1 to be represented".to_string());
    }
    if app.service_method == ServiceMethod::PersonalService && data.is_joint() {
        errors.push("Personal service is not available on a joint application".to_string());
    }
    errors
}

/// A certificate of service date, not in the future.
pub fn certificate_of_service(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    match record.data.application.certificate_of_service_date {
        None => vec![empty_or_null("CertificateOfServiceDate")],
        Some(date) if date > ctx.today() => {
            vec!["CertificateOfServiceDate can not be in the future".to_string()]
        }
        Some(_) => Vec::new(),
    }
}

/// The respondent's acknowledgement of service is fully answered.
pub fn acknowledgement_of_service(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let aos = &record.data.acknowledgement_of_service;
    let mut errors = Vec::new();
    if !aos.confirm_read_petition {
        errors.push("ConfirmReadPetition must be confirmed".to_string());
    }
    match aos.jurisdiction_agree {
        None => errors.push(empty_or_null("JurisdictionAgree")),
        Some(false) => require(
            &mut errors,
            "ReasonCourtDoesNotHaveJurisdiction",
            aos.reason_court_does_not_have_jurisdiction.as_ref(),
        ),
        Some(true) => {}
    }
    if aos.how_to_respond.is_none() {
        errors.push(empty_or_null("HowToRespondApplication"));
    }
    if !aos.statement_of_truth {
        errors.push("AosStatementOfTruth must be confirmed".to_string());
    }
    errors
}

/// A citizen's service application is complete.
pub fn service_application(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(caseflow_core::Party::Applicant1);
    let options = &record.data.applicant(party).interim_application_options;
    let mut errors = Vec::new();
    match options.application_type {
        None => errors.push(empty_or_null("InterimApplicationType")),
        Some(kind) if !kind.is_service_application() => {
            errors.push("InterimApplicationType must be a service application".to_string())
        }
        Some(_) => {}
    }
    require(&mut errors, "InterimApplicationDetails", options.details.as_ref());
    if !options.statement_of_truth {
        errors.push("InterimApplicationStatementOfTruth must be confirmed".to_string());
    }
    errors
}

/// A legal advisor has decided the service application.
pub fn service_decision(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.alternative_service.granted.is_none() {
        vec![empty_or_null("ServiceApplicationGranted")]
    } else {
        Vec::new()
    }
}

/// The bailiff has reported whether service succeeded.
pub fn bailiff_return(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.alternative_service.successful_service.is_none() {
        vec![empty_or_null("SuccessfulServedByBailiff")]
    } else {
        Vec::new()
    }
}
