//! Who is acting, and caseworker / citizen form input.

use caseflow_core::{CaseRecord, ExecutionContext, InformationRequestRecipient, InterimApplicationType, Party};

use super::{empty_or_null, is_blank, require};

/// Start guard: the caller is applicant 2 on this case.
pub fn acting_party_is_applicant2(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    if ctx.acting_party(record.id()) == Some(Party::Applicant2) {
        Vec::new()
    } else {
        vec!["Only applicant 2 can perform this action".to_string()]
    }
}

/// Start guard: the caller is one of the applicants on this case.
pub fn acting_party_is_party(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    if ctx.acting_party(record.id()).is_some() {
        Vec::new()
    } else {
        vec!["Only an applicant on this case can perform this action".to_string()]
    }
}

/// A new request for information is addressed and has content.
pub fn information_request(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let Some(draft) = &record.data.input.information_request else {
        return vec![empty_or_null("RequestForInformation")];
    };
    let mut errors = Vec::new();
    if draft.details.trim().is_empty() {
        errors.push(empty_or_null("RequestForInformationDetails"));
    }
    if record.data.is_sole() && draft.recipient != InformationRequestRecipient::Applicant1 {
        errors.push("Only applicant 1 can be sent a request on a sole application".to_string());
    }
    errors
}

/// The caller is an addressee of the live request for information.
pub fn information_response_addressee(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let Some(request) = record.data.latest_information_request() else {
        return vec!["There is no request for information to respond to".to_string()];
    };
    match ctx.acting_party(record.id()) {
        Some(party) if request.recipient.includes(party) => Vec::new(),
        _ => vec!["You are not the recipient of this request for information".to_string()],
    }
}

/// A response carries text or documents.
pub fn information_response(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let input = &record.data.input;
    if is_blank(input.information_response.as_ref()) && input.information_response_documents.is_empty() {
        vec![empty_or_null("RequestForInformationResponseDetails")]
    } else {
        Vec::new()
    }
}

/// A citizen's general application is complete.
pub fn general_application(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(Party::Applicant1);
    let options = &record.data.applicant(party).interim_application_options;
    let mut errors = Vec::new();
    if options.application_type != Some(InterimApplicationType::GeneralApplication) {
        errors.push("InterimApplicationType must be a general application".to_string());
    }
    require(&mut errors, "InterimApplicationDetails", options.details.as_ref());
    if !options.statement_of_truth {
        errors.push("InterimApplicationStatementOfTruth must be confirmed".to_string());
    }
    errors
}

/// A referral reason was entered.
pub fn general_referral_reason(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "GeneralReferralReason", record.data.input.referral_reason.as_ref());
    errors
}

/// A referral decision was entered.
pub fn general_referral_decision(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(
        &mut errors,
        "GeneralReferralDecision",
        record.data.input.referral_decision.as_ref(),
    );
    errors
}

/// Applicant 1 supplied a help-with-fees reference.
pub fn help_with_fees_reference(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(
        &mut errors,
        "Applicant1HelpWithFeesReferenceNumber",
        record.data.application.applicant1_hwf_reference.as_ref(),
    );
    errors
}

/// A note was entered.
pub fn note(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "Note", record.data.input.note.as_ref());
    errors
}

/// A document was attached.
pub fn uploaded_document(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.input.document.is_none() {
        vec![empty_or_null("Document")]
    } else {
        Vec::new()
    }
}

/// A manual state change names a different state.
pub fn change_state_target(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    match record.data.state_override {
        None => vec![empty_or_null("StateOverride")],
        Some(target) if target == record.state => {
            vec![format!("Case is already in state {target}")]
        }
        Some(_) => Vec::new(),
    }
}
