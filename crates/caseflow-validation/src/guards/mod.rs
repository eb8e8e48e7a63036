//! # Guard Library
//!
//! Read-only checks an event wires into its `guards` (or `start_guard`)
//! list. Every guard has the [`Guard`](caseflow_state::Guard) signature and
//! returns zero or more human-readable messages. Guards are independent:
//! one guard's failure never suppresses another's.
//!
//! Missing required fields are reported as `"<Field> cannot be empty or
//! null"`, with the field named in PascalCase.

mod case;
mod contact;
mod orders;
mod payment;
mod requests;
mod service;

pub use case::{
    applicant2_answers, applicant2_change_explanation, basic_case, joint_application,
    joint_prayer, joint_statement_of_truth, jurisdiction, marriage_date, prayer,
    sole_application, statement_of_truth,
};
pub use contact::{applicant1_contact_details, contact_details, is_valid_email, is_valid_postcode};
pub use orders::{
    clarification_response, conditional_order_answers, final_order_eligibility,
    final_order_late_explanation, hearing_details, legal_advisor_decision,
    respondent_final_order_eligibility,
};
pub use payment::{
    application_payment, general_application_payment, latest_payment, payment_outcome,
    service_payment, PAYMENT_IN_PROGRESS, PAYMENT_NOT_COMPLETED,
};
pub use requests::{
    acting_party_is_applicant2, acting_party_is_party, change_state_target, general_application,
    general_referral_decision, general_referral_reason, help_with_fees_reference,
    information_request, information_response, information_response_addressee, note,
    uploaded_document,
};
pub use service::{
    acknowledgement_of_service, bailiff_return, certificate_of_service, service_application,
    service_decision, service_details,
};

/// Message for a required value that is missing or blank.
pub fn empty_or_null(field: &str) -> String {
    format!("{field} cannot be empty or null")
}

/// Whether an optional text value is missing or whitespace.
pub(crate) fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Push [`empty_or_null`] for `field` if `value` is blank.
pub(crate) fn require(errors: &mut Vec<String>, field: &str, value: Option<&String>) {
    if is_blank(value) {
        errors.push(empty_or_null(field));
    }
}
