//! Payment outcome guards.
//!
//! A payment is either still in progress or it has settled; settled
//! payments either succeeded or failed. The two failure messages are
//! mutually exclusive: a guard reports at most one of them.

use caseflow_core::{CaseData, CaseRecord, ExecutionContext, Payment, PaymentPurpose, PaymentStatus};

pub const PAYMENT_IN_PROGRESS: &str = "Payment in progress";
pub const PAYMENT_NOT_COMPLETED: &str = "Payment not completed";

/// The payment the current event is about: a staged payment for
/// `purpose` if one was entered, otherwise the last recorded one.
pub fn latest_payment(data: &CaseData, purpose: PaymentPurpose) -> Option<&Payment> {
    data.input
        .payment
        .as_ref()
        .filter(|p| p.purpose == purpose)
        .or_else(|| data.last_payment(purpose))
}

/// Outcome check for the latest payment for `purpose`.
pub fn payment_outcome(data: &CaseData, purpose: PaymentPurpose) -> Vec<String> {
    match latest_payment(data, purpose).map(|p| p.status) {
        Some(PaymentStatus::Success) => Vec::new(),
        Some(PaymentStatus::InProgress) => vec![PAYMENT_IN_PROGRESS.to_string()],
        Some(_) | None => vec![PAYMENT_NOT_COMPLETED.to_string()],
    }
}

/// Application fee paid, unless remitted under help with fees.
pub fn application_payment(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.application_fee_remitted() {
        return Vec::new();
    }
    payment_outcome(&record.data, PaymentPurpose::Application)
}

/// Service application fee paid, unless remitted.
pub fn service_payment(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.alternative_service.help_with_fees_reference.is_some() {
        return Vec::new();
    }
    payment_outcome(&record.data, PaymentPurpose::ServiceApplication)
}

/// General application fee paid, unless remitted.
pub fn general_application_payment(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let remitted = record
        .data
        .latest_general_application()
        .is_some_and(|ga| ga.help_with_fees_reference.is_some());
    if remitted {
        return Vec::new();
    }
    payment_outcome(&record.data, PaymentPurpose::GeneralApplication)
}
