//! Shared role groups, state sets, and planner helpers.

use caseflow_core::{push_unique, CaseData, CaseRecord, JobSpec, Party, Role, State, StateSet};
use caseflow_state::StageContext;
use chrono::NaiveDate;

use State::*;

// ─── Roles ───────────────────────────────────────────────────────────

pub(crate) const CITIZENS: &[Role] = &[Role::Creator, Role::Applicant2];
pub(crate) const APPLICANT1: &[Role] = &[Role::Creator, Role::Applicant1Solicitor];
pub(crate) const APPLICANT2: &[Role] = &[Role::Applicant2, Role::Applicant2Solicitor];
pub(crate) const PARTIES: &[Role] = &[
    Role::Creator,
    Role::Applicant2,
    Role::Applicant1Solicitor,
    Role::Applicant2Solicitor,
];
pub(crate) const CASEWORKER: &[Role] = &[Role::CaseWorker, Role::SuperUser];
pub(crate) const SYSTEM: &[Role] = &[Role::SystemUpdate];
/// Court staff who see every event in the case history.
pub(crate) const STAFF: &[Role] = &[
    Role::CaseWorker,
    Role::LegalAdvisor,
    Role::Judge,
    Role::SuperUser,
];

// ─── State sets ──────────────────────────────────────────────────────

pub(crate) const TERMINAL: StateSet =
    StateSet::of(&[FinalOrderComplete, Withdrawn, Rejected, Archived]);

pub(crate) const PRE_SUBMISSION: StateSet = StateSet::of(&[
    Draft,
    AwaitingApplicant1Response,
    AwaitingApplicant2Response,
    Applicant2Approved,
]);

pub(crate) const PRE_ISSUE: StateSet = StateSet::of(&[
    AwaitingPayment,
    AwaitingHWFDecision,
    AwaitingHWFEvidence,
    Submitted,
    AwaitingDocuments,
    NewPaperCase,
]);

pub(crate) const REQUEST_FOR_INFORMATION: StateSet = StateSet::of(&[
    InformationRequested,
    AwaitingRequestedInformation,
    RequestedInformationSubmitted,
]);

pub(crate) const GENERAL_CONSIDERATION: StateSet = StateSet::of(&[
    AwaitingGeneralApplicationPayment,
    GeneralApplicationReceived,
    AwaitingGeneralConsideration,
    GeneralConsiderationComplete,
]);

/// States after issue in which the case is live with the court.
pub(crate) const POST_ISSUE: StateSet = StateSet::all_except(
    TERMINAL
        .union(PRE_SUBMISSION)
        .union(PRE_ISSUE)
        .union(REQUEST_FOR_INFORMATION)
        .union(GENERAL_CONSIDERATION)
        .union(StateSet::of(&[OfflineDocumentReceived])),
);

// ─── Helpers ─────────────────────────────────────────────────────────

/// The date `days` after the invocation.
pub(crate) fn today_plus(sc: &StageContext<'_>, days: u64) -> NaiveDate {
    sc.ctx.now.plus_days(days).date()
}

/// The acting applicant, defaulting to applicant 1 for non-party callers.
pub(crate) fn acting_party(sc: &StageContext<'_>) -> Party {
    sc.acting_party().unwrap_or(Party::Applicant1)
}

/// Notify applicant 1, and applicant 2 on a joint case.
pub(crate) fn notify_applicants(case: &CaseRecord, template: &'static str) -> Vec<JobSpec> {
    let mut jobs = vec![JobSpec::notify(Party::Applicant1, template)];
    if case.data.is_joint() {
        jobs.push(JobSpec::notify(Party::Applicant2, template));
    }
    jobs
}

/// Notify both applicants regardless of application type.
pub(crate) fn notify_both(template: &'static str) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, template),
        JobSpec::notify(Party::Applicant2, template),
    ]
}

/// Move a staged payment into the payment history.
pub(crate) fn record_staged_payment(data: &mut CaseData) {
    if let Some(payment) = data.input.payment.take() {
        push_unique(&mut data.payments, payment);
    }
}

/// `previous` if it is one of `allowed`, otherwise `fallback`.
///
/// Targets read back from stored state are clamped so a computed
/// transition never leaves its declared reachable set.
pub(crate) fn return_to(previous: Option<State>, allowed: StateSet, fallback: State) -> State {
    match previous {
        Some(state) if allowed.contains(state) => state,
        _ => fallback,
    }
}

/// Due date for a case entering `target` after service is effected.
pub(crate) fn holding_due_date(data: &mut CaseData, sc: &StageContext<'_>) {
    if sc.target() == Holding {
        data.due_date = Some(today_plus(sc, sc.ctx.timelines().holding_period_days));
    }
}

/// Target after the application fee is settled: documents still
/// outstanding keep a sole case waiting, otherwise it is submitted.
pub(crate) fn after_application_fee(data: &CaseData, _current: State) -> State {
    let app = &data.application;
    if data.is_sole()
        && (app.needs_alternative_service_documents()
            || !app.applicant1_cannot_upload_documents.is_empty())
    {
        AwaitingDocuments
    } else {
        Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_issue_excludes_pre_issue_and_terminal() {
        assert!(POST_ISSUE.contains(Holding));
        assert!(POST_ISSUE.contains(AwaitingAos));
        assert!(!POST_ISSUE.contains(Submitted));
        assert!(!POST_ISSUE.contains(Withdrawn));
        assert!(!POST_ISSUE.contains(InformationRequested));
        assert!(!POST_ISSUE.contains(Draft));
    }

    #[test]
    fn test_return_to_clamps() {
        let allowed = StateSet::of(&[Holding, AwaitingAos]);
        assert_eq!(return_to(Some(Holding), allowed, Submitted), Holding);
        assert_eq!(return_to(Some(Draft), allowed, Submitted), Submitted);
        assert_eq!(return_to(None, allowed, Submitted), Submitted);
    }

    #[test]
    fn test_after_application_fee() {
        let mut data = CaseData::default();
        assert_eq!(after_application_fee(&data, AwaitingPayment), Submitted);
        data.application.applicant1_wants_alternative_service = true;
        assert_eq!(after_application_fee(&data, AwaitingPayment), AwaitingDocuments);
        data.application_type = caseflow_core::ApplicationType::JointApplication;
        assert_eq!(after_application_fee(&data, AwaitingPayment), Submitted);
    }
}
