//! # Help With Fees and Issue
//!
//! Caseworker handling of a submitted application: the help-with-fees
//! decision, outstanding documents, and issuing (or rejecting) the case.

use caseflow_core::{
    Application, CaseData, CaseRecord, DocumentType, ExecutionContext, JobSpec, Party,
    Permission, Role, ServiceMethod, State, StateSet,
};
use caseflow_state::{EventDefinition, SourceStates, StageContext, Transition};
use caseflow_validation::guards::{self, empty_or_null};

use crate::common::{
    after_application_fee, notify_applicants, today_plus, CASEWORKER, PRE_ISSUE, STAFF,
};

use State::*;

/// Where an issued case waits for service.
const ISSUED: StateSet = StateSet::of(&[AwaitingAos, AwaitingService, Holding]);

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "caseworker-hwf-application-accepted",
            "HWF application accepted",
            "Help with fees covers the application fee",
            Transition::computed(
                AwaitingHWFDecision,
                StateSet::of(&[Submitted, AwaitingDocuments]),
                after_application_fee,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::help_with_fees_reference])
        .on_transition(hwf_accepted)
        .post_commit(plan_hwf_accepted),
        EventDefinition::new(
            "caseworker-request-hwf-evidence",
            "Request HWF evidence",
            "Ask the applicant for help with fees evidence",
            Transition::fixed(AwaitingHWFDecision, AwaitingHWFEvidence),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .on_transition(set_evidence_due_date)
        .post_commit(plan_evidence_request),
        EventDefinition::new(
            "caseworker-hwf-refused",
            "HWF refused",
            "Help with fees refused; the applicant must pay",
            Transition::fixed(
                StateSet::of(&[AwaitingHWFDecision, AwaitingHWFEvidence]),
                AwaitingPayment,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .on_transition(hwf_refused)
        .post_commit(plan_hwf_refused),
        EventDefinition::new(
            "caseworker-documents-received",
            "Documents received",
            "Outstanding documents or evidence have arrived",
            Transition::edges(&[
                (AwaitingDocuments, Submitted),
                (AwaitingHWFEvidence, AwaitingHWFDecision),
            ]),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .on_transition(clear_due_date),
        EventDefinition::new(
            "caseworker-issue-application",
            "Issue application",
            "Issue the application and start the service period",
            Transition::computed(Submitted, ISSUED, issue_target),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[
            guards::basic_case,
            guards::marriage_date,
            guards::jurisdiction,
            guards::service_details,
        ])
        .on_transition(issue)
        .post_commit(plan_issue),
        EventDefinition::new(
            "caseworker-reissue-application",
            "Reissue application",
            "Reissue the application after service details change",
            Transition::computed(
                StateSet::of(&[AwaitingAos, AosOverdue, AwaitingService]),
                ISSUED,
                issue_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::service_details])
        .on_transition(reissue)
        .post_commit(plan_reissue),
        EventDefinition::new(
            "caseworker-reject-application",
            "Reject application",
            "Reject an application the court cannot issue",
            Transition::fixed(SourceStates::Set(PRE_ISSUE), Rejected),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[rejection_reason])
        .post_commit(plan_rejection),
        EventDefinition::new(
            "caseworker-amend-application",
            "Amend application",
            "Correct an application refused for an administrative error",
            Transition::fixed(AwaitingAmendedApplication, Submitted),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(STAFF)
        .guards(&[guards::basic_case, guards::jurisdiction])
        .on_transition(amend),
    ]
}

// ─── Guards ──────────────────────────────────────────────────────────

fn rejection_reason(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    match record.data.application.rejection_reason.as_deref() {
        Some(reason) if !reason.trim().is_empty() => Vec::new(),
        _ => vec![empty_or_null("RejectionReason")],
    }
}

// ─── Target resolution ───────────────────────────────────────────────

/// Joint cases need no service; sole cases wait for the court's postal
/// service unless the applicant serves the papers another way.
pub(crate) fn issue_target(data: &CaseData, _current: State) -> State {
    let app = &data.application;
    if data.is_joint() {
        Holding
    } else if app.service_method != ServiceMethod::CourtService
        || app.needs_alternative_service_documents()
    {
        AwaitingService
    } else {
        AwaitingAos
    }
}

// ─── Mutations ───────────────────────────────────────────────────────

fn hwf_accepted(data: &mut CaseData, sc: &StageContext<'_>) {
    data.due_date = match sc.target() {
        AwaitingDocuments => Some(today_plus(sc, sc.ctx.timelines().applicant_response_days)),
        _ => None,
    };
}

fn set_evidence_due_date(data: &mut CaseData, sc: &StageContext<'_>) {
    data.due_date = Some(today_plus(sc, sc.ctx.timelines().applicant_response_days));
}

fn hwf_refused(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.application.applicant1_hwf_reference = None;
    data.application.applicant2_hwf_reference = None;
    data.due_date = None;
}

fn clear_due_date(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.due_date = None;
}

/// Due date for an issued case in `target`.
fn service_due_date(data: &mut CaseData, sc: &StageContext<'_>) {
    let timelines = sc.ctx.timelines();
    let days = match sc.target() {
        Holding => timelines.holding_period_days,
        AwaitingService => timelines.service_response_days,
        _ => timelines.aos_response_days,
    };
    data.due_date = Some(today_plus(sc, days));
}

fn issue(data: &mut CaseData, sc: &StageContext<'_>) {
    data.application.issue_date = Some(sc.ctx.today());
    if data.is_sole() && data.application.applicant2_access_code.is_none() {
        data.application.applicant2_access_code = Some(Application::generate_access_code());
    }
    service_due_date(data, sc);
}

fn reissue(data: &mut CaseData, sc: &StageContext<'_>) {
    data.application.reissue_date = Some(sc.ctx.today());
    data.acknowledgement_of_service = Default::default();
    service_due_date(data, sc);
}

fn amend(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.conditional_order.decision = None;
    data.conditional_order.decision_date = None;
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_hwf_accepted(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "hwf-accepted")
}

fn plan_evidence_request(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::notify(Party::Applicant1, "hwf-evidence-requested")]
}

fn plan_hwf_refused(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "hwf-refused")
}

fn plan_issue(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let mut jobs = vec![
        JobSpec::generate(DocumentType::Application, "divorce-application"),
        JobSpec::generate(DocumentType::NoticeOfProceedings, "notice-of-proceedings"),
    ];
    jobs.extend(notify_applicants(case, "application-issued"));
    if case.state == AwaitingAos {
        jobs.push(JobSpec::notify(Party::Applicant2, "respondent-notice-of-proceedings"));
    }
    jobs
}

fn plan_reissue(case: &CaseRecord, ctx: &ExecutionContext) -> Vec<JobSpec> {
    let mut jobs = plan_issue(case, ctx);
    for job in &mut jobs {
        if let JobSpec::Notify { template, .. } = job {
            if *template == "application-issued" {
                *template = "application-reissued";
            }
        }
    }
    jobs
}

fn plan_rejection(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "application-rejected")
}
