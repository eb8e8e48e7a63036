//! # Conditional Order
//!
//! Applying for the conditional order, the legal advisor's decision,
//! clarification, scheduling, and pronouncement.

use caseflow_core::{
    add_months, push_unique, CaseData, CaseRecord, ClarificationResponse, ConditionalOrderQuestions,
    DocumentType, ExecutionContext, JobSpec, LegalAdvisorDecision, Party, Permission, RefusalOption,
    Role, State, StateSet,
};
use caseflow_state::{EventDefinition, StageContext, Transition};
use caseflow_validation::guards;

use crate::common::{
    acting_party, notify_applicants, today_plus, CASEWORKER, PARTIES, STAFF, SYSTEM,
};

use State::*;

pub const SUBMIT_CONDITIONAL_ORDER: &str = "submit-conditional-order";

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "draft-conditional-order",
            "Draft conditional order",
            "An applicant starts their conditional order application",
            Transition::edges(&[
                (AwaitingConditionalOrder, ConditionalOrderDrafted),
                (ConditionalOrderPending, ConditionalOrderPending),
            ]),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .on_transition(draft_conditional_order),
        EventDefinition::new(
            "update-conditional-order",
            "Update conditional order",
            "An applicant updates their draft conditional order answers",
            Transition::stay(StateSet::of(&[ConditionalOrderDrafted, ConditionalOrderPending])),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party),
        EventDefinition::new(
            SUBMIT_CONDITIONAL_ORDER,
            "Submit conditional order",
            "An applicant applies for the conditional order",
            Transition::computed(
                StateSet::of(&[ConditionalOrderDrafted, ConditionalOrderPending]),
                StateSet::of(&[ConditionalOrderPending, AwaitingLegalAdvisorReferral]),
                conditional_order_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::conditional_order_answers, not_already_submitted])
        .on_transition(submit_conditional_order)
        .post_commit(plan_conditional_order_submitted),
        EventDefinition::new(
            "legal-advisor-make-decision",
            "Make a decision",
            "Grant or refuse the conditional order",
            Transition::computed(
                AwaitingLegalAdvisorReferral,
                StateSet::of(&[
                    AwaitingPronouncement,
                    AwaitingClarification,
                    AwaitingAmendedApplication,
                ]),
                decision_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, &[Role::LegalAdvisor, Role::Judge, Role::SuperUser])
        .history_only(&[Role::CaseWorker])
        .guards(&[guards::legal_advisor_decision])
        .on_transition(record_decision)
        .post_commit(plan_decision),
        EventDefinition::new(
            "submit-clarification",
            "Submit clarification",
            "Answer the legal advisor's request for clarification",
            Transition::fixed(AwaitingClarification, ClarificationSubmitted),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::clarification_response])
        .on_transition(submit_clarification)
        .post_commit(plan_clarification),
        EventDefinition::new(
            "caseworker-refer-to-legal-advisor",
            "Refer to legal advisor",
            "Send the clarified application back to a legal advisor",
            Transition::fixed(ClarificationSubmitted, AwaitingLegalAdvisorReferral),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .on_transition(clear_decision),
        EventDefinition::new(
            "caseworker-schedule-case",
            "Schedule for pronouncement",
            "List the case for a pronouncement hearing",
            Transition::stay(AwaitingPronouncement),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::hearing_details])
        .on_transition(issue_certificate_of_entitlement)
        .post_commit(plan_scheduled),
        EventDefinition::new(
            "system-pronounce-case",
            "Pronounce case",
            "The conditional order is pronounced",
            Transition::fixed(AwaitingPronouncement, ConditionalOrderPronounced),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[hearing_held])
        .on_transition(pronounce)
        .post_commit(plan_pronounced),
        EventDefinition::new(
            "system-progress-to-awaiting-final-order",
            "Awaiting final order",
            "The applicant may now apply for the final order",
            Transition::fixed(ConditionalOrderPronounced, AwaitingFinalOrder),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(STAFF)
        .guards(&[guards::final_order_eligibility])
        .post_commit(plan_final_order_available),
    ]
}

fn questions(data: &CaseData, party: Party) -> &ConditionalOrderQuestions {
    match party {
        Party::Applicant1 => &data.conditional_order.applicant1,
        Party::Applicant2 => &data.conditional_order.applicant2,
    }
}

fn questions_mut(data: &mut CaseData, party: Party) -> &mut ConditionalOrderQuestions {
    match party {
        Party::Applicant1 => &mut data.conditional_order.applicant1,
        Party::Applicant2 => &mut data.conditional_order.applicant2,
    }
}

// ─── Guards ──────────────────────────────────────────────────────────

fn not_already_submitted(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(Party::Applicant1);
    if questions(&record.data, party).is_submitted() {
        vec!["You have already applied for a conditional order".to_string()]
    } else {
        Vec::new()
    }
}

fn hearing_held(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    match record.data.conditional_order.date_and_time_of_hearing {
        Some(at) if at <= ctx.now => Vec::new(),
        Some(at) => vec![format!("Case cannot be pronounced before the hearing at {at}")],
        None => vec![guards::empty_or_null("DateAndTimeOfHearing")],
    }
}

// ─── Target resolution ───────────────────────────────────────────────

/// A joint case waits for the second applicant; the acting applicant has
/// not yet submitted (see `not_already_submitted`), so any recorded
/// submission belongs to the other one.
fn conditional_order_target(data: &CaseData, _current: State) -> State {
    let co = &data.conditional_order;
    if data.is_joint() && !co.applicant1.is_submitted() && !co.applicant2.is_submitted() {
        ConditionalOrderPending
    } else {
        AwaitingLegalAdvisorReferral
    }
}

fn decision_target(data: &CaseData, _current: State) -> State {
    match data.conditional_order.decision {
        Some(LegalAdvisorDecision::Refused(RefusalOption::MoreInfo)) => AwaitingClarification,
        Some(LegalAdvisorDecision::Refused(RefusalOption::AdminError)) => {
            AwaitingAmendedApplication
        }
        _ => AwaitingPronouncement,
    }
}

// ─── Mutations ───────────────────────────────────────────────────────

fn draft_conditional_order(data: &mut CaseData, sc: &StageContext<'_>) {
    questions_mut(data, acting_party(sc)).drafted.get_or_insert(sc.ctx.now);
}

fn submit_conditional_order(data: &mut CaseData, sc: &StageContext<'_>) {
    let answers = questions_mut(data, acting_party(sc));
    answers.drafted.get_or_insert(sc.ctx.now);
    answers.submitted = Some(sc.ctx.now);
    if sc.target() == AwaitingLegalAdvisorReferral {
        data.due_date = None;
    }
}

fn record_decision(data: &mut CaseData, sc: &StageContext<'_>) {
    data.conditional_order.decision_date = Some(sc.ctx.today());
    if sc.target() == AwaitingClarification {
        data.due_date = Some(today_plus(sc, sc.ctx.timelines().applicant_response_days));
    }
}

fn submit_clarification(data: &mut CaseData, sc: &StageContext<'_>) {
    if let Some(text) = data.input.clarification.take() {
        push_unique(
            &mut data.conditional_order.clarification_responses,
            ClarificationResponse {
                text,
                submitted: sc.ctx.now,
            },
        );
    }
    data.due_date = None;
}

fn clear_decision(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.conditional_order.decision = None;
}

fn issue_certificate_of_entitlement(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.conditional_order.certificate_of_entitlement_issued = true;
}

/// Fixes the final order dates from the day of pronouncement.
fn pronounce(data: &mut CaseData, sc: &StageContext<'_>) {
    let timelines = sc.ctx.timelines();
    let granted = sc.ctx.today();
    let eligible = today_plus(sc, timelines.final_order_eligible_days);
    data.conditional_order.granted_date = Some(granted);
    data.final_order.eligible_from = Some(eligible);
    data.final_order.respondent_eligible_from =
        Some(add_months(eligible, timelines.respondent_extra_months));
    data.final_order.overdue_from = Some(add_months(granted, timelines.final_order_overdue_months));
    data.due_date = Some(eligible);
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_conditional_order_submitted(case: &CaseRecord, ctx: &ExecutionContext) -> Vec<JobSpec> {
    if case.state == ConditionalOrderPending {
        let party = ctx.acting_party(case.id()).unwrap_or(Party::Applicant1);
        return vec![
            JobSpec::notify(party, "conditional-order-submitted"),
            JobSpec::notify(party.other(), "partner-applied-for-conditional-order"),
        ];
    }
    let mut jobs = vec![JobSpec::generate(
        DocumentType::ConditionalOrderApplication,
        "conditional-order-application",
    )];
    jobs.extend(notify_applicants(case, "conditional-order-submitted"));
    jobs
}

fn plan_decision(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    match case.state {
        AwaitingPronouncement => notify_applicants(case, "conditional-order-entitled"),
        _ => {
            let mut jobs = vec![JobSpec::generate(
                DocumentType::ConditionalOrderRefusal,
                "conditional-order-refusal",
            )];
            jobs.extend(notify_applicants(case, "conditional-order-refused"));
            jobs
        }
    }
}

fn plan_clarification(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::notify(Party::Applicant1, "clarification-submitted")]
}

fn plan_scheduled(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let mut jobs = vec![JobSpec::generate(
        DocumentType::CertificateOfEntitlement,
        "certificate-of-entitlement",
    )];
    jobs.extend(notify_applicants(case, "case-scheduled-for-pronouncement"));
    if case.data.is_sole() {
        jobs.push(JobSpec::notify(Party::Applicant2, "case-scheduled-for-pronouncement"));
    }
    jobs
}

fn plan_pronounced(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let mut jobs = vec![JobSpec::generate(
        DocumentType::ConditionalOrderGranted,
        "conditional-order-granted",
    )];
    jobs.extend(notify_applicants(case, "conditional-order-pronounced"));
    jobs
}

fn plan_final_order_available(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "final-order-available")
}
