//! # Final Order

use caseflow_core::{
    CaseData, CaseRecord, DocumentType, ExecutionContext, FinalOrder, JobSpec, Party, Permission,
    Role, State, StateSet, Timestamp,
};
use caseflow_state::{EventDefinition, StageContext, Transition};
use caseflow_validation::guards;

use crate::common::{acting_party, notify_applicants, APPLICANT2, CASEWORKER, PARTIES, STAFF, SYSTEM};

use State::*;

pub const APPLY_FOR_FINAL_ORDER: &str = "apply-for-final-order";

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            APPLY_FOR_FINAL_ORDER,
            "Apply for final order",
            "An applicant applies for the final order",
            Transition::computed(
                StateSet::of(&[AwaitingFinalOrder, AwaitingJointFinalOrder, FinalOrderOverdue]),
                StateSet::of(&[AwaitingJointFinalOrder, FinalOrderRequested]),
                final_order_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[
            guards::final_order_eligibility,
            guards::final_order_late_explanation,
            not_already_applied,
        ])
        .on_transition(apply_for_final_order)
        .post_commit(plan_final_order_applied),
        EventDefinition::new(
            "respondent-apply-for-final-order",
            "Respondent applies for FO",
            "The respondent on a sole case applies for the final order",
            Transition::fixed(
                StateSet::of(&[AwaitingFinalOrder, FinalOrderOverdue]),
                RespondentFinalOrderRequested,
            ),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT2)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2)
        .guards(&[
            guards::sole_application,
            guards::respondent_final_order_eligibility,
            not_already_applied,
        ])
        .on_transition(apply_for_final_order)
        .post_commit(plan_respondent_applied),
        EventDefinition::new(
            "system-final-order-overdue",
            "Final order overdue",
            "No final order application within twelve months",
            Transition::fixed(AwaitingFinalOrder, FinalOrderOverdue),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(STAFF)
        .guards(&[overdue])
        .post_commit(plan_overdue),
        EventDefinition::new(
            "caseworker-refer-final-order",
            "Refer final order",
            "Refer a final order application to a judge",
            Transition::fixed(
                StateSet::of(&[FinalOrderRequested, RespondentFinalOrderRequested]),
                FinalOrderPending,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge]),
        EventDefinition::new(
            "caseworker-grant-final-order",
            "Grant final order",
            "Make the final order and end the marriage",
            Transition::fixed(
                StateSet::of(&[FinalOrderRequested, FinalOrderPending]),
                FinalOrderComplete,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .grant(Permission::CreateReadUpdate, &[Role::Judge])
        .history_only(&[Role::LegalAdvisor])
        .guards(&[guards::final_order_eligibility])
        .on_transition(grant_final_order)
        .post_commit(plan_final_order_granted),
    ]
}

fn applied(final_order: &FinalOrder, party: Party) -> Option<Timestamp> {
    match party {
        Party::Applicant1 => final_order.applicant1_applied,
        Party::Applicant2 => final_order.applicant2_applied,
    }
}

// ─── Guards ──────────────────────────────────────────────────────────

fn not_already_applied(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(Party::Applicant1);
    if applied(&record.data.final_order, party).is_some() {
        vec!["You have already applied for a final order".to_string()]
    } else {
        Vec::new()
    }
}

fn overdue(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    match record.data.final_order.overdue_from {
        Some(date) if date <= ctx.today() => Vec::new(),
        Some(date) => vec![format!("Final order is not overdue until {date}")],
        None => vec![guards::empty_or_null("DateFinalOrderOverdue")],
    }
}

// ─── Target resolution ───────────────────────────────────────────────

/// On a joint case the first application waits for the second.
fn final_order_target(data: &CaseData, _current: State) -> State {
    let fo = &data.final_order;
    if data.is_joint() && fo.applicant1_applied.is_none() && fo.applicant2_applied.is_none() {
        AwaitingJointFinalOrder
    } else {
        FinalOrderRequested
    }
}

// ─── Mutations ───────────────────────────────────────────────────────

fn apply_for_final_order(data: &mut CaseData, sc: &StageContext<'_>) {
    let now = sc.ctx.now;
    match acting_party(sc) {
        Party::Applicant1 => data.final_order.applicant1_applied = Some(now),
        Party::Applicant2 => data.final_order.applicant2_applied = Some(now),
    }
}

fn grant_final_order(data: &mut CaseData, sc: &StageContext<'_>) {
    data.final_order.granted.get_or_insert(sc.ctx.now);
    data.due_date = None;
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_final_order_applied(case: &CaseRecord, ctx: &ExecutionContext) -> Vec<JobSpec> {
    let party = ctx.acting_party(case.id()).unwrap_or(Party::Applicant1);
    if case.state == AwaitingJointFinalOrder {
        return vec![
            JobSpec::notify(party, "final-order-applied"),
            JobSpec::notify(party.other(), "partner-applied-for-final-order"),
        ];
    }
    let mut jobs = vec![JobSpec::generate(
        DocumentType::FinalOrderApplication,
        "final-order-application",
    )];
    jobs.extend(notify_applicants(case, "final-order-requested"));
    jobs
}

fn plan_respondent_applied(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::generate(DocumentType::FinalOrderApplication, "respondent-final-order-application"),
        JobSpec::notify(Party::Applicant1, "respondent-applied-for-final-order"),
        JobSpec::notify(Party::Applicant2, "final-order-requested"),
    ]
}

fn plan_overdue(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "final-order-overdue")
}

fn plan_final_order_granted(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::generate(DocumentType::FinalOrderGranted, "final-order-granted"),
        JobSpec::notify(Party::Applicant1, "final-order-granted"),
        JobSpec::notify(Party::Applicant2, "final-order-granted"),
    ]
}
