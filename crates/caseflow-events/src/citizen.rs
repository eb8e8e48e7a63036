//! # Citizen Application Journey
//!
//! Drafting, the joint-application hand-off between applicants, submission,
//! and payment of the application fee.
//!
//! ```text
//! Draft ──invite──▶ AwaitingApplicant2Response ──approve──▶ Applicant2Approved
//!                     │          ▲                                │
//!            request-changes   resubmit                        submit
//!                     ▼          │                                ▼
//!               AwaitingApplicant1Response          AwaitingPayment | AwaitingHWFDecision
//! ```

use caseflow_core::{
    Application, ApplicationType, CaseData, CaseRecord, DivorceOrDissolution, ExecutionContext,
    FeeOrder, JobSpec, Party, Permission, Role, State, StateSet,
};
use caseflow_state::{EventDefinition, SourceStates, StageContext, Transition};
use caseflow_validation::guards;

use crate::common::{
    acting_party, after_application_fee, notify_applicants, record_staged_payment, today_plus,
    APPLICANT2, CITIZENS, PARTIES, PRE_SUBMISSION, STAFF, TERMINAL,
};

use State::*;

pub const RESUBMIT_ANSWERS: &str = "citizen-resubmit-answers";
pub const PAYMENT_MADE: &str = "citizen-payment-made";

/// Fee code quoted for a divorce or dissolution application.
const APPLICATION_FEE_CODE: &str = "FEE0002";

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "citizen-update-application",
            "Update application",
            "Applicant 1 updates their draft application",
            Transition::stay(StateSet::of(&[Draft, AwaitingApplicant1Response])),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF),
        EventDefinition::new(
            "citizen-update-applicant2",
            "Update applicant 2 answers",
            "Applicant 2 updates their answers to the joint application",
            Transition::stay(AwaitingApplicant2Response),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Applicant2])
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2),
        EventDefinition::new(
            "citizen-invite-applicant2",
            "Invite applicant 2",
            "Send the joint application to applicant 2 for review",
            Transition::fixed(Draft, AwaitingApplicant2Response),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF)
        .guards(&[
            guards::joint_application,
            guards::basic_case,
            guards::marriage_date,
            guards::jurisdiction,
            guards::applicant1_contact_details,
        ])
        .on_transition(invite_applicant2)
        .post_commit(plan_invitation),
        EventDefinition::new(
            "applicant2-request-changes",
            "Request changes",
            "Applicant 2 asks applicant 1 to change the application",
            Transition::fixed(AwaitingApplicant2Response, AwaitingApplicant1Response),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Applicant2])
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2)
        .guards(&[guards::applicant2_change_explanation])
        .on_transition(set_response_due_date)
        .post_commit(plan_changes_requested),
        EventDefinition::new(
            RESUBMIT_ANSWERS,
            "Resubmit answers",
            "Applicant 1 resubmits the application to applicant 2",
            Transition::fixed(AwaitingApplicant1Response, AwaitingApplicant2Response),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF)
        .guards(&[guards::basic_case, guards::marriage_date, guards::jurisdiction])
        .on_transition(resubmit_answers)
        .post_commit(plan_resubmission),
        EventDefinition::new(
            "applicant2-approve",
            "Approve application",
            "Applicant 2 confirms the joint application",
            Transition::fixed(AwaitingApplicant2Response, Applicant2Approved),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT2)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2)
        .guards(&[
            guards::applicant2_answers,
            guards::joint_statement_of_truth,
            guards::joint_prayer,
            guards::contact_details,
        ])
        .on_transition(approve)
        .post_commit(plan_approval),
        EventDefinition::new(
            "citizen-submit-application",
            "Submit application",
            "Submit the application and pay or claim help with fees",
            Transition::computed(
                StateSet::of(&[Draft, Applicant2Approved]),
                StateSet::of(&[AwaitingPayment, AwaitingHWFDecision]),
                submission_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF)
        .pre_validate(quote_application_fee)
        .guards(&[
            guards::basic_case,
            guards::marriage_date,
            guards::jurisdiction,
            guards::statement_of_truth,
            guards::prayer,
            guards::joint_statement_of_truth,
            guards::joint_prayer,
            guards::service_details,
            guards::applicant1_contact_details,
        ])
        .on_transition(submit_application)
        .post_commit(plan_submission),
        EventDefinition::new(
            "citizen-add-payment",
            "Add payment",
            "Record an application fee payment attempt",
            Transition::stay(AwaitingPayment),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF)
        .on_transition(add_payment),
        EventDefinition::new(
            PAYMENT_MADE,
            "Payment made",
            "Application fee paid",
            Transition::computed(
                AwaitingPayment,
                StateSet::of(&[Submitted, AwaitingDocuments]),
                after_application_fee,
            ),
        )
        .grant(Permission::CreateReadUpdate, &[Role::Creator])
        .history_only(STAFF)
        .guards(&[guards::application_payment])
        .on_transition(payment_made)
        .post_commit(plan_payment_made),
        EventDefinition::new(
            "citizen-switch-to-sole",
            "Switch to sole application",
            "Convert a joint application into a sole application",
            Transition::edges(&[
                (AwaitingApplicant1Response, Draft),
                (AwaitingApplicant2Response, Draft),
                (Applicant2Approved, Draft),
                (AwaitingJointFinalOrder, AwaitingFinalOrder),
            ]),
        )
        .grant(Permission::CreateReadUpdate, CITIZENS)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::joint_application])
        .on_transition(switch_to_sole)
        .post_commit(plan_switch_to_sole),
        EventDefinition::new(
            "citizen-withdraw",
            "Withdraw application",
            "Applicant withdraws the application before it is issued",
            Transition::fixed(
                SourceStates::Set(
                    PRE_SUBMISSION.union(StateSet::of(&[AwaitingPayment, AwaitingHWFDecision])),
                ),
                Withdrawn,
            ),
        )
        .grant(Permission::CreateReadUpdate, CITIZENS)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .post_commit(plan_withdrawal),
        EventDefinition::new(
            "citizen-update-contact-details",
            "Update contact details",
            "An applicant changes their email or postal address",
            Transition::stay(SourceStates::AllExcept(TERMINAL.union(PRE_SUBMISSION))),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::contact_details]),
    ]
}

// ─── Target resolution ───────────────────────────────────────────────

fn submission_target(data: &CaseData, _current: State) -> State {
    if data.application_fee_remitted() {
        AwaitingHWFDecision
    } else {
        AwaitingPayment
    }
}

// ─── Mutations ───────────────────────────────────────────────────────

fn set_response_due_date(data: &mut CaseData, sc: &StageContext<'_>) {
    data.due_date = Some(today_plus(sc, sc.ctx.timelines().applicant_response_days));
}

fn invite_applicant2(data: &mut CaseData, sc: &StageContext<'_>) {
    if data.application.applicant2_access_code.is_none() {
        data.application.applicant2_access_code = Some(Application::generate_access_code());
    }
    set_response_due_date(data, sc);
}

fn resubmit_answers(data: &mut CaseData, sc: &StageContext<'_>) {
    data.application.applicant2_confirms_applicant1_information = None;
    set_response_due_date(data, sc);
}

fn approve(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.application.applicant2_change_explanation = None;
    data.due_date = None;
}

fn quote_application_fee(data: &mut CaseData, sc: &StageContext<'_>) {
    data.application.fee_order = Some(FeeOrder {
        fee_code: APPLICATION_FEE_CODE.to_string(),
        description: match data.divorce_or_dissolution {
            DivorceOrDissolution::Divorce => "application for a divorce".to_string(),
            DivorceOrDissolution::Dissolution => "application to end a civil partnership".to_string(),
        },
        amount_pence: sc.ctx.fees().application_pence,
    });
}

fn submit_application(data: &mut CaseData, sc: &StageContext<'_>) {
    if data.application.fee_order.is_none() {
        quote_application_fee(data, sc);
    }
    data.application.date_submitted = Some(sc.ctx.now);
    data.due_date = None;
}

fn add_payment(data: &mut CaseData, _sc: &StageContext<'_>) {
    record_staged_payment(data);
}

fn payment_made(data: &mut CaseData, sc: &StageContext<'_>) {
    record_staged_payment(data);
    data.due_date = match sc.target() {
        AwaitingDocuments => Some(today_plus(sc, sc.ctx.timelines().applicant_response_days)),
        _ => None,
    };
}

fn switch_to_sole(data: &mut CaseData, sc: &StageContext<'_>) {
    data.application_type = ApplicationType::SoleApplication;
    let app = &mut data.application;
    app.applicant2_statement_of_truth = false;
    app.applicant2_prayer = false;
    app.applicant2_screen_has_marriage_broken = false;
    app.applicant2_hwf_reference = None;
    app.applicant2_confirms_applicant1_information = None;
    app.applicant2_change_explanation = None;
    app.applicant2_access_code = None;
    // Applicant 2 leaving makes applicant 1 the sole applicant.
    if acting_party(sc) == Party::Applicant2 {
        std::mem::swap(&mut data.applicant1, &mut data.applicant2);
    }
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_invitation(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, "applicant2-invited"),
        JobSpec::notify(Party::Applicant2, "invitation-to-applicant2"),
    ]
}

fn plan_changes_requested(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, "applicant2-requested-changes"),
        JobSpec::notify(Party::Applicant2, "changes-requested-confirmation"),
    ]
}

fn plan_resubmission(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, "resubmitted-answers-applicant1"),
        JobSpec::notify(Party::Applicant2, "resubmitted-answers-applicant2"),
    ]
}

fn plan_approval(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, "applicant2-approved"),
        JobSpec::notify(Party::Applicant2, "approval-confirmation"),
    ]
}

fn plan_submission(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    match case.state {
        AwaitingHWFDecision => notify_applicants(case, "application-submitted-hwf"),
        _ => Vec::new(),
    }
}

fn plan_payment_made(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let mut jobs = notify_applicants(case, "application-submitted");
    if case.state == AwaitingDocuments {
        jobs.push(JobSpec::notify(Party::Applicant1, "awaiting-documents"));
    }
    jobs
}

fn plan_switch_to_sole(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::notify(Party::Applicant1, "switched-to-sole"),
        JobSpec::notify(Party::Applicant2, "switched-to-sole-partner"),
    ]
}

fn plan_withdrawal(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "application-withdrawn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::{PaymentPurpose, Role, Timestamp};

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(
            Role::Creator,
            Timestamp::parse("2026-06-01T10:00:00Z").unwrap(),
        )
    }

    #[test]
    fn test_submission_target_follows_help_with_fees() {
        let mut data = CaseData::default();
        assert_eq!(submission_target(&data, Draft), AwaitingPayment);
        data.application.applicant1_hwf_reference = Some("HWF-A1B-23C".into());
        assert_eq!(submission_target(&data, Draft), AwaitingHWFDecision);
        data.application_type = ApplicationType::JointApplication;
        assert_eq!(submission_target(&data, Applicant2Approved), AwaitingPayment);
    }

    #[test]
    fn test_fee_quote_uses_configured_amount() {
        let ctx = ctx();
        let sc = StageContext {
            case_id: caseflow_core::CaseId::new(4_111_111_111_111_111).unwrap(),
            current_state: Draft,
            target_state: None,
            ctx: &ctx,
        };
        let mut data = CaseData::default();
        quote_application_fee(&mut data, &sc);
        let fee = data.application.fee_order.unwrap();
        assert_eq!(fee.amount_pence, 59_300);
        assert_eq!(fee.fee_code, APPLICATION_FEE_CODE);
        assert_eq!(fee.description, "application for a divorce");
    }

    #[test]
    fn test_invitation_keeps_existing_access_code() {
        let ctx = ctx();
        let sc = StageContext {
            case_id: caseflow_core::CaseId::new(4_111_111_111_111_111).unwrap(),
            current_state: Draft,
            target_state: Some(AwaitingApplicant2Response),
            ctx: &ctx,
        };
        let mut data = CaseData::default();
        invite_applicant2(&mut data, &sc);
        let code = data.application.applicant2_access_code.clone();
        assert_eq!(code.as_ref().map(String::len), Some(8));
        invite_applicant2(&mut data, &sc);
        assert_eq!(data.application.applicant2_access_code, code);
        assert_eq!(data.due_date, chrono::NaiveDate::from_ymd_opt(2026, 6, 15));
    }

    #[test]
    fn test_payment_purpose_of_staged_payment_is_kept() {
        let mut data = CaseData::default();
        data.input.payment = Some(caseflow_core::Payment {
            reference: "RC-1".into(),
            purpose: PaymentPurpose::Application,
            amount_pence: 59_300,
            status: caseflow_core::PaymentStatus::Success,
            created: Timestamp::parse("2026-06-01T09:00:00Z").unwrap(),
            channel: None,
        });
        record_staged_payment(&mut data);
        assert!(data.input.payment.is_none());
        assert_eq!(data.payments.len(), 1);
        assert_eq!(data.payments[0].purpose, PaymentPurpose::Application);
    }
}
