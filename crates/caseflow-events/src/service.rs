//! # Acknowledgement of Service and Alternative Service
//!
//! The respondent's reply on a sole case, overdue replies, service
//! applications (deemed, dispensed, bailiff, alternative), certificates of
//! service, and disputed cases listed for a hearing.
//!
//! ```text
//! AwaitingAos ──draft──▶ AosDrafted ──submit──▶ Holding | PendingDispute | WelshTranslationReview
//!      │
//!  overdue ──▶ AosOverdue ──service application──▶ AwaitingServicePayment
//!                                                   AwaitingServiceConsideration ──decision──▶ ...
//! ```

use caseflow_core::{
    CaseData, CaseRecord, DocumentType, ExecutionContext, InterimApplicationType, JobSpec, Party,
    Permission, Role, ServiceType, State, StateSet,
};
use caseflow_state::{EventDefinition, StageContext, Transition};
use caseflow_validation::guards::{self, empty_or_null};

use crate::common::{
    acting_party, holding_due_date, notify_applicants, notify_both, record_staged_payment,
    today_plus, APPLICANT1, APPLICANT2, CASEWORKER, STAFF, SYSTEM,
};

use State::*;

pub const SUBMIT_AOS: &str = "submit-aos";

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "draft-aos",
            "Draft AoS",
            "The respondent starts their acknowledgement of service",
            Transition::edges(&[(AwaitingAos, AosDrafted), (AosOverdue, AosDrafted)]),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT2)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2)
        .guards(&[guards::sole_application])
        .on_transition(draft_aos),
        EventDefinition::new(
            "update-aos",
            "Update AoS",
            "The respondent updates their draft acknowledgement",
            Transition::stay(AosDrafted),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT2)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2),
        EventDefinition::new(
            SUBMIT_AOS,
            "Submit AoS",
            "The respondent submits their acknowledgement of service",
            Transition::computed(
                StateSet::of(&[AosDrafted, AosOverdue]),
                StateSet::of(&[Holding, PendingDispute, WelshTranslationReview]),
                aos_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT2)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_applicant2)
        .guards(&[guards::sole_application, guards::acknowledgement_of_service])
        .on_transition(submit_aos)
        .post_commit(plan_aos_submitted),
        EventDefinition::new(
            "system-progress-to-aos-overdue",
            "AoS overdue",
            "The respondent has not replied in time",
            Transition::fixed(AwaitingAos, AosOverdue),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(STAFF)
        .guards(&[due_date_passed])
        .post_commit(plan_aos_overdue),
        EventDefinition::new(
            "system-progress-held-case",
            "Awaiting conditional order",
            "The holding period has ended",
            Transition::fixed(Holding, AwaitingConditionalOrder),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(STAFF)
        .guards(&[due_date_passed])
        .on_transition(clear_due_date)
        .post_commit(plan_conditional_order_available),
        EventDefinition::new(
            "citizen-service-application",
            "Apply for service order",
            "Applicant 1 asks the court to serve another way",
            Transition::computed(
                StateSet::of(&[AwaitingAos, AosOverdue, AwaitingService]),
                StateSet::of(&[AwaitingServicePayment, AwaitingServiceConsideration]),
                service_application_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT1)
        .history_only(STAFF)
        .guards(&[guards::sole_application, guards::service_application])
        .on_transition(record_service_application),
        EventDefinition::new(
            "citizen-service-payment-made",
            "Service payment made",
            "Service application fee paid",
            Transition::fixed(AwaitingServicePayment, AwaitingServiceConsideration),
        )
        .grant(Permission::CreateReadUpdate, APPLICANT1)
        .history_only(STAFF)
        .guards(&[guards::service_payment])
        .on_transition(service_payment_made),
        EventDefinition::new(
            "legal-advisor-service-decision",
            "Service application decision",
            "Grant or refuse a service application",
            Transition::computed(
                AwaitingServiceConsideration,
                StateSet::of(&[AwaitingBailiffService, Holding, AwaitingAos]),
                service_decision_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, &[Role::LegalAdvisor, Role::SuperUser])
        .history_only(&[Role::CaseWorker, Role::Judge])
        .guards(&[guards::service_decision])
        .on_transition(service_decided)
        .post_commit(plan_service_decision),
        EventDefinition::new(
            "caseworker-issue-bailiff-pack",
            "Issue bailiff pack",
            "Send the papers to the bailiff",
            Transition::fixed(AwaitingBailiffService, IssuedToBailiff),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .post_commit(plan_bailiff_pack),
        EventDefinition::new(
            "caseworker-add-bailiff-return",
            "Add bailiff return",
            "Record whether the bailiff served the papers",
            Transition::computed(
                IssuedToBailiff,
                StateSet::of(&[Holding, AwaitingAos]),
                bailiff_return_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::bailiff_return])
        .on_transition(bailiff_returned)
        .post_commit(plan_bailiff_return),
        EventDefinition::new(
            "caseworker-confirm-service",
            "Confirm service",
            "Record the certificate of service",
            Transition::fixed(AwaitingService, Holding),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .grant(Permission::CreateReadUpdate, &[Role::Applicant1Solicitor])
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::certificate_of_service])
        .on_transition(service_confirmed)
        .post_commit(plan_service_confirmed),
        EventDefinition::new(
            "system-welsh-translation-complete",
            "Welsh translation complete",
            "The respondent's answers have been translated",
            Transition::computed(
                WelshTranslationReview,
                StateSet::of(&[Holding, PendingDispute]),
                translated_aos_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .on_transition(submit_aos)
        .post_commit(plan_aos_submitted),
        EventDefinition::new(
            "caseworker-list-for-hearing",
            "List for hearing",
            "List a disputed case for a hearing",
            Transition::fixed(PendingDispute, PendingHearingOutcome),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[dispute_hearing_date])
        .post_commit(plan_hearing_listed),
        EventDefinition::new(
            "caseworker-record-hearing-outcome",
            "Record hearing outcome",
            "Record whether the court dismissed the application",
            Transition::computed(
                PendingHearingOutcome,
                StateSet::of(&[Rejected, AwaitingConditionalOrder]),
                hearing_outcome_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .grant(Permission::CreateReadUpdate, &[Role::Judge])
        .history_only(&[Role::LegalAdvisor])
        .guards(&[hearing_outcome])
        .on_transition(clear_due_date)
        .post_commit(plan_hearing_outcome),
    ]
}

// ─── Guards ──────────────────────────────────────────────────────────

fn due_date_passed(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    match record.data.due_date {
        Some(due) if due > ctx.today() => vec![format!("Case is not due until {due}")],
        _ => Vec::new(),
    }
}

fn dispute_hearing_date(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.hearing.dispute_hearing_date.is_none() {
        vec![empty_or_null("DisputeHearingDate")]
    } else {
        Vec::new()
    }
}

fn hearing_outcome(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.hearing.application_dismissed.is_none() {
        vec![empty_or_null("ApplicationDismissed")]
    } else {
        Vec::new()
    }
}

// ─── Target resolution ───────────────────────────────────────────────

fn aos_target(data: &CaseData, _current: State) -> State {
    if data.applicant2.is_welsh() {
        WelshTranslationReview
    } else {
        translated_aos_target(data, WelshTranslationReview)
    }
}

fn translated_aos_target(data: &CaseData, _current: State) -> State {
    if data.acknowledgement_of_service.is_disputed() {
        PendingDispute
    } else {
        Holding
    }
}

fn service_application_target(data: &CaseData, _current: State) -> State {
    let options = &data.applicant1.interim_application_options;
    if options.help_with_fees_reference.is_some() {
        AwaitingServiceConsideration
    } else {
        AwaitingServicePayment
    }
}

fn service_decision_target(data: &CaseData, _current: State) -> State {
    let service = &data.alternative_service;
    match (service.granted, service.service_type) {
        (Some(true), Some(ServiceType::Bailiff)) => AwaitingBailiffService,
        (Some(true), Some(ServiceType::Deemed | ServiceType::Dispensed)) => Holding,
        _ => AwaitingAos,
    }
}

fn bailiff_return_target(data: &CaseData, _current: State) -> State {
    if data.alternative_service.successful_service == Some(true) {
        Holding
    } else {
        AwaitingAos
    }
}

fn hearing_outcome_target(data: &CaseData, _current: State) -> State {
    if data.hearing.application_dismissed == Some(true) {
        Rejected
    } else {
        AwaitingConditionalOrder
    }
}

// ─── Mutations ───────────────────────────────────────────────────────

fn clear_due_date(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.due_date = None;
}

fn draft_aos(data: &mut CaseData, sc: &StageContext<'_>) {
    data.acknowledgement_of_service
        .date_drafted
        .get_or_insert(sc.ctx.now);
}

fn submit_aos(data: &mut CaseData, sc: &StageContext<'_>) {
    data.acknowledgement_of_service
        .date_submitted
        .get_or_insert(sc.ctx.now);
    let timelines = sc.ctx.timelines();
    data.due_date = match sc.target() {
        Holding => Some(match data.application.issue_date {
            Some(issued) => issued + chrono::Days::new(timelines.holding_period_days),
            None => today_plus(sc, timelines.holding_period_days),
        }),
        PendingDispute => Some(today_plus(sc, timelines.dispute_answer_days)),
        _ => data.due_date,
    };
}

fn record_service_application(data: &mut CaseData, sc: &StageContext<'_>) {
    let options = data.applicant(acting_party(sc)).interim_application_options.clone();
    let service = &mut data.alternative_service;
    service.service_type = options.application_type.and_then(|kind| match kind {
        InterimApplicationType::DeemedService => Some(ServiceType::Deemed),
        InterimApplicationType::DispensedWithService => Some(ServiceType::Dispensed),
        InterimApplicationType::BailiffService => Some(ServiceType::Bailiff),
        InterimApplicationType::AlternativeService => Some(ServiceType::Alternative),
        InterimApplicationType::GeneralApplication => None,
    });
    service.application_date = Some(sc.ctx.today());
    service.help_with_fees_reference = options.help_with_fees_reference;
    service.details = options.details;
    service.granted = None;
    service.decision_date = None;
    service.successful_service = None;
}

fn service_payment_made(data: &mut CaseData, _sc: &StageContext<'_>) {
    record_staged_payment(data);
}

fn service_decided(data: &mut CaseData, sc: &StageContext<'_>) {
    data.alternative_service.decision_date = Some(sc.ctx.today());
    if sc.target() == AwaitingAos {
        data.due_date = Some(today_plus(sc, sc.ctx.timelines().aos_response_days));
    }
    holding_due_date(data, sc);
}

fn bailiff_returned(data: &mut CaseData, sc: &StageContext<'_>) {
    data.alternative_service.bailiff_return_date = Some(sc.ctx.today());
    holding_due_date(data, sc);
}

fn service_confirmed(data: &mut CaseData, sc: &StageContext<'_>) {
    let served = data
        .application
        .certificate_of_service_date
        .unwrap_or_else(|| sc.ctx.today());
    data.due_date = Some(served + chrono::Days::new(sc.ctx.timelines().holding_period_days));
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_aos_submitted(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    if case.state == WelshTranslationReview {
        return Vec::new();
    }
    let mut jobs = vec![
        JobSpec::generate(DocumentType::AcknowledgementOfService, "aos-response"),
        JobSpec::notify(Party::Applicant1, "aos-submitted-applicant1"),
        JobSpec::notify(Party::Applicant2, "aos-submitted-applicant2"),
    ];
    if case.state == PendingDispute {
        jobs.extend(notify_both("aos-disputed"));
    }
    jobs
}

fn plan_aos_overdue(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::notify(Party::Applicant1, "aos-overdue")]
}

fn plan_conditional_order_available(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "conditional-order-available")
}

fn plan_service_decision(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let service = &case.data.alternative_service;
    if service.granted != Some(true) {
        return vec![JobSpec::notify(Party::Applicant1, "service-application-refused")];
    }
    let order = match service.service_type {
        Some(ServiceType::Deemed) => Some((DocumentType::DeemedServiceOrder, "deemed-service-order")),
        Some(ServiceType::Dispensed) => Some((
            DocumentType::DispensedWithServiceOrder,
            "dispensed-with-service-order",
        )),
        Some(ServiceType::Alternative) => Some((
            DocumentType::AlternativeServiceOrder,
            "alternative-service-order",
        )),
        Some(ServiceType::Bailiff) | None => None,
    };
    let mut jobs: Vec<JobSpec> = order
        .map(|(kind, template)| JobSpec::generate(kind, template))
        .into_iter()
        .collect();
    jobs.push(JobSpec::notify(Party::Applicant1, "service-application-granted"));
    jobs
}

fn plan_bailiff_pack(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::generate(DocumentType::BailiffPack, "bailiff-pack")]
}

fn plan_bailiff_return(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    let template = if case.state == Holding {
        "bailiff-service-successful"
    } else {
        "bailiff-service-unsuccessful"
    };
    vec![JobSpec::notify(Party::Applicant1, template)]
}

fn plan_service_confirmed(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![
        JobSpec::generate(DocumentType::CertificateOfService, "certificate-of-service"),
        JobSpec::notify(Party::Applicant1, "service-confirmed"),
    ]
}

fn plan_hearing_listed(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_both("dispute-hearing-listed")
}

fn plan_hearing_outcome(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    match case.state {
        Rejected => notify_both("application-dismissed"),
        _ => notify_applicants(case, "conditional-order-available"),
    }
}
