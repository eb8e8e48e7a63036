//! # General Applications, Referrals, and Requests for Information
//!
//! Events that park a case in a side state and later return it to where
//! it was. The state a case came from is stored on the record
//! (`GeneralReferral::previous_state`, `InformationRequest::previous_state`)
//! and read back by the computed transition that ends the detour.

use caseflow_core::{
    push_unique, CaseData, CaseRecord, ExecutionContext, GeneralApplication, InformationRequest,
    InformationResponse, InterimApplicationType, JobSpec, Party, Permission, Role, State,
    StateSet,
};
use caseflow_state::{EventDefinition, SourceStates, StageContext, Transition};
use caseflow_validation::guards;

use crate::common::{
    acting_party, record_staged_payment, return_to, CASEWORKER, CITIZENS, PARTIES, POST_ISSUE,
    STAFF, SYSTEM,
};

use State::*;

pub const GENERAL_REFERRAL: &str = "caseworker-general-referral";
pub const GENERAL_CONSIDERATION: &str = "caseworker-general-consideration";

/// States a request for information may be raised from, and returns to.
const INFORMATION_SOURCES: StateSet = POST_ISSUE.union(StateSet::of(&[
    Submitted,
    AwaitingDocuments,
    AwaitingHWFDecision,
]));

/// States a general referral may be made from.
const REFERRAL_SOURCES: StateSet = POST_ISSUE.union(StateSet::of(&[
    GeneralApplicationReceived,
    GeneralConsiderationComplete,
]));

/// Where a case goes once general consideration ends.
const CONSIDERATION_TARGETS: StateSet = POST_ISSUE.union(StateSet::of(&[
    GeneralConsiderationComplete,
]));

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "citizen-general-application",
            "Make a general application",
            "An applicant asks the court for a general order",
            Transition::computed(
                SourceStates::Set(POST_ISSUE),
                StateSet::of(&[AwaitingGeneralApplicationPayment, GeneralApplicationReceived]),
                general_application_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .pre_validate(stage_general_applicant)
        .guards(&[guards::general_application])
        .on_transition(record_general_application),
        EventDefinition::new(
            "citizen-general-application-payment-made",
            "General application paid",
            "General application fee paid",
            Transition::fixed(AwaitingGeneralApplicationPayment, GeneralApplicationReceived),
        )
        .grant(Permission::CreateReadUpdate, CITIZENS)
        .history_only(STAFF)
        .guards(&[guards::general_application_payment])
        .on_transition(general_application_paid)
        .post_commit(plan_general_application_paid)
        .downstream(GENERAL_REFERRAL, Role::SystemUpdate),
        EventDefinition::new(
            GENERAL_REFERRAL,
            "General referral",
            "Refer the case to a judge or legal advisor",
            Transition::fixed(SourceStates::Set(REFERRAL_SOURCES), AwaitingGeneralConsideration),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[referral_reason])
        .on_transition(refer),
        EventDefinition::new(
            GENERAL_CONSIDERATION,
            "General consideration",
            "Record the decision on a general referral",
            Transition::computed(
                AwaitingGeneralConsideration,
                CONSIDERATION_TARGETS,
                consideration_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, STAFF)
        .guards(&[guards::general_referral_decision])
        .on_transition(record_consideration)
        .post_commit(plan_consideration),
        EventDefinition::new(
            "caseworker-request-for-information",
            "Request information",
            "Ask one or both applicants for more information",
            Transition::fixed(SourceStates::Set(INFORMATION_SOURCES), InformationRequested),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::information_request])
        .on_transition(request_information)
        .post_commit(plan_information_request),
        EventDefinition::new(
            "citizen-submit-rfi-response",
            "Respond to information request",
            "An applicant answers a request for information",
            Transition::fixed(
                StateSet::of(&[InformationRequested, AwaitingRequestedInformation]),
                RequestedInformationSubmitted,
            ),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::information_response_addressee, guards::information_response])
        .on_transition(submit_information_response)
        .post_commit(plan_information_response),
        EventDefinition::new(
            "citizen-rfi-cannot-upload",
            "Cannot upload documents",
            "An applicant will post the requested documents instead",
            Transition::fixed(InformationRequested, AwaitingRequestedInformation),
        )
        .grant(Permission::CreateReadUpdate, PARTIES)
        .history_only(STAFF)
        .start_guard(guards::acting_party_is_party)
        .guards(&[guards::information_response_addressee])
        .on_transition(sending_by_post),
        EventDefinition::new(
            "caseworker-rfi-response-received",
            "Information received",
            "Return the case to where it was before the request",
            Transition::computed(
                StateSet::of(&[RequestedInformationSubmitted, AwaitingRequestedInformation]),
                INFORMATION_SOURCES,
                information_received_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge]),
    ]
}

// ─── Guards ──────────────────────────────────────────────────────────

/// Referrals raised by the system on a paid general application carry
/// no typed reason.
fn referral_reason(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    if ctx.acting_role == Role::SystemUpdate {
        return Vec::new();
    }
    guards::general_referral_reason(record, ctx)
}

// ─── Target resolution ───────────────────────────────────────────────

/// The applicant staged when the event started. Without one, the first
/// applicant with pending general application options.
fn general_applicant(data: &CaseData) -> Option<Party> {
    data.input.general_applicant.or_else(|| {
        [Party::Applicant1, Party::Applicant2].into_iter().find(|party| {
            data.applicant(*party).interim_application_options.application_type
                == Some(InterimApplicationType::GeneralApplication)
        })
    })
}

fn general_application_target(data: &CaseData, _current: State) -> State {
    let remitted = general_applicant(data).is_some_and(|party| {
        data.applicant(party)
            .interim_application_options
            .help_with_fees_reference
            .is_some()
    });
    if remitted {
        GeneralApplicationReceived
    } else {
        AwaitingGeneralApplicationPayment
    }
}

/// Reads `previous_state` before [`record_consideration`] clears it.
fn consideration_target(data: &CaseData, _current: State) -> State {
    return_to(
        data.general_referral.previous_state,
        POST_ISSUE,
        GeneralConsiderationComplete,
    )
}

fn information_received_target(data: &CaseData, _current: State) -> State {
    return_to(
        data.latest_information_request().map(|request| request.previous_state),
        INFORMATION_SOURCES,
        Submitted,
    )
}

// ─── Mutations ───────────────────────────────────────────────────────

fn stage_general_applicant(data: &mut CaseData, sc: &StageContext<'_>) {
    data.input.general_applicant = Some(acting_party(sc));
}

fn record_general_application(data: &mut CaseData, sc: &StageContext<'_>) {
    let party = data.input.general_applicant.take().unwrap_or_else(|| acting_party(sc));
    let options = std::mem::take(&mut data.applicant_mut(party).interim_application_options);
    push_unique(
        &mut data.general_applications,
        GeneralApplication {
            party,
            details: options.details.unwrap_or_default(),
            submitted: sc.ctx.now,
            previous_state: sc.current_state,
            help_with_fees_reference: options.help_with_fees_reference,
            fee_pence: sc.ctx.fees().general_application_pence,
        },
    );
}

fn general_application_paid(data: &mut CaseData, _sc: &StageContext<'_>) {
    record_staged_payment(data);
}

fn refer(data: &mut CaseData, sc: &StageContext<'_>) {
    let previous = match sc.current_state {
        GeneralApplicationReceived => data
            .latest_general_application()
            .map(|application| application.previous_state),
        GeneralConsiderationComplete => data.general_referral.previous_state,
        current => Some(current),
    };
    let system = sc.ctx.acting_role == Role::SystemUpdate;
    data.general_referral.reason = data
        .input
        .referral_reason
        .take()
        .or_else(|| system.then(|| "General application".to_string()));
    data.general_referral.previous_state = previous;
    data.general_referral.decision = None;
    data.general_referral.decision_date = None;
}

fn record_consideration(data: &mut CaseData, sc: &StageContext<'_>) {
    data.general_referral.decision = data.input.referral_decision.take();
    data.general_referral.decision_date = Some(sc.ctx.today());
    data.general_referral.previous_state = None;
}

fn request_information(data: &mut CaseData, sc: &StageContext<'_>) {
    if let Some(draft) = data.input.information_request.take() {
        push_unique(
            &mut data.information_requests,
            InformationRequest {
                recipient: draft.recipient,
                details: draft.details,
                requested: sc.ctx.now,
                previous_state: sc.current_state,
                responses: Vec::new(),
            },
        );
    }
}

fn push_response(data: &mut CaseData, response: InformationResponse) {
    let Some(request) = data.information_requests.last_mut() else {
        return;
    };
    let duplicate = request
        .responses
        .iter()
        .any(|r| r.party == response.party && r.submitted == response.submitted);
    if !duplicate {
        request.responses.push(response);
    }
}

fn submit_information_response(data: &mut CaseData, sc: &StageContext<'_>) {
    let response = InformationResponse {
        party: acting_party(sc),
        details: data.input.information_response.take(),
        documents: std::mem::take(&mut data.input.information_response_documents),
        sending_by_post: false,
        submitted: sc.ctx.now,
    };
    push_response(data, response);
}

fn sending_by_post(data: &mut CaseData, sc: &StageContext<'_>) {
    let response = InformationResponse {
        party: acting_party(sc),
        details: None,
        documents: Vec::new(),
        sending_by_post: true,
        submitted: sc.ctx.now,
    };
    push_response(data, response);
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_general_application_paid(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::trigger(GENERAL_REFERRAL, Role::SystemUpdate)]
}

fn plan_consideration(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    match case.data.latest_general_application() {
        Some(application) => vec![JobSpec::notify(application.party, "general-application-decided")],
        None => Vec::new(),
    }
}

fn plan_information_request(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    case.data
        .latest_information_request()
        .map(|request| {
            request
                .recipient
                .parties()
                .iter()
                .map(|party| JobSpec::notify(*party, "request-for-information"))
                .collect()
        })
        .unwrap_or_default()
}

fn plan_information_response(case: &CaseRecord, ctx: &ExecutionContext) -> Vec<JobSpec> {
    let party = ctx.acting_party(case.id()).unwrap_or(Party::Applicant1);
    vec![JobSpec::notify(party, "request-for-information-response-received")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::{InformationRequestRecipient, Timestamp};

    fn request(previous_state: State) -> InformationRequest {
        InformationRequest {
            recipient: InformationRequestRecipient::Applicant1,
            details: "send the marriage certificate".into(),
            requested: Timestamp::parse("2026-05-01T10:00:00Z").unwrap(),
            previous_state,
            responses: Vec::new(),
        }
    }

    #[test]
    fn test_consideration_returns_to_referral_source() {
        let mut data = CaseData::default();
        data.general_referral.previous_state = Some(AwaitingConditionalOrder);
        assert_eq!(
            consideration_target(&data, AwaitingGeneralConsideration),
            AwaitingConditionalOrder
        );
    }

    #[test]
    fn test_consideration_without_previous_state_completes() {
        let data = CaseData::default();
        assert_eq!(
            consideration_target(&data, AwaitingGeneralConsideration),
            GeneralConsiderationComplete
        );
    }

    #[test]
    fn test_information_received_returns_to_requesting_state() {
        let mut data = CaseData::default();
        assert_eq!(information_received_target(&data, RequestedInformationSubmitted), Submitted);
        data.information_requests.push(request(Holding));
        assert_eq!(information_received_target(&data, RequestedInformationSubmitted), Holding);
    }

    #[test]
    fn test_general_application_target_follows_fee_remission() {
        let mut data = CaseData::default();
        let options = &mut data.applicant2.interim_application_options;
        options.application_type = Some(InterimApplicationType::GeneralApplication);
        assert_eq!(
            general_application_target(&data, Holding),
            AwaitingGeneralApplicationPayment
        );
        data.applicant2.interim_application_options.help_with_fees_reference =
            Some("HWF-123-ABC".into());
        assert_eq!(general_application_target(&data, Holding), GeneralApplicationReceived);
    }

    #[test]
    fn test_repeated_response_is_not_duplicated() {
        let mut data = CaseData::default();
        data.information_requests.push(request(Holding));
        let response = InformationResponse {
            party: Party::Applicant1,
            details: Some("attached".into()),
            documents: Vec::new(),
            sending_by_post: false,
            submitted: Timestamp::parse("2026-05-03T10:00:00Z").unwrap(),
        };
        push_response(&mut data, response.clone());
        push_response(&mut data, response);
        assert_eq!(data.information_requests[0].responses.len(), 1);
    }
}
