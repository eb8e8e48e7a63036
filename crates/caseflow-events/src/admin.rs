//! # Case Administration
//!
//! Housekeeping events available across the lifecycle: notes, documents,
//! due dates, withdrawal, scanned paper documents, archiving, and the
//! superuser state override.

use caseflow_core::{
    push_unique, CaseData, CaseNote, CaseRecord, ExecutionContext, JobSpec, OfflineDocumentType,
    Party, Permission, Role, State, StateSet,
};
use caseflow_state::{EventDefinition, SourceStates, StageContext, Transition};
use caseflow_validation::guards::{self, empty_or_null};

use crate::common::{notify_applicants, CASEWORKER, STAFF, SYSTEM, TERMINAL};

use State::*;

pub const CHANGE_STATE: &str = "caseworker-change-state";
pub const EXPEDITE_HOLDING: &str = "test-expedite-holding-period";

pub(crate) fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "caseworker-update-due-date",
            "Update due date",
            "Change the date the next action on the case is due",
            Transition::stay(SourceStates::AllExcept(TERMINAL)),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[due_date]),
        EventDefinition::new(
            "caseworker-add-note",
            "Add note",
            "Add a note to the case",
            Transition::stay(SourceStates::All),
        )
        .grant(Permission::CreateReadUpdate, STAFF)
        .guards(&[guards::note])
        .on_transition(add_note),
        EventDefinition::new(
            "caseworker-upload-document",
            "Upload document",
            "Attach a document to the case",
            Transition::stay(SourceStates::All),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[guards::uploaded_document])
        .on_transition(upload_document),
        EventDefinition::new(
            "caseworker-withdraw",
            "Withdraw",
            "Withdraw the case on the applicant's instruction",
            Transition::fixed(SourceStates::AllExcept(TERMINAL), Withdrawn),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .post_commit(plan_withdrawal),
        EventDefinition::new(
            "caseworker-offline-document-verified",
            "Offline document verified",
            "Route a verified scanned document to the right stage",
            Transition::computed(
                OfflineDocumentReceived,
                StateSet::of(&[
                    Holding,
                    PendingDispute,
                    AwaitingLegalAdvisorReferral,
                    FinalOrderRequested,
                    Submitted,
                ]),
                offline_document_target,
            ),
        )
        .grant(Permission::CreateReadUpdate, CASEWORKER)
        .history_only(&[Role::LegalAdvisor, Role::Judge])
        .guards(&[offline_document_type])
        .on_transition(offline_document_verified),
        EventDefinition::new(
            "system-archive-case",
            "Archive case",
            "Archive a closed case",
            Transition::fixed(
                StateSet::of(&[FinalOrderComplete, Withdrawn, Rejected]),
                Archived,
            ),
        )
        .grant(Permission::CreateReadUpdate, &[Role::SystemUpdate, Role::SuperUser])
        .history_only(&[Role::CaseWorker]),
        EventDefinition::new(
            "system-remind-applicant2",
            "Remind applicant 2",
            "Remind applicant 2 to review the joint application",
            Transition::stay(AwaitingApplicant2Response),
        )
        .grant(Permission::CreateReadUpdate, SYSTEM)
        .history_only(STAFF)
        .guards(&[reminder_not_sent])
        .on_transition(mark_reminder_sent)
        .post_commit(plan_reminder),
        EventDefinition::new(
            CHANGE_STATE,
            "Change state",
            "Move the case to any state",
            Transition::computed(SourceStates::All, StateSet::all(), state_override_target),
        )
        .grant(Permission::CreateReadUpdateDelete, &[Role::SuperUser])
        .history_only(&[Role::CaseWorker])
        .guards(&[guards::change_state_target])
        .on_transition(clear_state_override),
        EventDefinition::new(
            EXPEDITE_HOLDING,
            "Expedite holding period",
            "End the holding period early in test environments",
            Transition::fixed(Holding, AwaitingConditionalOrder),
        )
        .grant(Permission::CreateReadUpdate, &[Role::CaseWorker, Role::SuperUser, Role::SystemUpdate])
        .on_transition(end_holding_period)
        .test_only(),
    ]
}

// ─── Guards ──────────────────────────────────────────────────────────

fn due_date(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.due_date.is_none() {
        vec![empty_or_null("DueDate")]
    } else {
        Vec::new()
    }
}

fn offline_document_type(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.offline_document.is_none() {
        vec![empty_or_null("TypeOfDocumentAttached")]
    } else {
        Vec::new()
    }
}

fn reminder_not_sent(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.application.applicant2_reminder_sent {
        vec!["Applicant 2 has already been reminded".to_string()]
    } else {
        Vec::new()
    }
}

// ─── Target resolution ───────────────────────────────────────────────

fn offline_document_target(data: &CaseData, _current: State) -> State {
    match data.offline_document {
        Some(OfflineDocumentType::AcknowledgementOfService)
            if data.acknowledgement_of_service.is_disputed() =>
        {
            PendingDispute
        }
        Some(OfflineDocumentType::AcknowledgementOfService) => Holding,
        Some(OfflineDocumentType::ConditionalOrder) => AwaitingLegalAdvisorReferral,
        Some(OfflineDocumentType::FinalOrder) => FinalOrderRequested,
        Some(OfflineDocumentType::Other) | None => Submitted,
    }
}

/// Reads the override before [`clear_state_override`] removes it.
fn state_override_target(data: &CaseData, current: State) -> State {
    data.state_override.unwrap_or(current)
}

// ─── Mutations ───────────────────────────────────────────────────────

fn add_note(data: &mut CaseData, sc: &StageContext<'_>) {
    if let Some(note) = data.input.note.take() {
        push_unique(
            &mut data.notes,
            CaseNote {
                author: sc.ctx.acting_role.as_str().to_string(),
                note,
                created: sc.ctx.now,
            },
        );
    }
}

fn upload_document(data: &mut CaseData, _sc: &StageContext<'_>) {
    if let Some(document) = data.input.document.take() {
        push_unique(&mut data.documents, document);
    }
}

fn offline_document_verified(data: &mut CaseData, sc: &StageContext<'_>) {
    match data.offline_document.take() {
        Some(OfflineDocumentType::AcknowledgementOfService) => {
            data.acknowledgement_of_service.date_submitted.get_or_insert(sc.ctx.now);
        }
        Some(OfflineDocumentType::ConditionalOrder) => {
            data.conditional_order.applicant1.submitted.get_or_insert(sc.ctx.now);
        }
        Some(OfflineDocumentType::FinalOrder) => {
            data.final_order.applicant1_applied.get_or_insert(sc.ctx.now);
        }
        Some(OfflineDocumentType::Other) | None => {}
    }
}

fn mark_reminder_sent(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.application.applicant2_reminder_sent = true;
}

fn clear_state_override(data: &mut CaseData, _sc: &StageContext<'_>) {
    data.state_override = None;
}

fn end_holding_period(data: &mut CaseData, sc: &StageContext<'_>) {
    data.due_date = Some(sc.ctx.today());
}

// ─── Side effects ────────────────────────────────────────────────────

fn plan_withdrawal(case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    notify_applicants(case, "case-withdrawn")
}

fn plan_reminder(_case: &CaseRecord, _ctx: &ExecutionContext) -> Vec<JobSpec> {
    vec![JobSpec::notify(Party::Applicant2, "applicant2-reminder")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::HowToRespond;

    #[test]
    fn test_offline_document_routing() {
        let mut data = CaseData::default();
        assert_eq!(offline_document_target(&data, OfflineDocumentReceived), Submitted);

        data.offline_document = Some(OfflineDocumentType::AcknowledgementOfService);
        assert_eq!(offline_document_target(&data, OfflineDocumentReceived), Holding);
        data.acknowledgement_of_service.how_to_respond = Some(HowToRespond::DisputeDivorce);
        assert_eq!(offline_document_target(&data, OfflineDocumentReceived), PendingDispute);

        data.offline_document = Some(OfflineDocumentType::FinalOrder);
        assert_eq!(offline_document_target(&data, OfflineDocumentReceived), FinalOrderRequested);
    }

    #[test]
    fn test_state_override_read_before_clear() {
        let mut data = CaseData::default();
        data.state_override = Some(AwaitingConditionalOrder);
        assert_eq!(state_override_target(&data, Holding), AwaitingConditionalOrder);
        data.state_override = None;
        assert_eq!(state_override_target(&data, Holding), Holding);
    }
}
