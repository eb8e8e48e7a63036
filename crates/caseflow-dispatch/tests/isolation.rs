//! A failing, panicking, or hanging job never stops the jobs after it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use caseflow_core::{
    CaseData, CaseId, CaseRecord, DocumentType, JobSpec, Party, Role, State, Timestamp,
};
use caseflow_dispatch::{
    CollaboratorCall, CollaboratorError, Collaborators, Dispatcher, NotificationSender,
    RecordingCollaborators, SideEffectJob,
};

fn case() -> CaseRecord {
    CaseRecord::new(
        CaseId::new(4_111_111_111_111_111).unwrap(),
        State::AwaitingApplicant2Response,
        CaseData::default(),
        Timestamp::parse("2026-01-10T09:00:00Z").unwrap(),
    )
}

/// Fails for applicant 1, records for applicant 2.
struct FlakyNotifier {
    inner: Arc<RecordingCollaborators>,
}

#[async_trait]
impl NotificationSender for FlakyNotifier {
    async fn send(
        &self,
        case: &CaseRecord,
        recipient: Party,
        template: &str,
    ) -> Result<(), CollaboratorError> {
        if recipient == Party::Applicant1 {
            return Err(CollaboratorError::Unavailable("notify is down".into()));
        }
        self.inner.send(case, recipient, template).await
    }
}

struct Panicking;

#[async_trait]
impl SideEffectJob for Panicking {
    fn id(&self) -> String {
        "panicking".into()
    }
    fn kind(&self) -> &'static str {
        "test"
    }
    async fn run(&self, _case: Arc<CaseRecord>) -> Result<(), CollaboratorError> {
        panic!("boom");
    }
}

struct Hanging;

#[async_trait]
impl SideEffectJob for Hanging {
    fn id(&self) -> String {
        "hanging".into()
    }
    fn kind(&self) -> &'static str {
        "test"
    }
    async fn run(&self, _case: Arc<CaseRecord>) -> Result<(), CollaboratorError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_job_does_not_stop_next() {
    let recorder = Arc::new(RecordingCollaborators::new());
    let mut collaborators = Collaborators::recording(recorder.clone());
    collaborators.notifications = Arc::new(FlakyNotifier {
        inner: recorder.clone(),
    });

    let specs = [
        JobSpec::notify(Party::Applicant1, "resubmitted-applicant1"),
        JobSpec::notify(Party::Applicant2, "resubmitted-applicant2"),
    ];
    let outcomes = Dispatcher::default()
        .dispatch(&case(), collaborators.jobs_for(&specs))
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].failed);
    assert_eq!(
        outcomes[0].reason.as_deref(),
        Some("service unavailable: notify is down")
    );
    assert!(!outcomes[1].failed);
    assert_eq!(
        recorder.calls(),
        vec![CollaboratorCall::Notification {
            case_id: case().id(),
            recipient: Party::Applicant2,
            template: "resubmitted-applicant2".into(),
        }]
    );
}

#[tokio::test]
async fn test_hanging_jobs_delay_later_jobs_by_at_most_the_timeout() {
    let recorder = Arc::new(RecordingCollaborators::new());
    let collaborators = Collaborators::recording(recorder.clone());
    let mut jobs: Vec<Box<dyn SideEffectJob>> = vec![Box::new(Hanging), Box::new(Hanging)];
    jobs.push(collaborators.job_for(&JobSpec::notify(Party::Applicant2, "reminder")));

    let started = Instant::now();
    let outcomes = Dispatcher::with_timeout(Duration::from_millis(50))
        .dispatch(&case(), jobs)
        .await;

    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    assert!(outcomes[0].failed && outcomes[1].failed);
    assert!(!outcomes[2].failed);
    assert_eq!(recorder.calls().len(), 1);
}

#[tokio::test]
async fn test_panic_and_timeout_are_contained() {
    let recorder = Arc::new(RecordingCollaborators::new());
    let collaborators = Collaborators::recording(recorder.clone());
    let mut jobs: Vec<Box<dyn SideEffectJob>> = vec![Box::new(Panicking), Box::new(Hanging)];
    jobs.push(collaborators.job_for(&JobSpec::generate(DocumentType::BailiffPack, "bailiff-pack")));

    let outcomes = Dispatcher::with_timeout(Duration::from_millis(50))
        .dispatch(&case(), jobs)
        .await;

    assert_eq!(outcomes[0].reason.as_deref(), Some("job panicked"));
    assert_eq!(outcomes[1].reason.as_deref(), Some("timed out after 50ms"));
    assert!(!outcomes[2].failed);
    assert_eq!(recorder.calls().len(), 1);
}

#[tokio::test]
async fn test_jobs_run_in_declaration_order() {
    let recorder = Arc::new(RecordingCollaborators::new());
    let collaborators = Collaborators::recording(recorder.clone());
    let specs = [
        JobSpec::trigger("caseworker-general-referral", Role::SystemUpdate),
        JobSpec::notify(Party::Applicant1, "general-application-received"),
        JobSpec::generate(DocumentType::GeneralApplication, "general-application"),
    ];
    let outcomes = Dispatcher::default()
        .dispatch(&case(), collaborators.jobs_for(&specs))
        .await;

    let ids: Vec<&str> = outcomes.iter().map(|o| o.job.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "trigger caseworker-general-referral as system-update",
            "notify applicant1 (general-application-received)",
            "generate general-application",
        ]
    );
    let calls = recorder.calls();
    assert!(matches!(calls[0], CollaboratorCall::Event { .. }));
    assert!(matches!(calls[1], CollaboratorCall::Notification { .. }));
    assert!(matches!(calls[2], CollaboratorCall::Document { .. }));
}

#[tokio::test]
async fn test_no_jobs_no_outcomes() {
    let outcomes = Dispatcher::default().dispatch(&case(), Vec::new()).await;
    assert!(outcomes.is_empty());
}
