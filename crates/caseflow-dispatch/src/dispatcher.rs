//! # Side-Effect Dispatcher
//!
//! Runs an event's post-commit jobs against the committed case. Jobs run
//! one after another in declaration order, each on its own tokio task
//! under a timeout, so an error, a panic, or a hang in one job is caught
//! and reported without affecting the jobs after it. A slow job delays
//! the jobs after it by at most the job timeout before they start. Nothing
//! is retried and nothing is rolled back: the transition has already been
//! committed.

use std::sync::Arc;
use std::time::Duration;

use caseflow_core::{CaseRecord, DispatchSettings};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::job::SideEffectJob;

/// Result of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    /// Job identity.
    pub job: String,
    pub kind: &'static str,
    pub failed: bool,
    /// Failure reason; `None` on success.
    pub reason: Option<String>,
}

impl DispatchOutcome {
    fn success(job: String, kind: &'static str) -> Self {
        Self {
            job,
            kind,
            failed: false,
            reason: None,
        }
    }

    fn failure(job: String, kind: &'static str, reason: String) -> Self {
        Self {
            job,
            kind,
            failed: true,
            reason: Some(reason),
        }
    }
}

/// Post-commit job runner.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    job_timeout: Duration,
}

impl Dispatcher {
    pub fn new(settings: &DispatchSettings) -> Self {
        Self {
            job_timeout: Duration::from_millis(settings.job_timeout_ms),
        }
    }

    pub fn with_timeout(job_timeout: Duration) -> Self {
        Self { job_timeout }
    }

    /// Run `jobs` against `case`; one outcome per job, in order.
    ///
    /// Each job starts once the one before it has finished or timed out, so
    /// the whole call takes at most `jobs.len()` times the job timeout.
    pub async fn dispatch(
        &self,
        case: &CaseRecord,
        jobs: Vec<Box<dyn SideEffectJob>>,
    ) -> Vec<DispatchOutcome> {
        let case = Arc::new(case.clone());
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            let outcome = self.run_one(Arc::clone(&case), Arc::from(job)).await;
            let label = if outcome.failed { "failed" } else { "succeeded" };
            metrics::counter!(
                "caseflow_side_effects_total",
                "job_kind" => outcome.kind,
                "outcome" => label
            )
            .increment(1);
            match &outcome.reason {
                Some(reason) => warn!(
                    case_id = %case.id(),
                    job = %outcome.job,
                    reason = %reason,
                    "side effect failed"
                ),
                None => debug!(case_id = %case.id(), job = %outcome.job, "side effect succeeded"),
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_one(&self, case: Arc<CaseRecord>, job: Arc<dyn SideEffectJob>) -> DispatchOutcome {
        let id = job.id();
        let kind = job.kind();
        let task_job = Arc::clone(&job);
        let mut handle = tokio::spawn(async move { task_job.run(case).await });
        match timeout(self.job_timeout, &mut handle).await {
            Ok(Ok(Ok(()))) => DispatchOutcome::success(id, kind),
            Ok(Ok(Err(e))) => DispatchOutcome::failure(id, kind, e.to_string()),
            Ok(Err(join)) if join.is_panic() => {
                DispatchOutcome::failure(id, kind, "job panicked".to_string())
            }
            Ok(Err(join)) => DispatchOutcome::failure(id, kind, join.to_string()),
            Err(_) => {
                handle.abort();
                DispatchOutcome::failure(
                    id,
                    kind,
                    format!("timed out after {}ms", self.job_timeout.as_millis()),
                )
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&DispatchSettings::default())
    }
}
