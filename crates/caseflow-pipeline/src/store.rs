//! # Persistence Boundary
//!
//! The platform owns case storage. [`CaseStore`] is the slice of it the
//! pipeline needs for an end-to-end run: fetch the "before" snapshot and
//! commit the transitioned record. The commit is conditional on the stored
//! state still being the one the transition started from, which stands in
//! for the platform's per-case serialisation.

use std::collections::HashMap;

use async_trait::async_trait;
use caseflow_core::{CaseId, CaseRecord, State};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("case not found: {0}")]
    NotFound(CaseId),

    /// Another transition committed first.
    #[error("case {case_id} moved to {found} while a transition from {expected} was in flight")]
    Conflict {
        case_id: CaseId,
        expected: State,
        found: State,
    },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Case persistence consumed by [`PipelineDriver::run`](crate::PipelineDriver::run).
#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn load(&self, case_id: CaseId) -> Result<CaseRecord, StoreError>;

    /// Commit `record` if the stored case is still in `expected`.
    async fn commit(&self, record: &CaseRecord, expected: State) -> Result<(), StoreError>;
}

/// In-memory store for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: RwLock<HashMap<CaseId, CaseRecord>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `records`.
    pub fn with_cases(records: impl IntoIterator<Item = CaseRecord>) -> Self {
        let cases = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            cases: RwLock::new(cases),
        }
    }

    /// Insert or replace a case unconditionally.
    pub async fn insert(&self, record: CaseRecord) {
        self.cases.write().await.insert(record.id(), record);
    }

    pub async fn len(&self) -> usize {
        self.cases.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cases.read().await.is_empty()
    }
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn load(&self, case_id: CaseId) -> Result<CaseRecord, StoreError> {
        self.cases
            .read()
            .await
            .get(&case_id)
            .cloned()
            .ok_or(StoreError::NotFound(case_id))
    }

    async fn commit(&self, record: &CaseRecord, expected: State) -> Result<(), StoreError> {
        let mut cases = self.cases.write().await;
        let stored = cases
            .get_mut(&record.id())
            .ok_or(StoreError::NotFound(record.id()))?;
        if stored.state != expected {
            return Err(StoreError::Conflict {
                case_id: record.id(),
                expected,
                found: stored.state,
            });
        }
        *stored = record.clone();
        Ok(())
    }
}
