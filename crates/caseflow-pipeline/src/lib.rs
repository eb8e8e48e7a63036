//! # caseflow-pipeline — Callback Pipeline Driver
//!
//! The platform calls the core three times per event: before the form is
//! shown (about-to-start), when the caller submits (about-to-submit), and
//! once the transition has been committed (submitted). [`PipelineDriver`]
//! runs the registry's hooks for each call in a fixed order.
//!
//! ```text
//! NotStarted ──about_to_start──▶ PreValidated ──about_to_submit──▶ Transitioned
//!     │                               │                                 │
//!     └──────────────┬────────────────┘                          (platform commits)
//!                    ▼                                                  ▼
//!                 Rejected                                   SideEffectsDispatched
//! ```
//!
//! ## Failure classes
//!
//! - A state the event may not start from is a [`GuardFailure`] and comes
//!   back as `Err`. Nothing is mutated.
//! - Validation errors come back as `Ok` with phase [`PipelinePhase::Rejected`]
//!   and the input record unmodified.
//! - Side-effect failures are reported per job and never undo the commit.
//!
//! [`PipelineDriver::run`] plays the platform's role end to end against a
//! [`CaseStore`]: it enforces the access table, loads, commits, and then
//! dispatches.
//!
//! [`GuardFailure`]: caseflow_state::GuardFailure

pub mod driver;
pub mod error;
pub mod phase;
pub mod store;

pub use driver::PipelineDriver;
pub use error::PipelineError;
pub use phase::{CallbackResponse, PipelinePhase, RunOutcome};
pub use store::{CaseStore, InMemoryCaseStore, StoreError};
