//! # caseflow-validation — Validation Engine and Guard Library
//!
//! Pure, read-only checks over a case. A guard takes the case and the
//! execution context and returns human-readable messages; an empty list is
//! a pass. The [`ValidationEngine`] runs the guards an event wires (see
//! `caseflow_state::PipelineStages`) and accumulates their output.
//!
//! ## Crate Policy
//!
//! - Guards never mutate. They receive `&CaseRecord`.
//! - Guards are independent. Ordering between guards never changes the
//!   set of messages, only their order.
//! - Payment guards report at most one of "in progress" / "not completed".

pub mod engine;
pub mod guards;

pub use engine::ValidationEngine;
