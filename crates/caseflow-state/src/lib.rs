//! # caseflow-state — Case State Machine Registry
//!
//! The static event table of the case workflow: which events exist, which
//! states each may start from, where each goes, who may trigger it, and
//! which hooks it runs.
//!
//! ## Modules
//!
//! - **Transitions** (`transition.rs`): source-state specifications
//!   (all / single / set / all-except) and target shapes (fixed, stay,
//!   computed within a declared reachable set, explicit pairs).
//!
//! - **Stages** (`stages.rs`): the five pipeline hooks an event may wire.
//!
//! - **Events** (`event.rs`): the event definition and its chained setters.
//!
//! - **Access** (`access.rs`): role → permission grants per event, and
//!   lints over them.
//!
//! - **Registry** (`registry.rs`): build-time validation that accumulates
//!   every configuration inconsistency, and the pure `transition_for`
//!   query.
//!
//! - **Graph** (`graph.rs`): the transitions as an explicit directed graph,
//!   with reachability queries and DOT / JSON export.
//!
//! ## Design
//!
//! Case state lives in data (`CaseRecord::state`) rather than in the type
//! system: the platform hands the core a record in any of ~50 states, and
//! the core must answer "is this event legal here" at runtime. The table is
//! therefore validated as a whole at startup instead of being checked by
//! the compiler, and every structural property the compiler would have
//! given us is asserted by `RegistryBuilder::build` or by tests.

pub mod access;
pub mod error;
pub mod event;
pub mod graph;
pub mod registry;
pub mod stages;
pub mod transition;

pub use access::{lint_grants, AccessControlTable, AccessGrants, AccessLint};
pub use error::{
    ConfigurationInconsistency, GuardFailure, RegistryError, TransitionError, STATE_NOT_PERMITTED,
};
pub use event::{EventDefinition, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
pub use graph::{Edge, TransitionGraph};
pub use registry::{Registry, RegistryBuilder};
pub use stages::{Guard, Mutation, PipelineStages, Planner, StageContext};
pub use transition::{SourceStates, TargetFn, Transition};
