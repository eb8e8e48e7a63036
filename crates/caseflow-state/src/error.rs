//! # Registry and Transition Errors
//!
//! Two very different failure classes live here. [`TransitionError`] is a
//! per-invocation outcome: the event does not exist, or the case is not in
//! a state the event may leave. [`ConfigurationInconsistency`] is a defect
//! in the event table itself, found once when the registry is built and
//! reported all together in [`RegistryError`].

use std::fmt;

use caseflow_core::{Role, State};
use thiserror::Error;

/// Reason text for a transition attempted from a state the event does not
/// list among its sources.
pub const STATE_NOT_PERMITTED: &str = "state not permitted";

/// The current state does not permit the event.
///
/// Callers must not mutate or persist anything after receiving one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardFailure {
    /// Event that was attempted.
    pub event: String,
    /// State the case was in.
    pub state: State,
    /// Human-readable reason.
    pub reason: String,
}

impl GuardFailure {
    pub fn state_not_permitted(event: &str, state: State) -> Self {
        Self {
            event: event.to_string(),
            state,
            reason: STATE_NOT_PERMITTED.to_string(),
        }
    }
}

impl fmt::Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}: {}", self.event, self.state, self.reason)
    }
}

/// Errors from [`Registry::transition_for`](crate::Registry::transition_for).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// No event with this name is registered.
    #[error("unknown event: {0:?}")]
    UnknownEvent(String),

    /// The current state does not permit the event.
    #[error("guard failure: {0}")]
    Guard(GuardFailure),

    /// A computed target fell outside the event's declared reachable set.
    #[error("event {event} computed target {target}, which it does not declare")]
    UndeclaredTarget {
        /// Event whose resolver misbehaved.
        event: String,
        /// The state it produced.
        target: State,
    },
}

/// A defect in the event table, detected at registry build time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationInconsistency {
    #[error("event {0:?} is registered more than once")]
    DuplicateEvent(String),

    #[error("event {event:?} display name is {len} chars (max {max})")]
    NameTooLong {
        event: String,
        len: usize,
        max: usize,
    },

    #[error("event {event:?} description is {len} chars (max {max})")]
    DescriptionTooLong {
        event: String,
        len: usize,
        max: usize,
    },

    #[error("event {0:?} grants no role create/read/update")]
    NoTriggerRole(String),

    #[error("event {0:?} has a computed target with an empty reachable set")]
    EmptyReachableSet(String),

    #[error("event {event:?} lists source {source_state} in more than one pair")]
    DuplicatePairSource { event: String, source_state: State },

    #[error("event {0:?} has no source states")]
    NoSourceStates(String),

    #[error("event {event:?} triggers unregistered event {downstream:?}")]
    UnknownDownstream { event: String, downstream: String },

    #[error("event {event:?} triggers {downstream:?} as {actor}, which cannot trigger it")]
    DownstreamNotPermitted {
        event: String,
        downstream: String,
        actor: Role,
    },
}

/// The registry could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} configuration inconsistencies: {}", .inconsistencies.len(), summarize(.inconsistencies))]
pub struct RegistryError {
    /// Every inconsistency found, in registration order.
    pub inconsistencies: Vec<ConfigurationInconsistency>,
}

fn summarize(items: &[ConfigurationInconsistency]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
