//! # caseflow-events — The Event Catalog
//!
//! Every event the divorce and dissolution workflow offers, written as
//! [`EventDefinition`]s and grouped by stage of the case:
//!
//! | Module              | Covers                                               |
//! |---------------------|------------------------------------------------------|
//! | `citizen`           | drafting, joint hand-off, submission, fee payment    |
//! | `issue`             | help with fees, outstanding documents, issue, reject |
//! | `service`           | acknowledgement of service, service applications     |
//! | `conditional_order` | conditional order, legal advisor decision, pronounce |
//! | `final_order`       | final order applications and grant                   |
//! | `general`           | general applications, referrals, information requests|
//! | `admin`             | notes, documents, withdrawal, archiving, overrides   |
//!
//! [`build_registry`] validates the whole catalog with
//! [`RegistryBuilder`]; a catalog that does not build is a defect in this
//! crate, not a runtime condition.

mod admin;
mod citizen;
mod common;
mod conditional_order;
mod final_order;
mod general;
mod issue;
mod service;

use caseflow_core::Environment;
use caseflow_state::{EventDefinition, Registry, RegistryBuilder, RegistryError};

/// Names of events other crates and tools refer to directly.
pub mod names {
    pub use crate::admin::{CHANGE_STATE, EXPEDITE_HOLDING};
    pub use crate::citizen::{PAYMENT_MADE, RESUBMIT_ANSWERS};
    pub use crate::conditional_order::SUBMIT_CONDITIONAL_ORDER;
    pub use crate::final_order::APPLY_FOR_FINAL_ORDER;
    pub use crate::general::{GENERAL_CONSIDERATION, GENERAL_REFERRAL};
    pub use crate::service::SUBMIT_AOS;
}

/// The full catalog in registration order, test-only events included.
pub fn catalog() -> Vec<EventDefinition> {
    let mut events = Vec::new();
    events.extend(citizen::events());
    events.extend(issue::events());
    events.extend(service::events());
    events.extend(conditional_order::events());
    events.extend(final_order::events());
    events.extend(general::events());
    events.extend(admin::events());
    events
}

/// Build the registry for `environment`.
///
/// Test-only events are dropped in production by the builder.
pub fn build_registry(environment: Environment) -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new(environment);
    builder.register_all(catalog());
    let registry = builder.build()?;
    tracing::info!(
        %environment,
        events = registry.len(),
        "event registry built"
    );
    Ok(registry)
}
