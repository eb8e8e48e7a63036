//! # caseflow-core — Foundational Types for the Case Workflow Core
//!
//! Every other crate in the workspace depends on `caseflow-core`; it depends
//! on nothing internal. It defines the vocabulary the state machine, the
//! validation engine, the side-effect dispatcher, and the pipeline driver
//! share.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `CaseId` is a validated 16-digit
//!    platform reference with a Luhn check digit. No bare integers.
//!
//! 2. **Single `State` enum.** One closed enumeration of case-lifecycle
//!    states with exhaustive `match` everywhere. `StateSet` is a fixed-width
//!    bitset over it, so "all states except {...}" specifications resolve
//!    once, at registry build time, into explicit sets.
//!
//! 3. **Explicit execution context.** Environment, acting role, acting-party
//!    resolution, the clock, and workflow settings are passed into every
//!    pipeline invocation via [`ExecutionContext`]. Nothing in the core reads
//!    process environment or wall-clock time on its own.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] is UTC, truncated to seconds.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `caseflow-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod case;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod role;
pub mod side_effect;
pub mod state;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use case::{
    AcknowledgementOfService, AlternativeService, Applicant, Application, ApplicationType,
    CaseData, CaseDocument, CaseNote, CaseRecord, ClarificationResponse, ConditionalOrder,
    ConditionalOrderQuestions, DivorceOrDissolution, DocumentType, EventInput, FeeOrder,
    FinalOrder, GeneralApplication, GeneralReferral, Hearing, HowToRespond, InformationRequest,
    InformationRequestDraft, InformationRequestRecipient, InformationResponse,
    InterimApplicationOptions, InterimApplicationType, LanguagePreference, LegalAdvisorDecision,
    MarriageDetails, NaturalKey, OfflineDocumentType, Payment, PaymentPurpose, PaymentStatus,
    RefusalOption, ServiceMethod, ServiceType, Solicitor, push_unique,
};
pub use config::{ConfigError, DispatchSettings, Fees, LoggingSettings, Timelines, WorkflowConfig};
pub use context::{
    ActingPartyResolver, Environment, ExecutionContext, FixedPartyResolver, Party,
};
pub use error::CaseflowError;
pub use identity::CaseId;
pub use role::{Permission, Role};
pub use side_effect::{Downstream, JobSpec};
pub use state::{State, StateSet, STATE_COUNT};
pub use temporal::{add_months, Timestamp};
