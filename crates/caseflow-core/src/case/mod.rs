//! # Case Record
//!
//! The mutable aggregate for one case: its immutable identity, its current
//! [`State`], and every piece of business data the workflow reads or
//! writes. The platform owns persistence; the core receives a record by
//! value for the duration of one event and hands back a (possibly mutated)
//! copy.
//!
//! ## Append-only collections
//!
//! Documents, payments, notes, general applications, and information
//! requests are ordered lists that only grow. Each element type implements
//! [`NaturalKey`], and [`push_unique`] refuses to append an element whose
//! key is already present. This is what makes a re-delivered event
//! (at-least-once delivery from the platform) leave the collections
//! unchanged on the second run.

mod applicant;
mod application;
mod collections;
mod orders;

use serde::{Deserialize, Serialize};

use crate::context::Party;
use crate::identity::CaseId;
use crate::state::State;
use crate::temporal::Timestamp;

pub use applicant::{
    Applicant, InterimApplicationOptions, InterimApplicationType, LanguagePreference, Solicitor,
};
pub use application::{Application, FeeOrder, MarriageDetails, ServiceMethod};
pub use collections::{
    CaseDocument, CaseNote, DocumentType, EventInput, GeneralApplication, InformationRequest,
    InformationRequestDraft, InformationRequestRecipient, InformationResponse, Payment,
    PaymentPurpose, PaymentStatus,
};
pub use orders::{
    AcknowledgementOfService, AlternativeService, ClarificationResponse, ConditionalOrder,
    ConditionalOrderQuestions, FinalOrder, GeneralReferral, Hearing, HowToRespond,
    LegalAdvisorDecision, OfflineDocumentType, RefusalOption, ServiceType,
};

// ─── Application type ────────────────────────────────────────────────

/// Whether one or both parties are applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationType {
    /// Applicant 1 applies alone; applicant 2 is the respondent.
    #[default]
    SoleApplication,
    /// Both applicants apply together.
    JointApplication,
}

/// Whether the case ends a marriage or a civil partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DivorceOrDissolution {
    #[default]
    Divorce,
    Dissolution,
}

// ─── Case record ─────────────────────────────────────────────────────

/// One case: identity, current state, and business data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Platform case reference. Private: assigned once, never changed.
    id: CaseId,
    /// Current lifecycle state.
    pub state: State,
    /// Business data.
    pub data: CaseData,
    /// When the platform created the case.
    pub created_at: Timestamp,
}

impl CaseRecord {
    /// Wrap existing case data under a platform-assigned reference.
    pub fn new(id: CaseId, state: State, data: CaseData, created_at: Timestamp) -> Self {
        Self {
            id,
            state,
            data,
            created_at,
        }
    }

    /// The immutable case reference.
    pub fn id(&self) -> CaseId {
        self.id
    }
}

/// All business data held on a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseData {
    /// Sole or joint application.
    pub application_type: ApplicationType,
    /// Divorce (marriage) or dissolution (civil partnership).
    pub divorce_or_dissolution: DivorceOrDissolution,
    /// Applicant 1.
    pub applicant1: Applicant,
    /// Applicant 2 (the respondent on a sole application).
    pub applicant2: Applicant,
    /// Application answers and derived application fields.
    pub application: Application,
    /// Next date by which action is expected.
    pub due_date: Option<chrono::NaiveDate>,
    /// Payments, oldest first.
    pub payments: Vec<Payment>,
    /// Documents held on the case, oldest first.
    pub documents: Vec<CaseDocument>,
    /// Caseworker notes, oldest first.
    pub notes: Vec<CaseNote>,
    /// General applications, oldest first.
    pub general_applications: Vec<GeneralApplication>,
    /// Requests for information, oldest first.
    pub information_requests: Vec<InformationRequest>,
    /// Respondent's acknowledgement of service.
    pub acknowledgement_of_service: AcknowledgementOfService,
    /// Service applications and their outcome.
    pub alternative_service: AlternativeService,
    /// Dispute hearing.
    pub hearing: Hearing,
    /// Conditional order stage.
    pub conditional_order: ConditionalOrder,
    /// Final order stage.
    pub final_order: FinalOrder,
    /// General referral to a judge or legal advisor.
    pub general_referral: GeneralReferral,
    /// Kind of scanned paper document awaiting verification.
    pub offline_document: Option<OfflineDocumentType>,
    /// Superuser-selected target for a manual state change.
    pub state_override: Option<State>,
    /// Transient per-event input, cleared by the event that consumes it.
    pub input: EventInput,
}

impl CaseData {
    /// Whether this is a sole application.
    pub fn is_sole(&self) -> bool {
        self.application_type == ApplicationType::SoleApplication
    }

    /// Whether this is a joint application.
    pub fn is_joint(&self) -> bool {
        self.application_type == ApplicationType::JointApplication
    }

    /// The applicant record for `party`.
    pub fn applicant(&self, party: Party) -> &Applicant {
        match party {
            Party::Applicant1 => &self.applicant1,
            Party::Applicant2 => &self.applicant2,
        }
    }

    /// Mutable applicant record for `party`.
    pub fn applicant_mut(&mut self, party: Party) -> &mut Applicant {
        match party {
            Party::Applicant1 => &mut self.applicant1,
            Party::Applicant2 => &mut self.applicant2,
        }
    }

    /// The most recent payment made for `purpose`, if any.
    pub fn last_payment(&self, purpose: PaymentPurpose) -> Option<&Payment> {
        self.payments.iter().rev().find(|p| p.purpose == purpose)
    }

    /// The live (most recent) information request, if any.
    pub fn latest_information_request(&self) -> Option<&InformationRequest> {
        self.information_requests.last()
    }

    /// The most recent general application, if any.
    pub fn latest_general_application(&self) -> Option<&GeneralApplication> {
        self.general_applications.last()
    }

    /// Whether a help-with-fees reference covers the application fee.
    ///
    /// Joint applications need a reference from both applicants.
    pub fn application_fee_remitted(&self) -> bool {
        let a1 = self.application.applicant1_hwf_reference.is_some();
        if self.is_joint() {
            a1 && self.application.applicant2_hwf_reference.is_some()
        } else {
            a1
        }
    }
}

// ─── Natural keys ────────────────────────────────────────────────────

/// Identity of an element in an append-only collection.
pub trait NaturalKey {
    /// The key two elements must share to be considered the same entry.
    fn natural_key(&self) -> String;
}

/// Append `item` unless an element with the same natural key exists.
///
/// Returns `true` if the item was appended.
pub fn push_unique<T: NaturalKey>(collection: &mut Vec<T>, item: T) -> bool {
    let key = item.natural_key();
    if collection.iter().any(|existing| existing.natural_key() == key) {
        return false;
    }
    collection.push(item);
    true
}
