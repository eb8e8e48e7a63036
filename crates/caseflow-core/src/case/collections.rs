//! Append-only case collections and the transient per-event input that
//! feeds them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NaturalKey;
use crate::context::Party;
use crate::state::State;
use crate::temporal::Timestamp;

// ─── Payments ────────────────────────────────────────────────────────

/// What a payment is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentPurpose {
    Application,
    ServiceApplication,
    GeneralApplication,
}

/// Payment status as reported by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    InProgress,
    Success,
    Declined,
    TimedOut,
    Cancelled,
    Error,
}

impl PaymentStatus {
    /// Whether the payment reached a final, unsuccessful outcome.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            Self::Declined | Self::TimedOut | Self::Cancelled | Self::Error
        )
    }
}

/// A single payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment-service reference. Natural key.
    pub reference: String,
    pub purpose: PaymentPurpose,
    pub amount_pence: u64,
    pub status: PaymentStatus,
    pub created: Timestamp,
    /// Payment channel (`online`, `telephone`, ...).
    #[serde(default)]
    pub channel: Option<String>,
}

impl NaturalKey for Payment {
    fn natural_key(&self) -> String {
        self.reference.clone()
    }
}

// ─── Documents ───────────────────────────────────────────────────────

/// Classification of a document held on the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Application,
    NoticeOfProceedings,
    MarriageCertificate,
    NameChangeEvidence,
    AcknowledgementOfService,
    DeemedServiceOrder,
    DispensedWithServiceOrder,
    AlternativeServiceOrder,
    BailiffPack,
    CertificateOfService,
    ConditionalOrderApplication,
    ConditionalOrderRefusal,
    CertificateOfEntitlement,
    ConditionalOrderGranted,
    FinalOrderApplication,
    FinalOrderGranted,
    GeneralApplication,
    RequestForInformationResponse,
    Correspondence,
    Other,
}

/// A document held on the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDocument {
    /// Document-store identifier. Natural key.
    pub id: String,
    pub document_type: DocumentType,
    pub file_name: String,
    pub created: Timestamp,
}

impl CaseDocument {
    /// A new document with a freshly minted id.
    pub fn new(document_type: DocumentType, file_name: impl Into<String>, created: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_type,
            file_name: file_name.into(),
            created,
        }
    }
}

impl NaturalKey for CaseDocument {
    fn natural_key(&self) -> String {
        self.id.clone()
    }
}

// ─── Notes ───────────────────────────────────────────────────────────

/// A caseworker note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseNote {
    pub author: String,
    pub note: String,
    pub created: Timestamp,
}

impl NaturalKey for CaseNote {
    fn natural_key(&self) -> String {
        format!("{}@{}", self.author, self.created)
    }
}

// ─── General applications ────────────────────────────────────────────

/// A general application made by one of the applicants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralApplication {
    pub party: Party,
    pub details: String,
    pub submitted: Timestamp,
    /// State the case was in when the application arrived.
    pub previous_state: State,
    #[serde(default)]
    pub help_with_fees_reference: Option<String>,
    pub fee_pence: u64,
}

impl NaturalKey for GeneralApplication {
    fn natural_key(&self) -> String {
        format!("{}@{}", self.party, self.submitted)
    }
}

// ─── Requests for information ────────────────────────────────────────

/// Who a request for information is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InformationRequestRecipient {
    Applicant1,
    Applicant2,
    BothApplicants,
}

impl InformationRequestRecipient {
    /// Whether `party` is an addressee of the request.
    pub fn includes(self, party: Party) -> bool {
        match self {
            Self::BothApplicants => true,
            Self::Applicant1 => party == Party::Applicant1,
            Self::Applicant2 => party == Party::Applicant2,
        }
    }

    /// The parties the request is addressed to.
    pub fn parties(self) -> &'static [Party] {
        match self {
            Self::Applicant1 => &[Party::Applicant1],
            Self::Applicant2 => &[Party::Applicant2],
            Self::BothApplicants => &[Party::Applicant1, Party::Applicant2],
        }
    }
}

/// A party's answer to a request for information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationResponse {
    pub party: Party,
    #[serde(default)]
    pub details: Option<String>,
    /// Uploaded document ids.
    #[serde(default)]
    pub documents: Vec<String>,
    /// The party says they cannot upload and will post documents instead.
    #[serde(default)]
    pub sending_by_post: bool,
    pub submitted: Timestamp,
}

/// A caseworker's request for further information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationRequest {
    pub recipient: InformationRequestRecipient,
    pub details: String,
    /// Natural key.
    pub requested: Timestamp,
    /// State to return to once the response is processed.
    pub previous_state: State,
    #[serde(default)]
    pub responses: Vec<InformationResponse>,
}

impl NaturalKey for InformationRequest {
    fn natural_key(&self) -> String {
        self.requested.to_string()
    }
}

/// Caseworker input for a new request for information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationRequestDraft {
    pub recipient: InformationRequestRecipient,
    pub details: String,
}

// ─── Event input ─────────────────────────────────────────────────────

/// Transient values entered on an event's form.
///
/// Each field is consumed (taken) by the event that uses it, so a
/// committed record never carries stale input into the next event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    /// Payment reported by the payment service for the current event.
    pub payment: Option<Payment>,
    /// Note text for `caseworker-add-note`.
    pub note: Option<String>,
    /// Document for `caseworker-upload-document`.
    pub document: Option<CaseDocument>,
    /// New request for information.
    pub information_request: Option<InformationRequestDraft>,
    /// Response text to a request for information.
    pub information_response: Option<String>,
    /// Document ids uploaded with a response.
    pub information_response_documents: Vec<String>,
    /// Clarification text for a refused conditional order.
    pub clarification: Option<String>,
    /// Reason entered for a general referral.
    pub referral_reason: Option<String>,
    /// Judge's or legal advisor's decision on a general referral.
    pub referral_decision: Option<String>,
    /// Details of a general application.
    pub general_application_details: Option<String>,
    /// Applicant making a general application, fixed when the event starts.
    pub general_applicant: Option<Party>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_statuses() {
        assert!(!PaymentStatus::InProgress.is_failed());
        assert!(!PaymentStatus::Success.is_failed());
        assert!(PaymentStatus::Declined.is_failed());
        assert!(PaymentStatus::TimedOut.is_failed());
        assert!(PaymentStatus::Cancelled.is_failed());
        assert!(PaymentStatus::Error.is_failed());
    }

    #[test]
    fn test_payment_status_wire_format() {
        let s = serde_json::to_string(&PaymentStatus::InProgress).unwrap();
        assert_eq!(s, "\"IN_PROGRESS\"");
    }

    #[test]
    fn test_recipient_includes() {
        assert!(InformationRequestRecipient::BothApplicants.includes(Party::Applicant2));
        assert!(InformationRequestRecipient::Applicant1.includes(Party::Applicant1));
        assert!(!InformationRequestRecipient::Applicant1.includes(Party::Applicant2));
    }

    #[test]
    fn test_new_documents_have_distinct_ids() {
        let now = Timestamp::parse("2026-03-01T09:30:00Z").unwrap();
        let a = CaseDocument::new(DocumentType::BailiffPack, "bailiff.pdf", now);
        let b = CaseDocument::new(DocumentType::BailiffPack, "bailiff.pdf", now);
        assert_ne!(a.natural_key(), b.natural_key());
    }

    #[test]
    fn test_note_key_includes_author_and_time() {
        let created = Timestamp::parse("2026-03-01T09:30:00Z").unwrap();
        let note = CaseNote {
            author: "cw-42".into(),
            note: "called applicant".into(),
            created,
        };
        assert_eq!(note.natural_key(), "cw-42@2026-03-01T09:30:00Z");
    }
}
