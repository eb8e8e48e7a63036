//! Service, acknowledgement, and order-stage sub-records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NaturalKey;
use crate::state::State;
use crate::temporal::Timestamp;

// ─── Acknowledgement of service ──────────────────────────────────────

/// How the respondent intends to respond to a sole application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HowToRespond {
    WithoutDisputeDivorce,
    DisputeDivorce,
}

/// The respondent's acknowledgement of service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcknowledgementOfService {
    pub confirm_read_petition: bool,
    /// `Some(false)` requires a jurisdiction disagreement reason.
    pub jurisdiction_agree: Option<bool>,
    pub reason_court_does_not_have_jurisdiction: Option<String>,
    pub how_to_respond: Option<HowToRespond>,
    pub statement_of_truth: bool,
    pub date_drafted: Option<Timestamp>,
    pub date_submitted: Option<Timestamp>,
}

impl AcknowledgementOfService {
    pub fn is_disputed(&self) -> bool {
        self.how_to_respond == Some(HowToRespond::DisputeDivorce)
    }
}

// ─── Service applications ────────────────────────────────────────────

/// Kind of service application under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    Deemed,
    Dispensed,
    Bailiff,
    Alternative,
}

/// A service application and its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeService {
    pub service_type: Option<ServiceType>,
    pub application_date: Option<NaiveDate>,
    pub help_with_fees_reference: Option<String>,
    pub details: Option<String>,
    /// Legal advisor decision; `None` until decided.
    pub granted: Option<bool>,
    pub decision_date: Option<NaiveDate>,
    /// Bailiff's report: whether the papers were served.
    pub successful_service: Option<bool>,
    pub bailiff_return_date: Option<NaiveDate>,
}

// ─── Hearing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hearing {
    pub dispute_hearing_date: Option<NaiveDate>,
    /// Outcome: `Some(true)` when the court dismissed the application,
    /// `Some(false)` when the case may proceed.
    pub application_dismissed: Option<bool>,
}

// ─── Conditional order ───────────────────────────────────────────────

/// Why a legal advisor refused a conditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefusalOption {
    /// The applicant must clarify their answers.
    MoreInfo,
    /// The application itself must be amended.
    AdminError,
}

/// Legal advisor decision on a conditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegalAdvisorDecision {
    Granted,
    Refused(RefusalOption),
}

/// One applicant's conditional-order answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalOrderQuestions {
    pub apply_for_conditional_order: bool,
    pub statement_of_truth: bool,
    pub drafted: Option<Timestamp>,
    pub submitted: Option<Timestamp>,
}

impl ConditionalOrderQuestions {
    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }
}

/// An applicant's answer to a clarification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationResponse {
    pub text: String,
    pub submitted: Timestamp,
}

impl NaturalKey for ClarificationResponse {
    fn natural_key(&self) -> String {
        self.submitted.to_string()
    }
}

/// Conditional order stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalOrder {
    pub applicant1: ConditionalOrderQuestions,
    pub applicant2: ConditionalOrderQuestions,
    pub decision: Option<LegalAdvisorDecision>,
    pub decision_date: Option<NaiveDate>,
    pub clarification_responses: Vec<ClarificationResponse>,
    pub court: Option<String>,
    pub date_and_time_of_hearing: Option<Timestamp>,
    pub granted_date: Option<NaiveDate>,
    pub certificate_of_entitlement_issued: bool,
}

// ─── Final order ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalOrder {
    /// Earliest date applicant 1 may apply.
    pub eligible_from: Option<NaiveDate>,
    /// Earliest date the respondent may apply on a sole case.
    pub respondent_eligible_from: Option<NaiveDate>,
    /// Date after which an application counts as late.
    pub overdue_from: Option<NaiveDate>,
    pub applicant1_applied: Option<Timestamp>,
    pub applicant2_applied: Option<Timestamp>,
    /// Required when applying after `overdue_from`.
    pub late_explanation: Option<String>,
    pub granted: Option<Timestamp>,
}

// ─── General referral ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralReferral {
    pub reason: Option<String>,
    /// State to return to once the referral is considered.
    pub previous_state: Option<State>,
    pub decision: Option<String>,
    pub decision_date: Option<NaiveDate>,
}

// ─── Offline documents ───────────────────────────────────────────────

/// Kind of scanned paper document received by bulk scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfflineDocumentType {
    AcknowledgementOfService,
    ConditionalOrder,
    FinalOrder,
    Other,
}
