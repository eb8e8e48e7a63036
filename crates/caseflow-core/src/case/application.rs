//! Application answers and the fields derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collections::DocumentType;
use crate::temporal::Timestamp;

/// How the application papers will be served on the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceMethod {
    /// The court posts or emails the papers.
    #[default]
    CourtService,
    /// The applicant arranges personal service.
    PersonalService,
    /// The applicant's solicitor serves.
    SolicitorService,
}

/// Marriage or civil partnership details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarriageDetails {
    pub date: Option<NaiveDate>,
    pub applicant1_name: Option<String>,
    pub applicant2_name: Option<String>,
    pub place_of_marriage: Option<String>,
    /// Whether the ceremony took place in the UK.
    pub married_in_uk: bool,
}

/// Fee quote attached when the application is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeOrder {
    pub fee_code: String,
    pub description: String,
    pub amount_pence: u64,
}

/// Application answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub applicant1_statement_of_truth: bool,
    pub applicant2_statement_of_truth: bool,
    /// Applicant 1 confirms they want the court to end the relationship.
    pub applicant1_prayer: bool,
    pub applicant2_prayer: bool,
    /// Irretrievable breakdown confirmed by applicant 1.
    pub applicant1_screen_has_marriage_broken: bool,
    pub applicant2_screen_has_marriage_broken: bool,
    pub applicant1_hwf_reference: Option<String>,
    pub applicant2_hwf_reference: Option<String>,
    pub marriage: MarriageDetails,
    /// Jurisdiction connection codes (A–J).
    pub jurisdiction_connections: Vec<String>,
    pub service_method: ServiceMethod,
    /// Whether applicant 1 knows applicant 2's postal address.
    pub applicant1_knows_applicant2_address: bool,
    /// Whether applicant 1 wants to serve the papers another way.
    pub applicant1_wants_alternative_service: bool,
    /// Supporting documents applicant 1 could not upload online.
    pub applicant1_cannot_upload_documents: Vec<DocumentType>,
    /// Applicant 2 confirms applicant 1's answers are correct.
    pub applicant2_confirms_applicant1_information: Option<bool>,
    /// Applicant 2's explanation when asking for changes.
    pub applicant2_change_explanation: Option<String>,
    pub applicant2_access_code: Option<String>,
    pub applicant2_reminder_sent: bool,
    pub fee_order: Option<FeeOrder>,
    pub date_submitted: Option<Timestamp>,
    pub issue_date: Option<NaiveDate>,
    pub reissue_date: Option<NaiveDate>,
    pub certificate_of_service_date: Option<NaiveDate>,
    pub rejection_reason: Option<String>,
}

impl Application {
    /// Whether the sole applicant must arrange service by another route
    /// before the case can be issued.
    pub fn needs_alternative_service_documents(&self) -> bool {
        self.applicant1_wants_alternative_service && !self.applicant1_knows_applicant2_address
    }

    /// Mint an eight-character access code applicant 2 uses to link to the
    /// case.
    pub fn generate_access_code() -> String {
        Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .filter(|c| !matches!(c, '0' | '1'))
            .take(8)
            .collect::<String>()
            .to_ascii_uppercase()
    }

    /// Whether the application has been issued by the court.
    pub fn is_issued(&self) -> bool {
        self.issue_date.is_some()
    }
}
