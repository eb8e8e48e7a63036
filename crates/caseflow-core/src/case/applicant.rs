//! Applicant sub-records.

use serde::{Deserialize, Serialize};

/// Language the applicant wants correspondence in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguagePreference {
    #[default]
    English,
    Welsh,
}

/// A legal representative acting for an applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solicitor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub firm_name: Option<String>,
    pub reference: Option<String>,
}

/// Kind of interim application a citizen is making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterimApplicationType {
    /// Ask the court to treat the papers as served.
    DeemedService,
    /// Ask the court to dispense with service altogether.
    DispensedWithService,
    /// Ask a court bailiff to serve the papers.
    BailiffService,
    /// Serve by another method (email, social media, ...).
    AlternativeService,
    /// Any other request to the court.
    GeneralApplication,
}

impl InterimApplicationType {
    /// Whether this is a service application (as opposed to a general one).
    pub fn is_service_application(self) -> bool {
        !matches!(self, Self::GeneralApplication)
    }
}

/// Answers gathered while a citizen drafts an interim application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterimApplicationOptions {
    pub application_type: Option<InterimApplicationType>,
    /// Help-with-fees reference; `Some` means no fee is payable.
    pub help_with_fees_reference: Option<String>,
    pub statement_of_truth: bool,
    /// Free-text grounds for the application.
    pub details: Option<String>,
}

/// One of the two applicants on a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Applicant {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub language_preference: LanguagePreference,
    /// Whether a solicitor acts for this applicant.
    pub represented: bool,
    pub solicitor: Option<Solicitor>,
    /// Whether contact details must be withheld from the other party.
    pub contact_details_private: bool,
    pub interim_application_options: InterimApplicationOptions,
}

impl Applicant {
    /// "First Last", or whichever half is known.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    /// Whether correspondence must be translated into Welsh.
    pub fn is_welsh(&self) -> bool {
        self.language_preference == LanguagePreference::Welsh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_variants() {
        let mut a = Applicant::default();
        assert_eq!(a.full_name(), None);
        a.last_name = Some("Jones".into());
        assert_eq!(a.full_name().as_deref(), Some("Jones"));
        a.first_name = Some("Alex".into());
        assert_eq!(a.full_name().as_deref(), Some("Alex Jones"));
    }

    #[test]
    fn test_general_application_is_not_service() {
        assert!(InterimApplicationType::BailiffService.is_service_application());
        assert!(!InterimApplicationType::GeneralApplication.is_service_application());
    }
}
