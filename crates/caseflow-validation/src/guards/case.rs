//! Application completeness: names, marriage, jurisdiction, statements of
//! truth, and prayers.

use caseflow_core::{add_months, CaseRecord, ExecutionContext};

use super::{empty_or_null, require};

/// Jurisdiction connection codes a case may rely on.
const JURISDICTION_CODES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// The fields every issued case must carry.
pub fn basic_case(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let data = &record.data;
    let marriage = &data.application.marriage;
    let mut errors = Vec::new();
    require(&mut errors, "Applicant1FirstName", data.applicant1.first_name.as_ref());
    require(&mut errors, "Applicant1LastName", data.applicant1.last_name.as_ref());
    require(&mut errors, "Applicant2FirstName", data.applicant2.first_name.as_ref());
    require(&mut errors, "Applicant2LastName", data.applicant2.last_name.as_ref());
    require(&mut errors, "MarriageApplicant1Name", marriage.applicant1_name.as_ref());
    if data.is_joint() {
        require(&mut errors, "MarriageApplicant2Name", marriage.applicant2_name.as_ref());
    }
    if marriage.date.is_none() {
        errors.push(empty_or_null("MarriageDate"));
    }
    errors
}

/// Marriage date is in the past and old enough at issue.
///
/// An absent date is left to [`basic_case`].
pub fn marriage_date(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let Some(date) = record.data.application.marriage.date else {
        return Vec::new();
    };
    let today = ctx.today();
    let months = ctx.timelines().minimum_marriage_age_months;
    let reference = record.data.application.issue_date.unwrap_or(today);
    if date > today {
        vec!["MarriageDate can not be in the future".to_string()]
    } else if add_months(date, months) > reference {
        vec![format!(
            "MarriageDate must be at least {months} months before the application is issued"
        )]
    } else {
        Vec::new()
    }
}

/// At least one jurisdiction connection, each a known code.
pub fn jurisdiction(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let connections = &record.data.application.jurisdiction_connections;
    if connections.is_empty() {
        return vec![empty_or_null("JurisdictionConnections")];
    }
    connections
        .iter()
        .filter(|code| !JURISDICTION_CODES.contains(&code.as_str()))
        .map(|code| format!("JurisdictionConnections contains unknown connection {code:?}"))
        .collect()
}

/// Applicant 1 has signed the statement of truth.
pub fn statement_of_truth(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.application.applicant1_statement_of_truth {
        Vec::new()
    } else {
        vec!["Applicant1StatementOfTruth must be confirmed".to_string()]
    }
}

/// On a joint application, applicant 2 has signed the statement of truth.
pub fn joint_statement_of_truth(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let data = &record.data;
    if data.is_joint() && !data.application.applicant2_statement_of_truth {
        vec!["Applicant2StatementOfTruth must be confirmed".to_string()]
    } else {
        Vec::new()
    }
}

/// Applicant 1 asks the court to end the relationship and confirms it has
/// broken down.
pub fn prayer(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let app = &record.data.application;
    let mut errors = Vec::new();
    if !app.applicant1_prayer {
        errors.push("Applicant1Prayer must be confirmed".to_string());
    }
    if !app.applicant1_screen_has_marriage_broken {
        errors.push("Applicant1ScreenHasMarriageBroken must be confirmed".to_string());
    }
    errors
}

/// Applicant 2's prayer and breakdown confirmation on a joint application.
pub fn joint_prayer(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let data = &record.data;
    if !data.is_joint() {
        return Vec::new();
    }
    let mut errors = Vec::new();
    if !data.application.applicant2_prayer {
        errors.push("Applicant2Prayer must be confirmed".to_string());
    }
    if !data.application.applicant2_screen_has_marriage_broken {
        errors.push("Applicant2ScreenHasMarriageBroken must be confirmed".to_string());
    }
    errors
}

/// Applicant 2 has reviewed and confirmed applicant 1's answers.
pub fn applicant2_answers(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    match record.data.application.applicant2_confirms_applicant1_information {
        Some(true) => Vec::new(),
        Some(false) => vec!["Applicant2ConfirmsApplicant1Information must be confirmed".to_string()],
        None => vec![empty_or_null("Applicant2ConfirmsApplicant1Information")],
    }
}

/// The case is a joint application.
pub fn joint_application(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.is_joint() {
        Vec::new()
    } else {
        vec!["This action is only available on a joint application".to_string()]
    }
}

/// The case is a sole application.
pub fn sole_application(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.is_sole() {
        Vec::new()
    } else {
        vec!["This action is only available on a sole application".to_string()]
    }
}

/// Applicant 2 explained the changes they want.
pub fn applicant2_change_explanation(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(
        &mut errors,
        "Applicant2ExplainsApplicant1IncorrectInformation",
        record.data.application.applicant2_change_explanation.as_ref(),
    );
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{complete_case, ctx_on};
    use caseflow_core::ApplicationType;
    use chrono::NaiveDate;

    #[test]
    fn test_complete_case_passes() {
        let case = complete_case();
        let ctx = ctx_on("2026-06-01");
        assert!(basic_case(&case, &ctx).is_empty());
        assert!(marriage_date(&case, &ctx).is_empty());
        assert!(jurisdiction(&case, &ctx).is_empty());
        assert!(statement_of_truth(&case, &ctx).is_empty());
        assert!(prayer(&case, &ctx).is_empty());
    }

    #[test]
    fn test_basic_case_reports_each_missing_field() {
        let mut case = complete_case();
        case.data.applicant1.first_name = Some("   ".into());
        case.data.applicant2.last_name = None;
        case.data.application.marriage.date = None;
        let errors = basic_case(&case, &ctx_on("2026-06-01"));
        assert_eq!(
            errors,
            vec![
                "Applicant1FirstName cannot be empty or null",
                "Applicant2LastName cannot be empty or null",
                "MarriageDate cannot be empty or null",
            ]
        );
    }

    #[test]
    fn test_joint_requires_marriage_applicant2_name() {
        let mut case = complete_case();
        case.data.application_type = ApplicationType::JointApplication;
        case.data.application.marriage.applicant2_name = None;
        assert_eq!(
            basic_case(&case, &ctx_on("2026-06-01")),
            vec!["MarriageApplicant2Name cannot be empty or null"]
        );
    }

    #[test]
    fn test_marriage_date_rules() {
        let mut case = complete_case();
        let ctx = ctx_on("2026-06-01");
        case.data.application.marriage.date = NaiveDate::from_ymd_opt(2026, 7, 1);
        assert_eq!(
            marriage_date(&case, &ctx),
            vec!["MarriageDate can not be in the future"]
        );
        case.data.application.marriage.date = NaiveDate::from_ymd_opt(2025, 12, 1);
        assert_eq!(marriage_date(&case, &ctx).len(), 1);
        case.data.application.marriage.date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(marriage_date(&case, &ctx).is_empty());
    }

    #[test]
    fn test_jurisdiction_codes() {
        let mut case = complete_case();
        let ctx = ctx_on("2026-06-01");
        case.data.application.jurisdiction_connections = vec![];
        assert_eq!(
            jurisdiction(&case, &ctx),
            vec!["JurisdictionConnections cannot be empty or null"]
        );
        case.data.application.jurisdiction_connections = vec!["A".into(), "Z".into()];
        assert_eq!(jurisdiction(&case, &ctx).len(), 1);
    }

    #[test]
    fn test_joint_only_guards_ignore_sole_cases() {
        let case = complete_case();
        let ctx = ctx_on("2026-06-01");
        assert!(joint_statement_of_truth(&case, &ctx).is_empty());
        assert!(joint_prayer(&case, &ctx).is_empty());
    }

    #[test]
    fn test_application_type_guards() {
        let mut case = complete_case();
        let ctx = ctx_on("2026-06-01");
        assert!(sole_application(&case, &ctx).is_empty());
        assert_eq!(joint_application(&case, &ctx).len(), 1);
        case.data.application_type = ApplicationType::JointApplication;
        assert!(joint_application(&case, &ctx).is_empty());
        assert_eq!(sole_application(&case, &ctx).len(), 1);
    }

    #[test]
    fn test_applicant2_answers() {
        let mut case = complete_case();
        let ctx = ctx_on("2026-06-01");
        assert_eq!(
            applicant2_answers(&case, &ctx),
            vec!["Applicant2ConfirmsApplicant1Information cannot be empty or null"]
        );
        case.data.application.applicant2_confirms_applicant1_information = Some(true);
        assert!(applicant2_answers(&case, &ctx).is_empty());
    }
}
