//! Conditional and final order guards.

use caseflow_core::{CaseRecord, ExecutionContext, Party};
use chrono::NaiveDate;

use super::{empty_or_null, is_blank, require};

fn field_prefix(party: Party) -> &'static str {
    match party {
        Party::Applicant1 => "Applicant1",
        Party::Applicant2 => "Applicant2",
    }
}

/// The acting applicant has confirmed their conditional order answers.
///
/// Callers who are not a party (caseworkers, solicitors acting through the
/// platform) are checked as applicant 1.
pub fn conditional_order_answers(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(Party::Applicant1);
    let questions = match party {
        Party::Applicant1 => &record.data.conditional_order.applicant1,
        Party::Applicant2 => &record.data.conditional_order.applicant2,
    };
    let prefix = field_prefix(party);
    let mut errors = Vec::new();
    if !questions.apply_for_conditional_order {
        errors.push(format!("{prefix}ApplyForConditionalOrder must be confirmed"));
    }
    if !questions.statement_of_truth {
        errors.push(format!("{prefix}ConditionalOrderStatementOfTruth must be confirmed"));
    }
    errors
}

/// A legal advisor decision has been entered.
pub fn legal_advisor_decision(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    if record.data.conditional_order.decision.is_none() {
        vec![empty_or_null("ConditionalOrderDecision")]
    } else {
        Vec::new()
    }
}

/// The applicant has written a clarification.
pub fn clarification_response(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    require(
        &mut errors,
        "ClarificationResponse",
        record.data.input.clarification.as_ref(),
    );
    errors
}

/// A court and a future hearing time are set.
pub fn hearing_details(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let co = &record.data.conditional_order;
    let mut errors = Vec::new();
    require(&mut errors, "Court", co.court.as_ref());
    match co.date_and_time_of_hearing {
        None => errors.push(empty_or_null("DateAndTimeOfHearing")),
        Some(at) if at < ctx.now => {
            errors.push("DateAndTimeOfHearing can not be in the past".to_string())
        }
        Some(_) => {}
    }
    errors
}

fn eligible_on(date: Option<NaiveDate>, field: &str, today: NaiveDate) -> Vec<String> {
    match date {
        None => vec![empty_or_null(field)],
        Some(from) if today < from => {
            vec![format!("Final order cannot be applied for before {from}")]
        }
        Some(_) => Vec::new(),
    }
}

/// Applicant 1 (or both, on a joint case) may now apply for a final order.
pub fn final_order_eligibility(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    eligible_on(
        record.data.final_order.eligible_from,
        "DateFinalOrderEligibleFrom",
        ctx.today(),
    )
}

/// The respondent on a sole case may now apply for a final order.
pub fn respondent_final_order_eligibility(
    record: &CaseRecord,
    ctx: &ExecutionContext,
) -> Vec<String> {
    eligible_on(
        record.data.final_order.respondent_eligible_from,
        "DateFinalOrderEligibleToRespondent",
        ctx.today(),
    )
}

/// Late applications carry an explanation.
pub fn final_order_late_explanation(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let fo = &record.data.final_order;
    match fo.overdue_from {
        Some(overdue) if ctx.today() > overdue && is_blank(fo.late_explanation.as_ref()) => {
            vec![empty_or_null("FinalOrderLateExplanation")]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{complete_case, ctx_on};
    use caseflow_core::Timestamp;

    #[test]
    fn test_conditional_order_answers_by_party() {
        let mut case = complete_case();
        let ctx = ctx_on("2026-06-01").with_party(Party::Applicant2);
        case.data.conditional_order.applicant1.apply_for_conditional_order = true;
        case.data.conditional_order.applicant1.statement_of_truth = true;
        assert_eq!(
            conditional_order_answers(&case, &ctx),
            vec![
                "Applicant2ApplyForConditionalOrder must be confirmed",
                "Applicant2ConditionalOrderStatementOfTruth must be confirmed",
            ]
        );
        assert!(conditional_order_answers(&case, &ctx_on("2026-06-01")).is_empty());
    }

    #[test]
    fn test_hearing_in_past_rejected() {
        let mut case = complete_case();
        case.data.conditional_order.court = Some("Birmingham".into());
        case.data.conditional_order.date_and_time_of_hearing =
            Some(Timestamp::parse("2026-05-01T10:00:00Z").unwrap());
        assert_eq!(
            hearing_details(&case, &ctx_on("2026-06-01")),
            vec!["DateAndTimeOfHearing can not be in the past"]
        );
    }

    #[test]
    fn test_final_order_eligibility_window() {
        let mut case = complete_case();
        case.data.final_order.eligible_from = NaiveDate::from_ymd_opt(2026, 6, 10);
        assert_eq!(
            final_order_eligibility(&case, &ctx_on("2026-06-01")),
            vec!["Final order cannot be applied for before 2026-06-10"]
        );
        assert!(final_order_eligibility(&case, &ctx_on("2026-06-10")).is_empty());
    }

    #[test]
    fn test_late_explanation_required_after_overdue() {
        let mut case = complete_case();
        case.data.final_order.overdue_from = NaiveDate::from_ymd_opt(2026, 1, 1);
        assert_eq!(
            final_order_late_explanation(&case, &ctx_on("2026-06-01")),
            vec!["FinalOrderLateExplanation cannot be empty or null"]
        );
        case.data.final_order.late_explanation = Some("was abroad".into());
        assert!(final_order_late_explanation(&case, &ctx_on("2026-06-01")).is_empty());
    }
}
