//! Contact detail format checks.

use caseflow_core::{Applicant, CaseRecord, ExecutionContext, Party};

/// Loose email shape: one `@`, a non-empty local part, a dotted domain,
/// no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// UK postcode shape: outward code of 2–4 characters starting with a
/// letter, then an inward code of digit-letter-letter. Case and inner
/// spacing are ignored.
pub fn is_valid_postcode(postcode: &str) -> bool {
    let compact: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !(5..=7).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }
    let (outward, inward) = compact.split_at(compact.len() - 3);
    let inward: Vec<char> = inward.chars().collect();
    outward.starts_with(|c: char| c.is_ascii_alphabetic())
        && outward.chars().all(|c| c.is_ascii_alphanumeric())
        && outward.chars().any(|c| c.is_ascii_digit())
        && inward[0].is_ascii_digit()
        && inward[1].is_ascii_alphabetic()
        && inward[2].is_ascii_alphabetic()
}

fn check_applicant(prefix: &str, applicant: &Applicant, errors: &mut Vec<String>) {
    if let Some(email) = &applicant.email {
        if !is_valid_email(email) {
            errors.push(format!("{prefix}Email is not a valid email address"));
        }
    }
    if let Some(postcode) = &applicant.postcode {
        if !is_valid_postcode(postcode) {
            errors.push(format!("{prefix}Postcode is not a valid UK postcode"));
        }
    }
}

/// Applicant 1's email and postcode, where given, are well formed.
pub fn applicant1_contact_details(record: &CaseRecord, _ctx: &ExecutionContext) -> Vec<String> {
    let mut errors = Vec::new();
    check_applicant("Applicant1", &record.data.applicant1, &mut errors);
    errors
}

/// The acting applicant's email and postcode, where given, are well formed.
pub fn contact_details(record: &CaseRecord, ctx: &ExecutionContext) -> Vec<String> {
    let party = ctx.acting_party(record.id()).unwrap_or(Party::Applicant1);
    let prefix = match party {
        Party::Applicant1 => "Applicant1",
        Party::Applicant2 => "Applicant2",
    };
    let mut errors = Vec::new();
    check_applicant(prefix, record.data.applicant(party), &mut errors);
    errors
}
