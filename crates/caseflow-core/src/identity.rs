//! # Case Identity
//!
//! Newtype wrapper for the platform's case reference. A case reference is a
//! 16-digit number whose final digit is a Luhn check digit over the first
//! fifteen. The reference is assigned by the platform when the case is
//! created and never changes afterwards — `CaseId` has no mutators, and
//! [`CaseRecord`](crate::CaseRecord) keeps it in a private field.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaseflowError;

/// Smallest valid 16-digit reference.
const MIN_REFERENCE: u64 = 1_000_000_000_000_000;
/// Largest valid 16-digit reference.
const MAX_REFERENCE: u64 = 9_999_999_999_999_999;

/// Unique, immutable identifier of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CaseId(u64);

impl CaseId {
    /// Validate a full 16-digit reference, including its check digit.
    pub fn new(reference: u64) -> Result<Self, CaseflowError> {
        if !(MIN_REFERENCE..=MAX_REFERENCE).contains(&reference) {
            return Err(CaseflowError::InvalidCaseId(format!(
                "{reference} is not a 16-digit reference"
            )));
        }
        if luhn_check_digit(reference / 10) != (reference % 10) as u8 {
            return Err(CaseflowError::InvalidCaseId(format!(
                "{reference} fails the check-digit test"
            )));
        }
        Ok(Self(reference))
    }

    /// Build a reference from a 15-digit sequence number by appending the
    /// check digit.
    pub fn from_sequence(sequence: u64) -> Result<Self, CaseflowError> {
        if !(MIN_REFERENCE / 10..=MAX_REFERENCE / 10).contains(&sequence) {
            return Err(CaseflowError::InvalidCaseId(format!(
                "{sequence} is not a 15-digit sequence number"
            )));
        }
        Ok(Self(sequence * 10 + u64::from(luhn_check_digit(sequence))))
    }

    /// The raw numeric reference.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for CaseId {
    type Error = CaseflowError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaseId> for u64 {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CaseId {
    /// Renders in the platform's grouped form, e.g. `4111-1111-1111-1111`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let groups: Vec<&str> = (0..4).map(|i| &digits[i * 4..i * 4 + 4]).collect();
        f.write_str(&groups.join("-"))
    }
}

impl FromStr for CaseId {
    type Err = CaseflowError;

    /// Accepts both `4111111111111111` and `4111-1111-1111-1111`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();
        let reference = digits
            .parse::<u64>()
            .map_err(|e| CaseflowError::InvalidCaseId(format!("{s:?}: {e}")))?;
        Self::new(reference)
    }
}

/// Luhn check digit over `payload`, doubling from the rightmost digit.
fn luhn_check_digit(payload: u64) -> u8 {
    let mut sum = 0u32;
    let mut remaining = payload;
    let mut double = true;
    while remaining > 0 {
        let mut digit = (remaining % 10) as u32;
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
        remaining /= 10;
    }
    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid_reference() {
        let id = CaseId::new(4_111_111_111_111_111).unwrap();
        assert_eq!(id.value(), 4_111_111_111_111_111);
    }

    #[test]
    fn test_bad_check_digit_rejected() {
        assert!(CaseId::new(4_111_111_111_111_112).is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(CaseId::new(411_111_111_111_111).is_err());
        assert!(CaseId::new(0).is_err());
    }

    #[test]
    fn test_display_grouped() {
        let id = CaseId::new(4_111_111_111_111_111).unwrap();
        assert_eq!(id.to_string(), "4111-1111-1111-1111");
    }

    #[test]
    fn test_parse_with_and_without_dashes() {
        let a: CaseId = "4111-1111-1111-1111".parse().unwrap();
        let b: CaseId = "4111111111111111".parse().unwrap();
        assert_eq!(a, b);
        assert!("not-a-case".parse::<CaseId>().is_err());
    }

    #[test]
    fn test_serde_as_number() {
        let id = CaseId::new(4_111_111_111_111_111).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "4111111111111111");
        assert!(serde_json::from_str::<CaseId>("4111111111111112").is_err());
    }

    proptest! {
        #[test]
        fn from_sequence_always_validates(seq in 100_000_000_000_000u64..=999_999_999_999_999u64) {
            let id = CaseId::from_sequence(seq).unwrap();
            prop_assert!(CaseId::new(id.value()).is_ok());
            prop_assert_eq!(id.value() / 10, seq);
        }
    }
}
