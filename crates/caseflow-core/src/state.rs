//! # Case State — Single Source of Truth
//!
//! Defines the closed `State` enumeration of the case lifecycle and
//! `StateSet`, a fixed-width bitset over it. Every `match` on `State` is
//! exhaustive, so adding a state forces every consumer to handle it.
//!
//! ## Lifecycle (happy path, sole application)
//!
//! ```text
//! Draft ──▶ AwaitingPayment ──▶ Submitted ──▶ AwaitingAos ──▶ AosDrafted
//!                                                               │
//!   AwaitingConditionalOrder ◀── Holding ◀──────────────────────┘
//!            │
//!            ▼
//!   ConditionalOrderDrafted ──▶ AwaitingLegalAdvisorReferral ──▶ AwaitingPronouncement
//!                                                                     │
//!   FinalOrderComplete ◀── FinalOrderRequested ◀── AwaitingFinalOrder ◀┘
//! ```
//!
//! Joint applications add the applicant 2 review loop in front
//! (`AwaitingApplicant2Response`, `AwaitingApplicant1Response`,
//! `Applicant2Approved`) and the `*Pending` / `AwaitingJoint*` waits for the
//! second applicant at conditional and final order.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CaseflowError;

/// A case-lifecycle state.
///
/// Serialises as the PascalCase variant name, which is also the platform's
/// state identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum State {
    /// Application being drafted by applicant 1.
    Draft,
    /// Joint: applicant 2 asked for changes; applicant 1 must respond.
    AwaitingApplicant1Response,
    /// Joint: applicant 2 has been invited to review the application.
    AwaitingApplicant2Response,
    /// Joint: applicant 2 has approved; applicant 1 may submit.
    Applicant2Approved,
    /// Submitted for payment of the application fee.
    AwaitingPayment,
    /// Awaiting a caseworker decision on help with fees.
    AwaitingHWFDecision,
    /// Awaiting further evidence supporting a help-with-fees claim.
    AwaitingHWFEvidence,
    /// Paid and submitted; awaiting issue.
    Submitted,
    /// Submitted but supporting documents are outstanding.
    AwaitingDocuments,
    /// Legal advisor asked for an amended application.
    AwaitingAmendedApplication,
    /// Issued for personal or solicitor service.
    AwaitingService,
    /// Issued; awaiting the respondent's acknowledgement of service.
    AwaitingAos,
    /// Respondent has started drafting the acknowledgement of service.
    AosDrafted,
    /// Acknowledgement of service not received in time.
    AosOverdue,
    /// Service application made; fee outstanding.
    AwaitingServicePayment,
    /// Service application awaiting a decision.
    AwaitingServiceConsideration,
    /// Bailiff service granted; pack not yet issued.
    AwaitingBailiffService,
    /// Papers issued to the bailiff for service.
    IssuedToBailiff,
    /// Welsh-language response awaiting translation.
    WelshTranslationReview,
    /// Respondent disputes the application.
    PendingDispute,
    /// Dispute listed for hearing; awaiting outcome.
    PendingHearingOutcome,
    /// Statutory holding period running.
    Holding,
    /// Applicants may apply for the conditional order.
    AwaitingConditionalOrder,
    /// Conditional order application drafted.
    ConditionalOrderDrafted,
    /// Joint: one applicant has applied for the conditional order.
    ConditionalOrderPending,
    /// Conditional order awaiting legal advisor consideration.
    AwaitingLegalAdvisorReferral,
    /// Legal advisor requested clarification.
    AwaitingClarification,
    /// Clarification provided; awaiting reconsideration.
    ClarificationSubmitted,
    /// Conditional order granted; awaiting pronouncement.
    AwaitingPronouncement,
    /// Conditional order pronounced.
    ConditionalOrderPronounced,
    /// Applicants may apply for the final order.
    AwaitingFinalOrder,
    /// Joint: one applicant has applied for the final order.
    AwaitingJointFinalOrder,
    /// Final order not applied for within twelve months of eligibility.
    FinalOrderOverdue,
    /// Final order requested by the applicant(s).
    FinalOrderRequested,
    /// Final order requested by the respondent.
    RespondentFinalOrderRequested,
    /// Final order referred for judicial consideration.
    FinalOrderPending,
    /// Final order granted (terminal).
    FinalOrderComplete,
    /// General application made; fee outstanding.
    AwaitingGeneralApplicationPayment,
    /// General application received and paid (or fee remitted).
    GeneralApplicationReceived,
    /// Case referred for general consideration.
    AwaitingGeneralConsideration,
    /// General consideration finished with no return state recorded.
    GeneralConsiderationComplete,
    /// Court requested information from a party.
    InformationRequested,
    /// Requested information will arrive by post.
    AwaitingRequestedInformation,
    /// Requested information submitted; awaiting review.
    RequestedInformationSubmitted,
    /// A scanned paper document is awaiting verification.
    OfflineDocumentReceived,
    /// Case created from a paper application.
    NewPaperCase,
    /// Application withdrawn (terminal).
    Withdrawn,
    /// Application rejected (terminal).
    Rejected,
    /// Case archived (terminal).
    Archived,
}

/// Total number of states. Used for compile-time assertions.
pub const STATE_COUNT: usize = 49;

const _: () = assert!(STATE_COUNT <= 64, "StateSet is a u64 bitset");

impl State {
    /// Returns every state in declaration order.
    pub const ALL: [State; STATE_COUNT] = [
        Self::Draft,
        Self::AwaitingApplicant1Response,
        Self::AwaitingApplicant2Response,
        Self::Applicant2Approved,
        Self::AwaitingPayment,
        Self::AwaitingHWFDecision,
        Self::AwaitingHWFEvidence,
        Self::Submitted,
        Self::AwaitingDocuments,
        Self::AwaitingAmendedApplication,
        Self::AwaitingService,
        Self::AwaitingAos,
        Self::AosDrafted,
        Self::AosOverdue,
        Self::AwaitingServicePayment,
        Self::AwaitingServiceConsideration,
        Self::AwaitingBailiffService,
        Self::IssuedToBailiff,
        Self::WelshTranslationReview,
        Self::PendingDispute,
        Self::PendingHearingOutcome,
        Self::Holding,
        Self::AwaitingConditionalOrder,
        Self::ConditionalOrderDrafted,
        Self::ConditionalOrderPending,
        Self::AwaitingLegalAdvisorReferral,
        Self::AwaitingClarification,
        Self::ClarificationSubmitted,
        Self::AwaitingPronouncement,
        Self::ConditionalOrderPronounced,
        Self::AwaitingFinalOrder,
        Self::AwaitingJointFinalOrder,
        Self::FinalOrderOverdue,
        Self::FinalOrderRequested,
        Self::RespondentFinalOrderRequested,
        Self::FinalOrderPending,
        Self::FinalOrderComplete,
        Self::AwaitingGeneralApplicationPayment,
        Self::GeneralApplicationReceived,
        Self::AwaitingGeneralConsideration,
        Self::GeneralConsiderationComplete,
        Self::InformationRequested,
        Self::AwaitingRequestedInformation,
        Self::RequestedInformationSubmitted,
        Self::OfflineDocumentReceived,
        Self::NewPaperCase,
        Self::Withdrawn,
        Self::Rejected,
        Self::Archived,
    ];

    /// Position of this state in [`State::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this state ends the case lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::FinalOrderComplete | Self::Withdrawn | Self::Rejected | Self::Archived
        )
    }

    /// The platform identifier of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::AwaitingApplicant1Response => "AwaitingApplicant1Response",
            Self::AwaitingApplicant2Response => "AwaitingApplicant2Response",
            Self::Applicant2Approved => "Applicant2Approved",
            Self::AwaitingPayment => "AwaitingPayment",
            Self::AwaitingHWFDecision => "AwaitingHWFDecision",
            Self::AwaitingHWFEvidence => "AwaitingHWFEvidence",
            Self::Submitted => "Submitted",
            Self::AwaitingDocuments => "AwaitingDocuments",
            Self::AwaitingAmendedApplication => "AwaitingAmendedApplication",
            Self::AwaitingService => "AwaitingService",
            Self::AwaitingAos => "AwaitingAos",
            Self::AosDrafted => "AosDrafted",
            Self::AosOverdue => "AosOverdue",
            Self::AwaitingServicePayment => "AwaitingServicePayment",
            Self::AwaitingServiceConsideration => "AwaitingServiceConsideration",
            Self::AwaitingBailiffService => "AwaitingBailiffService",
            Self::IssuedToBailiff => "IssuedToBailiff",
            Self::WelshTranslationReview => "WelshTranslationReview",
            Self::PendingDispute => "PendingDispute",
            Self::PendingHearingOutcome => "PendingHearingOutcome",
            Self::Holding => "Holding",
            Self::AwaitingConditionalOrder => "AwaitingConditionalOrder",
            Self::ConditionalOrderDrafted => "ConditionalOrderDrafted",
            Self::ConditionalOrderPending => "ConditionalOrderPending",
            Self::AwaitingLegalAdvisorReferral => "AwaitingLegalAdvisorReferral",
            Self::AwaitingClarification => "AwaitingClarification",
            Self::ClarificationSubmitted => "ClarificationSubmitted",
            Self::AwaitingPronouncement => "AwaitingPronouncement",
            Self::ConditionalOrderPronounced => "ConditionalOrderPronounced",
            Self::AwaitingFinalOrder => "AwaitingFinalOrder",
            Self::AwaitingJointFinalOrder => "AwaitingJointFinalOrder",
            Self::FinalOrderOverdue => "FinalOrderOverdue",
            Self::FinalOrderRequested => "FinalOrderRequested",
            Self::RespondentFinalOrderRequested => "RespondentFinalOrderRequested",
            Self::FinalOrderPending => "FinalOrderPending",
            Self::FinalOrderComplete => "FinalOrderComplete",
            Self::AwaitingGeneralApplicationPayment => "AwaitingGeneralApplicationPayment",
            Self::GeneralApplicationReceived => "GeneralApplicationReceived",
            Self::AwaitingGeneralConsideration => "AwaitingGeneralConsideration",
            Self::GeneralConsiderationComplete => "GeneralConsiderationComplete",
            Self::InformationRequested => "InformationRequested",
            Self::AwaitingRequestedInformation => "AwaitingRequestedInformation",
            Self::RequestedInformationSubmitted => "RequestedInformationSubmitted",
            Self::OfflineDocumentReceived => "OfflineDocumentReceived",
            Self::NewPaperCase => "NewPaperCase",
            Self::Withdrawn => "Withdrawn",
            Self::Rejected => "Rejected",
            Self::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = CaseflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| CaseflowError::UnknownState(s.to_string()))
    }
}

// ─── StateSet ────────────────────────────────────────────────────────

/// A set of states, stored as a bitset indexed by [`State::index`].
///
/// Constructors are `const` so event definitions can declare their state
/// sets as constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSet(u64);

impl StateSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every member of the enumeration.
    pub const fn all() -> Self {
        Self(u64::MAX >> (64 - STATE_COUNT))
    }

    /// The set containing exactly `states`.
    pub const fn of(states: &[State]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < states.len() {
            bits |= 1 << states[i].index();
            i += 1;
        }
        Self(bits)
    }

    /// The set containing only `state`.
    pub const fn single(state: State) -> Self {
        Self(1 << state.index())
    }

    /// Every state except those in `excluded`.
    pub const fn all_except(excluded: StateSet) -> Self {
        Self(Self::all().0 & !excluded.0)
    }

    /// Union of two sets.
    pub const fn union(self, other: StateSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Members of `self` not in `other`.
    pub const fn difference(self, other: StateSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether `state` is a member.
    pub const fn contains(&self, state: State) -> bool {
        self.0 & (1 << state.index()) != 0
    }

    /// Whether every member of `self` is also in `other`.
    pub const fn is_subset(&self, other: &StateSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Add a state.
    pub fn insert(&mut self, state: State) {
        self.0 |= 1 << state.index();
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no members.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = State> {
        let set = *self;
        State::ALL.into_iter().filter(move |s| set.contains(*s))
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut set = StateSet::empty();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for StateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for StateSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let states = Vec::<State>::deserialize(deserializer)?;
        Ok(states.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_states_count_and_order() {
        assert_eq!(State::ALL.len(), STATE_COUNT);
        for (i, state) in State::ALL.iter().enumerate() {
            assert_eq!(state.index(), i, "{state} is out of order in State::ALL");
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for state in State::ALL {
            let parsed: State = state.as_str().parse().unwrap();
            assert_eq!(parsed, state);
        }
        assert!("AWAITING_PAYMENT".parse::<State>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for state in State::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }

    #[test]
    fn test_terminal_states() {
        let terminal: Vec<State> = State::ALL.into_iter().filter(State::is_terminal).collect();
        assert_eq!(
            terminal,
            vec![
                State::FinalOrderComplete,
                State::Withdrawn,
                State::Rejected,
                State::Archived
            ]
        );
    }

    #[test]
    fn test_state_set_operations() {
        let set = StateSet::of(&[State::Draft, State::Holding]);
        assert!(set.contains(State::Draft));
        assert!(!set.contains(State::Submitted));
        assert_eq!(set.len(), 2);

        let all = StateSet::all();
        assert_eq!(all.len(), STATE_COUNT);
        let except = StateSet::all_except(set);
        assert_eq!(except.len(), STATE_COUNT - 2);
        assert!(!except.contains(State::Holding));
        assert!(set.is_subset(&all));
        assert!(!all.is_subset(&set));
        assert_eq!(all.difference(except), set);
    }

    #[test]
    fn test_state_set_serde() {
        let set = StateSet::of(&[State::Holding, State::Draft]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["Draft","Holding"]"#);
        let parsed: StateSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }
}
