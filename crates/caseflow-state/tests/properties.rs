//! Properties of source resolution and transition shapes over arbitrary
//! state sets.

use caseflow_core::{CaseData, State, StateSet};
use caseflow_state::{SourceStates, Transition};
use proptest::prelude::*;
use proptest::sample::select;

fn any_state() -> impl Strategy<Value = State> {
    select(State::ALL.to_vec())
}

fn any_set() -> impl Strategy<Value = StateSet> {
    proptest::collection::vec(any_state(), 0..12).prop_map(|states| states.into_iter().collect())
}

/// Edge lists with at most one pair per source.
fn distinct_edges() -> impl Strategy<Value = Vec<(State, State)>> {
    proptest::collection::vec((any_state(), any_state()), 1..8).prop_map(|pairs| {
        let mut seen = StateSet::empty();
        pairs
            .into_iter()
            .filter(|(from, _)| {
                let fresh = !seen.contains(*from);
                seen.insert(*from);
                fresh
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_all_except_is_the_complement(excluded in any_set(), state in any_state()) {
        let resolved = SourceStates::AllExcept(excluded).resolve();
        prop_assert_eq!(resolved.contains(state), !excluded.contains(state));
        prop_assert_eq!(resolved.len() + excluded.len(), State::ALL.len());
    }

    #[test]
    fn prop_fixed_transition_lands_on_its_target(
        sources in any_set(),
        to in any_state(),
        state in any_state(),
    ) {
        let transition = Transition::fixed(sources, to);
        let data = CaseData::default();
        if sources.contains(state) {
            prop_assert_eq!(transition.evaluate(state, &data), Some(to));
            prop_assert!(transition.permits(state, to));
        } else {
            prop_assert_eq!(transition.evaluate(state, &data), None);
            prop_assert!(transition.targets_from(state).is_empty());
        }
    }

    #[test]
    fn prop_edges_follow_their_own_pair(pairs in distinct_edges(), state in any_state()) {
        let transition = Transition::edges(&pairs);
        let data = CaseData::default();
        let expected = pairs.iter().find(|(from, _)| *from == state).map(|(_, to)| *to);
        prop_assert_eq!(transition.evaluate(state, &data), expected);
        prop_assert_eq!(transition.sources().contains(state), expected.is_some());
        if let Some(to) = expected {
            prop_assert_eq!(transition.targets_from(state), StateSet::single(to));
        }
    }

    #[test]
    fn prop_stay_never_moves(sources in any_set(), state in any_state()) {
        let transition = Transition::stay(sources);
        let expected = sources.contains(state).then_some(state);
        prop_assert_eq!(transition.evaluate(state, &CaseData::default()), expected);
    }
}
