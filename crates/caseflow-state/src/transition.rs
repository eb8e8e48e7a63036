//! # Source and Target Specifications
//!
//! An event's [`Transition`] says which states it may leave and where it
//! goes. Four shapes cover every event:
//!
//! ```text
//! Fixed     {S1, S2, ...} ──▶ T
//! Stay      {S1, S2, ...} ──▶ (current state)
//! Computed  {S1, S2, ...} ──▶ f(data) ∈ reachable
//! Edges     S1 ──▶ T1, S2 ──▶ T2, ...
//! ```
//!
//! Source sets are written with [`SourceStates`], which includes an "all
//! states except" form; [`SourceStates::resolve`] turns every form into an
//! explicit [`StateSet`] once, at registry build time.

use caseflow_core::{CaseData, State, StateSet};

/// Data-driven target resolver.
///
/// Receives the validated, pre-mutation case data and the current state.
/// Must return a member of the event's declared reachable set.
pub type TargetFn = fn(&CaseData, State) -> State;

/// States an event may be started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStates {
    /// Every state.
    All,
    /// Exactly one state.
    Single(State),
    /// Any of the listed states.
    Set(StateSet),
    /// Every state except the listed ones.
    AllExcept(StateSet),
}

impl SourceStates {
    /// Explicit set of permitted states.
    pub const fn resolve(self) -> StateSet {
        match self {
            Self::All => StateSet::all(),
            Self::Single(s) => StateSet::single(s),
            Self::Set(set) => set,
            Self::AllExcept(excluded) => StateSet::all_except(excluded),
        }
    }
}

impl From<State> for SourceStates {
    fn from(state: State) -> Self {
        Self::Single(state)
    }
}

impl From<StateSet> for SourceStates {
    fn from(set: StateSet) -> Self {
        Self::Set(set)
    }
}

/// Where an event goes from where.
#[derive(Debug, Clone)]
pub enum Transition {
    /// From any source to one fixed state.
    Fixed { from: SourceStates, to: State },
    /// From any source back to the same state; data-only events.
    Stay { from: SourceStates },
    /// From any source to a state computed from case data.
    Computed {
        from: SourceStates,
        reachable: StateSet,
        resolve: TargetFn,
    },
    /// Explicit source → target pairs.
    Edges(Vec<(State, State)>),
}

impl Transition {
    pub fn fixed(from: impl Into<SourceStates>, to: State) -> Self {
        Self::Fixed {
            from: from.into(),
            to,
        }
    }

    pub fn stay(from: impl Into<SourceStates>) -> Self {
        Self::Stay { from: from.into() }
    }

    pub fn computed(from: impl Into<SourceStates>, reachable: StateSet, resolve: TargetFn) -> Self {
        Self::Computed {
            from: from.into(),
            reachable,
            resolve,
        }
    }

    pub fn edges(pairs: &[(State, State)]) -> Self {
        Self::Edges(pairs.to_vec())
    }

    /// Every state the event may be started from.
    pub fn sources(&self) -> StateSet {
        match self {
            Self::Fixed { from, .. } | Self::Stay { from } | Self::Computed { from, .. } => {
                from.resolve()
            }
            Self::Edges(pairs) => pairs.iter().map(|(s, _)| *s).collect(),
        }
    }

    /// Every state the event may land in when started from `source`.
    ///
    /// Empty when `source` is not a permitted source.
    pub fn targets_from(&self, source: State) -> StateSet {
        if !self.sources().contains(source) {
            return StateSet::empty();
        }
        match self {
            Self::Fixed { to, .. } => StateSet::single(*to),
            Self::Stay { .. } => StateSet::single(source),
            Self::Computed { reachable, .. } => *reachable,
            Self::Edges(pairs) => pairs
                .iter()
                .filter(|(s, _)| *s == source)
                .map(|(_, t)| *t)
                .collect(),
        }
    }

    /// Whether `from → to` is an edge of this transition.
    pub fn permits(&self, from: State, to: State) -> bool {
        self.targets_from(from).contains(to)
    }

    /// Evaluate the target for `current`; `None` when `current` is not a
    /// source. Computed results are returned unchecked.
    pub fn evaluate(&self, current: State, data: &CaseData) -> Option<State> {
        if !self.sources().contains(current) {
            return None;
        }
        Some(match self {
            Self::Fixed { to, .. } => *to,
            Self::Stay { .. } => current,
            Self::Computed { resolve, .. } => resolve(data, current),
            Self::Edges(pairs) => pairs.iter().find(|(s, _)| *s == current).map(|(_, t)| *t)?,
        })
    }

    /// Declared reachable set of a computed transition.
    pub fn reachable(&self) -> Option<StateSet> {
        match self {
            Self::Computed { reachable, .. } => Some(*reachable),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_holding(data: &CaseData, _: State) -> State {
        if data.is_joint() {
            State::Holding
        } else {
            State::AwaitingAos
        }
    }

    #[test]
    fn test_all_except_resolves() {
        let src = SourceStates::AllExcept(StateSet::of(&[State::Archived, State::Withdrawn]));
        let set = src.resolve();
        assert!(!set.contains(State::Archived));
        assert!(set.contains(State::Draft));
        assert_eq!(set.len(), caseflow_core::STATE_COUNT - 2);
    }

    #[test]
    fn test_fixed_evaluate() {
        let t = Transition::fixed(State::AwaitingPayment, State::Submitted);
        let data = CaseData::default();
        assert_eq!(t.evaluate(State::AwaitingPayment, &data), Some(State::Submitted));
        assert_eq!(t.evaluate(State::Draft, &data), None);
    }

    #[test]
    fn test_stay_returns_current() {
        let t = Transition::stay(SourceStates::All);
        assert_eq!(
            t.evaluate(State::Holding, &CaseData::default()),
            Some(State::Holding)
        );
        assert!(t.permits(State::Holding, State::Holding));
        assert!(!t.permits(State::Holding, State::Draft));
    }

    #[test]
    fn test_edges_pick_matching_pair() {
        let t = Transition::edges(&[
            (State::AwaitingConditionalOrder, State::ConditionalOrderDrafted),
            (State::ConditionalOrderPending, State::ConditionalOrderPending),
        ]);
        let data = CaseData::default();
        assert_eq!(
            t.evaluate(State::AwaitingConditionalOrder, &data),
            Some(State::ConditionalOrderDrafted)
        );
        assert_eq!(t.evaluate(State::Holding, &data), None);
        assert_eq!(t.sources().len(), 2);
    }

    #[test]
    fn test_computed_targets_from() {
        let reachable = StateSet::of(&[State::Holding, State::AwaitingAos]);
        let t = Transition::computed(State::AwaitingService, reachable, to_holding);
        assert_eq!(t.targets_from(State::AwaitingService), reachable);
        assert!(t.targets_from(State::Draft).is_empty());
        assert_eq!(
            t.evaluate(State::AwaitingService, &CaseData::default()),
            Some(State::AwaitingAos)
        );
    }
}
