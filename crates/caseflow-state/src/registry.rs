//! # State Machine Registry
//!
//! The immutable event table, built once at startup by [`RegistryBuilder`]
//! and shared read-only (`Arc<Registry>`) for the life of the process.
//!
//! ## Build-time checks
//!
//! [`RegistryBuilder::build`] does not stop at the first problem. It
//! collects every [`ConfigurationInconsistency`] in the table so one run
//! of `caseflow check` (or one failing test) reports them all.
//!
//! ## Runtime query
//!
//! [`Registry::transition_for`] is pure: given an event, the current state,
//! and the case data, it returns the target state or a guard failure. A
//! computed target is re-checked against the event's declared reachable
//! set before it is returned.

use std::collections::{BTreeMap, HashSet};

use caseflow_core::{CaseData, Environment, State};
use tracing::debug;

use crate::access::{AccessControlTable, AccessGrants};
use crate::error::{ConfigurationInconsistency, GuardFailure, RegistryError, TransitionError};
use crate::event::{EventDefinition, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::graph::TransitionGraph;
use crate::transition::Transition;

// ─── Builder ─────────────────────────────────────────────────────────

/// Collects event definitions and validates them as a whole.
#[derive(Debug)]
pub struct RegistryBuilder {
    environment: Environment,
    events: Vec<EventDefinition>,
}

impl RegistryBuilder {
    /// Builder for `environment`. Test-only events are dropped in
    /// production.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            events: Vec::new(),
        }
    }

    pub fn register(&mut self, event: EventDefinition) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn register_all(&mut self, events: impl IntoIterator<Item = EventDefinition>) -> &mut Self {
        self.events.extend(events);
        self
    }

    /// Validate the table and freeze it.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let environment = self.environment;
        let events: Vec<EventDefinition> = self
            .events
            .into_iter()
            .filter(|def| {
                let keep = !(def.test_only && environment.is_production());
                if !keep {
                    debug!(event = def.id, %environment, "skipping test-only event");
                }
                keep
            })
            .collect();

        let mut inconsistencies = Vec::new();
        let mut seen = HashSet::new();
        for def in &events {
            if !seen.insert(def.id) {
                inconsistencies.push(ConfigurationInconsistency::DuplicateEvent(def.id.to_string()));
            }
            check_definition(def, &mut inconsistencies);
        }

        let by_id: BTreeMap<&'static str, &EventDefinition> =
            events.iter().map(|def| (def.id, def)).collect();
        for def in &events {
            for downstream in &def.downstream {
                match by_id.get(downstream.event) {
                    None => inconsistencies.push(ConfigurationInconsistency::UnknownDownstream {
                        event: def.id.to_string(),
                        downstream: downstream.event.to_string(),
                    }),
                    Some(target) if !target.grants.can_trigger(downstream.actor) => {
                        inconsistencies.push(ConfigurationInconsistency::DownstreamNotPermitted {
                            event: def.id.to_string(),
                            downstream: downstream.event.to_string(),
                            actor: downstream.actor,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        if !inconsistencies.is_empty() {
            return Err(RegistryError { inconsistencies });
        }

        let mut access = AccessControlTable::default();
        for def in &events {
            access.insert(def.id, def.grants.clone());
        }
        let graph = TransitionGraph::from_events(events.iter());
        let index = events
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id, i))
            .collect();

        debug!(
            events = events.len(),
            edges = graph.edges().len(),
            %environment,
            "registry built"
        );

        Ok(Registry {
            environment,
            events,
            index,
            access,
            graph,
        })
    }
}

fn check_definition(def: &EventDefinition, out: &mut Vec<ConfigurationInconsistency>) {
    let id = def.id.to_string();
    let name_len = def.name.chars().count();
    if name_len > MAX_NAME_LEN {
        out.push(ConfigurationInconsistency::NameTooLong {
            event: id.clone(),
            len: name_len,
            max: MAX_NAME_LEN,
        });
    }
    let description_len = def.description.chars().count();
    if description_len > MAX_DESCRIPTION_LEN {
        out.push(ConfigurationInconsistency::DescriptionTooLong {
            event: id.clone(),
            len: description_len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    if def.grants.triggerers().next().is_none() {
        out.push(ConfigurationInconsistency::NoTriggerRole(id.clone()));
    }
    if def.transition.sources().is_empty() {
        out.push(ConfigurationInconsistency::NoSourceStates(id.clone()));
    }
    match &def.transition {
        Transition::Computed { reachable, .. } if reachable.is_empty() => {
            out.push(ConfigurationInconsistency::EmptyReachableSet(id));
        }
        Transition::Edges(pairs) => {
            let mut sources = HashSet::new();
            for (source, _) in pairs {
                if !sources.insert(*source) {
                    out.push(ConfigurationInconsistency::DuplicatePairSource {
                        event: id.clone(),
                        source_state: *source,
                    });
                }
            }
        }
        _ => {}
    }
}

// ─── Registry ────────────────────────────────────────────────────────

/// Validated, immutable event table.
#[derive(Debug)]
pub struct Registry {
    environment: Environment,
    events: Vec<EventDefinition>,
    index: BTreeMap<&'static str, usize>,
    access: AccessControlTable,
    graph: TransitionGraph,
}

impl Registry {
    /// Environment the registry was built for.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Look up an event definition.
    pub fn get(&self, event: &str) -> Option<&EventDefinition> {
        self.index.get(event).map(|&i| &self.events[i])
    }

    /// Look up an event definition, failing with [`TransitionError::UnknownEvent`].
    pub fn event(&self, event: &str) -> Result<&EventDefinition, TransitionError> {
        self.get(event)
            .ok_or_else(|| TransitionError::UnknownEvent(event.to_string()))
    }

    /// Events in registration order.
    pub fn events(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The target state for `event` started from `current` with `data`.
    pub fn transition_for(
        &self,
        event: &str,
        current: State,
        data: &CaseData,
    ) -> Result<State, TransitionError> {
        let def = self.event(event)?;
        let target = def
            .transition
            .evaluate(current, data)
            .ok_or_else(|| TransitionError::Guard(GuardFailure::state_not_permitted(def.id, current)))?;
        if let Some(reachable) = def.transition.reachable() {
            if !reachable.contains(target) {
                return Err(TransitionError::UndeclaredTarget {
                    event: def.id.to_string(),
                    target,
                });
            }
        }
        Ok(target)
    }

    /// Whether `event` may be started from `state`, ignoring data.
    pub fn is_permitted(&self, event: &str, state: State) -> bool {
        self.get(event)
            .is_some_and(|def| def.transition.sources().contains(state))
    }

    /// Per-event role grants.
    pub fn access(&self) -> &AccessControlTable {
        &self.access
    }

    /// Grants for one event.
    pub fn permissions_for(&self, event: &str) -> Option<&AccessGrants> {
        self.access.permissions_for(event)
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::{Permission, Role, StateSet};

    use crate::transition::SourceStates;

    fn valid(id: &'static str, transition: Transition) -> EventDefinition {
        EventDefinition::new(id, "Valid event", "A valid event", transition)
            .grant(Permission::CreateReadUpdate, &[Role::CaseWorker])
    }

    fn bounce(_: &CaseData, _: State) -> State {
        State::Archived
    }

    #[test]
    fn test_build_and_transition() {
        let mut b = RegistryBuilder::new(Environment::Test);
        b.register(valid("issue", Transition::fixed(State::Submitted, State::AwaitingAos)));
        let registry = b.build().unwrap();
        let data = CaseData::default();
        assert_eq!(
            registry.transition_for("issue", State::Submitted, &data).unwrap(),
            State::AwaitingAos
        );
        let err = registry
            .transition_for("issue", State::Draft, &data)
            .unwrap_err();
        match err {
            TransitionError::Guard(g) => assert_eq!(g.reason, "state not permitted"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            registry.transition_for("nope", State::Draft, &data),
            Err(TransitionError::UnknownEvent(_))
        ));
    }

    #[test]
    fn test_inconsistencies_accumulate() {
        let mut b = RegistryBuilder::new(Environment::Test);
        b.register(valid("dup", Transition::stay(SourceStates::All)));
        b.register(valid("dup", Transition::stay(SourceStates::All)));
        b.register(EventDefinition::new(
            "bad",
            "This display name is far too long for the platform",
            "ok",
            Transition::stay(SourceStates::Set(StateSet::empty())),
        ));
        b.register(
            valid(
                "pairs",
                Transition::edges(&[
                    (State::Draft, State::Submitted),
                    (State::Draft, State::Withdrawn),
                ]),
            )
            .downstream("ghost", Role::SystemUpdate)
            .downstream("dup", Role::SystemUpdate),
        );
        let err = b.build().unwrap_err();
        let found = &err.inconsistencies;
        assert!(found.contains(&ConfigurationInconsistency::DuplicateEvent("dup".into())));
        assert!(found
            .iter()
            .any(|i| matches!(i, ConfigurationInconsistency::NameTooLong { .. })));
        assert!(found.contains(&ConfigurationInconsistency::NoTriggerRole("bad".into())));
        assert!(found.contains(&ConfigurationInconsistency::NoSourceStates("bad".into())));
        assert!(found.contains(&ConfigurationInconsistency::DuplicatePairSource {
            event: "pairs".into(),
            source_state: State::Draft
        }));
        assert!(found.contains(&ConfigurationInconsistency::UnknownDownstream {
            event: "pairs".into(),
            downstream: "ghost".into()
        }));
        assert!(found.contains(&ConfigurationInconsistency::DownstreamNotPermitted {
            event: "pairs".into(),
            downstream: "dup".into(),
            actor: Role::SystemUpdate
        }));
        assert!(err.to_string().starts_with("7 configuration inconsistencies"));
    }

    #[test]
    fn test_undeclared_computed_target_rejected() {
        let mut b = RegistryBuilder::new(Environment::Test);
        b.register(valid(
            "computed",
            Transition::computed(
                State::Holding,
                StateSet::single(State::AwaitingConditionalOrder),
                bounce,
            ),
        ));
        let registry = b.build().unwrap();
        assert_eq!(
            registry.transition_for("computed", State::Holding, &CaseData::default()),
            Err(TransitionError::UndeclaredTarget {
                event: "computed".into(),
                target: State::Archived
            })
        );
    }

    #[test]
    fn test_empty_reachable_set_rejected() {
        let mut b = RegistryBuilder::new(Environment::Test);
        b.register(valid(
            "computed",
            Transition::computed(State::Holding, StateSet::empty(), bounce),
        ));
        let err = b.build().unwrap_err();
        assert_eq!(
            err.inconsistencies,
            vec![ConfigurationInconsistency::EmptyReachableSet("computed".into())]
        );
    }

    #[test]
    fn test_test_only_events_skipped_in_production() {
        let build = |env| {
            let mut b = RegistryBuilder::new(env);
            b.register(valid("expedite", Transition::stay(State::Holding)).test_only());
            b.build().unwrap()
        };
        assert!(build(Environment::Production).get("expedite").is_none());
        assert!(build(Environment::Test).get("expedite").is_some());
    }
}
