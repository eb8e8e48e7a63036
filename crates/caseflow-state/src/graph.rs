//! # Transition Graph
//!
//! The registry's transitions as an explicit directed graph: one edge per
//! (source, event, target) triple. Built once with the registry and used
//! for structural queries (what can happen from here, what is reachable)
//! and for export to Graphviz DOT or JSON adjacency.
//!
//! Self-loops from data-only events are kept as edges: "event E is
//! available in state S" is as interesting as "E moves S to T".

use std::collections::VecDeque;
use std::fmt::Write;

use caseflow_core::{State, StateSet};
use serde::Serialize;

use crate::event::EventDefinition;

/// One `from --event--> to` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: State,
    pub event: &'static str,
    pub to: State,
}

/// Directed multigraph over states.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransitionGraph {
    edges: Vec<Edge>,
}

/// JSON adjacency export entry.
#[derive(Debug, Serialize)]
struct AdjacencyEntry<'a> {
    state: State,
    terminal: bool,
    edges: Vec<&'a Edge>,
}

impl TransitionGraph {
    /// Build the graph from registered events.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EventDefinition>) -> Self {
        let mut edges = Vec::new();
        for def in events {
            for from in def.transition.sources().iter() {
                for to in def.transition.targets_from(from).iter() {
                    edges.push(Edge {
                        from,
                        event: def.id,
                        to,
                    });
                }
            }
        }
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving `state`.
    pub fn edges_from(&self, state: State) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == state)
    }

    /// Distinct events that may be started from `state`, in registration
    /// order.
    pub fn events_from(&self, state: State) -> Vec<&'static str> {
        let mut events: Vec<&'static str> = Vec::new();
        for edge in self.edges_from(state) {
            if !events.contains(&edge.event) {
                events.push(edge.event);
            }
        }
        events
    }

    /// Every state reachable from `start` (including `start`).
    pub fn reachable_from(&self, start: State) -> StateSet {
        let mut seen = StateSet::single(start);
        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            for edge in self.edges_from(state) {
                if !seen.contains(edge.to) {
                    seen.insert(edge.to);
                    queue.push_back(edge.to);
                }
            }
        }
        seen
    }

    pub fn is_reachable(&self, from: State, to: State) -> bool {
        self.reachable_from(from).contains(to)
    }

    /// States with no path from [`State::Draft`].
    ///
    /// Some are expected: paper cases and scanned documents enter the
    /// lifecycle through case creation outside the workflow core.
    pub fn unreachable_from_draft(&self) -> StateSet {
        StateSet::all().difference(self.reachable_from(State::Draft))
    }

    /// Graphviz DOT rendering. Terminal states are drawn double-circled.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph caseflow {\n    rankdir=LR;\n    node [shape=box];\n");
        for state in State::ALL {
            if state.is_terminal() {
                let _ = writeln!(out, "    \"{state}\" [shape=doublecircle];");
            }
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                edge.from, edge.to, edge.event
            );
        }
        out.push('}');
        out
    }

    /// JSON adjacency list, one entry per state in enumeration order.
    pub fn to_adjacency_json(&self) -> serde_json::Value {
        let entries: Vec<AdjacencyEntry<'_>> = State::ALL
            .into_iter()
            .map(|state| AdjacencyEntry {
                state,
                terminal: state.is_terminal(),
                edges: self.edges_from(state).collect(),
            })
            .collect();
        serde_json::to_value(entries).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{SourceStates, Transition};

    fn graph() -> TransitionGraph {
        let defs = [
            EventDefinition::new(
                "submit",
                "Submit",
                "Submit",
                Transition::fixed(State::Draft, State::Submitted),
            ),
            EventDefinition::new(
                "issue",
                "Issue",
                "Issue",
                Transition::fixed(State::Submitted, State::AwaitingAos),
            ),
            EventDefinition::new(
                "note",
                "Note",
                "Note",
                Transition::stay(SourceStates::All),
            ),
        ];
        TransitionGraph::from_events(defs.iter())
    }

    #[test]
    fn test_events_from_dedupes() {
        let g = graph();
        assert_eq!(g.events_from(State::Draft), vec!["submit", "note"]);
        assert_eq!(g.events_from(State::Holding), vec!["note"]);
    }

    #[test]
    fn test_reachability() {
        let g = graph();
        assert!(g.is_reachable(State::Draft, State::AwaitingAos));
        assert!(!g.is_reachable(State::AwaitingAos, State::Draft));
        let unreachable = g.unreachable_from_draft();
        assert!(unreachable.contains(State::Holding));
        assert!(!unreachable.contains(State::Submitted));
    }

    #[test]
    fn test_dot_export() {
        let dot = graph().to_dot();
        assert!(dot.starts_with("digraph caseflow {"));
        assert!(dot.contains("\"Draft\" -> \"Submitted\" [label=\"submit\"];"));
        assert!(dot.contains("\"Withdrawn\" [shape=doublecircle];"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn test_json_export_has_every_state() {
        let json = graph().to_adjacency_json();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), caseflow_core::STATE_COUNT);
        assert_eq!(entries[0]["state"], "Draft");
        assert_eq!(entries[0]["edges"][0]["event"], "submit");
    }
}
