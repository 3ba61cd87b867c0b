//! Declarative hierarchical state charts.
//!
//! A [`StateChart`] is a tree of named states. States with children are
//! compound and name an initial child; the active configuration is always a
//! single path from a top-level state down to a leaf, described by a
//! [`StateValue`]:
//! - `"red"` for a top-level leaf
//! - `{"green": "walk"}` for a leaf nested in `green`
//!
//! Events are handled by the deepest active state with a matching, enabled
//! transition. Taking a transition yields, in order, the exit effects of the
//! states left (innermost first), the transition's own effects, and the entry
//! effects of the states entered (outermost first).
//!
//! Parallel regions are not modelled by the chart.

mod builder;
mod error;
mod guard;

pub use builder::{NodeBuilder, StateChartBuilder, TransitionBuilder};
pub use error::{BuildError, DefinitionError};
pub use guard::Guard;

use crate::core::{Action, Effect, StateValue};
use crate::machine::{Machine, MachineResult};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::trace;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

pub(crate) struct ChartTransition<C> {
    event: String,
    target: Option<String>,
    guard: Option<Guard<C>>,
    actions: Vec<Effect>,
}

impl<C> ChartTransition<C> {
    fn enabled(&self, event: &Action, context: &C) -> bool {
        self.event == event.kind && self.guard.as_ref().map_or(true, |g| g.check(event, context))
    }
}

pub(crate) struct StateNode<C> {
    key: String,
    initial: Option<String>,
    states: Vec<StateNode<C>>,
    on: Vec<ChartTransition<C>>,
    entry: Vec<Effect>,
    exit: Vec<Effect>,
}

impl<C> StateNode<C> {
    fn child(&self, key: &str) -> Option<&StateNode<C>> {
        self.states.iter().find(|state| state.key == key)
    }

    fn is_compound(&self) -> bool {
        !self.states.is_empty()
    }
}

/// A validated state chart. Build one with [`StateChartBuilder`].
pub struct StateChart<C> {
    root: StateNode<C>,
}

impl<C> StateChart<C> {
    fn from_root(root: StateNode<C>) -> Result<Self, BuildError> {
        let chart = Self { root };

        match chart.validate() {
            Validation::Success(_) => Ok(chart),
            Validation::Failure(problems) => Err(BuildError::Invalid {
                problems: problems.iter().cloned().collect(),
            }),
        }
    }

    /// Check whether `value` names a configuration of this chart.
    pub fn contains(&self, value: &StateValue) -> bool {
        self.active_path(Some(value)).is_some()
    }

    fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionError>> {
        let mut checks = Vec::new();
        if !self.root.is_compound() {
            checks.push(Validation::fail(DefinitionError::NoStates));
        }
        self.check_node(&mut Vec::new(), &self.root, &mut checks);

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_node(&self, path: &mut Vec<String>, node: &StateNode<C>, checks: &mut Vec<Check>) {
        let name = display_path(path);

        if node.is_compound() {
            match &node.initial {
                None => checks.push(Validation::fail(DefinitionError::MissingInitial {
                    node: name.clone(),
                })),
                Some(initial) if node.child(initial).is_none() => {
                    checks.push(Validation::fail(DefinitionError::UnknownInitial {
                        node: name.clone(),
                        initial: initial.clone(),
                    }))
                }
                Some(_) => {}
            }
        }

        let mut seen = HashSet::new();
        for state in &node.states {
            if !seen.insert(state.key.as_str()) {
                path.push(state.key.clone());
                checks.push(Validation::fail(DefinitionError::DuplicateState {
                    node: display_path(path),
                }));
                path.pop();
            }
        }

        for transition in &node.on {
            let Some(target) = &transition.target else {
                continue;
            };
            if self.resolve_target(path, target).is_none() {
                checks.push(Validation::fail(DefinitionError::UnknownTarget {
                    node: name.clone(),
                    event: transition.event.clone(),
                    target: target.clone(),
                }));
            }
        }

        for state in &node.states {
            path.push(state.key.clone());
            self.check_node(path, state, checks);
            path.pop();
        }
    }

    fn node_at(&self, path: &[String]) -> Option<&StateNode<C>> {
        path.iter().try_fold(&self.root, |node, key| node.child(key))
    }

    /// Follow initial children down from the state at `path`.
    fn descend_initial(&self, path: &mut Vec<String>) {
        while let Some(initial) = self
            .node_at(path)
            .filter(|node| node.is_compound())
            .and_then(|node| node.initial.clone())
        {
            path.push(initial);
        }
    }

    /// Path of the leaf state described by `value`, `None` if the value is
    /// not a configuration of this chart.
    fn active_path(&self, value: Option<&StateValue>) -> Option<Vec<String>> {
        let mut path = Vec::new();
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            resolve_value(&self.root, value, &mut path)?;
        }
        self.descend_initial(&mut path);
        Some(path)
    }

    fn resolve_target(&self, source: &[String], target: &str) -> Option<Vec<String>> {
        let (mut path, relative) = match target.strip_prefix('#') {
            Some(absolute) => (Vec::new(), absolute),
            None => (
                source
                    .split_last()
                    .map(|(_, parent)| parent.to_vec())
                    .unwrap_or_default(),
                target,
            ),
        };

        path.extend(relative.split('.').map(str::to_string));
        self.node_at(&path).map(|_| path)
    }

    fn take(
        &self,
        active: &[String],
        source: &[String],
        transition: &ChartTransition<C>,
    ) -> MachineResult {
        let target = transition
            .target
            .as_deref()
            .and_then(|target| self.resolve_target(source, target));

        let Some(mut target) = target else {
            return MachineResult::new(StateValue::from_path(active))
                .with_actions(transition.actions.iter().cloned());
        };

        let parent = &source[..source.len().saturating_sub(1)];
        let domain = parent
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();
        self.descend_initial(&mut target);

        let mut actions = Vec::new();
        for depth in (domain + 1..=active.len()).rev() {
            if let Some(node) = self.node_at(&active[..depth]) {
                actions.extend(node.exit.iter().cloned());
            }
        }
        actions.extend(transition.actions.iter().cloned());
        for depth in domain + 1..=target.len() {
            if let Some(node) = self.node_at(&target[..depth]) {
                actions.extend(node.entry.iter().cloned());
            }
        }

        MachineResult::new(StateValue::from_path(&target)).with_actions(actions)
    }
}

impl<C> Machine<C> for StateChart<C> {
    fn initial_value(&self) -> StateValue {
        let mut path = Vec::new();
        self.descend_initial(&mut path);
        StateValue::from_path(&path)
    }

    fn transition(
        &self,
        current: Option<&StateValue>,
        event: &Action,
        context: &C,
    ) -> Option<MachineResult> {
        let Some(active) = self.active_path(current) else {
            trace!(state = ?current, "state value is not a configuration of this chart");
            return None;
        };

        for depth in (0..=active.len()).rev() {
            let source = &active[..depth];
            let handler = self
                .node_at(source)
                .and_then(|node| node.on.iter().find(|t| t.enabled(event, context)));

            if let Some(transition) = handler {
                return Some(self.take(&active, source, transition));
            }
        }

        Some(MachineResult::new(StateValue::from_path(&active)))
    }
}

fn resolve_value<C>(node: &StateNode<C>, value: &StateValue, path: &mut Vec<String>) -> Option<()> {
    match value {
        StateValue::Atomic(key) => {
            node.child(key)?;
            path.push(key.clone());
            Some(())
        }
        StateValue::Compound(regions) => {
            let mut regions = regions.iter();
            let (key, nested) = regions.next()?;
            if regions.next().is_some() {
                return None;
            }
            let child = node.child(key)?;
            path.push(key.clone());
            resolve_value(child, nested, path)
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}
