//! Fluent builders for state charts.

use super::error::BuildError;
use super::guard::Guard;
use super::{ChartTransition, StateChart, StateNode};
use crate::core::{Action, Effect};

/// Builder for a single transition.
pub struct TransitionBuilder<C> {
    event: String,
    target: Option<String>,
    guard: Option<Guard<C>>,
    actions: Vec<Effect>,
}

impl<C> TransitionBuilder<C> {
    /// Create a transition taken on `event`.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            target: None,
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Set the target state (optional).
    ///
    /// Targets name a sibling of the source state, optionally followed by
    /// dotted child keys (`"green.pink"`). A leading `#` addresses the state
    /// from the chart root instead. Without a target the transition only
    /// runs its actions.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Action, &C) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add an effect run when the transition is taken.
    pub fn action(mut self, effect: impl Into<Effect>) -> Self {
        self.actions.push(effect.into());
        self
    }

    pub(crate) fn build(self) -> ChartTransition<C> {
        ChartTransition {
            event: self.event,
            target: self.target,
            guard: self.guard,
            actions: self.actions,
        }
    }
}

/// Builder for a state and its children.
pub struct NodeBuilder<C> {
    key: String,
    initial: Option<String>,
    states: Vec<NodeBuilder<C>>,
    on: Vec<TransitionBuilder<C>>,
    entry: Vec<Effect>,
    exit: Vec<Effect>,
}

impl<C> NodeBuilder<C> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            initial: None,
            states: Vec::new(),
            on: Vec::new(),
            entry: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Set the initial child state (required once children are added).
    pub fn initial(mut self, key: impl Into<String>) -> Self {
        self.initial = Some(key.into());
        self
    }

    /// Add a child state.
    pub fn state(mut self, child: NodeBuilder<C>) -> Self {
        self.states.push(child);
        self
    }

    /// Transition to `target` on `event`.
    pub fn on(self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.transition(TransitionBuilder::new(event).target(target))
    }

    /// Add a transition built with [`TransitionBuilder`].
    pub fn transition(mut self, transition: TransitionBuilder<C>) -> Self {
        self.on.push(transition);
        self
    }

    /// Add an effect run when the state is entered.
    pub fn entry(mut self, effect: impl Into<Effect>) -> Self {
        self.entry.push(effect.into());
        self
    }

    /// Add an effect run when the state is exited.
    pub fn exit(mut self, effect: impl Into<Effect>) -> Self {
        self.exit.push(effect.into());
        self
    }

    fn into_node(self) -> StateNode<C> {
        StateNode {
            key: self.key,
            initial: self.initial,
            states: self.states.into_iter().map(NodeBuilder::into_node).collect(),
            on: self.on.into_iter().map(TransitionBuilder::build).collect(),
            entry: self.entry,
            exit: self.exit,
        }
    }
}

/// Builder for constructing state charts with a fluent API.
///
/// # Example
///
/// ```rust
/// use mindset_bridge::chart::{NodeBuilder, StateChartBuilder};
/// use mindset_bridge::core::StateValue;
/// use mindset_bridge::machine::Machine;
///
/// let chart = StateChartBuilder::<()>::new()
///     .initial("green")
///     .state(
///         NodeBuilder::new("green")
///             .initial("walk")
///             .state(NodeBuilder::new("walk").on("COUNTDOWN", "wait"))
///             .state(NodeBuilder::new("wait"))
///             .on("TIMER", "red"),
///     )
///     .state(NodeBuilder::new("red").on("TIMER", "green"))
///     .build()
///     .unwrap();
///
/// assert_eq!(chart.initial_value(), StateValue::from_path(&["green", "walk"]));
/// ```
pub struct StateChartBuilder<C> {
    root: NodeBuilder<C>,
}

impl<C> StateChartBuilder<C> {
    pub fn new() -> Self {
        Self {
            root: NodeBuilder::new(""),
        }
    }

    /// Set the initial top-level state (required).
    pub fn initial(mut self, key: impl Into<String>) -> Self {
        self.root = self.root.initial(key);
        self
    }

    /// Add a top-level state.
    pub fn state(mut self, state: NodeBuilder<C>) -> Self {
        self.root = self.root.state(state);
        self
    }

    /// Add multiple top-level states at once.
    pub fn states(mut self, states: Vec<NodeBuilder<C>>) -> Self {
        for state in states {
            self.root = self.root.state(state);
        }
        self
    }

    /// Transition handled in every state unless a deeper state handles it.
    pub fn on(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.root = self.root.on(event, target);
        self
    }

    /// Add a chart-level transition built with [`TransitionBuilder`].
    pub fn transition(mut self, transition: TransitionBuilder<C>) -> Self {
        self.root = self.root.transition(transition);
        self
    }

    /// Build the chart.
    /// Returns every definition problem found if the chart is invalid.
    pub fn build(self) -> Result<StateChart<C>, BuildError> {
        StateChart::from_root(self.root.into_node())
    }
}

impl<C> Default for StateChartBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DefinitionError;

    #[test]
    fn builder_requires_states() {
        let result = StateChartBuilder::<()>::new().build();

        let err = result.err().unwrap();
        assert_eq!(err.problems(), &[DefinitionError::NoStates]);
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = StateChartBuilder::<()>::new()
            .state(NodeBuilder::new("idle"))
            .build();

        let err = result.err().unwrap();
        assert!(matches!(
            err.problems(),
            [DefinitionError::MissingInitial { node }] if node == "(root)"
        ));
    }

    #[test]
    fn builder_accumulates_all_problems() {
        let result = StateChartBuilder::<()>::new()
            .initial("missing")
            .state(
                NodeBuilder::new("green")
                    .state(NodeBuilder::new("walk"))
                    .on("TIMER", "nowhere"),
            )
            .state(NodeBuilder::new("red"))
            .state(NodeBuilder::new("red"))
            .build();

        let problems = result.err().unwrap().problems().to_vec();
        assert_eq!(problems.len(), 4);
        assert!(problems.contains(&DefinitionError::UnknownInitial {
            node: "(root)".to_string(),
            initial: "missing".to_string(),
        }));
        assert!(problems.contains(&DefinitionError::DuplicateState {
            node: "red".to_string()
        }));
        assert!(problems.contains(&DefinitionError::MissingInitial {
            node: "green".to_string()
        }));
        assert!(problems.contains(&DefinitionError::UnknownTarget {
            node: "green".to_string(),
            event: "TIMER".to_string(),
            target: "nowhere".to_string(),
        }));
    }

    #[test]
    fn fluent_api_builds_chart() {
        let chart = StateChartBuilder::<()>::new()
            .initial("idle")
            .states(vec![
                NodeBuilder::new("idle").on("START", "running"),
                NodeBuilder::new("running")
                    .transition(TransitionBuilder::new("STOP").target("idle").action("STOPPED")),
            ])
            .on("RESET", "#idle")
            .build();

        assert!(chart.is_ok());
    }
}
