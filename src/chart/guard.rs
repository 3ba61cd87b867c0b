//! Guard predicates for chart transitions.
//!
//! Guards are pure boolean functions over the triggering event and the
//! ambient context. A guarded transition is skipped when its guard fails,
//! letting an ancestor state handle the event instead.

use crate::core::Action;

/// Pure predicate that determines if a transition can be taken.
///
/// # Example
///
/// ```rust
/// use mindset_bridge::chart::Guard;
/// use mindset_bridge::core::Action;
/// use serde_json::json;
///
/// let has_items = Guard::new(|_event: &Action, cart: &serde_json::Value| {
///     cart["items"].as_array().is_some_and(|items| !items.is_empty())
/// });
///
/// assert!(has_items.check(&Action::new("CHECKOUT"), &json!({"items": [1]})));
/// assert!(!has_items.check(&Action::new("CHECKOUT"), &json!({"items": []})));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&Action, &C) -> bool>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Action, &C) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, event: &Action, context: &C) -> bool {
        (self.predicate)(event, context)
    }
}
