//! Structural equality of state values.

use super::value::StateValue;

/// Check whether two state values describe the same configuration.
///
/// When either side is absent (or the empty label), or either side is
/// atomic, the values are compared directly. Two compound values are equal
/// when they have the same regions and every region is recursively equal.
/// Region order never matters.
///
/// An absent value and the empty label are both "no state" but are not
/// equal to each other.
///
/// # Example
///
/// ```rust
/// use mindset_bridge::core::{is_equal, StateValue};
///
/// let a = StateValue::compound([("a", "1".into()), ("b", "2".into())]);
/// let b = StateValue::compound([("b", "2".into()), ("a", "1".into())]);
///
/// assert!(is_equal(Some(&a), Some(&b)));
/// assert!(!is_equal(Some(&a), None));
/// ```
pub fn is_equal(state: Option<&StateValue>, next: Option<&StateValue>) -> bool {
    fn present(value: Option<&StateValue>) -> Option<&StateValue> {
        value.filter(|v| !v.is_empty())
    }

    match (present(state), present(next)) {
        (Some(StateValue::Compound(current)), Some(StateValue::Compound(incoming))) => {
            current.len() == incoming.len()
                && incoming.iter().all(|(region, value)| {
                    current
                        .get(region)
                        .is_some_and(|existing| is_equal(Some(existing), Some(value)))
                })
        }
        _ => state == next,
    }
}
