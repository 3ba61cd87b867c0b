//! Dotted-path queries against state values.

use super::value::StateValue;

/// Check whether `current` is in, or contains, the state addressed by `path`.
///
/// `path` is a dotted string such as `"APP.POST.FETCHING"`. The empty path
/// matches any present value. An atomic value only matches the full
/// remaining path.
///
/// # Example
///
/// ```rust
/// use mindset_bridge::core::{is_in_state, StateValue};
///
/// let value = StateValue::from_path(&["APP", "POST", "FETCHING"]);
///
/// assert!(is_in_state(Some(&value), "APP.POST.FETCHING"));
/// assert!(is_in_state(Some(&value), "APP.POST"));
/// assert!(!is_in_state(Some(&value), "APP.COMMENT"));
/// ```
pub fn is_in_state(current: Option<&StateValue>, path: &str) -> bool {
    let Some(value) = current.filter(|v| !v.is_empty()) else {
        return false;
    };

    if path.is_empty() {
        return true;
    }

    match value {
        StateValue::Atomic(label) => label == path,
        StateValue::Compound(regions) => {
            let (head, rest) = path.split_once('.').unwrap_or((path, ""));
            is_in_state(regions.get(head), rest)
        }
    }
}
