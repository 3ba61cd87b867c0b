//! Machine state values.
//!
//! A state value describes the active configuration of a state machine.
//! Flat machines are described by a single label, hierarchical machines by
//! a mapping from region name to the nested configuration of that region.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Current configuration of a state machine.
///
/// Values carry no behavior. They are structurally comparable and
/// serialize to a JSON string (atomic) or a JSON object (compound).
///
/// # Example
///
/// ```rust
/// use mindset_bridge::core::StateValue;
///
/// let flat = StateValue::atomic("green");
/// let nested = StateValue::compound([("green", StateValue::atomic("magenta"))]);
///
/// assert_eq!(flat.as_atomic(), Some("green"));
/// assert_eq!(nested.get("green"), Some(&StateValue::atomic("magenta")));
/// assert_eq!(nested.to_string(), r#"{"green":"magenta"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// A named leaf state
    Atomic(String),

    /// Region name to nested configuration
    Compound(BTreeMap<String, StateValue>),
}

impl StateValue {
    /// Create an atomic value from a state label.
    pub fn atomic(label: impl Into<String>) -> Self {
        Self::Atomic(label.into())
    }

    /// Create a compound value from `(region, value)` pairs.
    pub fn compound<K, I>(regions: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, StateValue)>,
    {
        Self::Compound(
            regions
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Build the value addressed by a path of nested state keys.
    ///
    /// `["green", "magenta"]` becomes `{"green": "magenta"}`. An empty path
    /// yields the empty label.
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Self {
        let Some((leaf, ancestors)) = path.split_last() else {
            return Self::Atomic(String::new());
        };

        ancestors
            .iter()
            .rev()
            .fold(Self::atomic(leaf.as_ref()), |inner, key| {
                Self::compound([(key.as_ref(), inner)])
            })
    }

    /// True for the empty label, which is treated as "no state".
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Atomic(label) if label.is_empty())
    }

    /// Label of an atomic value.
    pub fn as_atomic(&self) -> Option<&str> {
        match self {
            Self::Atomic(label) => Some(label),
            Self::Compound(_) => None,
        }
    }

    /// Nested value of a region in a compound value.
    pub fn get(&self, region: &str) -> Option<&StateValue> {
        match self {
            Self::Atomic(_) => None,
            Self::Compound(regions) => regions.get(region),
        }
    }

    /// Convert to a JSON value. Never fails.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Atomic(label) => Value::String(label.clone()),
            Self::Compound(regions) => Value::Object(
                regions
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Decode a JSON value.
    ///
    /// Returns `None` unless the value is a string or an object whose
    /// members all decode.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(label) => Some(Self::Atomic(label.clone())),
            Value::Object(members) => members
                .iter()
                .map(|(key, member)| Self::from_json(member).map(|nested| (key.clone(), nested)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(Self::Compound),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<&str> for StateValue {
    fn from(label: &str) -> Self {
        Self::atomic(label)
    }
}

impl From<String> for StateValue {
    fn from(label: String) -> Self {
        Self::Atomic(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_path_nests_keys() {
        let value = StateValue::from_path(&["APP", "POST", "FETCHING"]);

        assert_eq!(
            value,
            StateValue::compound([(
                "APP",
                StateValue::compound([("POST", StateValue::atomic("FETCHING"))])
            )])
        );
        assert_eq!(StateValue::from_path(&["green"]), StateValue::atomic("green"));
        assert!(StateValue::from_path::<&str>(&[]).is_empty());
    }

    #[test]
    fn empty_label_is_empty() {
        assert!(StateValue::atomic("").is_empty());
        assert!(!StateValue::atomic("idle").is_empty());
        assert!(!StateValue::compound::<&str, _>([]).is_empty());
    }

    #[test]
    fn json_conversion_matches_serde() {
        let value = StateValue::compound([
            ("player", StateValue::atomic("paused")),
            ("volume", StateValue::atomic("muted")),
        ]);

        assert_eq!(value.to_json(), serde_json::to_value(&value).unwrap());
        assert_eq!(StateValue::from_json(&value.to_json()), Some(value));
    }

    #[test]
    fn from_json_rejects_non_state_shapes() {
        assert_eq!(StateValue::from_json(&json!(0)), None);
        assert_eq!(StateValue::from_json(&json!(null)), None);
        assert_eq!(StateValue::from_json(&json!(["green"])), None);
        assert_eq!(StateValue::from_json(&json!({"green": 1})), None);
    }

    #[test]
    fn deserializes_untagged() {
        let value: StateValue = serde_json::from_str(r#"{"green":"pink"}"#).unwrap();
        assert_eq!(value.get("green"), Some(&StateValue::atomic("pink")));

        let value: StateValue = serde_json::from_str(r#""yellow""#).unwrap();
        assert_eq!(value.as_atomic(), Some("yellow"));
    }
}
