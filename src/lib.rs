//! Mindset Bridge: keep a state machine in sync with an application store
//!
//! The bridge sits between a finite state machine and a unidirectional
//! store. Every action dispatched to the store is also offered to the
//! machine; when the machine moves to a new configuration the bridge
//! dispatches a state-set action that a reducer persists in the store's
//! state tree, followed by any effects the transition declared.
//!
//! # Core Concepts
//!
//! - **StateValue**: a machine configuration, atomic or nested per region
//! - **Machine**: anything that maps `(state, event, context)` to a result
//! - **Bridge**: the middleware and reducer pair wired into a store
//! - **Queries**: structural comparison and dotted-path lookup of values
//!
//! # Example
//!
//! ```rust
//! use mindset_bridge::bridge::{Bridge, MiddlewareOptions};
//! use mindset_bridge::chart::{NodeBuilder, StateChartBuilder};
//! use mindset_bridge::core::{is_in_state, Action, StateValue};
//! use mindset_bridge::store::Store;
//! use serde_json::{json, Value};
//! use std::rc::Rc;
//!
//! let chart = StateChartBuilder::<Value>::new()
//!     .initial("idle")
//!     .state(NodeBuilder::new("idle").on("FETCH", "loading"))
//!     .state(
//!         NodeBuilder::new("loading")
//!             .entry("REQUEST_STARTED")
//!             .on("DONE", "idle"),
//!     )
//!     .build()
//!     .unwrap();
//! let bridge: Bridge<Value> = Bridge::new(Rc::new(chart));
//!
//! let reducer = bridge.clone();
//! let store = Store::new(json!({}), move |state: &Value, action: &Action| {
//!     let current = StateValue::from_json(&state["xstate"]);
//!     let requests = state["requests"].as_u64().unwrap_or(0)
//!         + u64::from(action.is("REQUEST_STARTED"));
//!     json!({
//!         "xstate": reducer.reduce(current.as_ref(), Some(action)).to_json(),
//!         "requests": requests,
//!     })
//! })
//! .with_middleware(bridge.middleware(MiddlewareOptions::default()));
//!
//! store.dispatch(Action::new("FETCH")).unwrap();
//!
//! let state = store.state();
//! assert!(is_in_state(StateValue::from_json(&state["xstate"]).as_ref(), "loading"));
//! assert_eq!(state["requests"], json!(1));
//! ```

pub mod bridge;
pub mod chart;
pub mod core;
pub mod machine;
pub mod store;

// Re-export commonly used types
pub use crate::bridge::{Bridge, BridgeError, MiddlewareOptions};
pub use crate::core::{is_equal, is_in_state, Action, Effect, StateValue};
pub use crate::machine::{Machine, MachineResult};
pub use crate::store::{Store, StoreError};
