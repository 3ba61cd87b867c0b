//! Traffic Light Store
//!
//! This demo wires a cyclic state chart into a store through the bridge.
//!
//! Key concepts:
//! - The middleware offers every action to the machine
//! - The reducer keeps the machine state in the store's state tree
//! - Unknown actions leave the machine state untouched
//! - Resetting returns to the machine's initial state
//!
//! Run with: cargo run --example traffic_light

use mindset_bridge::bridge::{Bridge, MiddlewareOptions};
use mindset_bridge::chart::{NodeBuilder, StateChartBuilder};
use mindset_bridge::core::{reset_machine_state_action, Action, StateValue};
use mindset_bridge::store::Store;
use serde_json::{json, Value};
use std::rc::Rc;

fn main() {
    println!("=== Traffic Light Store ===\n");

    let chart = StateChartBuilder::<Value>::new()
        .initial("red")
        .state(NodeBuilder::new("red").on("TIMER", "green"))
        .state(NodeBuilder::new("green").on("TIMER", "yellow"))
        .state(NodeBuilder::new("yellow").on("TIMER", "red"))
        .build()
        .unwrap();
    let bridge: Bridge<Value> = Bridge::new(Rc::new(chart));

    let reducer = bridge.clone();
    let store = Store::new(json!({}), move |state: &Value, action: &Action| {
        let current = StateValue::from_json(&state["xstate"]);
        json!({ "xstate": reducer.reduce(current.as_ref(), Some(action)).to_json() })
    })
    .with_middleware(bridge.middleware(MiddlewareOptions::default()));

    store.subscribe(|state| println!("  store: {state}"));

    println!("Dispatching TIMER three times:");
    for _ in 0..3 {
        store.dispatch(Action::new("TIMER")).unwrap();
    }

    println!("\nDispatching an action the machine ignores:");
    store.dispatch(Action::new("HONK")).unwrap();

    println!("\nDispatching TIMER then resetting:");
    store.dispatch(Action::new("TIMER")).unwrap();
    store.dispatch(reset_machine_state_action()).unwrap();

    println!("\n=== Demo Complete ===");
}
