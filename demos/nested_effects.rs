//! Nested States with Effects
//!
//! This demo shows entry and exit effects of a hierarchical chart being
//! dispatched back into the store, and a custom state accessor.
//!
//! Key concepts:
//! - Compound states with initial children
//! - Exit effects run innermost first, entry effects outermost first
//! - Effects are ordinary actions other reducers can react to
//! - Querying nested state with dotted paths
//!
//! Run with: cargo run --example nested_effects

use mindset_bridge::bridge::{Bridge, MiddlewareOptions};
use mindset_bridge::chart::{NodeBuilder, StateChartBuilder, TransitionBuilder};
use mindset_bridge::core::{is_in_state, Action, StateValue};
use mindset_bridge::store::Store;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct Player {
    machine: Option<StateValue>,
    notifications: Vec<String>,
}

fn main() {
    println!("=== Nested States with Effects ===\n");

    let chart = StateChartBuilder::<Player>::new()
        .initial("stopped")
        .state(
            NodeBuilder::new("stopped")
                .entry("PLAYER_STOPPED")
                .on("PLAY", "playing"),
        )
        .state(
            NodeBuilder::new("playing")
                .initial("normal")
                .entry("PLAYER_STARTED")
                .exit("PLAYER_HALTED")
                .on("STOP", "stopped")
                .state(NodeBuilder::new("normal").on("FAST_FORWARD", "fast"))
                .state(
                    NodeBuilder::new("fast")
                        .entry(Action::new("SPEED_CHANGED").with_field("rate", 2.into()))
                        .transition(
                            TransitionBuilder::new("RELEASE")
                                .target("normal")
                                .action(Action::new("SPEED_CHANGED").with_field("rate", 1.into())),
                        ),
                ),
        )
        .build()
        .unwrap();
    let bridge: Bridge<Player> = Bridge::new(Rc::new(chart));

    let reducer = bridge.clone();
    let store = Store::new(
        Player {
            machine: None,
            notifications: Vec::new(),
        },
        move |state: &Player, action: &Action| {
            let mut notifications = state.notifications.clone();
            if action.kind.starts_with("PLAYER_") || action.is("SPEED_CHANGED") {
                notifications.push(match action.fields.get("rate") {
                    Some(rate) => format!("{} x{rate}", action.kind),
                    None => action.kind.clone(),
                });
            }
            Player {
                machine: Some(reducer.reduce(state.machine.as_ref(), Some(action))),
                notifications,
            }
        },
    )
    .with_middleware(bridge.middleware(MiddlewareOptions::with_accessor(|p: &Player| {
        p.machine.clone()
    })));

    for event in ["PLAY", "FAST_FORWARD", "RELEASE", "STOP"] {
        store.dispatch(Action::new(event)).unwrap();
        let state = store.state();
        println!(
            "{event:<13} -> {}",
            state.machine.as_ref().map(ToString::to_string).unwrap_or_default()
        );
        println!(
            "              playing.fast? {}",
            is_in_state(state.machine.as_ref(), "playing.fast")
        );
    }

    println!("\nEffects seen by the store:");
    for notification in store.state().notifications {
        println!("  {notification}");
    }

    println!("\n=== Demo Complete ===");
}
