//! Door Statechart
//!
//! This example demonstrates a flat two-state chart with entry/exit
//! actions and targeted transitions.
//!
//! Key concepts:
//! - entry/exit actions
//! - event-driven transitions
//! - transition history
//!
//! Run with: cargo run --example door

use statechart::{EventSpec, StateConfig, StatechartBuilder};

fn main() {
    println!("=== Door Statechart ===\n");

    let mut chart = StatechartBuilder::new()
        .initial("closed")
        .state(
            StateConfig::new("closed")
                .entry(EventSpec::action(|| println!("  [entry] door is closed")))
                .exit(EventSpec::action(|| println!("  [exit]  leaving closed")))
                .on("open", EventSpec::goto("opened")),
        )
        .state(
            StateConfig::new("opened")
                .entry(EventSpec::action(|| println!("  [entry] door is open")))
                .exit(EventSpec::action(|| println!("  [exit]  leaving opened")))
                .on("close", EventSpec::goto("closed")),
        )
        .build()
        .expect("door chart is well formed");

    chart.run().expect("run succeeds");
    println!("current: {}\n", chart.current_state().map(|s| s.name()).unwrap_or("?"));

    for event in ["open", "close", "open"] {
        println!("dispatch({event})");
        chart.dispatch(event).expect("event is handled");
        println!("current: {}\n", chart.current_state().map(|s| s.name()).unwrap_or("?"));
    }

    println!("path taken: {:?}", chart.history().get_path());
}
