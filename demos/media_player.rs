//! Media Player Statechart
//!
//! This example demonstrates nested states, default-child descent through
//! `init`, event bubbling from a deep leaf, and a guarded handler array
//! where the first passing candidate wins.
//!
//! Run with: cargo run --example media_player

use statechart::{EventSpec, Handler, StateConfig, StatechartBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    let shuffle = Arc::new(AtomicBool::new(false));
    let shuffle_on = shuffle.clone();

    let mut chart = StatechartBuilder::new()
        .initial("stopped")
        .state(StateConfig::new("stopped").on("play", EventSpec::goto("playing")))
        .state(
            StateConfig::new("playing")
                .init(EventSpec::target("track"))
                .entry(EventSpec::action(|| println!("  spinning up the player")))
                .exit(EventSpec::action(|| println!("  spinning down")))
                .on("stop", EventSpec::goto("stopped"))
                .on(
                    "next",
                    EventSpec::handlers(vec![
                        Handler::new()
                            .when(move || shuffle_on.load(Ordering::SeqCst))
                            .to("shuffling")
                            .action(|| println!("  picking a random track")),
                        Handler::new()
                            .to("track")
                            .action(|| println!("  advancing to the next track")),
                    ]),
                )
                .state(
                    StateConfig::new("track")
                        .entry(EventSpec::action(|| println!("  playing a track"))),
                )
                .state(
                    StateConfig::new("shuffling")
                        .entry(EventSpec::action(|| println!("  playing a shuffled track"))),
                ),
        )
        .build()
        .expect("player chart is well formed");

    println!("=== Media Player ===\n");
    chart.run().expect("run succeeds");
    println!("current: {:?}\n", chart.current_state().map(|s| s.name()));

    println!("dispatch(play)");
    chart.dispatch("play").expect("play is handled");
    println!("current: {:?}\n", chart.current_state().map(|s| s.name()));

    println!("dispatch(next) with shuffle off");
    chart.dispatch("next").expect("next is handled");
    println!("current: {:?}\n", chart.current_state().map(|s| s.name()));

    shuffle.store(true, Ordering::SeqCst);
    println!("dispatch(next) with shuffle on");
    chart.dispatch("next").expect("next is handled");
    println!("current: {:?}\n", chart.current_state().map(|s| s.name()));

    println!("dispatch(stop)");
    chart.dispatch("stop").expect("stop is handled");
    println!("current: {:?}", chart.current_state().map(|s| s.name()));

    println!("\npath taken: {:?}", chart.history().get_path());
}
