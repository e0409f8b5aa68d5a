//! # Patrol Simulation
//!
//! Headless run of the reference host. Two guards stand on a small map, one
//! of them pacing back and forth; the player walks across the map and every
//! detection is logged.
//!
//! ```bash
//! RUST_LOG=info cargo run --bin patrol_sim
//! RUST_LOG=debug cargo run --bin patrol_sim -- sentinel.toml
//! ```

use sentinel::core::{Scheduler, SentinelConfig, SentinelSystem};
use sentinel::{EventBus, GameSwitches, LoopConfig, MapWorld, SentinelEvent, SentinelLoop};
use sentinel_shared::{Facing, StateKey, WatcherId};

const PACER: WatcherId = WatcherId::new(1);
const POST: WatcherId = WatcherId::new(2);
const MAP_EVENT: WatcherId = WatcherId::new(100);

fn load_config() -> SentinelConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SentinelConfig::default();
    };
    match SentinelConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}; falling back to defaults");
            SentinelConfig::default()
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut system = SentinelSystem::new(load_config());
    let mut world = MapWorld::new(24, 16);
    let bus = EventBus::default();
    let events = bus.receiver();
    let mut switches = GameSwitches::with_events(bus.sender());

    world.spawn_event(PACER, 4, 3, Facing::Down);
    world.spawn_event(POST, 20, 12, Facing::Left);
    world.move_player(0, 8);

    let commands = [
        (PACER, r#"sentinel_add {"side":1,"forward":6,"selfSwitch":"A"}"#),
        (POST, r#"sentinel_add {"gameSwitch":"alarm","gameVariable":{"name":"lastSeenBy","value":2}}"#),
        // A map event with a broken payload; reported and skipped.
        (MAP_EVENT, r#"sentinel_add {"side":"wide"}"#),
    ];
    for (source, line) in commands {
        // Errors are logged by the engine.
        let _ = system.execute(line, source);
    }

    let mut game_loop = SentinelLoop::new(LoopConfig {
        tick_rate: 30,
        max_ticks: Some(48),
    })
    .with_events(bus.sender());

    game_loop.run(&mut |frame| {
        if frame % 2 == 0 {
            world.step_player(Facing::Right);
        }
        if frame % 6 == 0 {
            let turn = if (frame / 6) % 2 == 0 { Facing::Right } else { Facing::Left };
            world.turn_event(PACER, turn);
        }
        world.step_event(PACER);
        system.tick(&world, &mut switches)
    });

    for event in events.drain() {
        match event {
            SentinelEvent::Spotted { watcher, reaction } => {
                tracing::info!("Guard {} reacted: {:?}", watcher, reaction);
            }
            SentinelEvent::FrameFired { frame, report } => {
                tracing::info!("Frame {}: {} guard(s) spotted the player", frame, report.fired);
            }
        }
    }

    let stats = game_loop.stats();
    tracing::info!(
        "Done: {} frames, {} detections, alarm {}, guard A switch {}",
        stats.frames,
        stats.totals.fired,
        if switches.switch(&StateKey::name("alarm")) { "raised" } else { "quiet" },
        if switches.self_switch(PACER, &StateKey::name("A")) { "on" } else { "off" },
    );
}
