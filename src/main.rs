//! Thunder Fighter entry point
//!
//! Headless native runner. Drives the simulation with the autopilot standing
//! in for pointer input and prints the result.
//!
//! Usage: `thunder-fighter [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use thunder_fighter::Tuning;
#[cfg(not(target_arch = "wasm32"))]
use thunder_fighter::consts::TICK_RATE;
#[cfg(not(target_arch = "wasm32"))]
use thunder_fighter::sim::{GameEvent, GameState, Snapshot, TickInput, autopilot, tick};

/// Ten minutes of play at the logical tick rate
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = TICK_RATE as u64 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Thunder Fighter (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load tuning from {}: {}, using defaults", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(seed, tuning);
    log::info!("Game initialized with seed: {}", seed);

    while !state.is_over() && state.time_ticks < MAX_TICKS {
        let input = TickInput {
            pointer_x: Some(autopilot::steer(&state)),
        };
        tick(&mut state, &input);
        for event in &state.events {
            log_event(state.time_ticks, event);
        }
    }

    match state.outcome {
        Some(outcome) => println!(
            "{:?} after {} ticks with score {}",
            outcome, state.time_ticks, state.score
        ),
        None => println!(
            "No outcome after {} ticks, score {}",
            state.time_ticks, state.score
        ),
    }

    match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
fn log_event(tick: u64, event: &GameEvent) {
    match event {
        // Every volley; far too chatty for info
        GameEvent::Fired { .. } | GameEvent::GateCharged { .. } => {
            log::trace!("[{}] {:?}", tick, event)
        }
        GameEvent::DamageGatePassed { .. } | GameEvent::BuffExpired(_) => {
            log::debug!("[{}] {:?}", tick, event)
        }
        _ => log::info!("[{}] {:?}", tick, event),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on the web; nothing to run here
}
