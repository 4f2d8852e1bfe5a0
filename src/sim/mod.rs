//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, which is also entity ID order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod buffs;
pub mod collision;
pub mod events;
pub mod progression;
pub mod schedule;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boss::{BossPhase, BossState};
pub use buffs::{Buff, BuffTimers, ProjectileStyle};
pub use events::GameEvent;
pub use schedule::{Schedule, Scheduler};
pub use snapshot::Snapshot;
pub use state::{
    BossProjectile, ChargeOp, Chest, GameState, Gate, GateKind, Hostile, HostileKind, Outcome,
    Player, PlayerProjectile,
};
pub use tick::{TickInput, tick};
