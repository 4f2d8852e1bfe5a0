//! Discrete per-tick signals
//!
//! Collected on `GameState::events` during a tick and cleared at the start of
//! the next one. The audio collaborator only needs `Fired`; the rest exist for
//! effects and logging.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::buffs::Buff;
use super::state::ChargeOp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The fire schedule dispatched a volley
    Fired { projectiles: u32 },
    /// A buff timer reached zero on this fire event
    BuffExpired(Buff),
    GateWave,
    HordeWave { spawned: u32 },
    ChestSpawned { id: u32 },
    /// A chargeable gate absorbed a projectile without completing
    GateCharged { gate_id: u32, charge: u32, max_charge: u32 },
    /// A chargeable gate completed and granted its buff
    GateTriggered { gate_id: u32, op: ChargeOp },
    /// An instant gate boosted damage
    DamageGatePassed { projectile_id: u32 },
    ChestOpened { chest_id: u32, shot_count: u32 },
    HostileDestroyed { id: u32, boss: bool, pos: Vec2 },
    BossSpawned { id: u32, max_hp: f32 },
    /// The boss reached its resting height and starts attacking
    BossArrived { id: u32 },
    BossPush { pushed: u32 },
    BossVolley,
    PlayerHit { hp_left: u8 },
    DeadLineCrossed { id: u32 },
    Victory,
    Defeat,
}
