//! Game state and core simulation types
//!
//! Everything the tick driver owns lives in `GameState`. Boxed entities
//! (hostiles, boss shots, gates, chests) are positioned by their top-left
//! corner; player projectiles by their center.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::BossState;
use super::buffs::BuffTimers;
use super::events::GameEvent;
use super::schedule::Scheduler;
use crate::{Rect, Tuning};

/// Terminal latch of a run. Once set the simulation stops mutating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// A projectile fired by the player (or released by a burst)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// Visual size; half of it is the hit-box half-extent
    pub size: f32,
    /// Set once an instant gate has boosted this projectile
    pub passed_damage_gate: bool,
    #[serde(skip)]
    pub pending_removal: bool,
}

impl PlayerProjectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, damage: f32, size: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            damage,
            size,
            passed_damage_gate: false,
            pending_removal: false,
        }
    }

    /// Integrate velocity; flip horizontal velocity outside `[0, max_x]`
    pub fn advance(&mut self, max_x: f32) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.vel.x = -self.vel.x;
        }
    }

    pub fn is_live(&self) -> bool {
        !self.pending_removal
    }
}

/// Hostile variants share lifecycle but not behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostileKind {
    /// Wave unit; `variant` picks one of two sprites
    Regular { variant: u8 },
    Boss(BossState),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub kind: HostileKind,
    #[serde(skip)]
    pub pending_removal: bool,
}

impl Hostile {
    pub fn regular(id: u32, pos: Vec2, size: f32, max_hp: f32, variant: u8) -> Self {
        Self {
            id,
            pos,
            size,
            hp: max_hp,
            max_hp,
            kind: HostileKind::Regular { variant },
            pending_removal: false,
        }
    }

    pub fn boss(id: u32, pos: Vec2, size: f32, max_hp: f32) -> Self {
        Self {
            id,
            pos,
            size,
            hp: max_hp,
            max_hp,
            kind: HostileKind::Boss(BossState::default()),
            pending_removal: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, HostileKind::Boss(_))
    }

    pub fn boss_state(&self) -> Option<&BossState> {
        match &self.kind {
            HostileKind::Boss(boss) => Some(boss),
            HostileKind::Regular { .. } => None,
        }
    }

    /// Remaining health in `[0, 1]` for health bars
    pub fn health_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }

    /// Subtract damage, clamping at zero. Returns true if this hit was lethal.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        self.hp = (self.hp - damage).max(0.0);
        self.hp <= 0.0
    }

    pub fn is_live(&self) -> bool {
        !self.pending_removal
    }
}

/// Boss shot. Its velocity is fixed at spawn and never re-aimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossProjectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    #[serde(skip)]
    pub pending_removal: bool,
}

impl BossProjectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            pending_removal: false,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }
}

/// Buff granted by a completed chargeable gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeOp {
    Burst,
    Giant,
}

impl ChargeOp {
    pub fn label(&self) -> &'static str {
        match self {
            ChargeOp::Burst => "BURST",
            ChargeOp::Giant => "GIANT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateKind {
    /// Absorbs projectiles until `max_charge` is reached
    Chargeable(ChargeOp),
    /// Boosts damage of every projectile passing through, once per projectile
    Instant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: GateKind,
    pub charge: u32,
    pub max_charge: u32,
    /// Triggered gates stay in the list until the next purge
    #[serde(skip)]
    pub pending_removal: bool,
}

impl Gate {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn label(&self) -> String {
        match self.kind {
            GateKind::Chargeable(op) => {
                format!("{}: {}/{}", op.label(), self.charge, self.max_charge)
            }
            GateKind::Instant => "ATK x 2".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub hp: f32,
    #[serde(skip)]
    pub pending_removal: bool,
}

impl Chest {
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position, driven by pointer input
    pub x: f32,
    pub hp: u8,
    /// Ticks of invincibility left
    pub invincible: u32,
    /// Projectiles per lane set; only ever increases
    pub shot_count: u32,
}

impl Player {
    pub fn new(x: f32, hp: u8) -> Self {
        Self {
            x,
            hp,
            invincible: 0,
            shot_count: 1,
        }
    }

    /// Blink while invincible
    pub fn visible(&self) -> bool {
        self.invincible % 4 == 0
    }
}

/// Complete simulation state with a single owner (the tick driver)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Config-time parameters, never changed by the simulation
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub scheduler: Scheduler,
    pub player: Player,
    pub buffs: BuffTimers,
    pub score: u32,
    pub boss_spawned: bool,
    pub outcome: Option<Outcome>,
    pub projectiles: Vec<PlayerProjectile>,
    pub hostiles: Vec<Hostile>,
    pub boss_projectiles: Vec<BossProjectile>,
    pub gates: Vec<Gate>,
    pub chests: Vec<Chest>,
    /// Projectiles created mid-pass, merged after collision resolution
    pub staged_projectiles: Vec<PlayerProjectile>,
    /// Signals raised during the last tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            scheduler: Scheduler::new(&tuning),
            player: Player::new(tuning.width / 2.0, tuning.player_hp),
            buffs: BuffTimers::default(),
            score: 0,
            boss_spawned: false,
            outcome: None,
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            boss_projectiles: Vec::new(),
            gates: Vec::new(),
            chests: Vec::new(),
            staged_projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Set the terminal latch. The first outcome wins.
    pub fn latch(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            log::info!(
                "Run ended: {:?} at tick {} with score {}",
                outcome,
                self.time_ticks,
                self.score
            );
            self.outcome = Some(outcome);
            self.events.push(match outcome {
                Outcome::Victory => GameEvent::Victory,
                Outcome::Defeat => GameEvent::Defeat,
            });
        }
    }

    pub fn boss(&self) -> Option<&Hostile> {
        self.hostiles.iter().find(|h| h.is_boss())
    }

    /// Push a projectile unless the live cap is reached. Returns false when dropped.
    pub fn push_projectile(&mut self, projectile: PlayerProjectile) -> bool {
        if self.projectiles.len() >= self.tuning.max_projectiles {
            return false;
        }
        self.projectiles.push(projectile);
        true
    }

    /// Whether the last tick dispatched a volley
    pub fn fired_this_tick(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Fired { .. }))
    }
}
