//! Read-only view of the simulation for renderers
//!
//! A `Snapshot` is owned data, so a renderer can hold it across frames without
//! borrowing `GameState`. It carries everything needed to draw the stage:
//! entity boxes, the projectile style, gate labels, health ratios, the boss
//! telegraph and the terminal latch. Renderers that fail to load an asset draw
//! a flat shape instead; nothing flows back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::buffs::{Buff, ProjectileStyle};
use super::progression;
use super::state::{GameState, GateKind, HostileKind, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileSnapshot {
    pub id: u32,
    /// Center point
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostileSprite {
    Regular { variant: u8 },
    Boss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostileSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub sprite: HostileSprite,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSnapshot {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub chargeable: bool,
    pub label: String,
    /// Charge progress in `[0, 1]`; always zero for instant gates
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChestSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub hp: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub hp: u8,
    pub invincible: bool,
    /// False on the off-frames of the invincibility blink
    pub visible: bool,
    pub shot_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuffFlags {
    pub scatter: bool,
    pub damage: bool,
    pub giant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub dead_line: f32,
    pub score: u32,
    pub boss_trigger_score: u32,
    /// Charge a gate spawned right now would need
    pub gate_requirement: u32,
    pub player: PlayerSnapshot,
    pub buffs: BuffFlags,
    pub projectile_style: ProjectileStyle,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub hostiles: Vec<HostileSnapshot>,
    pub boss_projectiles: Vec<BoxSnapshot>,
    pub gates: Vec<GateSnapshot>,
    pub chests: Vec<ChestSnapshot>,
    pub boss_telegraph: bool,
    /// Set on the ticks a volley was fired, for the audio collaborator
    pub fired: bool,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let t = &state.tuning;

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| ProjectileSnapshot {
                id: p.id,
                pos: p.pos,
                size: p.size,
            })
            .collect();

        let hostiles = state
            .hostiles
            .iter()
            .map(|h| HostileSnapshot {
                id: h.id,
                pos: h.pos,
                size: h.size,
                sprite: match h.kind {
                    HostileKind::Regular { variant } => HostileSprite::Regular { variant },
                    HostileKind::Boss(_) => HostileSprite::Boss,
                },
                health_ratio: h.health_ratio(),
            })
            .collect();

        let boss_projectiles = state
            .boss_projectiles
            .iter()
            .map(|s| BoxSnapshot {
                id: s.id,
                pos: s.pos,
                size: Vec2::splat(s.size),
            })
            .collect();

        let gates = state
            .gates
            .iter()
            .map(|g| GateSnapshot {
                id: g.id,
                pos: g.pos,
                size: Vec2::new(g.width, g.height),
                chargeable: matches!(g.kind, GateKind::Chargeable(_)),
                label: g.label(),
                progress: if g.max_charge > 0 {
                    (g.charge as f32 / g.max_charge as f32).min(1.0)
                } else {
                    0.0
                },
            })
            .collect();

        let chests = state
            .chests
            .iter()
            .map(|c| ChestSnapshot {
                id: c.id,
                pos: c.pos,
                size: c.size,
                hp: c.hp,
            })
            .collect();

        let boss_telegraph = state
            .boss()
            .and_then(|b| b.boss_state())
            .is_some_and(|b| b.telegraphing(t));

        Self {
            tick: state.time_ticks,
            width: t.width,
            height: t.height,
            dead_line: t.dead_line,
            score: state.score,
            boss_trigger_score: t.boss_trigger_score,
            gate_requirement: progression::gate_requirement(state.score, t),
            player: PlayerSnapshot {
                x: state.player.x,
                hp: state.player.hp,
                invincible: state.player.invincible > 0,
                visible: state.player.visible(),
                shot_count: state.player.shot_count,
            },
            buffs: BuffFlags {
                scatter: state.buffs.is_active(Buff::Scatter),
                damage: state.buffs.is_active(Buff::Damage),
                giant: state.buffs.is_active(Buff::Giant),
            },
            projectile_style: state.buffs.style(),
            projectiles,
            hostiles,
            boss_projectiles,
            gates,
            chests,
            boss_telegraph,
            fired: state.fired_this_tick(),
            outcome: state.outcome,
        }
    }
}
