//! Boss phase controller
//!
//! The boss descends from off-stage while swaying, then rests and alternates
//! between two abilities on independent cooldowns:
//! - an area push that shoves nearby player projectiles away
//! - a twin volley aimed once at the player's position at fire time

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Hostile, HostileKind, PlayerProjectile};
use crate::Tuning;
use crate::consts::PUSH_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending toward the resting height, no abilities
    #[default]
    Entering,
    /// Resting height reached; swaying and attacking
    Active,
    /// Health depleted
    Defeated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub phase: BossPhase,
    /// Counts up to the area push
    pub push_cooldown: u32,
    /// Counts up to the twin volley
    pub attack_cooldown: u32,
}

impl BossState {
    /// Warning window before the area push
    pub fn telegraphing(&self, tuning: &Tuning) -> bool {
        self.phase == BossPhase::Active && self.push_cooldown > tuning.boss_telegraph_threshold
    }
}

/// Abilities due after a boss update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossActions {
    pub arrived: bool,
    pub push: bool,
    pub volley: bool,
}

/// Move the boss one tick and advance its phase and cooldowns.
/// Regular hostiles are left untouched.
pub fn advance_boss(hostile: &mut Hostile, time_ticks: u64, tuning: &Tuning) -> BossActions {
    let mut actions = BossActions::default();
    let HostileKind::Boss(boss) = &mut hostile.kind else {
        return actions;
    };
    if boss.phase == BossPhase::Defeated {
        return actions;
    }

    hostile.pos.x +=
        (time_ticks as f32 * tuning.boss_sway_rate).sin() * tuning.boss_sway_amplitude;
    hostile.pos.x = hostile.pos.x.clamp(0.0, (tuning.width - hostile.size).max(0.0));

    match boss.phase {
        BossPhase::Entering => {
            hostile.pos.y = (hostile.pos.y + tuning.boss_descent_speed).min(tuning.boss_rest_y);
            if hostile.pos.y >= tuning.boss_rest_y {
                boss.phase = BossPhase::Active;
                actions.arrived = true;
            }
        }
        BossPhase::Active => {
            boss.push_cooldown += 1;
            boss.attack_cooldown += 1;

            if boss.push_cooldown > tuning.boss_push_interval {
                boss.push_cooldown = 0;
                actions.push = true;
            }
            if boss.attack_cooldown > tuning.boss_volley_interval {
                boss.attack_cooldown = 0;
                actions.volley = true;
            }
        }
        BossPhase::Defeated => {}
    }

    actions
}

/// Mark the boss as defeated
pub fn defeat_boss(hostile: &mut Hostile) {
    if let HostileKind::Boss(boss) = &mut hostile.kind {
        boss.phase = BossPhase::Defeated;
    }
}

/// Radial impulse: every live projectile within `boss_push_radius` of `center`
/// gets a horizontal speed pointing away from it and a downward vertical
/// velocity. Returns the number of projectiles pushed.
pub fn area_push(center: Vec2, projectiles: &mut [PlayerProjectile], tuning: &Tuning) -> u32 {
    let mut pushed = 0;
    for projectile in projectiles.iter_mut().filter(|p| p.is_live()) {
        let offset = projectile.pos - center;
        let dist = offset.length();
        if dist >= tuning.boss_push_radius {
            continue;
        }
        // Dead-center projectiles are pushed straight down
        let dir = if dist > PUSH_EPSILON {
            offset / dist
        } else {
            Vec2::Y
        };
        projectile.vel.x = dir.x * tuning.boss_push_speed;
        projectile.vel.y = projectile.vel.y.abs();
        pushed += 1;
    }
    pushed
}

/// Spawn position and velocity of one boss shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolleyShot {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Twin shots from the boss flanks, each aimed by a single linear estimate
/// toward `target_x`. The estimate is never refreshed after spawn.
pub fn volley(boss: &Hostile, target_x: f32, tuning: &Tuning) -> [VolleyShot; 2] {
    let origin_y = boss.pos.y + boss.size;
    let flight_ticks = tuning.boss_flight_ticks();
    let aim = |origin_x: f32| VolleyShot {
        pos: Vec2::new(origin_x, origin_y),
        vel: Vec2::new((target_x - origin_x) / flight_ticks, tuning.boss_shot_speed),
    };
    [
        aim(boss.pos.x + tuning.boss_flank_offset),
        aim(boss.pos.x + boss.size - tuning.boss_flank_offset),
    ]
}
