//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! tick; the order of phases below is part of the game rules. Boss shots that
//! fall past the bottom edge still get their contact check before they are
//! swept.

use super::boss::{advance_boss, area_push, volley};
use super::collision;
use super::events::GameEvent;
use super::progression;
use super::spawn;
use super::state::{BossProjectile, GameState, HostileKind};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in stage coordinates; `None` leaves the player where it is
    pub pointer_x: Option<f32>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // A finished run renders but never changes
    if state.is_over() {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    if let Some(x) = input.pointer_x.filter(|x| x.is_finite()) {
        state.player.x = x;
    }

    run_schedules(state, now);
    advance_entities(state, now);
    sweep_bounds(state);
    collision::resolve(state);
    sweep_boss_shots(state);
    evaluate_progression(state);
    purge(state);
    merge_staged(state);
}

fn run_schedules(state: &mut GameState, now: u64) {
    if state.scheduler.due_for_fire(now) {
        spawn::fire_volley(state);
    }
    if state.scheduler.due_for_gate_wave(now) {
        spawn::spawn_gate_pair(state);
    }
    if state.scheduler.due_for_chest_roll(&mut state.rng) {
        spawn::spawn_chest(state);
    }
    // Hordes stop for good once the boss shows up
    if !state.boss_spawned && state.scheduler.due_for_horde_wave(now) {
        let spawned = spawn::spawn_horde(state);
        log::debug!("Horde wave at tick {}: {} hostiles", now, spawned);
    }
}

fn advance_entities(state: &mut GameState, now: u64) {
    let max_x = state.tuning.width - state.tuning.bullet_width;
    for projectile in &mut state.projectiles {
        projectile.advance(max_x);
    }

    let mut boss_turns = Vec::new();
    for hostile in &mut state.hostiles {
        match hostile.kind {
            HostileKind::Regular { .. } => hostile.pos.y += state.tuning.regular_speed,
            HostileKind::Boss(_) => {
                let actions = advance_boss(hostile, now, &state.tuning);
                // Aim is fixed here, from the player position at fire time
                let shots = actions
                    .volley
                    .then(|| volley(hostile, state.player.x, &state.tuning));
                boss_turns.push((hostile.id, hostile.bounds().center(), actions, shots));
            }
        }
    }

    for (boss_id, center, actions, shots) in boss_turns {
        if actions.arrived {
            log::info!("Boss {} reached its resting height", boss_id);
            state.events.push(GameEvent::BossArrived { id: boss_id });
        }
        if actions.push {
            let pushed = area_push(center, &mut state.projectiles, &state.tuning);
            log::debug!("Boss push deflected {} projectiles", pushed);
            state.events.push(GameEvent::BossPush { pushed });
        }
        if let Some(shots) = shots {
            for shot in shots {
                let id = state.next_entity_id();
                state.boss_projectiles.push(BossProjectile::new(
                    id,
                    shot.pos,
                    shot.vel,
                    state.tuning.boss_shot_size,
                ));
            }
            state.events.push(GameEvent::BossVolley);
        }
    }

    for shot in &mut state.boss_projectiles {
        shot.advance();
    }
    for gate in &mut state.gates {
        gate.pos.y += state.tuning.gate_speed;
    }
    for chest in &mut state.chests {
        chest.pos.y += state.tuning.chest_speed;
    }
}

/// Flag everything that left the stage
fn sweep_bounds(state: &mut GameState) {
    let t = &state.tuning;
    for projectile in &mut state.projectiles {
        if projectile.pos.y < t.cleanup_line || projectile.pos.y > t.height {
            projectile.pending_removal = true;
        }
    }
    for gate in &mut state.gates {
        if gate.pos.y > t.height {
            gate.pending_removal = true;
        }
    }
    for chest in &mut state.chests {
        if chest.pos.y > t.height {
            chest.pending_removal = true;
        }
    }
}

/// Boss shots below the stage that missed the player
fn sweep_boss_shots(state: &mut GameState) {
    let height = state.tuning.height;
    for shot in &mut state.boss_projectiles {
        if shot.pos.y > height {
            shot.pending_removal = true;
        }
    }
}

fn evaluate_progression(state: &mut GameState) {
    if state.is_over() {
        return;
    }
    if progression::boss_due(state.score, state.boss_spawned, &state.tuning) {
        spawn::spawn_boss(state);
    }
    state.player.invincible = state.player.invincible.saturating_sub(1);
}

fn purge(state: &mut GameState) {
    state.projectiles.retain(|p| p.is_live());
    state.hostiles.retain(|h| h.is_live());
    state.boss_projectiles.retain(|s| !s.pending_removal);
    state.gates.retain(|g| !g.pending_removal);
    state.chests.retain(|c| !c.pending_removal);
}

/// Move staged projectiles into the live set, dropping whatever exceeds the cap
fn merge_staged(state: &mut GameState) {
    if state.staged_projectiles.is_empty() {
        return;
    }
    let room = state
        .tuning
        .max_projectiles
        .saturating_sub(state.projectiles.len());
    let staged = std::mem::take(&mut state.staged_projectiles);
    if staged.len() > room {
        log::debug!(
            "Projectile cap reached, dropping {} staged projectiles",
            staged.len() - room
        );
    }
    state.projectiles.extend(staged.into_iter().take(room));
}
