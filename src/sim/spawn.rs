//! Entity creation: player volleys, bursts, gate pairs, chests, hordes and the boss

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::progression;
use super::state::{ChargeOp, Chest, Gate, GameState, GateKind, Hostile, PlayerProjectile};

/// Fire one volley from the player's position and tick the buff timers down.
/// Returns the number of projectiles actually added.
pub fn fire_volley(state: &mut GameState) -> u32 {
    let t = &state.tuning;
    let damage = if state.buffs.damage > 0 {
        t.boosted_damage
    } else {
        t.shot_damage
    };
    let size = if state.buffs.giant > 0 {
        t.giant_size
    } else {
        t.shot_size
    };
    let scatter = state.buffs.scatter > 0;
    let origin_y = t.height - t.muzzle_offset;
    let lane_spacing = t.lane_spacing;
    let (shot_speed, scatter_speed, scatter_spread) =
        (t.shot_speed, t.scatter_speed, t.scatter_spread);

    let lanes = state.player.shot_count;
    let mut added = 0;
    for i in 0..lanes {
        let x_offset = (i as f32 - (lanes as f32 - 1.0) / 2.0) * lane_spacing;
        let origin = Vec2::new(state.player.x + x_offset, origin_y);
        if scatter {
            for j in -1..=1 {
                let vel = Vec2::new(j as f32 * scatter_spread, -scatter_speed);
                let id = state.next_entity_id();
                let projectile = PlayerProjectile::new(id, origin, vel, damage, size);
                added += u32::from(state.push_projectile(projectile));
            }
        } else {
            let id = state.next_entity_id();
            let vel = Vec2::new(0.0, -shot_speed);
            let projectile = PlayerProjectile::new(id, origin, vel, damage, size);
            added += u32::from(state.push_projectile(projectile));
        }
    }

    for buff in state.buffs.on_fire() {
        log::debug!("{:?} buff expired at tick {}", buff, state.time_ticks);
        state.events.push(GameEvent::BuffExpired(buff));
    }
    state.events.push(GameEvent::Fired { projectiles: added });
    added
}

/// Stage a fan of burst projectiles at `center`. They join the live set only
/// at the deferred merge.
pub fn stage_burst(state: &mut GameState, center: Vec2) {
    for _ in 0..state.tuning.burst_count {
        let degrees =
            state.tuning.burst_arc_start + state.rng.random::<f32>() * state.tuning.burst_arc_span;
        let vel = Vec2::from_angle(degrees.to_radians()) * state.tuning.burst_speed;
        let id = state.next_entity_id();
        state.staged_projectiles.push(PlayerProjectile::new(
            id,
            center,
            vel,
            state.tuning.burst_damage,
            state.tuning.burst_size,
        ));
    }
}

/// Spawn a chargeable and an instant gate side by side, sides chosen at random
pub fn spawn_gate_pair(state: &mut GameState) {
    let max_charge = progression::gate_requirement(state.score, &state.tuning);
    let chargeable_left = state.rng.random_bool(0.5);
    let op = if state.rng.random_bool(0.5) {
        ChargeOp::Burst
    } else {
        ChargeOp::Giant
    };
    let half = state.tuning.width / 2.0;
    let (chargeable_x, instant_x) = if chargeable_left { (0.0, half) } else { (half, 0.0) };

    for (x, kind) in [(chargeable_x, GateKind::Chargeable(op)), (instant_x, GateKind::Instant)] {
        let gate = Gate {
            id: state.next_entity_id(),
            pos: Vec2::new(x, state.tuning.gate_spawn_y),
            width: half,
            height: state.tuning.gate_height,
            kind,
            charge: 0,
            max_charge: if kind == GateKind::Instant { 0 } else { max_charge },
            pending_removal: false,
        };
        state.gates.push(gate);
    }
    log::debug!("Gate wave: {} gate needs {} charge", op.label(), max_charge);
    state.events.push(GameEvent::GateWave);
}

pub fn spawn_chest(state: &mut GameState) {
    let span = (state.tuning.width - state.tuning.chest_spawn_margin).max(0.0);
    let x = state.rng.random::<f32>() * span;
    let id = state.next_entity_id();
    state.chests.push(Chest {
        id,
        pos: Vec2::new(x, state.tuning.chest_spawn_y),
        size: state.tuning.chest_size,
        hp: state.tuning.chest_hp,
        pending_removal: false,
    });
    log::debug!("Chest {} spawned at x={:.0}", id, x);
    state.events.push(GameEvent::ChestSpawned { id });
}

/// Fill each horde lane with a regular hostile at the configured chance.
/// Health is fixed at spawn from the current score.
pub fn spawn_horde(state: &mut GameState) -> u32 {
    let max_hp = progression::regular_health(state.score, &state.tuning);
    let lane_width = state.tuning.width / state.tuning.horde_lanes.max(1) as f32;
    let mut spawned = 0;
    for lane in 0..state.tuning.horde_lanes {
        if !state.rng.random_bool(state.tuning.horde_fill_chance.clamp(0.0, 1.0)) {
            continue;
        }
        let variant = state.rng.random_range(0..2u8);
        let pos = Vec2::new(
            lane as f32 * lane_width + state.tuning.horde_lane_inset,
            state.tuning.horde_spawn_y,
        );
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Hostile::regular(id, pos, state.tuning.regular_size, max_hp, variant));
        spawned += 1;
    }
    state.events.push(GameEvent::HordeWave { spawned });
    spawned
}

/// Replace every regular hostile with the boss. Happens once per run.
pub fn spawn_boss(state: &mut GameState) {
    let max_hp = progression::boss_health(state.score, &state.tuning);
    let size = state.tuning.boss_size;
    let pos = Vec2::new(state.tuning.width / 2.0 - size / 2.0, state.tuning.boss_spawn_y);

    state.hostiles.clear();
    let id = state.next_entity_id();
    state.hostiles.push(Hostile::boss(id, pos, size, max_hp));
    state.boss_spawned = true;

    log::info!("Boss spawned at score {} with {:.0} hp", state.score, max_hp);
    state.events.push(GameEvent::BossSpawned { id, max_hp });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_single_shot() {
        let mut state = GameState::new(1);
        state.player.x = 100.0;
        assert_eq!(fire_volley(&mut state), 1);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec2::new(100.0, 740.0));
        assert_eq!(p.vel, Vec2::new(0.0, -9.0));
        assert_eq!(p.damage, 1.0);
        assert_eq!(p.size, 15.0);
        assert!(state.fired_this_tick());
    }

    #[test]
    fn test_lanes_are_centered() {
        let mut state = GameState::new(1);
        state.player.x = 200.0;
        state.player.shot_count = 3;
        fire_volley(&mut state);
        let xs: Vec<f32> = state.projectiles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![188.0, 200.0, 212.0]);
    }

    #[test]
    fn test_buffed_volley() {
        let mut state = GameState::new(1);
        state.buffs.scatter = 10;
        state.buffs.damage = 10;
        state.buffs.giant = 1;
        assert_eq!(fire_volley(&mut state), 3);
        let vx: Vec<f32> = state.projectiles.iter().map(|p| p.vel.x).collect();
        assert_eq!(vx, vec![-2.2, 0.0, 2.2]);
        assert!(
            state
                .projectiles
                .iter()
                .all(|p| p.damage == 2.0 && p.size == 36.0 && p.vel.y == -10.5)
        );
        // Timers dropped by one fire event, giant expired
        assert_eq!(state.buffs.scatter, 9);
        assert_eq!(state.buffs.giant, 0);
        assert!(state.events.contains(&GameEvent::BuffExpired(crate::sim::buffs::Buff::Giant)));
    }

    #[test]
    fn test_volley_respects_cap() {
        let tuning = Tuning {
            max_projectiles: 4,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        state.player.shot_count = 3;
        state.buffs.scatter = 5;
        assert_eq!(fire_volley(&mut state), 4);
        assert_eq!(state.projectiles.len(), 4);
    }

    #[test]
    fn test_burst_is_staged() {
        let mut state = GameState::new(3);
        stage_burst(&mut state, Vec2::new(120.0, 30.0));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.staged_projectiles.len(), 35);
        for p in &state.staged_projectiles {
            assert!((p.vel.length() - 12.0).abs() < 1e-4);
            // 240..300 degrees points upward on screen
            assert!(p.vel.y < 0.0);
            assert_eq!(p.size, 9.0);
        }
    }

    #[test]
    fn test_gate_pair() {
        let mut state = GameState::new(5);
        state.score = 240;
        spawn_gate_pair(&mut state);
        assert_eq!(state.gates.len(), 2);
        let chargeable: Vec<_> = state
            .gates
            .iter()
            .filter(|g| matches!(g.kind, GateKind::Chargeable(_)))
            .collect();
        assert_eq!(chargeable.len(), 1);
        assert_eq!(chargeable[0].max_charge, 12);
        let xs: Vec<f32> = state.gates.iter().map(|g| g.pos.x).collect();
        assert!(xs.contains(&0.0) && xs.contains(&240.0));
        assert!(state.gates.iter().all(|g| g.pos.y == -100.0 && g.width == 240.0));
    }

    #[test]
    fn test_horde_health_and_lanes() {
        let mut state = GameState::new(11);
        state.score = 600;
        let spawned = spawn_horde(&mut state);
        assert_eq!(spawned as usize, state.hostiles.len());
        assert!(spawned <= 8);
        for h in &state.hostiles {
            assert!((h.max_hp - 5.98).abs() < 1e-4);
            assert_eq!(h.hp, h.max_hp);
            assert_eq!((h.pos.x - 2.0) % 60.0, 0.0);
            assert_eq!(h.pos.y, -50.0);
        }
    }

    #[test]
    fn test_full_horde() {
        let tuning = Tuning {
            horde_fill_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(11, tuning);
        assert_eq!(spawn_horde(&mut state), 8);
    }

    #[test]
    fn test_boss_replaces_regulars() {
        let mut state = GameState::new(2);
        spawn_horde(&mut state);
        state.score = 3000;
        spawn_boss(&mut state);
        assert!(state.boss_spawned);
        assert_eq!(state.hostiles.len(), 1);
        let boss = &state.hostiles[0];
        assert!(boss.is_boss());
        assert_eq!(boss.pos, Vec2::new(150.0, -200.0));
        assert!((boss.max_hp - 4375.0).abs() < 1e-2);
    }

    #[test]
    fn test_chest_spawn() {
        let mut state = GameState::new(9);
        spawn_chest(&mut state);
        let chest = &state.chests[0];
        assert!(chest.pos.x >= 0.0 && chest.pos.x < 440.0);
        assert_eq!(chest.hp, 5.0);
        assert_eq!(chest.pos.y, -50.0);
    }
}
