//! Collision detection and response
//!
//! Everything is an axis-aligned box test. A player projectile hits a target
//! when its center point lies strictly inside the target box; projectile size
//! only affects damage and drawing. A shot on the seam between two gates
//! touches neither.
//!
//! Rules run in this order each tick:
//! 1. projectiles against gates, then chests (gates may consume first)
//! 2. hostiles against the dead line (instant defeat)
//! 3. hostiles against projectiles
//! 4. boss shots against the player

use super::boss::defeat_boss;
use super::events::GameEvent;
use super::progression;
use super::state::{BossProjectile, ChargeOp, GameState, GateKind, Outcome, PlayerProjectile};
use crate::{Rect, Tuning};

/// Whether a player projectile overlaps a target box
#[inline]
pub fn projectile_hits(target: Rect, projectile: &PlayerProjectile) -> bool {
    target.contains(projectile.pos)
}

/// Whether a boss shot is inside the player's hit band
pub fn in_contact_band(shot: &BossProjectile, player_x: f32, tuning: &Tuning) -> bool {
    shot.pos.y > tuning.height - tuning.contact_band_height
        && (shot.center().x - player_x).abs() < tuning.contact_half_width
}

/// Projectiles against gates and chests. Completed burst gates stage their
/// projectiles; nothing is added to the live set here.
pub fn resolve_pickups(state: &mut GameState) {
    let mut burst_centers = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| p.is_live()) {
        let mut consumed = false;

        for gate in state.gates.iter_mut().filter(|g| !g.pending_removal) {
            if !projectile_hits(gate.bounds(), projectile) {
                continue;
            }
            match gate.kind {
                GateKind::Chargeable(op) => {
                    gate.charge += 1;
                    if gate.charge >= gate.max_charge {
                        match op {
                            ChargeOp::Burst => {
                                burst_centers.push(gate.bounds().center());
                                state.buffs.grant_scatter(state.tuning.burst_scatter_duration);
                            }
                            ChargeOp::Giant => state.buffs.grant_giant(state.tuning.buff_duration),
                        }
                        gate.pending_removal = true;
                        log::debug!("{} gate {} triggered", op.label(), gate.id);
                        state.events.push(GameEvent::GateTriggered { gate_id: gate.id, op });
                    } else {
                        state.events.push(GameEvent::GateCharged {
                            gate_id: gate.id,
                            charge: gate.charge,
                            max_charge: gate.max_charge,
                        });
                    }
                    projectile.pending_removal = true;
                    consumed = true;
                    break;
                }
                GateKind::Instant => {
                    if !projectile.passed_damage_gate {
                        projectile.passed_damage_gate = true;
                        state.buffs.grant_damage(state.tuning.buff_duration);
                        state.events.push(GameEvent::DamageGatePassed {
                            projectile_id: projectile.id,
                        });
                    }
                }
            }
        }

        if consumed {
            continue;
        }

        for chest in state.chests.iter_mut().filter(|c| !c.pending_removal) {
            if !projectile_hits(chest.bounds(), projectile) {
                continue;
            }
            chest.hp = (chest.hp - projectile.damage).max(0.0);
            projectile.pending_removal = true;
            if chest.hp <= 0.0 {
                state.player.shot_count += 1;
                chest.pending_removal = true;
                log::debug!(
                    "Chest {} opened, shot count now {}",
                    chest.id,
                    state.player.shot_count
                );
                state.events.push(GameEvent::ChestOpened {
                    chest_id: chest.id,
                    shot_count: state.player.shot_count,
                });
            }
            break;
        }
    }

    for center in burst_centers {
        super::spawn::stage_burst(state, center);
    }
}

/// Latch defeat if any live hostile's bottom edge is past the dead line
pub fn check_dead_line(state: &mut GameState) -> bool {
    let dead_line = state.tuning.dead_line;
    let Some(id) = state
        .hostiles
        .iter()
        .find(|h| h.is_live() && h.pos.y + h.size > dead_line)
        .map(|h| h.id)
    else {
        return false;
    };
    log::info!("Hostile {} crossed the dead line", id);
    state.events.push(GameEvent::DeadLineCrossed { id });
    state.latch(Outcome::Defeat);
    true
}

/// Hostiles against live projectiles. Each hit consumes the projectile; a
/// lethal hit retires the hostile and awards score.
pub fn resolve_hostile_hits(state: &mut GameState) {
    let mut boss_defeated = false;

    for hostile in state.hostiles.iter_mut().filter(|h| h.is_live()) {
        for projectile in state.projectiles.iter_mut().filter(|p| p.is_live()) {
            if !projectile_hits(hostile.bounds(), projectile) {
                continue;
            }
            projectile.pending_removal = true;
            if !hostile.take_damage(projectile.damage) {
                continue;
            }

            let boss = hostile.is_boss();
            hostile.pending_removal = true;
            state.score += progression::reward(boss, &state.tuning);
            if boss {
                defeat_boss(hostile);
                boss_defeated = true;
            }
            state.events.push(GameEvent::HostileDestroyed {
                id: hostile.id,
                boss,
                pos: hostile.pos,
            });
            break;
        }
    }

    if boss_defeated {
        state.latch(Outcome::Victory);
    }
}

/// Boss shots against the player. A hit costs one hit point and grants the
/// invincibility window; shots during the window pass harmlessly.
pub fn resolve_player_contacts(state: &mut GameState) {
    let mut defeated = false;

    for shot in state.boss_projectiles.iter_mut().filter(|s| !s.pending_removal) {
        if state.player.invincible > 0 || !in_contact_band(shot, state.player.x, &state.tuning) {
            continue;
        }
        state.player.hp = state.player.hp.saturating_sub(1);
        state.player.invincible = state.tuning.invincibility_ticks;
        shot.pending_removal = true;
        log::info!("Player hit, {} hp left", state.player.hp);
        state.events.push(GameEvent::PlayerHit {
            hp_left: state.player.hp,
        });
        if state.player.hp == 0 {
            defeated = true;
        }
    }

    if defeated {
        state.latch(Outcome::Defeat);
    }
}

/// Run every collision rule in order. Stops once a terminal latch is set.
pub fn resolve(state: &mut GameState) {
    resolve_pickups(state);
    if check_dead_line(state) {
        return;
    }
    resolve_hostile_hits(state);
    if state.is_over() {
        return;
    }
    resolve_player_contacts(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Chest, Gate, Hostile};
    use glam::Vec2;

    fn projectile(state: &mut GameState, pos: Vec2, damage: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(PlayerProjectile::new(id, pos, Vec2::new(0.0, -9.0), damage, 15.0));
        id
    }

    fn gate(state: &mut GameState, kind: GateKind, max_charge: u32) -> u32 {
        let id = state.next_entity_id();
        state.gates.push(Gate {
            id,
            pos: Vec2::new(0.0, 100.0),
            width: 240.0,
            height: 60.0,
            kind,
            charge: 0,
            max_charge,
            pending_removal: false,
        });
        id
    }

    fn purge(state: &mut GameState) {
        state.projectiles.retain(|p| p.is_live());
    }

    #[test]
    fn test_projectile_hits_is_point_test() {
        let target = Rect::square(Vec2::new(100.0, 100.0), 50.0);
        let mut p = PlayerProjectile::new(1, Vec2::new(101.0, 120.0), Vec2::ZERO, 1.0, 15.0);
        assert!(projectile_hits(target, &p));
        p.pos.x = 95.0;
        assert!(!projectile_hits(target, &p));
        // Size does not widen the hit test
        p.size = 36.0;
        assert!(!projectile_hits(target, &p));
        p.pos.x = 100.0;
        assert!(!projectile_hits(target, &p), "edges are outside");
    }

    #[test]
    fn test_shot_on_gate_seam_passes_between() {
        let mut state = GameState::new(1);
        crate::sim::spawn::spawn_gate_pair(&mut state);
        for gate in &mut state.gates {
            gate.pos.y = 100.0;
        }
        projectile(&mut state, Vec2::new(240.0, 130.0), 1.0);
        resolve_pickups(&mut state);

        assert!(state.gates.iter().all(|g| g.charge == 0 && !g.pending_removal));
        assert!(state.projectiles[0].is_live());
        assert!(!state.projectiles[0].passed_damage_gate);
        assert_eq!(state.buffs.damage, 0);
    }

    #[test]
    fn test_giant_shot_beside_chest_misses() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.chests.push(Chest {
            id,
            pos: Vec2::new(200.0, 300.0),
            size: 80.0,
            hp: 5.0,
            pending_removal: false,
        });
        let id = state.next_entity_id();
        state.projectiles.push(PlayerProjectile::new(
            id,
            Vec2::new(185.0, 340.0),
            Vec2::new(0.0, -10.5),
            2.0,
            36.0,
        ));
        resolve_pickups(&mut state);
        assert_eq!(state.chests[0].hp, 5.0);
        assert!(state.projectiles[0].is_live());
    }

    #[test]
    fn test_contact_band() {
        let tuning = Tuning::default();
        let mut shot = BossProjectile::new(1, Vec2::new(200.0, 730.0), Vec2::ZERO, 35.0);
        // center x = 217.5
        assert!(in_contact_band(&shot, 240.0, &tuning));
        assert!(!in_contact_band(&shot, 250.0, &tuning));
        shot.pos.y = 720.0;
        assert!(!in_contact_band(&shot, 240.0, &tuning));
    }

    #[test]
    fn test_chargeable_gate_needs_exactly_n() {
        let mut state = GameState::new(1);
        gate(&mut state, GateKind::Chargeable(ChargeOp::Giant), 5);

        for n in 1..5 {
            projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
            resolve_pickups(&mut state);
            purge(&mut state);
            assert_eq!(state.gates[0].charge, n);
            assert!(!state.gates[0].pending_removal, "triggered early at {n}");
            assert_eq!(state.buffs.giant, 0);
        }
        assert!(state.projectiles.is_empty(), "charging consumes projectiles");

        projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
        resolve_pickups(&mut state);
        assert!(state.gates[0].pending_removal);
        assert_eq!(state.buffs.giant, 420);
    }

    #[test]
    fn test_triggered_gate_ignores_projectiles() {
        let mut state = GameState::new(1);
        gate(&mut state, GateKind::Chargeable(ChargeOp::Giant), 1);
        projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
        projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
        resolve_pickups(&mut state);
        assert_eq!(state.gates[0].charge, 1);
        assert!(state.projectiles[1].is_live());
    }

    #[test]
    fn test_burst_gate_stages_projectiles() {
        let mut state = GameState::new(1);
        state.buffs.damage = 100;
        gate(&mut state, GateKind::Chargeable(ChargeOp::Burst), 1);
        projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
        resolve_pickups(&mut state);
        assert_eq!(state.buffs.scatter, 840);
        // Burst leaves other timers alone
        assert_eq!(state.buffs.damage, 100);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.staged_projectiles.len(), 35);
        assert!(state.staged_projectiles.iter().all(|p| p.pos == Vec2::new(120.0, 130.0)));
    }

    #[test]
    fn test_instant_gate_applies_once_per_projectile() {
        let mut state = GameState::new(1);
        gate(&mut state, GateKind::Instant, 0);
        state.buffs.scatter = 100;
        state.buffs.giant = 40;
        projectile(&mut state, Vec2::new(120.0, 150.0), 1.0);

        resolve_pickups(&mut state);
        assert!(state.projectiles[0].passed_damage_gate);
        assert!(state.projectiles[0].is_live(), "instant gates do not consume");
        assert_eq!(state.buffs.damage, 420);
        assert_eq!(state.buffs.scatter, 50);
        assert_eq!(state.buffs.giant, 20);

        // Same projectile still overlapping on the next pass
        state.buffs.damage = 7;
        state.projectiles[0].pos.y = 140.0;
        resolve_pickups(&mut state);
        assert_eq!(state.buffs.damage, 7);
        assert_eq!(state.buffs.scatter, 50);
        assert_eq!(state.buffs.giant, 20);
    }

    #[test]
    fn test_chest_opens_and_grants_shot() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.chests.push(Chest {
            id,
            pos: Vec2::new(200.0, 300.0),
            size: 80.0,
            hp: 3.0,
            pending_removal: false,
        });
        projectile(&mut state, Vec2::new(240.0, 340.0), 2.0);
        resolve_pickups(&mut state);
        assert_eq!(state.chests[0].hp, 1.0);
        assert_eq!(state.player.shot_count, 1);
        purge(&mut state);

        projectile(&mut state, Vec2::new(240.0, 340.0), 2.0);
        resolve_pickups(&mut state);
        assert_eq!(state.chests[0].hp, 0.0);
        assert!(state.chests[0].pending_removal);
        assert_eq!(state.player.shot_count, 2);
    }

    #[test]
    fn test_gate_consumption_skips_chest() {
        let mut state = GameState::new(1);
        gate(&mut state, GateKind::Chargeable(ChargeOp::Burst), 10);
        let id = state.next_entity_id();
        state.chests.push(Chest {
            id,
            pos: Vec2::new(100.0, 100.0),
            size: 80.0,
            hp: 5.0,
            pending_removal: false,
        });
        projectile(&mut state, Vec2::new(120.0, 130.0), 1.0);
        resolve_pickups(&mut state);
        assert_eq!(state.chests[0].hp, 5.0);
    }

    #[test]
    fn test_regular_kill_awards_score() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Hostile::regular(id, Vec2::new(100.0, 200.0), 65.0, 1.5, 0));
        projectile(&mut state, Vec2::new(130.0, 230.0), 1.0);
        resolve_hostile_hits(&mut state);
        assert_eq!(state.hostiles[0].hp, 0.5);
        assert_eq!(state.score, 0);
        assert!(!state.projectiles[0].is_live());

        projectile(&mut state, Vec2::new(130.0, 230.0), 1.0);
        resolve_hostile_hits(&mut state);
        assert!(!state.hostiles[0].is_live());
        assert_eq!(state.hostiles[0].hp, 0.0);
        assert_eq!(state.score, 20);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_one_projectile_one_hit() {
        let mut state = GameState::new(1);
        for x in [100.0, 110.0] {
            let id = state.next_entity_id();
            state
                .hostiles
                .push(Hostile::regular(id, Vec2::new(x, 200.0), 65.0, 10.0, 0));
        }
        projectile(&mut state, Vec2::new(140.0, 230.0), 1.0);
        resolve_hostile_hits(&mut state);
        assert_eq!(state.hostiles[0].hp, 9.0);
        assert_eq!(state.hostiles[1].hp, 10.0);
    }

    #[test]
    fn test_boss_kill_is_victory() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Hostile::boss(id, Vec2::new(150.0, 70.0), 180.0, 2.0));
        projectile(&mut state, Vec2::new(240.0, 160.0), 2.0);
        resolve_hostile_hits(&mut state);
        assert_eq!(state.score, 1000);
        assert_eq!(state.outcome, Some(Outcome::Victory));
        assert!(state.events.contains(&GameEvent::Victory));
    }

    #[test]
    fn test_dead_line() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Hostile::regular(id, Vec2::new(100.0, 615.0), 65.0, 1.0, 0));
        assert!(!check_dead_line(&mut state));
        state.hostiles[0].pos.y = 615.5;
        assert!(check_dead_line(&mut state));
        assert_eq!(state.outcome, Some(Outcome::Defeat));
    }

    #[test]
    fn test_dead_line_preempts_hits() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Hostile::regular(id, Vec2::new(100.0, 620.0), 65.0, 1.0, 0));
        projectile(&mut state, Vec2::new(130.0, 650.0), 1.0);
        resolve(&mut state);
        assert_eq!(state.outcome, Some(Outcome::Defeat));
        assert_eq!(state.score, 0);
        assert!(state.hostiles[0].is_live());
    }

    #[test]
    fn test_player_contact_and_invincibility() {
        let mut state = GameState::new(1);
        state.player.x = 240.0;
        for _ in 0..2 {
            let id = state.next_entity_id();
            state.boss_projectiles.push(BossProjectile::new(
                id,
                Vec2::new(220.0, 740.0),
                Vec2::new(0.0, 5.0),
                35.0,
            ));
        }
        resolve_player_contacts(&mut state);
        assert_eq!(state.player.hp, 1);
        assert_eq!(state.player.invincible, 60);
        assert!(state.boss_projectiles[0].pending_removal);
        // Second shot landed inside the invincibility window
        assert!(!state.boss_projectiles[1].pending_removal);
        assert!(state.outcome.is_none());
    }
}
