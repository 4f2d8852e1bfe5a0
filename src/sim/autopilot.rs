//! Demo-mode pointer controller
//!
//! Plays the game well enough for headless runs and attract loops. Boss shots
//! are dodged first; when nothing is incoming it parks under the lowest
//! hostile, or under a chest if the stage is clear.

use super::state::GameState;

/// Ticks of look-ahead when checking incoming boss shots
const THREAT_HORIZON: f32 = 45.0;
/// How far to step aside from a predicted impact
const DODGE_DISTANCE: f32 = 90.0;

/// Pointer x for the current tick
pub fn steer(state: &GameState) -> f32 {
    let t = &state.tuning;
    let player_x = state.player.x;
    let band_top = t.height - t.contact_band_height;

    // Predicted impact x of every shot that reaches the hit band soon
    let impacts: Vec<f32> = state
        .boss_projectiles
        .iter()
        .filter(|s| s.vel.y > 0.0)
        .filter_map(|s| {
            let ticks = ((band_top - s.pos.y) / s.vel.y).max(0.0);
            (ticks < THREAT_HORIZON).then(|| s.center().x + s.vel.x * ticks)
        })
        .collect();

    let danger = |x: f32| {
        impacts
            .iter()
            .any(|&ix| (ix - x).abs() < t.contact_half_width * 1.5)
    };

    let target = if danger(player_x) {
        [player_x - DODGE_DISTANCE, player_x + DODGE_DISTANCE]
            .into_iter()
            .map(|x| x.clamp(0.0, t.width))
            .filter(|&x| !danger(x))
            .min_by(|a, b| {
                let ca = (a - t.width / 2.0).abs();
                let cb = (b - t.width / 2.0).abs();
                ca.total_cmp(&cb)
            })
            .unwrap_or(if player_x < t.width / 2.0 {
                t.width
            } else {
                0.0
            })
    } else if let Some(hostile) = state
        .hostiles
        .iter()
        .max_by(|a, b| (a.pos.y + a.size).total_cmp(&(b.pos.y + b.size)))
    {
        // Small time-based wobble so the volleys spread a little
        let wobble = (state.time_ticks as f32 * 0.05).sin() * hostile.size * 0.2;
        hostile.bounds().center().x + wobble
    } else if let Some(chest) = state.chests.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)) {
        chest.bounds().center().x
    } else {
        player_x
    };

    target.clamp(0.0, t.width)
}
