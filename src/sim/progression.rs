//! Score-driven difficulty and the boss trigger

use crate::Tuning;

/// Health multiplier for newly spawned hostiles. Grows without cap.
pub fn difficulty(score: u32, tuning: &Tuning) -> f32 {
    1.0 + score as f32 / tuning.difficulty_divisor
}

/// Projectiles a new chargeable gate needs before it triggers
pub fn gate_requirement(score: u32, tuning: &Tuning) -> u32 {
    (tuning.gate_charge_base + score / tuning.gate_charge_step).min(tuning.gate_charge_cap)
}

/// Health of a regular hostile spawned at `score`
pub fn regular_health(score: u32, tuning: &Tuning) -> f32 {
    (tuning.regular_base_hp + score as f32 / tuning.regular_hp_score_divisor)
        * difficulty(score, tuning)
}

/// Health of the boss spawned at `score`
pub fn boss_health(score: u32, tuning: &Tuning) -> f32 {
    tuning.boss_base_hp * difficulty(score, tuning)
}

pub fn boss_due(score: u32, boss_spawned: bool, tuning: &Tuning) -> bool {
    !boss_spawned && score >= tuning.boss_trigger_score
}

/// Score for destroying a hostile
pub fn reward(boss: bool, tuning: &Tuning) -> u32 {
    if boss {
        tuning.boss_reward
    } else {
        tuning.regular_reward
    }
}
