//! Game balance and stage configuration
//!
//! Loaded once before a run starts (defaults or a JSON override file) and handed
//! to the simulation by value. Nothing in `sim` mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Reading the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid tuning JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but cannot drive a simulation
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Result type for tuning operations
pub type Result<T> = std::result::Result<T, TuningError>;

/// Every balance knob of a run. All speeds are pixels per tick, all
/// intervals and durations are ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stage ===
    pub width: f32,
    pub height: f32,
    /// Hostiles whose bottom edge crosses this line end the run
    pub dead_line: f32,
    /// Player projectiles above this line are removed
    pub cleanup_line: f32,

    // === Progression ===
    pub boss_trigger_score: u32,
    pub regular_reward: u32,
    pub boss_reward: u32,
    /// Difficulty scalar is `1 + score / difficulty_divisor`
    pub difficulty_divisor: f32,

    // === Player ===
    pub player_hp: u8,
    pub invincibility_ticks: u32,
    /// Boss shots below `height - contact_band_height` can hit the player
    pub contact_band_height: f32,
    pub contact_half_width: f32,
    /// Projectiles spawn at `height - muzzle_offset`
    pub muzzle_offset: f32,

    // === Firing ===
    pub fire_interval: u64,
    pub max_projectiles: usize,
    /// Projectiles bounce when x leaves `[0, width - bullet_width]`
    pub bullet_width: f32,
    pub lane_spacing: f32,
    pub shot_speed: f32,
    pub scatter_speed: f32,
    pub scatter_spread: f32,
    pub shot_damage: f32,
    pub boosted_damage: f32,
    pub shot_size: f32,
    pub giant_size: f32,

    // === Buffs ===
    pub buff_duration: u32,
    /// Scatter duration granted by a completed BURST gate
    pub burst_scatter_duration: u32,
    pub burst_count: u32,
    pub burst_speed: f32,
    pub burst_size: f32,
    pub burst_damage: f32,
    /// Burst angles are drawn from `[burst_arc_start, burst_arc_start + burst_arc_span]` degrees
    pub burst_arc_start: f32,
    pub burst_arc_span: f32,

    // === Gates ===
    pub gate_interval: u64,
    pub gate_height: f32,
    pub gate_speed: f32,
    pub gate_spawn_y: f32,
    pub gate_charge_base: u32,
    pub gate_charge_step: u32,
    pub gate_charge_cap: u32,

    // === Chests ===
    /// Chance of a chest spawning on any tick is `1 / chest_roll_denominator`
    pub chest_roll_denominator: u32,
    pub chest_size: f32,
    pub chest_hp: f32,
    pub chest_speed: f32,
    pub chest_spawn_y: f32,
    pub chest_spawn_margin: f32,

    // === Horde ===
    pub horde_interval: u64,
    pub horde_lanes: u32,
    pub horde_fill_chance: f64,
    pub horde_spawn_y: f32,
    pub horde_lane_inset: f32,
    pub regular_size: f32,
    pub regular_speed: f32,
    pub regular_base_hp: f32,
    pub regular_hp_score_divisor: f32,

    // === Boss ===
    pub boss_size: f32,
    pub boss_base_hp: f32,
    pub boss_spawn_y: f32,
    pub boss_rest_y: f32,
    pub boss_descent_speed: f32,
    pub boss_sway_amplitude: f32,
    /// Radians of sway phase per tick
    pub boss_sway_rate: f32,
    pub boss_push_interval: u32,
    /// The push is telegraphed while its counter is above this value
    pub boss_telegraph_threshold: u32,
    pub boss_push_radius: f32,
    pub boss_push_speed: f32,
    pub boss_volley_interval: u32,
    pub boss_flank_offset: f32,
    pub boss_shot_speed: f32,
    pub boss_homing_damping: f32,
    pub boss_shot_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: STAGE_WIDTH,
            height: STAGE_HEIGHT,
            dead_line: STAGE_HEIGHT - 120.0,
            cleanup_line: 50.0,

            boss_trigger_score: 3000,
            regular_reward: 20,
            boss_reward: 1000,
            difficulty_divisor: 4000.0,

            player_hp: 2,
            invincibility_ticks: 60,
            contact_band_height: 75.0,
            contact_half_width: 30.0,
            muzzle_offset: 60.0,

            // 240 ms at 60 Hz
            fire_interval: 14,
            max_projectiles: MAX_PLAYER_PROJECTILES,
            bullet_width: 10.0,
            lane_spacing: 12.0,
            shot_speed: 9.0,
            scatter_speed: 10.5,
            scatter_spread: 2.2,
            shot_damage: 1.0,
            boosted_damage: 2.0,
            shot_size: 15.0,
            giant_size: 36.0,

            buff_duration: 420,
            burst_scatter_duration: 840,
            burst_count: 35,
            burst_speed: 12.0,
            burst_size: 9.0,
            burst_damage: 1.0,
            burst_arc_start: 240.0,
            burst_arc_span: 60.0,

            gate_interval: 6 * TICK_RATE as u64,
            gate_height: 60.0,
            gate_speed: 2.2,
            gate_spawn_y: -100.0,
            gate_charge_base: 10,
            gate_charge_step: 120,
            gate_charge_cap: 35,

            chest_roll_denominator: 850,
            chest_size: 80.0,
            chest_hp: 5.0,
            chest_speed: 1.5,
            chest_spawn_y: -50.0,
            chest_spawn_margin: 40.0,

            horde_interval: 2 * TICK_RATE as u64,
            horde_lanes: 8,
            horde_fill_chance: 0.6,
            horde_spawn_y: -50.0,
            horde_lane_inset: 2.0,
            regular_size: 65.0,
            regular_speed: 0.5,
            regular_base_hp: 1.2,
            regular_hp_score_divisor: 150.0,

            boss_size: 180.0,
            boss_base_hp: 2500.0,
            boss_spawn_y: -200.0,
            boss_rest_y: 70.0,
            boss_descent_speed: 0.4,
            boss_sway_amplitude: 1.2,
            // sin(ms / 1200) sampled at 60 Hz
            boss_sway_rate: 1.0 / 72.0,
            boss_push_interval: 180,
            boss_telegraph_threshold: 120,
            boss_push_radius: 250.0,
            boss_push_speed: 8.0,
            boss_volley_interval: 100,
            boss_flank_offset: 30.0,
            boss_shot_speed: 5.0,
            boss_homing_damping: 0.8,
            boss_shot_size: 35.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(TuningError::Invalid(format!(
                "stage must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.bullet_width >= self.width {
            return Err(TuningError::Invalid(format!(
                "bullet_width {} does not fit in width {}",
                self.bullet_width, self.width
            )));
        }
        if !(0.0..=self.height).contains(&self.dead_line) {
            return Err(TuningError::Invalid(format!(
                "dead_line {} outside stage height {}",
                self.dead_line, self.height
            )));
        }
        if self.max_projectiles == 0 {
            return Err(TuningError::Invalid("max_projectiles must be non-zero".into()));
        }
        if self.chest_roll_denominator == 0 {
            return Err(TuningError::Invalid(
                "chest_roll_denominator must be non-zero".into(),
            ));
        }
        if self.gate_charge_cap == 0 || self.gate_charge_step == 0 {
            return Err(TuningError::Invalid(
                "gate charge cap and step must be non-zero".into(),
            ));
        }
        if self.difficulty_divisor <= 0.0 || self.regular_hp_score_divisor <= 0.0 {
            return Err(TuningError::Invalid("score divisors must be positive".into()));
        }
        if self.boss_telegraph_threshold >= self.boss_push_interval {
            return Err(TuningError::Invalid(format!(
                "boss_telegraph_threshold {} must be below boss_push_interval {}",
                self.boss_telegraph_threshold, self.boss_push_interval
            )));
        }
        if !(0.0..=1.0).contains(&self.horde_fill_chance) {
            return Err(TuningError::Invalid(format!(
                "horde_fill_chance {} is not a probability",
                self.horde_fill_chance
            )));
        }
        if self.boss_shot_speed <= 0.0 {
            return Err(TuningError::Invalid("boss_shot_speed must be positive".into()));
        }
        if self.boss_homing_damping <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "boss_homing_damping {} must be positive",
                self.boss_homing_damping
            )));
        }
        Ok(())
    }

    /// Ticks a boss shot is expected to need to cross the stage
    pub fn boss_flight_ticks(&self) -> f32 {
        self.height / self.boss_shot_speed * self.boss_homing_damping
    }
}
