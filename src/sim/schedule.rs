//! Periodic event scheduling
//!
//! Fire, gate and horde events use "time since last event" checks against the
//! absolute tick counter. Chests are rolled every tick instead, so their
//! arrivals are geometric rather than periodic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Tuning;

/// One interval-driven event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub interval: u64,
    /// Tick of the last dispatch (`None` until the first one)
    pub last: Option<u64>,
}

impl Schedule {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when more than `interval` ticks have passed since the last dispatch
    pub fn is_due(&self, now: u64) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_sub(last) > self.interval,
        }
    }

    /// Check and, if due, record `now` as the last dispatch
    pub fn poll(&mut self, now: u64) -> bool {
        if self.is_due(now) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}

/// All event sources of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    pub fire: Schedule,
    pub gate_wave: Schedule,
    pub horde_wave: Schedule,
    pub chest_roll_denominator: u32,
}

impl Scheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            fire: Schedule::new(tuning.fire_interval),
            gate_wave: Schedule::new(tuning.gate_interval),
            horde_wave: Schedule::new(tuning.horde_interval),
            chest_roll_denominator: tuning.chest_roll_denominator,
        }
    }

    pub fn due_for_fire(&mut self, now: u64) -> bool {
        self.fire.poll(now)
    }

    pub fn due_for_gate_wave(&mut self, now: u64) -> bool {
        self.gate_wave.poll(now)
    }

    pub fn due_for_horde_wave(&mut self, now: u64) -> bool {
        self.horde_wave.poll(now)
    }

    /// Per-tick chest draw with probability `1 / chest_roll_denominator`
    pub fn due_for_chest_roll<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random_range(0..self.chest_roll_denominator.max(1)) == 0
    }
}
