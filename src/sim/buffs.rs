//! Timed projectile buffs
//!
//! Three independent countdowns. They tick down once per fire event (not per
//! tick), and granting Giant or Damage halves the other two timers.

use serde::{Deserialize, Serialize};

/// Buff identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Buff {
    /// Three projectiles per lane in a narrow fan
    Scatter,
    /// Boosted projectile damage
    Damage,
    /// Larger projectiles
    Giant,
}

/// Appearance of newly fired projectiles, by precedence Giant > Scatter > Damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileStyle {
    #[default]
    Normal,
    Damage,
    Scatter,
    Giant,
}

/// Remaining fire events for each buff. A buff is active exactly while its
/// timer is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffTimers {
    pub scatter: u32,
    pub damage: u32,
    pub giant: u32,
}

impl BuffTimers {
    pub fn timer(&self, buff: Buff) -> u32 {
        match buff {
            Buff::Scatter => self.scatter,
            Buff::Damage => self.damage,
            Buff::Giant => self.giant,
        }
    }

    pub fn is_active(&self, buff: Buff) -> bool {
        self.timer(buff) > 0
    }

    /// Completed BURST gate: scatter is set, the others are untouched
    pub fn grant_scatter(&mut self, duration: u32) {
        self.scatter = duration;
    }

    /// Instant gate: damage is set, scatter and giant are halved
    pub fn grant_damage(&mut self, duration: u32) {
        self.damage = duration;
        self.scatter /= 2;
        self.giant /= 2;
    }

    /// Completed GIANT gate: giant is set, scatter and damage are halved
    pub fn grant_giant(&mut self, duration: u32) {
        self.giant = duration;
        self.scatter /= 2;
        self.damage /= 2;
    }

    /// Called once per fire event. Returns the buffs that expired on this call.
    pub fn on_fire(&mut self) -> Vec<Buff> {
        let mut expired = Vec::new();
        for (buff, timer) in [
            (Buff::Scatter, &mut self.scatter),
            (Buff::Damage, &mut self.damage),
            (Buff::Giant, &mut self.giant),
        ] {
            if *timer > 0 {
                *timer -= 1;
                if *timer == 0 {
                    expired.push(buff);
                }
            }
        }
        expired
    }

    pub fn style(&self) -> ProjectileStyle {
        if self.giant > 0 {
            ProjectileStyle::Giant
        } else if self.scatter > 0 {
            ProjectileStyle::Scatter
        } else if self.damage > 0 {
            ProjectileStyle::Damage
        } else {
            ProjectileStyle::Normal
        }
    }
}
