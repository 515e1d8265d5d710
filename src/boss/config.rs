//! Per-pattern tunables.
//!
//! Every field has a default, so a data file only needs to mention what it
//! changes. Values are read once when the scheduler is built and never
//! mutated during a run.

use serde::Deserialize;

use super::error::BossDataError;
use crate::core::EaseCurve;

/// Delay between a run starting and the first pattern.
pub const STARTUP_DELAY: f32 = 0.5;
/// How long Pattern1's side fire stays alive.
pub const SIDE_FIRE_WINDOW: f32 = 3.0;
/// World-space Z displacement of Pattern4's charge.
pub const CHARGE_OFFSET: f32 = -5.0;

/// Pattern1 - continuous fire from both side spawn points.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SideFireConfig {
    /// Seconds between volleys
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_life: f32,
}

impl Default for SideFireConfig {
    fn default() -> Self {
        Self {
            fire_rate: 0.12,
            bullet_speed: 20.0,
            bullet_life: 3.5,
        }
    }
}

/// Pattern2 - fan of bullets from the center spawn point.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FanSpreadConfig {
    pub pre_delay: f32,
    pub waves: u32,
    pub wave_interval: f32,
    pub bullets_per_wave: u32,
    /// Total spread of one wave, in degrees
    pub arc_degrees: f32,
    pub bullet_speed: f32,
    pub bullet_life: f32,
}

impl Default for FanSpreadConfig {
    fn default() -> Self {
        Self {
            pre_delay: 2.0,
            waves: 4,
            wave_interval: 0.35,
            bullets_per_wave: 11,
            arc_degrees: 70.0,
            bullet_speed: 24.0,
            bullet_life: 3.2,
        }
    }
}

/// Pattern3 - telegraphed bomb volley around the player.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BombardmentConfig {
    /// Number of lanes
    pub count: u32,
    /// How long markers show before the bombs drop
    pub warn_time: f32,
    pub spawn_height: f32,
    pub forward_offset: f32,
    pub fall_speed: f32,
    pub bomb_life: f32,
    /// Lanes are sampled in [-lane_width, lane_width] on X
    pub lane_width: f32,
    /// Extra independent offset added on top of the lane sample
    pub random_jitter: f32,
}

impl Default for BombardmentConfig {
    fn default() -> Self {
        Self {
            count: 6,
            warn_time: 0.9,
            spawn_height: 15.0,
            forward_offset: 18.0,
            fall_speed: 28.0,
            bomb_life: 4.0,
            lane_width: 6.0,
            random_jitter: 0.6,
        }
    }
}

/// Pattern4 - charge along world Z and glide back to the spawn position.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ChargeConfig {
    pub anticipation: f32,
    pub charge_duration: f32,
    pub return_duration: f32,
    pub charge_ease: EaseCurve,
    pub return_ease: EaseCurve,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            anticipation: 0.5,
            charge_duration: 0.45,
            return_duration: 0.6,
            charge_ease: EaseCurve::EaseInOut,
            return_ease: EaseCurve::EaseInOut,
        }
    }
}

/// Full set of tunables for one boss.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BossConfig {
    /// Sign of the boss's forward axis along world Z
    pub z_direction_sign: f32,
    /// Pause between Pattern2, 3, 4 and the next cycle
    pub pattern_gap: f32,
    /// Repeat the cycle instead of stopping after one pass
    pub loop_patterns: bool,
    pub side_fire: SideFireConfig,
    pub fan_spread: FanSpreadConfig,
    pub bombardment: BombardmentConfig,
    pub charge: ChargeConfig,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            z_direction_sign: -1.0,
            pattern_gap: 0.6,
            loop_patterns: true,
            side_fire: SideFireConfig::default(),
            fan_spread: FanSpreadConfig::default(),
            bombardment: BombardmentConfig::default(),
            charge: ChargeConfig::default(),
        }
    }
}

impl BossConfig {
    /// Direction sign as +1 or -1. Zero counts as positive.
    pub fn forward_sign(&self) -> f32 {
        if self.z_direction_sign < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Check that every tunable is usable.
    pub fn validate(&self) -> Result<(), BossDataError> {
        if !(self.side_fire.fire_rate > 0.0) {
            return Err(BossDataError::InvalidValue {
                field: "side_fire.fire_rate",
                value: self.side_fire.fire_rate,
                reason: "must be greater than zero",
            });
        }

        let non_negative = [
            ("pattern_gap", self.pattern_gap),
            ("side_fire.bullet_life", self.side_fire.bullet_life),
            ("fan_spread.pre_delay", self.fan_spread.pre_delay),
            ("fan_spread.wave_interval", self.fan_spread.wave_interval),
            ("fan_spread.bullet_life", self.fan_spread.bullet_life),
            ("bombardment.warn_time", self.bombardment.warn_time),
            ("bombardment.bomb_life", self.bombardment.bomb_life),
            ("bombardment.lane_width", self.bombardment.lane_width),
            ("bombardment.random_jitter", self.bombardment.random_jitter),
            ("charge.anticipation", self.charge.anticipation),
            ("charge.charge_duration", self.charge.charge_duration),
            ("charge.return_duration", self.charge.return_duration),
        ];

        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(BossDataError::InvalidValue {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BossConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_fire_rate_is_rejected() {
        let mut config = BossConfig::default();
        config.side_fire.fire_rate = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            BossDataError::InvalidValue { field: "side_fire.fire_rate", .. }
        ));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let mut config = BossConfig::default();
        config.charge.return_duration = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("charge.return_duration"));
    }

    #[test]
    fn forward_sign_treats_zero_as_positive() {
        let mut config = BossConfig::default();
        assert_eq!(config.forward_sign(), -1.0);
        config.z_direction_sign = 0.0;
        assert_eq!(config.forward_sign(), 1.0);
        config.z_direction_sign = 3.5;
        assert_eq!(config.forward_sign(), 1.0);
    }
}
