use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;

/// XP cost of advancing from level 1 to level 2.
pub const BASE_XP: u64 = 100;
/// Exponent applied to the level when computing the per-level XP cost.
pub const GROWTH_RATE: f64 = 1.5;

/// Parameters of the XP curve `floor(base_xp * level ^ growth_rate)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XpCurve {
    base_xp: u64,
    growth_rate: f64,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            base_xp: BASE_XP,
            growth_rate: GROWTH_RATE,
        }
    }
}

/// Position of a cumulative XP total on the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_in_current_level: u64,
    pub xp_to_next_level: u64,
}

impl LevelProgress {
    /// Fraction of the current level already earned, in `[0.0, 1.0)`.
    pub fn progress_ratio(&self) -> f64 {
        self.xp_in_current_level as f64 / self.xp_to_next_level as f64
    }

    /// XP still missing before the next level-up.
    pub fn xp_remaining(&self) -> u64 {
        self.xp_to_next_level - self.xp_in_current_level
    }
}

impl XpCurve {
    /// Build a curve, rejecting parameters that would not be strictly
    /// positive and strictly increasing for every level.
    pub fn new(base_xp: u64, growth_rate: f64) -> Result<Self, ProgressionError> {
        let reason = if base_xp == 0 {
            Some("base_xp must be at least 1")
        } else if !growth_rate.is_finite() {
            Some("growth_rate must be finite")
        } else if growth_rate < 1.0 {
            Some("growth_rate must be at least 1.0")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ProgressionError::InvalidCurve {
                base_xp,
                growth_rate,
                reason,
            }),
            None => Ok(Self {
                base_xp,
                growth_rate,
            }),
        }
    }

    pub fn base_xp(&self) -> u64 {
        self.base_xp
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// XP needed to go from `level` to `level + 1`. Levels below 1 clamp to 1.
    pub fn xp_required_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return self.base_xp;
        }

        match self.half_steps() {
            Some(half_steps) => exact_cost(self.base_xp, level, half_steps),
            None => {
                let scaled = self.base_xp as f64 * f64::from(level).powf(self.growth_rate);
                // powf may land a hair under exact results. The cast saturates.
                (scaled + 1e-9).floor() as u64
            }
        }
    }

    /// `2 * growth_rate` when that is a whole number, which makes the cost an
    /// integer square root.
    fn half_steps(&self) -> Option<u32> {
        let doubled = self.growth_rate * 2.0;
        (doubled.fract() == 0.0 && doubled <= f64::from(u32::MAX)).then_some(doubled as u32)
    }

    /// Total XP needed to reach `level` starting from zero.
    pub fn cumulative_xp_for_level(&self, level: u32) -> u64 {
        (1..level.max(1)).fold(0_u64, |total, lower| {
            total.saturating_add(self.xp_required_for_level(lower))
        })
    }

    /// Resolve a cumulative XP total into a level and the progress within it.
    pub fn resolve_level(&self, total_xp: i64) -> Result<LevelProgress, ProgressionError> {
        let total_xp = u64::try_from(total_xp).map_err(|_| {
            ProgressionError::InvalidDomainInput {
                field: "total_xp",
                value: total_xp,
            }
        })?;

        Ok(self.resolve(total_xp))
    }

    fn resolve(&self, total_xp: u64) -> LevelProgress {
        let mut level = 1_u32;
        // XP at which `level` begins; never exceeds total_xp.
        let mut level_floor = 0_u64;
        let mut step = self.xp_required_for_level(level);

        while total_xp - level_floor >= step && level < u32::MAX {
            level_floor += step;
            level += 1;
            step = self.xp_required_for_level(level);
        }

        LevelProgress {
            level,
            xp_in_current_level: total_xp - level_floor,
            xp_to_next_level: step,
        }
    }
}

/// `floor(base * level^(half_steps / 2))` computed as `isqrt(base^2 * level^half_steps)`.
/// Saturates at `u64::MAX` once the radicand leaves `u128`.
fn exact_cost(base_xp: u64, level: u32, half_steps: u32) -> u64 {
    let base = u128::from(base_xp);
    base.checked_mul(base)
        .zip(u128::from(level).checked_pow(half_steps))
        .and_then(|(base_sq, power)| base_sq.checked_mul(power))
        .map_or(u64::MAX, |radicand| {
            u64::try_from(radicand.isqrt()).unwrap_or(u64::MAX)
        })
}

/// XP needed to go from `level` to `level + 1` on the canonical curve.
pub fn xp_required_for_level(level: u32) -> u64 {
    XpCurve::default().xp_required_for_level(level)
}

/// Total XP needed to reach `level` on the canonical curve.
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    XpCurve::default().cumulative_xp_for_level(level)
}

/// Resolve `total_xp` on the canonical curve. Negative totals are rejected.
pub fn resolve_level(total_xp: i64) -> Result<LevelProgress, ProgressionError> {
    XpCurve::default().resolve_level(total_xp)
}
