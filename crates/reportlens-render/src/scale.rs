use crate::{Error, Result};
use reportlens_core::LensConfig;
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;
pub const DEFAULT_SCALE: f64 = 0.48;
pub const SCALE_STEP: f64 = 0.01;

/// Bounds for the user-controlled zoom factor of the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
            default: DEFAULT_SCALE,
            step: SCALE_STEP,
        }
    }
}

impl ScaleRange {
    pub fn new(min: f64, max: f64, default: f64, step: f64) -> Result<Self> {
        let valid = min.is_finite()
            && max.is_finite()
            && default.is_finite()
            && step.is_finite()
            && min > 0.0
            && min <= max
            && step >= 0.0;
        if !valid {
            return Err(Error::InvalidScaleRange { min, max });
        }
        Ok(Self {
            min,
            max,
            default: default.clamp(min, max),
            step,
        })
    }

    /// Reads `layout.minScale`, `layout.maxScale`, `layout.defaultScale` and `layout.scaleStep`,
    /// falling back to the built-in values for missing keys.
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        let d = Self::default();
        Self::new(
            config.get_f64("layout.minScale").unwrap_or(d.min),
            config.get_f64("layout.maxScale").unwrap_or(d.max),
            config.get_f64("layout.defaultScale").unwrap_or(d.default),
            config.get_f64("layout.scaleStep").unwrap_or(d.step),
        )
    }

    /// Clamps `value` into the range. Non-finite input yields the default scale.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Moves `value` by `steps` slider increments (negative steps zoom out), then clamps.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        self.clamp(self.clamp(value) + f64::from(steps) * self.step)
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}
