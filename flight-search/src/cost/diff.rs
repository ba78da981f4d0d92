//! Asymmetric penalty around a desired value.

use serde::{Deserialize, Serialize};

/// A V-shaped penalty: zero at `desired_value`, growing linearly with
/// slope `down_factor` below it and `up_factor` above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffCostSettings {
    pub desired_value: f64,
    pub down_factor: f64,
    pub up_factor: f64,
}

impl DiffCostSettings {
    /// Create penalty settings.
    pub fn new(desired_value: f64, down_factor: f64, up_factor: f64) -> Self {
        Self {
            desired_value,
            down_factor,
            up_factor,
        }
    }

    /// A penalty that always scores zero, used to disable a term.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Default for DiffCostSettings {
    fn default() -> Self {
        Self::zero()
    }
}

/// Penalty of `value` under `settings`.
///
/// Values at or above the desired value are charged with `up_factor`,
/// values below it with `down_factor`.
pub fn score_diff(settings: &DiffCostSettings, value: f64) -> f64 {
    let diff = value - settings.desired_value;
    if diff >= 0.0 {
        diff * settings.up_factor
    } else {
        -diff * settings.down_factor
    }
}
