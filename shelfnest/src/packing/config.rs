use serde::{Deserialize, Serialize};

use crate::{NestError, Result};

/// Configuration of the [`ShelfPacker`](crate::packing::ShelfPacker)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PackerConfig {
    /// Gap left between neighbouring items and between consecutive rows
    pub spacing: f64,
    /// Horizontal extent rows are wrapped within
    pub bin_width: f64,
    /// Inflation applied to every side of the final bounding rectangle
    pub margin: f64,
    /// Which rotations items may be placed in
    #[serde(default)]
    pub rotation: RotationMode,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            bin_width: 1000.0,
            margin: 0.0,
            rotation: RotationMode::None,
        }
    }
}

impl PackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.bin_width.is_finite() || self.bin_width <= 0.0 {
            return Err(NestError::InvalidConfiguration(format!(
                "bin width must be positive, got {}",
                self.bin_width
            )));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(NestError::InvalidConfiguration(format!(
                "spacing must be non-negative, got {}",
                self.spacing
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(NestError::InvalidConfiguration(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if self.rotation == RotationMode::Discrete(0) {
            return Err(NestError::InvalidConfiguration(
                "discrete rotation needs at least one angle".into(),
            ));
        }
        Ok(())
    }
}

/// Rotations an item is allowed to take.
/// Rotation happens around the midpoint of the item's bounding box.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Items are always placed as drawn
    #[default]
    None,
    /// `n` evenly spaced angles: `k * 360 / n` degrees for `k` in `0..n`
    Discrete(usize),
}

impl RotationMode {
    /// Allowed angles in degrees, always starting with 0.
    pub fn angles(&self) -> Vec<f64> {
        match *self {
            RotationMode::None => vec![0.0],
            RotationMode::Discrete(n) => (0..n.max(1))
                .map(|k| k as f64 * 360.0 / n as f64)
                .collect(),
        }
    }
}
