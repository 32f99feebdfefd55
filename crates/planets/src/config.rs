//! World configuration
//!
//! Every field has a default, so a partial YAML or JS object is enough:
//!
//! ```yaml
//! distance_scale: 1.0e9     # meters per render unit
//! time_step: 3600.0         # one hour per tick
//! pairing: simultaneous
//! ```

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::forces::{G, Gravity, MIN_SEPARATION};

/// How gravity contributions are paired within one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// Bodies take turns in collection order and merge as soon as they
    /// touch, so later turns see mergers made earlier in the tick
    #[default]
    Sequential,
    /// All accelerations are computed from one snapshot before any is applied
    Simultaneous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WorldConfig {
    /// m³ kg⁻¹ s⁻²
    pub gravitational_constant: f64,
    /// Meters per render unit; converts radii for contact tests
    pub distance_scale: f64,
    /// Force-law distance clamp (m)
    pub min_separation: f64,
    /// Trail life lost per tick
    pub fade_speed: f64,
    /// Slack added to a body's radius when deleting by point (render units)
    pub delete_tolerance: f64,
    /// Initial seconds per tick
    pub time_step: f64,
    pub pairing: PairingMode,
    /// Seed for the colour palette draw
    pub color_seed: u64,
}

impl WorldConfig {
    pub fn gravity(&self) -> Gravity {
        Gravity::new(self.gravitational_constant, self.min_separation)
    }

    /// Rejects settings the world could not run with
    ///
    /// # Returns
    /// The first offending field, checked in declaration order
    pub fn validate(&self) -> Result<(), InputError> {
        let positive = [
            ("gravitational_constant", self.gravitational_constant),
            ("distance_scale", self.distance_scale),
            ("min_separation", self.min_separation),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::OutOfRange { field, value });
            }
        }
        // A fade of 0 never expires trail points
        if !(self.fade_speed > 0.0 && self.fade_speed <= 1.0) {
            return Err(InputError::OutOfRange {
                field: "fade_speed",
                value: self.fade_speed,
            });
        }
        if !self.delete_tolerance.is_finite() || self.delete_tolerance < 0.0 {
            return Err(InputError::OutOfRange {
                field: "delete_tolerance",
                value: self.delete_tolerance,
            });
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(InputError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            distance_scale: 1.0e9,
            min_separation: MIN_SEPARATION,
            fade_speed: 0.005,
            delete_tolerance: 10.0,
            time_step: 86_400.0,
            pairing: PairingMode::Sequential,
            color_seed: 42,
        }
    }
}
