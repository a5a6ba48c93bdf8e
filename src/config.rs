//! Session configuration loaded from JSON.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::geometry::Color;

/// Default upper bound for the mode number.
pub const DEFAULT_MODE_MAX: f64 = 3.5;

/// Fixed parameters for one animation session.
///
/// Every field has a default, so a JSON document only needs to name the values
/// it changes.
///
/// # Examples
/// ```
/// use beamx::BeamConfig;
///
/// let config = BeamConfig::from_json(r#"{ "node_count": 11, "omega": 2.0 }"#)
///     .expect("valid configuration");
/// assert_eq!(config.node_count, 11);
/// assert_eq!(config.mode, 2.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Number of nodes discretising the beam.
    pub node_count: usize,
    /// Distance between neighbouring nodes along the beam axis.
    pub node_spacing: f64,
    /// Half thickness of the extruded solid along Y.
    pub height: f64,
    /// Half depth of the extruded solid along Z.
    pub box_depth: f64,
    /// Initial mode number.
    pub mode: f64,
    /// Upper bound accepted for the mode number.
    pub mode_max: f64,
    /// Initial angular frequency.
    pub omega: f64,
    /// Simulated time added on every tick.
    pub time_step: f64,
    /// Wall-clock interval between ticks in milliseconds.
    pub tick_interval_ms: u64,
    /// Whether the animation starts playing.
    pub playing: bool,
    /// Whether the solid starts as a wireframe.
    pub transparent: bool,
    /// Colour of the node markers.
    pub node_color: Color,
    /// Colour of the extruded solid.
    pub beam_color: Color,
    /// Colour of the most recently picked node.
    pub highlight_color: Color,
    /// Radius within which a pick coordinate selects a node.
    pub pick_radius: f64,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            node_count: 21,
            node_spacing: 1.0,
            height: 1.0,
            box_depth: 2.0,
            mode: 2.5,
            mode_max: DEFAULT_MODE_MAX,
            omega: 1.0,
            time_step: 2.0 * PI / 40.0,
            tick_interval_ms: 50,
            playing: true,
            transparent: false,
            node_color: Color::RED,
            beam_color: Color::GREEN,
            highlight_color: Color::BLUE,
            pick_radius: 0.2,
        }
    }
}

impl BeamConfig {
    /// Parse and validate a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation error
    /// reported by [`BeamConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BeamConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// same errors as [`BeamConfig::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that the configuration describes a usable session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooFewNodes`] for fewer than two nodes,
    /// [`ConfigError::NonPositive`] for a non-positive spacing, height, depth or
    /// time step, [`ConfigError::NonFinite`] for a NaN or infinite mode, mode
    /// bound, angular frequency or pick radius and
    /// [`ConfigError::NegativeModeMax`] for a negative mode bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count < 2 {
            return Err(ConfigError::TooFewNodes(self.node_count));
        }
        let finite = [
            ("mode", self.mode),
            ("mode_max", self.mode_max),
            ("omega", self.omega),
            ("pick_radius", self.pick_radius),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        let positive = [
            ("node_spacing", self.node_spacing),
            ("height", self.height),
            ("box_depth", self.box_depth),
            ("time_step", self.time_step),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.mode_max < 0.0 {
            return Err(ConfigError::NegativeModeMax(self.mode_max));
        }
        Ok(())
    }
}
