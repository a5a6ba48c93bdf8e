//! The single source of truth for values shared between controls and the engine.

use log::{info, warn};

use crate::config::{BeamConfig, DEFAULT_MODE_MAX};
use crate::errors::ParameterError;
use crate::geometry::{Axis, Offset};

/// Mutable animation parameters.
///
/// Controls write here and every tick reads the current values afresh, so a
/// change made between two ticks is picked up by the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterStore {
    /// Mode number, kept within `[0, mode_max]`.
    mode: f64,
    /// Upper bound for the mode number; never changed after construction.
    mode_max: f64,
    /// Angular frequency, kept non-negative.
    omega: f64,
    /// Accumulated simulated time.
    current_time: f64,
    /// Simulated time added per tick.
    time_step: f64,
    /// Whether ticks advance the animation.
    playing: bool,
    /// Camera offset from the attached position node.
    delta_offset: Offset,
    /// Whether the solid is emitted as a wireframe.
    transparent: bool,
}

impl ParameterStore {
    /// Build the initial parameters from a validated configuration.
    ///
    /// Mode and angular frequency go through the same clamping as
    /// [`ParameterStore::set_mode`] and [`ParameterStore::set_omega`]; a NaN
    /// or infinite mode bound falls back to [`DEFAULT_MODE_MAX`].
    #[must_use]
    pub fn new(config: &BeamConfig) -> Self {
        let mode_max = if config.mode_max.is_finite() {
            config.mode_max.max(0.0)
        } else {
            warn!("mode_max {} replaced by {DEFAULT_MODE_MAX}", config.mode_max);
            DEFAULT_MODE_MAX
        };
        let mut params = Self {
            mode: 0.0,
            mode_max,
            omega: 0.0,
            current_time: 0.0,
            time_step: config.time_step,
            playing: config.playing,
            delta_offset: Offset::default(),
            transparent: config.transparent,
        };
        params.set_mode(config.mode);
        params.set_omega(config.omega);
        params
    }

    /// Current mode number.
    #[must_use]
    pub fn mode(&self) -> f64 {
        self.mode
    }

    /// Upper bound for the mode number.
    #[must_use]
    pub fn mode_max(&self) -> f64 {
        self.mode_max
    }

    /// Set the mode number, clamped into `[0, mode_max]`.
    pub fn set_mode(&mut self, mode: f64) {
        let clamped = if mode.is_nan() {
            0.0
        } else {
            mode.clamp(0.0, self.mode_max)
        };
        if clamped != mode {
            warn!("mode {mode} clamped to {clamped}");
        }
        self.mode = clamped;
    }

    /// Current angular frequency.
    #[must_use]
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Set the angular frequency; negative or non-finite values become zero.
    pub fn set_omega(&mut self, omega: f64) {
        let clamped = if omega.is_finite() { omega.max(0.0) } else { 0.0 };
        if clamped != omega {
            warn!("omega {omega} clamped to {clamped}");
        }
        self.omega = clamped;
    }

    /// Accumulated simulated time.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Jump to a simulated time.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFiniteTime`] when `time` is not finite.
    pub fn set_current_time(&mut self, time: f64) -> Result<(), ParameterError> {
        if !time.is_finite() {
            return Err(ParameterError::NonFiniteTime(time));
        }
        self.current_time = time;
        Ok(())
    }

    /// Simulated time added per tick.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Change the simulated time added per tick.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidTimeStep`] unless `step` is positive and finite.
    pub fn set_time_step(&mut self, step: f64) -> Result<(), ParameterError> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(ParameterError::InvalidTimeStep(step));
        }
        self.time_step = step;
        Ok(())
    }

    /// Advance the simulated time by one step and return the new time.
    pub(crate) fn advance_time(&mut self) -> f64 {
        self.current_time += self.time_step;
        self.current_time
    }

    /// Whether the animation is playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused without touching the simulated time.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        info!(
            "animation {} at t = {:.3}",
            if self.playing { "resumed" } else { "paused" },
            self.current_time
        );
        self.playing
    }

    /// Camera offset from the attached position node.
    #[must_use]
    pub fn delta_offset(&self) -> Offset {
        self.delta_offset
    }

    /// Replace one component of the camera offset.
    pub fn set_delta_offset(&mut self, axis: Axis, value: f64) {
        self.delta_offset = self.delta_offset.with(axis, value);
    }

    /// Whether the solid is emitted as a wireframe.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Flip between the wireframe and filled representations.
    pub fn toggle_transparency(&mut self) -> bool {
        self.transparent = !self.transparent;
        self.transparent
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(&BeamConfig::default())
    }
}
