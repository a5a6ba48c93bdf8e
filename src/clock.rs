//! Fixed-interval animation clock.

use std::time::Duration;

use log::debug;

use crate::params::ParameterStore;

/// Advances simulated time once per tick while the animation is playing.
///
/// Time accumulates without bound; every consumer only sees it through
/// `sin(omega * t)`, which is periodic.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClock {
    /// Wall-clock interval between ticks.
    interval: Duration,
    /// Ticks that advanced the animation.
    advanced: u64,
}

impl AnimationClock {
    /// Create a clock that ticks every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            advanced: 0,
        }
    }

    /// Wall-clock interval between ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks that advanced the animation.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.advanced
    }

    /// Handle one tick.
    ///
    /// Returns the new simulated time, or `None` when paused.
    pub fn advance(&mut self, params: &mut ParameterStore) -> Option<f64> {
        if !params.is_playing() {
            return None;
        }
        let time = params.advance_time();
        self.advanced += 1;
        debug!("tick {} -> t = {time:.4}", self.advanced);
        Some(time)
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}
