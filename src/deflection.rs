//! Closed-form mode shapes and the time-modulated deflection field.
//!
//! The spatial shape of vibration mode `m` along a beam normalised to unit
//! length is
//!
//! ```text
//! beta = pi * m,  r = beta * x
//! k    = (cos(beta) + cosh(beta)) / (sin(beta) + sinh(beta))
//! y(x) = cosh(r) - cos(r) + k * (sin(r) - sinh(r))
//! ```
//!
//! and the deflection at time `t` scales that shape by `sin(omega * t)`.
//! See <https://en.wikipedia.org/wiki/Euler%E2%80%93Bernoulli_beam_theory#Dynamic_analysis>.

use std::f64::consts::PI;
use std::fmt;

use crate::params::ParameterStore;

/// Above this `beta` the hyperbolic terms are evaluated in scaled form.
const SCALED_BETA: f64 = 20.0;

/// Evaluate the mode shape for `mode` at the normalised position `x` in `[0, 1]`.
///
/// Returns exactly `0.0` when `sin(beta) + sinh(beta)` vanishes (for example at
/// `mode == 0`). Large modes are evaluated without forming `cosh(beta)`, so the
/// shape stays bounded on the beam; positions far past the free end overflow to
/// `+inf` or `-inf` rather than `NaN`.
///
/// # Examples
/// ```
/// use beamx::displacement;
///
/// assert_eq!(displacement(2.5, 0.0), 0.0);
/// assert_eq!(displacement(0.0, 0.7), 0.0);
/// ```
#[must_use]
pub fn displacement(mode: f64, x: f64) -> f64 {
    let beta = PI * mode;
    let r = beta * x;

    let denominator = beta.sin() + beta.sinh();
    if denominator == 0.0 {
        return 0.0;
    }
    if beta < SCALED_BETA {
        let k = (beta.cos() + beta.cosh()) / denominator;
        r.cosh() - r.cos() + k * (r.sin() - r.sinh())
    } else {
        scaled_displacement(beta, r)
    }
}

/// Mode shape with the shape constant scaled by `2 e^-beta`.
///
/// Uses `cosh r - k sinh r = ((1 - k) e^r + (1 + k) e^-r) / 2`, where
/// `(1 - k) e^r` only involves `e^(r - beta)` and `e^(r - 2 beta)`.
fn scaled_displacement(beta: f64, r: f64) -> f64 {
    // The clamped end is exactly zero for every mode.
    if r == 0.0 {
        return 0.0;
    }
    let decay = (-beta).exp();
    let denominator = 2.0 * beta.sin() * decay + 1.0 - decay * decay;
    if denominator == 0.0 {
        return 0.0;
    }
    let k = (2.0 * beta.cos() * decay + 1.0 + decay * decay) / denominator;
    let growing = (grow(2.0 * (beta.sin() - beta.cos()), r - beta) - grow(2.0, r - 2.0 * beta))
        / denominator;
    let decaying = (1.0 + k) * (-r).exp();
    0.5 * (growing + decaying) - r.cos() + k * r.sin()
}

/// `coefficient * e^exponent`, with a zero coefficient never meeting an overflow.
fn grow(coefficient: f64, exponent: f64) -> f64 {
    if coefficient == 0.0 {
        0.0
    } else {
        coefficient * exponent.exp()
    }
}

/// A displacement field `y(x, t)` over a beam normalised to unit length.
///
/// [`ModeShape`] is the built-in field; [`ScriptedFunction`] lets a console
/// register an arbitrary closure in its place.
pub trait DisplacementField {
    /// Displacement at normalised position `x` and simulated time `t`.
    fn evaluate(&self, x: f64, t: f64) -> f64;
}

/// Mode shape scaled by `sin(omega * t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeShape {
    /// Mode number, possibly fractional.
    pub mode: f64,
    /// Angular frequency of the oscillation.
    pub omega: f64,
}

impl ModeShape {
    /// Create a [`ModeShape`] for the given mode and angular frequency.
    #[must_use]
    pub const fn new(mode: f64, omega: f64) -> Self {
        Self { mode, omega }
    }
}

impl From<&ParameterStore> for ModeShape {
    fn from(params: &ParameterStore) -> Self {
        Self::new(params.mode(), params.omega())
    }
}

impl DisplacementField for ModeShape {
    fn evaluate(&self, x: f64, t: f64) -> f64 {
        displacement(self.mode, x) * (self.omega * t).sin()
    }
}

/// Signature of a scripted displacement function: `f(x, t, params)`.
pub type ScriptFn = dyn Fn(f64, f64, &[f64]) -> f64;

/// A user supplied displacement function with a positional parameter list.
pub struct ScriptedFunction {
    /// The registered callable.
    function: Box<ScriptFn>,
    /// Parameters passed to every evaluation.
    params: Vec<f64>,
}

impl ScriptedFunction {
    /// Wrap a closure and its initial parameters.
    pub fn new<F>(function: F, params: Vec<f64>) -> Self
    where
        F: Fn(f64, f64, &[f64]) -> f64 + 'static,
    {
        Self {
            function: Box::new(function),
            params,
        }
    }

    /// Current parameter list.
    #[must_use]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Replace the parameter at `index`.
    ///
    /// Returns `false` and leaves the list untouched when `index` is out of range.
    pub fn set_param(&mut self, index: usize, value: f64) -> bool {
        match self.params.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ScriptedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedFunction")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl DisplacementField for ScriptedFunction {
    fn evaluate(&self, x: f64, t: f64) -> f64 {
        (self.function)(x, t, &self.params)
    }
}

/// Evaluate `field` at every station, normalising by the last station.
///
/// `stations` holds the fixed positions along the beam axis in node order. The
/// returned values are in the same order and nothing is cached between calls.
#[must_use]
pub fn beam_deflection(field: &dyn DisplacementField, stations: &[f64], time: f64) -> Vec<f64> {
    let span = stations.last().copied().unwrap_or(0.0);
    stations
        .iter()
        .map(|&station| {
            let x = if span == 0.0 { 0.0 } else { station / span };
            field.evaluate(x, time)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// The formula exactly as written, used as a reference for moderate modes.
    fn naive(mode: f64, x: f64) -> f64 {
        let beta = PI * mode;
        let r = beta * x;
        let k = (beta.cos() + beta.cosh()) / (beta.sin() + beta.sinh());
        r.cosh() - r.cos() + k * (r.sin() - r.sinh())
    }

    fn stations(count: usize) -> Vec<f64> {
        (0..count).map(|i| i as f64).collect()
    }

    #[test]
    fn fixed_end_is_always_zero() {
        for mode in [0.0, 0.6, 1.5, 2.5, 3.5, 50.0, 400.0] {
            assert_eq!(displacement(mode, 0.0), 0.0, "mode {mode}");
        }
    }

    #[test]
    fn degenerate_constant_falls_back_to_zero() {
        let value = displacement(0.0, 0.5);
        assert_eq!(value, 0.0);
        assert!(!value.is_nan());
    }

    #[test]
    fn matches_closed_form_for_tractable_modes() {
        for mode in [0.6, 1.5, 2.5, 3.5] {
            for step in 0..=10 {
                let x = f64::from(step) / 10.0;
                assert_relative_eq!(
                    displacement(mode, x),
                    naive(mode, x),
                    epsilon = 1.0e-9,
                    max_relative = 1.0e-9
                );
            }
        }
    }

    #[test]
    fn free_end_of_first_modes_is_nonzero() {
        assert!(displacement(0.6, 1.0).abs() > 0.1);
        assert!(displacement(2.5, 1.0).abs() > 0.1);
    }

    #[test]
    fn huge_modes_stay_bounded_on_the_beam() {
        for mode in [300.0, 1_000.0, 1.0e6] {
            for step in 0..=4 {
                let x = f64::from(step) / 4.0;
                let value = displacement(mode, x);
                assert!(value.is_finite(), "mode {mode} at {x} gave {value}");
                assert!(value.abs() < 3.0, "mode {mode} at {x} gave {value}");
            }
        }
    }

    #[test]
    fn overflow_past_the_span_saturates() {
        let value = displacement(1_000.0, 3.0);
        assert!(value.is_infinite());
        assert!(!value.is_nan());
    }

    #[test]
    fn scaled_form_agrees_with_direct_form() {
        for mode in [2.5, 3.5, 5.5] {
            let beta = PI * mode;
            for step in 0..=10 {
                let x = f64::from(step) / 10.0;
                assert_relative_eq!(
                    scaled_displacement(beta, beta * x),
                    naive(mode, x),
                    epsilon = 1.0e-7
                );
            }
        }
    }

    #[test]
    fn deflection_is_zero_at_time_zero() {
        let field = ModeShape::new(2.5, 1.0);
        let values = beam_deflection(&field, &stations(11), 0.0);
        assert_eq!(values.len(), 11);
        assert!(values.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn deflection_is_periodic_in_time() {
        let field = ModeShape::new(1.5, 2.0);
        let period = 2.0 * PI / field.omega;
        let span = stations(21);
        for t in [0.3, 1.1, 4.2] {
            let now = beam_deflection(&field, &span, t);
            let later = beam_deflection(&field, &span, t + period);
            for (a, b) in now.iter().zip(&later) {
                assert_relative_eq!(a, b, epsilon = 1.0e-9);
            }
        }
    }

    #[test]
    fn stations_are_normalised_by_the_last_one() {
        let field = ModeShape::new(2.5, 1.0);
        let values = beam_deflection(&field, &[0.0, 5.0, 10.0], PI / 2.0);
        assert_relative_eq!(values[1], displacement(2.5, 0.5), epsilon = 1.0e-12);
        assert_relative_eq!(values[2], displacement(2.5, 1.0), epsilon = 1.0e-12);
    }

    #[test]
    fn scripted_function_receives_parameters() {
        let mut function = ScriptedFunction::new(|x, t, p| p[0] * x + p[1] * t, vec![2.0, 0.5]);
        assert_relative_eq!(function.evaluate(0.5, 4.0), 3.0);
        assert!(function.set_param(1, 0.0));
        assert_relative_eq!(function.evaluate(0.5, 4.0), 1.0);
    }

    #[test]
    fn scripted_parameter_out_of_range_is_ignored() {
        let mut function = ScriptedFunction::new(|_, _, _| 0.0, vec![1.0, 2.0]);
        assert!(!function.set_param(99, 1.0));
        assert_eq!(function.params(), &[1.0, 2.0]);
    }
}
