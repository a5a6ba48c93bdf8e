//! Narrow scripting facade over a [`Session`].

use log::{info, warn};

use crate::deflection::ScriptedFunction;
use crate::errors::ParameterError;
use crate::geometry::Color;
use crate::session::Session;

/// Scripting commands applied to a borrowed session.
///
/// # Examples
/// ```
/// use beamx::{BeamConfig, Session};
///
/// let mut session = Session::new(&BeamConfig::default()).expect("default config is valid");
/// let mut console = session.console();
/// console.set_function(|x, t, p| p[0] * x * t.sin(), vec![0.5, 2.0]);
/// console.set_function_param(99, 1.0);
/// assert_eq!(console.function_params(), Some(&[0.5, 2.0][..]));
/// ```
#[derive(Debug)]
pub struct Console<'a> {
    /// Session receiving the commands.
    session: &'a mut Session,
}

impl Session {
    /// Open the scripting facade.
    pub fn console(&mut self) -> Console<'_> {
        Console { session: self }
    }
}

impl Console<'_> {
    /// Replace the displacement field with `function(x, t, params)`.
    ///
    /// `x` is the node position normalised to `[0, 1]`.
    pub fn set_function<F>(&mut self, function: F, params: Vec<f64>)
    where
        F: Fn(f64, f64, &[f64]) -> f64 + 'static,
    {
        info!("scripted displacement registered with {} params", params.len());
        self.session.function = Some(ScriptedFunction::new(function, params));
    }

    /// Drop the scripted function and return to the mode shape.
    ///
    /// Returns whether a function was registered.
    pub fn clear_function(&mut self) -> bool {
        let cleared = self.session.function.take().is_some();
        if cleared {
            info!("scripted displacement cleared");
        }
        cleared
    }

    /// Parameters of the registered function, if any.
    #[must_use]
    pub fn function_params(&self) -> Option<&[f64]> {
        self.session.function.as_ref().map(ScriptedFunction::params)
    }

    /// Set one positional parameter of the registered function.
    ///
    /// An out-of-range `index`, or no registered function, is logged and
    /// otherwise ignored. Returns whether the parameter was written.
    pub fn set_function_param(&mut self, index: usize, value: f64) -> bool {
        let Some(function) = self.session.function.as_mut() else {
            warn!("no scripted function registered; parameter {index} ignored");
            return false;
        };
        let written = function.set_param(index, value);
        if !written {
            warn!(
                "parameter index {index} out of range for {} params",
                function.params().len()
            );
        }
        written
    }

    /// Jump to a simulated time; takes effect on the next refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFiniteTime`] when `time` is not finite.
    pub fn set_current_time(&mut self, time: f64) -> Result<(), ParameterError> {
        self.session.params.set_current_time(time)
    }

    /// Change the simulated time added per tick.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidTimeStep`] unless `step` is positive and finite.
    pub fn set_time_step(&mut self, step: f64) -> Result<(), ParameterError> {
        self.session.params.set_time_step(step)
    }

    /// Recolour every node and the beam solid; components are clamped to `[0, 1]`.
    pub fn set_color(&mut self, r: f64, g: f64, b: f64) {
        let color = Color::new(r, g, b);
        self.session.beam.set_color(color);
        self.session.mesh.set_color(color);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::BeamConfig;
    use crate::deflection::{beam_deflection, ModeShape};

    fn session() -> Session {
        Session::new(&BeamConfig {
            node_count: 5,
            ..BeamConfig::default()
        })
        .expect("valid config")
    }

    #[test]
    fn scripted_function_drives_the_next_refresh() {
        let mut session = session();
        let mut renderer = session.headless_renderer();
        session
            .console()
            .set_function(|x, _, params| params[0] * x, vec![2.0]);
        session.refresh(&mut renderer);
        assert_eq!(session.beam().deflections(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        assert!(session.console().set_function_param(0, -1.0));
        session.refresh(&mut renderer);
        assert_eq!(session.beam().deflections(), vec![0.0, -0.25, -0.5, -0.75, -1.0]);
    }

    #[test]
    fn out_of_range_param_leaves_list_unchanged() {
        let mut session = session();
        let mut console = session.console();
        console.set_function(|_, _, _| 0.0, vec![1.0, 2.0]);
        assert!(!console.set_function_param(99, 1.0));
        assert_eq!(console.function_params(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn param_without_function_is_ignored() {
        let mut session = session();
        let mut console = session.console();
        assert!(!console.set_function_param(0, 1.0));
        assert_eq!(console.function_params(), None);
    }

    #[test]
    fn clearing_returns_to_mode_shape() {
        let mut session = session();
        session.console().set_function(|_, _, _| 7.0, Vec::new());
        assert!(session.console().clear_function());
        assert!(!session.console().clear_function());

        let time = 0.3;
        let stations = session.beam().stations();
        let expected = beam_deflection(&ModeShape::new(2.5, 1.0), &stations, time);
        for (actual, expected) in session.deflection_at(time).iter().zip(expected) {
            assert_relative_eq!(*actual, expected);
        }
    }

    #[test]
    fn time_controls_validate_input() {
        let mut session = session();
        let mut console = session.console();
        console.set_current_time(4.0).expect("finite time");
        assert_eq!(
            console.set_time_step(-1.0),
            Err(ParameterError::InvalidTimeStep(-1.0))
        );
        assert_eq!(
            console.set_current_time(f64::INFINITY),
            Err(ParameterError::NonFiniteTime(f64::INFINITY))
        );
        assert_eq!(session.params().current_time(), 4.0);
    }

    #[test]
    fn set_color_recolours_nodes_and_solid() {
        let mut session = session();
        session.console().set_color(0.2, 1.5, -0.1);
        let expected = Color::new(0.2, 1.0, 0.0);
        assert_eq!(session.mesh().color(), expected);
        assert!(session
            .beam()
            .node_indices()
            .all(|node| session.beam().node_color(node) == Some(expected)));
    }
}
