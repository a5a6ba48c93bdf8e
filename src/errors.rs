//! Error types produced while configuring or driving a beam animation.

use std::path::PathBuf;

use petgraph::graph::NodeIndex;
use thiserror::Error;

/// Error returned when a [`BeamConfig`](crate::BeamConfig) cannot be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the configuration is not valid JSON for [`BeamConfig`](crate::BeamConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when fewer than two nodes are requested.
    #[error("a beam needs at least two nodes (received {0})")]
    TooFewNodes(usize),
    /// Returned when a quantity that must be strictly positive is not.
    #[error("{field} must be positive (received {value})")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a quantity is NaN or infinite.
    #[error("{field} must be finite (received {value})")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the upper bound for the mode number is negative.
    #[error("mode_max must not be negative (received {0})")]
    NegativeModeMax(f64),
}

/// Error returned when a parameter update is rejected by the
/// [`ParameterStore`](crate::ParameterStore).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when the time step is zero, negative or not finite.
    #[error("time step must be positive and finite (received {0})")]
    InvalidTimeStep(f64),
    /// Returned when a simulated time is not finite.
    #[error("time must be finite (received {0})")]
    NonFiniteTime(f64),
}

/// Error returned when a pick event cannot be applied.
///
/// # Examples
///
/// ```
/// use petgraph::graph::NodeIndex;
/// use beamx::{BeamConfig, HeadlessRenderer, PickError, Session};
///
/// let mut session = Session::new(&BeamConfig::default()).expect("default config is valid");
/// let mut renderer = HeadlessRenderer::default();
/// let stray = NodeIndex::new(999);
/// let error = session
///     .pick(Some(stray), &mut renderer)
///     .expect_err("unknown node is rejected");
/// assert_eq!(error, PickError::UnknownNode(stray));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum PickError {
    /// Returned when the picked node does not belong to the beam.
    #[error("node {0:?} does not exist on this beam")]
    UnknownNode(NodeIndex),
}
