#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod beam;
pub mod camera;
pub mod clock;
pub mod config;
pub mod console;
pub mod deflection;
pub mod errors;
pub mod geometry;
pub mod mesh;
pub mod params;
pub mod picking;
pub mod render;
pub mod session;

pub use beam::Beam;
pub use camera::{CameraPose, Perspective};
pub use clock::AnimationClock;
pub use config::{BeamConfig, DEFAULT_MODE_MAX};
pub use console::Console;
pub use deflection::{
    beam_deflection, displacement, DisplacementField, ModeShape, ScriptFn, ScriptedFunction,
};
pub use errors::{ConfigError, ParameterError, PickError};
pub use geometry::{offset, point, Axis, Color, Offset, Point};
pub use mesh::{BeamMesh, Connectivity, Face, FaceKind, MeshBuffer};
pub use params::ParameterStore;
pub use petgraph::graph::NodeIndex;
pub use picking::{AttachState, CameraPickState, PickResponse, Picker, Prompt, ProximityPicker};
pub use render::{HeadlessRenderer, Renderer};
pub use session::{ControlEvent, Session};
