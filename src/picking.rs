//! Two-click state machine pinning the camera to beam nodes.

use log::info;
use petgraph::graph::NodeIndex;

use crate::beam::Beam;
use crate::camera::CameraPose;
use crate::errors::PickError;
use crate::geometry::{point, Offset, Point};
use crate::render::Renderer;

/// Externally visible phase of the attach flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachState {
    /// Attach mode is off; picks only report node coordinates.
    Idle,
    /// Waiting for the node the camera will sit on.
    SelectingPosition,
    /// Waiting for the node the camera will look at.
    SelectingFocal,
    /// The camera follows both nodes.
    Attached,
}

/// Message a front end should show next to the attach control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Ask the user to click the camera position node.
    SelectPosition,
    /// Ask the user to click the focal node.
    SelectFocal,
}

/// Outcome of a toggle or pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickResponse {
    /// Nothing was hit; no state changed.
    Ignored,
    /// Coordinates of the picked node for an informational readout.
    NodeInfo {
        /// Picked node.
        node: NodeIndex,
        /// Its current centre.
        center: Point,
    },
    /// A prompt to display.
    Prompt(Prompt),
    /// The camera is now pinned to the two nodes.
    Attached,
    /// Attach mode was switched off.
    Released {
        /// Whether the camera was reset to the default pose.
        camera_reset: bool,
    },
}

/// Phase with the node handles it has collected so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Attach mode off.
    Idle,
    /// Nothing collected yet.
    SelectingPosition,
    /// Position node collected.
    SelectingFocal {
        /// Node the camera sits on.
        position: NodeIndex,
    },
    /// Both nodes collected.
    Attached {
        /// Node the camera sits on.
        position: NodeIndex,
        /// Node the camera looks at.
        focal: NodeIndex,
    },
}

/// Converts two node picks into a camera pose that follows the beam.
///
/// Node handles are borrowed identifiers; the beam keeps ownership of its
/// nodes. The delta offset is read fresh on every recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraPickState {
    /// Current phase.
    phase: Phase,
}

impl Default for CameraPickState {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl CameraPickState {
    /// Start idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the attach flow.
    #[must_use]
    pub fn state(&self) -> AttachState {
        match self.phase {
            Phase::Idle => AttachState::Idle,
            Phase::SelectingPosition => AttachState::SelectingPosition,
            Phase::SelectingFocal { .. } => AttachState::SelectingFocal,
            Phase::Attached { .. } => AttachState::Attached,
        }
    }

    /// Node the camera sits on, once chosen.
    #[must_use]
    pub fn position_node(&self) -> Option<NodeIndex> {
        match self.phase {
            Phase::SelectingFocal { position } | Phase::Attached { position, .. } => {
                Some(position)
            }
            Phase::Idle | Phase::SelectingPosition => None,
        }
    }

    /// Node the camera looks at, once chosen.
    #[must_use]
    pub fn focal_node(&self) -> Option<NodeIndex> {
        match self.phase {
            Phase::Attached { focal, .. } => Some(focal),
            _ => None,
        }
    }

    /// Switch attach mode on or off.
    ///
    /// Turning it on always restarts at [`AttachState::SelectingPosition`].
    /// Turning it off from [`AttachState::Attached`] resets the camera to the
    /// default pose for `node_count` nodes.
    pub fn toggle_attach_mode(
        &mut self,
        renderer: &mut dyn Renderer,
        node_count: usize,
    ) -> PickResponse {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::SelectingPosition;
                info!("attach mode on; waiting for position node");
                PickResponse::Prompt(Prompt::SelectPosition)
            }
            Phase::Attached { .. } => {
                self.phase = Phase::Idle;
                *renderer.camera_mut() = CameraPose::default_for(node_count);
                renderer.request_redraw();
                info!("camera released and reset");
                PickResponse::Released { camera_reset: true }
            }
            Phase::SelectingPosition | Phase::SelectingFocal { .. } => {
                self.phase = Phase::Idle;
                info!("attach mode cancelled before completion");
                PickResponse::Released {
                    camera_reset: false,
                }
            }
        }
    }

    /// Feed one pick event into the state machine.
    ///
    /// A pick that hit nothing changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::UnknownNode`] when `node` is not part of `beam`; the
    /// state is left unchanged.
    pub fn pick(
        &mut self,
        node: Option<NodeIndex>,
        beam: &Beam,
        delta: Offset,
        renderer: &mut dyn Renderer,
    ) -> Result<PickResponse, PickError> {
        let Some(node) = node else {
            return Ok(PickResponse::Ignored);
        };
        let center = beam.node_center(node).ok_or(PickError::UnknownNode(node))?;

        match self.phase {
            Phase::SelectingPosition => {
                self.phase = Phase::SelectingFocal { position: node };
                info!("camera position node {}", node.index());
                Ok(PickResponse::Prompt(Prompt::SelectFocal))
            }
            Phase::SelectingFocal { position } => {
                self.phase = Phase::Attached {
                    position,
                    focal: node,
                };
                info!(
                    "camera attached: position node {}, focal node {}",
                    position.index(),
                    node.index()
                );
                self.sync(beam, delta, renderer.camera_mut());
                renderer.request_redraw();
                Ok(PickResponse::Attached)
            }
            Phase::Idle | Phase::Attached { .. } => Ok(PickResponse::NodeInfo { node, center }),
        }
    }

    /// Move the camera with the attached nodes.
    ///
    /// Returns `false` and leaves `camera` untouched unless attached.
    pub fn sync(&self, beam: &Beam, delta: Offset, camera: &mut CameraPose) -> bool {
        let Phase::Attached { position, focal } = self.phase else {
            return false;
        };
        let (Some(eye), Some(target)) = (beam.node_center(position), beam.node_center(focal))
        else {
            return false;
        };
        camera.position = eye + delta;
        camera.focal_point = target;
        true
    }
}

/// Maps a 2-D input coordinate onto a beam node.
pub trait Picker {
    /// Node under `(x, y)`, if any.
    fn pick(&self, beam: &Beam, x: f64, y: f64) -> Option<NodeIndex>;
}

/// Picks the nearest node whose centre lies within a radius of a world-space point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityPicker {
    /// Maximum distance from a node centre.
    pub radius: f64,
}

impl Picker for ProximityPicker {
    fn pick(&self, beam: &Beam, x: f64, y: f64) -> Option<NodeIndex> {
        beam.nearest_node(point(x, y, 0.0), self.radius)
    }
}
