//! A complete animation session: parameters, beam, mesh, clock and camera picking.

use std::time::Duration;

use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::beam::Beam;
use crate::camera::{CameraPose, Perspective};
use crate::clock::AnimationClock;
use crate::config::BeamConfig;
use crate::deflection::{beam_deflection, ModeShape, ScriptedFunction};
use crate::errors::{ConfigError, PickError};
use crate::geometry::Axis;
use crate::mesh::BeamMesh;
use crate::params::ParameterStore;
use crate::picking::{CameraPickState, PickResponse, Picker, ProximityPicker};
use crate::render::{HeadlessRenderer, Renderer};

/// Discrete events delivered by the controls of a front end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    /// Set the mode number; clamped into `[0, mode_max]`.
    SetMode(f64),
    /// Set the angular frequency; clamped to be non-negative.
    SetOmega(f64),
    /// Replace one component of the camera delta offset.
    SetDeltaOffset(Axis, f64),
    /// Play or pause the animation.
    TogglePlay,
    /// Enter or leave the two-click attach flow.
    ToggleAttachMode,
    /// Put the camera back at the default pose.
    ResetCameraPosition,
    /// Switch between the filled solid and its wireframe.
    ToggleTransparency,
    /// Jump to a perspective preset.
    Perspective(Perspective),
    /// Roll the camera by a number of degrees.
    Roll(f64),
    /// Raise or lower the camera by a number of degrees.
    Elevation(f64),
    /// A pick that resolved to a node, or to nothing.
    Pick(Option<NodeIndex>),
}

/// Owns every component of one animation and routes events between them.
///
/// All events arrive sequentially on one thread. Parameter changes are only
/// written to the [`ParameterStore`]; the next tick reads them from there.
///
/// # Examples
/// ```
/// use beamx::{BeamConfig, Session};
///
/// let mut session = Session::new(&BeamConfig::default()).expect("default config is valid");
/// let mut renderer = session.headless_renderer();
/// assert!(session.tick(&mut renderer));
/// assert_eq!(renderer.frame().faces.len(), 6 * 20);
/// ```
#[derive(Debug)]
pub struct Session {
    /// Shared animation parameters.
    pub(crate) params: ParameterStore,
    /// Nodes of the beam centreline.
    pub(crate) beam: Beam,
    /// Generator for the extruded solid.
    pub(crate) mesh: BeamMesh,
    /// Tick source.
    clock: AnimationClock,
    /// Camera attach state machine.
    attach: CameraPickState,
    /// Resolves input coordinates to nodes.
    picker: ProximityPicker,
    /// Displacement field registered from the console, if any.
    pub(crate) function: Option<ScriptedFunction>,
}

impl Session {
    /// Validate `config` and build every component from it.
    ///
    /// # Errors
    ///
    /// Returns any [`ConfigError`] reported by [`BeamConfig::validate`].
    pub fn new(config: &BeamConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let beam = Beam::new(config)?;
        info!(
            "session with {} nodes, mode {}, omega {}",
            beam.node_count(),
            config.mode,
            config.omega
        );
        Ok(Self {
            params: ParameterStore::new(config),
            beam,
            mesh: BeamMesh::new(config.height, config.box_depth, config.beam_color),
            clock: AnimationClock::new(Duration::from_millis(config.tick_interval_ms)),
            attach: CameraPickState::new(),
            picker: ProximityPicker {
                radius: config.pick_radius,
            },
            function: None,
        })
    }

    /// Shared animation parameters.
    #[must_use]
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// The beam centreline.
    #[must_use]
    pub fn beam(&self) -> &Beam {
        &self.beam
    }

    /// The mesh generator and its latest buffer.
    #[must_use]
    pub fn mesh(&self) -> &BeamMesh {
        &self.mesh
    }

    /// The animation clock.
    #[must_use]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// The camera attach state machine.
    #[must_use]
    pub fn attach_state(&self) -> &CameraPickState {
        &self.attach
    }

    /// Number of beam nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.beam.node_count()
    }

    /// Default camera pose for this beam.
    #[must_use]
    pub fn default_camera(&self) -> CameraPose {
        CameraPose::default_for(self.node_count())
    }

    /// A headless renderer whose camera starts at [`Session::default_camera`].
    #[must_use]
    pub fn headless_renderer(&self) -> HeadlessRenderer {
        HeadlessRenderer::new(self.default_camera())
    }

    /// Deflection of every node at simulated time `time`.
    ///
    /// Uses the scripted function when one is registered and the mode shape
    /// built from the current parameters otherwise.
    #[must_use]
    pub fn deflection_at(&self, time: f64) -> Vec<f64> {
        let stations = self.beam.stations();
        match &self.function {
            Some(function) => beam_deflection(function, &stations, time),
            None => beam_deflection(&ModeShape::from(&self.params), &stations, time),
        }
    }

    /// Handle one clock tick.
    ///
    /// Returns `false` without touching anything while paused.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> bool {
        if self.clock.advance(&mut self.params).is_none() {
            return false;
        }
        self.refresh(renderer);
        true
    }

    /// Recompute the deflection at the current time and redraw.
    ///
    /// Rebuilds the mesh, moves an attached camera with its nodes, hands the
    /// buffer to `renderer` and requests a redraw.
    pub fn refresh(&mut self, renderer: &mut dyn Renderer) {
        let values = self.deflection_at(self.params.current_time());
        self.beam.apply_deflection(&values);
        let buffer = self.mesh.rebuild(&self.beam, self.params.is_transparent());
        self.attach
            .sync(&self.beam, self.params.delta_offset(), renderer.camera_mut());
        renderer.present(buffer);
        renderer.request_redraw();
    }

    /// Feed a resolved pick into the attach flow and highlight the node.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::UnknownNode`] when `node` is not part of the beam.
    pub fn pick(
        &mut self,
        node: Option<NodeIndex>,
        renderer: &mut dyn Renderer,
    ) -> Result<PickResponse, PickError> {
        let delta = self.params.delta_offset();
        let response = self.attach.pick(node, &self.beam, delta, renderer)?;
        if let Some(node) = node {
            self.beam.highlight(node)?;
            renderer.request_redraw();
        }
        Ok(response)
    }

    /// Resolve a world-space XY coordinate with the proximity picker, then pick.
    ///
    /// # Errors
    ///
    /// Same as [`Session::pick`].
    pub fn pick_at(
        &mut self,
        x: f64,
        y: f64,
        renderer: &mut dyn Renderer,
    ) -> Result<PickResponse, PickError> {
        let node = self.picker.pick(&self.beam, x, y);
        debug!("pick at ({x:.3}, {y:.3}) resolved to {node:?}");
        self.pick(node, renderer)
    }

    /// Set the mode number used from the next tick on.
    pub fn set_mode(&mut self, mode: f64) {
        self.params.set_mode(mode);
    }

    /// Set the angular frequency used from the next tick on.
    pub fn set_omega(&mut self, omega: f64) {
        self.params.set_omega(omega);
    }

    /// Change one component of the camera offset and re-place an attached camera.
    pub fn set_delta_offset(&mut self, axis: Axis, value: f64, renderer: &mut dyn Renderer) {
        self.params.set_delta_offset(axis, value);
        if self
            .attach
            .sync(&self.beam, self.params.delta_offset(), renderer.camera_mut())
        {
            renderer.request_redraw();
        }
    }

    /// Play or pause; returns whether the animation now plays.
    pub fn toggle_play(&mut self) -> bool {
        self.params.toggle_play()
    }

    /// Enter or leave the attach flow.
    pub fn toggle_attach_mode(&mut self, renderer: &mut dyn Renderer) -> PickResponse {
        let node_count = self.node_count();
        self.attach.toggle_attach_mode(renderer, node_count)
    }

    /// Put the camera back at the default pose.
    ///
    /// An attached camera snaps back to its nodes on the next refresh.
    pub fn reset_camera_position(&mut self, renderer: &mut dyn Renderer) {
        *renderer.camera_mut() = self.default_camera();
        renderer.request_redraw();
    }

    /// Switch between filled and wireframe output and rebuild immediately.
    pub fn toggle_transparency(&mut self, renderer: &mut dyn Renderer) -> bool {
        let transparent = self.params.toggle_transparency();
        info!(
            "beam drawn as {}",
            if transparent { "wireframe" } else { "solid" }
        );
        self.refresh(renderer);
        transparent
    }

    /// Move the camera to a perspective preset.
    pub fn set_perspective(&mut self, perspective: Perspective, renderer: &mut dyn Renderer) {
        *renderer.camera_mut() = CameraPose::preset(perspective, self.node_count());
        renderer.request_redraw();
    }

    /// Roll the camera about its direction of projection.
    pub fn roll(&mut self, degrees: f64, renderer: &mut dyn Renderer) {
        renderer.camera_mut().roll(degrees);
        renderer.request_redraw();
    }

    /// Swing the camera up or down around its focal point.
    pub fn elevation(&mut self, degrees: f64, renderer: &mut dyn Renderer) {
        renderer.camera_mut().elevation(degrees);
        renderer.request_redraw();
    }

    /// Route one control event.
    ///
    /// Attach toggles and picks return their [`PickResponse`]; every other
    /// event returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::UnknownNode`] for a pick on a node outside the beam.
    pub fn dispatch(
        &mut self,
        event: ControlEvent,
        renderer: &mut dyn Renderer,
    ) -> Result<Option<PickResponse>, PickError> {
        debug!("dispatching {event:?}");
        match event {
            ControlEvent::SetMode(mode) => self.set_mode(mode),
            ControlEvent::SetOmega(omega) => self.set_omega(omega),
            ControlEvent::SetDeltaOffset(axis, value) => {
                self.set_delta_offset(axis, value, renderer);
            }
            ControlEvent::TogglePlay => {
                self.toggle_play();
            }
            ControlEvent::ToggleAttachMode => {
                return Ok(Some(self.toggle_attach_mode(renderer)));
            }
            ControlEvent::ResetCameraPosition => self.reset_camera_position(renderer),
            ControlEvent::ToggleTransparency => {
                self.toggle_transparency(renderer);
            }
            ControlEvent::Perspective(perspective) => self.set_perspective(perspective, renderer),
            ControlEvent::Roll(degrees) => self.roll(degrees, renderer),
            ControlEvent::Elevation(degrees) => self.elevation(degrees, renderer),
            ControlEvent::Pick(node) => return self.pick(node, renderer).map(Some),
        }
        Ok(None)
    }
}
