use std::thread;

use beamx::{
    AttachState, Axis, BeamConfig, CameraPose, ConfigError, ControlEvent, NodeIndex, Offset,
    PickError, Renderer, Session,
};
use log::info;
use thiserror::Error;

/// How the headless run should be driven.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOptions {
    /// Number of clock ticks to run.
    pub ticks: u64,
    /// Position and focal node ordinals to attach the camera to.
    pub attach: Option<(usize, usize)>,
    /// Camera offset from the position node.
    pub delta: Offset,
    /// Sleep one tick interval between ticks.
    pub realtime: bool,
}

/// Errors that stop a headless run.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An attach node was not part of the beam.
    #[error(transparent)]
    Pick(#[from] PickError),
}

/// State of the session after the final tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    /// Ticks that advanced the animation.
    pub ticks: u64,
    /// Simulated time reached.
    pub time: f64,
    /// Mode number in effect.
    pub mode: f64,
    /// Angular frequency in effect.
    pub omega: f64,
    /// Number of beam nodes.
    pub nodes: usize,
    /// Quads in the final mesh.
    pub faces: usize,
    /// Points in the final mesh.
    pub points: usize,
    /// Whether the final mesh is a wireframe.
    pub wireframe: bool,
    /// Smallest node deflection in the final frame.
    pub min_deflection: f64,
    /// Largest node deflection in the final frame.
    pub max_deflection: f64,
    /// Attach flow state at the end of the run.
    pub attach: AttachState,
    /// Final camera pose.
    pub camera: CameraPose,
}

/// Build a session, optionally attach the camera and run the clock.
pub fn run_scenario(
    config: &BeamConfig,
    options: &ScenarioOptions,
) -> Result<ScenarioSummary, ScenarioError> {
    let mut session = Session::new(config)?;
    let mut renderer = session.headless_renderer();

    // Present the undeflected beam first so even a zero-tick run has a mesh.
    session.refresh(&mut renderer);

    // The offset arrives the way the spin boxes send it: one indexed component at a time.
    let components = [options.delta.x, options.delta.y, options.delta.z];
    for (index, value) in components.into_iter().enumerate() {
        let event = ControlEvent::SetDeltaOffset(Axis::from_index(index), value);
        session.dispatch(event, &mut renderer)?;
    }

    // Attaching follows the same two-click flow a user would go through.
    if let Some((position, focal)) = options.attach {
        session.dispatch(ControlEvent::ToggleAttachMode, &mut renderer)?;
        for node in [position, focal] {
            session.dispatch(ControlEvent::Pick(Some(NodeIndex::new(node))), &mut renderer)?;
        }
    }

    let interval = session.clock().interval();
    for _ in 0..options.ticks {
        session.tick(&mut renderer);
        if options.realtime {
            thread::sleep(interval);
        }
    }
    info!(
        "ran {} ticks, t = {:.4}",
        session.clock().ticks(),
        session.params().current_time()
    );

    let deflections = session.beam().deflections();
    let frame = renderer.frame();
    Ok(ScenarioSummary {
        ticks: session.clock().ticks(),
        time: session.params().current_time(),
        mode: session.params().mode(),
        omega: session.params().omega(),
        nodes: session.node_count(),
        faces: frame.faces.len(),
        points: frame.points.len(),
        wireframe: frame.is_wireframe(),
        min_deflection: deflections.iter().copied().fold(f64::INFINITY, f64::min),
        max_deflection: deflections.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        attach: session.attach_state().state(),
        camera: *renderer.camera(),
    })
}
