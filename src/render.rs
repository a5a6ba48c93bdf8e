//! Seam between the animation core and whatever draws it.

use crate::camera::CameraPose;
use crate::mesh::MeshBuffer;

/// Receives mesh buffers and owns the camera pose.
///
/// A windowed front end implements this on top of its scene graph; the core
/// only pushes geometry, writes the camera and asks for redraws.
pub trait Renderer {
    /// Take the freshly rebuilt solid.
    fn present(&mut self, mesh: &MeshBuffer);

    /// Current camera pose.
    fn camera(&self) -> &CameraPose;

    /// Mutable access to the camera pose.
    fn camera_mut(&mut self) -> &mut CameraPose;

    /// Ask for the scene to be drawn again.
    fn request_redraw(&mut self);
}

/// A renderer that keeps the last frame in memory instead of drawing it.
#[derive(Clone, Debug)]
pub struct HeadlessRenderer {
    /// Camera pose written by the core.
    camera: CameraPose,
    /// Most recently presented mesh.
    frame: MeshBuffer,
    /// Number of meshes presented.
    presented: u64,
    /// Number of redraw requests.
    redraws: u64,
}

impl HeadlessRenderer {
    /// Create a renderer starting from `camera`.
    #[must_use]
    pub fn new(camera: CameraPose) -> Self {
        Self {
            camera,
            frame: MeshBuffer::default(),
            presented: 0,
            redraws: 0,
        }
    }

    /// Most recently presented mesh.
    #[must_use]
    pub fn frame(&self) -> &MeshBuffer {
        &self.frame
    }

    /// Number of meshes presented so far.
    #[must_use]
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Number of redraw requests so far.
    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(CameraPose::default_for(0))
    }
}

impl Renderer for HeadlessRenderer {
    fn present(&mut self, mesh: &MeshBuffer) {
        self.frame.clone_from(mesh);
        self.presented += 1;
    }

    fn camera(&self) -> &CameraPose {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut CameraPose {
        &mut self.camera
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
