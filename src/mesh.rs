//! Extrusion of the deflected centreline into a closed quad-faced solid.
//!
//! Each segment between two neighbouring nodes becomes a box with six quads.
//! The buffer is regenerated from scratch on every rebuild; point indices are
//! `face * 4 + corner`, so they are dense and never reused within one rebuild.

use log::debug;

use crate::beam::Beam;
use crate::geometry::{point, Color, Point};

/// Number of quads generated for every segment.
pub const FACES_PER_SEGMENT: usize = 6;

/// Number of corners of every face.
pub const CORNERS_PER_FACE: usize = 4;

/// The six sides of a segment's box, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Side facing `+Z`.
    Front,
    /// Side facing `-Z`.
    Back,
    /// Side facing `+Y`.
    Top,
    /// Side facing `-Y`.
    Bottom,
    /// Cap at the segment's first node.
    StartCap,
    /// Cap at the segment's second node.
    EndCap,
}

impl FaceKind {
    /// All face kinds in emission order.
    pub const ALL: [FaceKind; FACES_PER_SEGMENT] = [
        FaceKind::Front,
        FaceKind::Back,
        FaceKind::Top,
        FaceKind::Bottom,
        FaceKind::StartCap,
        FaceKind::EndCap,
    ];
}

/// One quad of the solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    /// Which side of the box this quad is.
    pub kind: FaceKind,
    /// Segment ordinal the quad belongs to.
    pub segment: usize,
    /// Point indices of the four corners.
    pub corners: [usize; CORNERS_PER_FACE],
}

/// Cell connectivity handed to the renderer.
///
/// Only one representation exists per rebuild.
#[derive(Clone, Debug, PartialEq)]
pub enum Connectivity {
    /// Filled quads, one four-point polygon per face.
    Polygons(Vec<[usize; 4]>),
    /// Wireframe, one closed five-point line loop per face.
    Lines(Vec<[usize; 5]>),
}

impl Connectivity {
    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Connectivity::Polygons(cells) => cells.len(),
            Connectivity::Lines(cells) => cells.len(),
        }
    }

    /// Whether there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is the wireframe representation.
    #[must_use]
    pub fn is_wireframe(&self) -> bool {
        matches!(self, Connectivity::Lines(_))
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Connectivity::Polygons(Vec::new())
    }
}

/// Points, faces and connectivity for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Corner positions; four per face.
    pub points: Vec<Point>,
    /// Faces in emission order.
    pub faces: Vec<Face>,
    /// Renderer connectivity for the faces.
    pub connectivity: Connectivity,
}

impl MeshBuffer {
    /// Whether the buffer holds the wireframe representation.
    #[must_use]
    pub fn is_wireframe(&self) -> bool {
        self.connectivity.is_wireframe()
    }

    /// Point index of `corner` on face `face`.
    #[must_use]
    pub const fn point_index(face: usize, corner: usize) -> usize {
        face * CORNERS_PER_FACE + corner
    }
}

/// Generator for the extruded beam solid.
#[derive(Clone, Debug)]
pub struct BeamMesh {
    /// Half thickness along Y.
    height: f64,
    /// Half depth along Z.
    box_depth: f64,
    /// Colour of the solid.
    color: Color,
    /// Most recent output.
    buffer: MeshBuffer,
}

impl BeamMesh {
    /// Create an empty mesh with the given half extents.
    #[must_use]
    pub fn new(height: f64, box_depth: f64, color: Color) -> Self {
        Self {
            height,
            box_depth,
            color,
            buffer: MeshBuffer::default(),
        }
    }

    /// Most recent output.
    #[must_use]
    pub fn buffer(&self) -> &MeshBuffer {
        &self.buffer
    }

    /// Colour of the solid.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Recolour the solid.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Discard the previous buffer and regenerate it from the beam's segments.
    ///
    /// `transparent` selects line loops instead of filled polygons.
    pub fn rebuild(&mut self, beam: &Beam, transparent: bool) -> &MeshBuffer {
        let segments: Vec<(Point, Point)> = beam
            .segment_indices()
            .filter_map(|segment| beam.segment_points(segment))
            .collect();
        self.rebuild_segments(&segments, transparent)
    }

    /// Regenerate the buffer from explicit centreline segments.
    pub fn rebuild_segments(
        &mut self,
        segments: &[(Point, Point)],
        transparent: bool,
    ) -> &MeshBuffer {
        let face_count = segments.len() * FACES_PER_SEGMENT;
        let mut points = Vec::with_capacity(face_count * CORNERS_PER_FACE);
        let mut faces = Vec::with_capacity(face_count);

        for (segment, &(start, end)) in segments.iter().enumerate() {
            for kind in FaceKind::ALL {
                let ordinal = faces.len();
                let corners: [usize; 4] =
                    std::array::from_fn(|corner| MeshBuffer::point_index(ordinal, corner));
                points.extend(self.quad(kind, start, end));
                faces.push(Face {
                    kind,
                    segment,
                    corners,
                });
            }
        }

        let connectivity = if transparent {
            Connectivity::Lines(
                faces
                    .iter()
                    .map(|face| {
                        let [a, b, c, d] = face.corners;
                        [a, b, c, d, a]
                    })
                    .collect(),
            )
        } else {
            Connectivity::Polygons(faces.iter().map(|face| face.corners).collect())
        };

        debug!(
            "rebuilt beam mesh: {} faces, {} points, wireframe = {}",
            faces.len(),
            points.len(),
            transparent
        );

        self.buffer = MeshBuffer {
            points,
            faces,
            connectivity,
        };
        &self.buffer
    }

    /// Corners of one side of the box around the segment `start -> end`.
    fn quad(&self, kind: FaceKind, start: Point, end: Point) -> [Point; 4] {
        let h = self.height;
        let d = self.box_depth;
        match kind {
            FaceKind::Front | FaceKind::Back => {
                let z = if kind == FaceKind::Front { d } else { -d };
                [
                    point(start.x, start.y - h, z),
                    point(end.x, end.y - h, z),
                    point(end.x, end.y + h, z),
                    point(start.x, start.y + h, z),
                ]
            }
            FaceKind::Top | FaceKind::Bottom => {
                let dy = if kind == FaceKind::Top { h } else { -h };
                [
                    point(start.x, start.y + dy, d),
                    point(end.x, end.y + dy, d),
                    point(end.x, end.y + dy, -d),
                    point(start.x, start.y + dy, -d),
                ]
            }
            FaceKind::StartCap | FaceKind::EndCap => {
                let at = if kind == FaceKind::StartCap { start } else { end };
                [
                    point(at.x, at.y - h, d),
                    point(at.x, at.y + h, d),
                    point(at.x, at.y + h, -d),
                    point(at.x, at.y - h, -d),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BeamConfig;

    fn beam(count: usize) -> Beam {
        Beam::new(&BeamConfig {
            node_count: count,
            ..BeamConfig::default()
        })
        .expect("valid beam")
    }

    fn mesh() -> BeamMesh {
        BeamMesh::new(1.0, 2.0, Color::GREEN)
    }

    #[test]
    fn six_quads_per_segment_with_dense_indices() {
        for count in [2, 3, 11, 21] {
            let beam = beam(count);
            let mut mesh = mesh();
            let buffer = mesh.rebuild(&beam, false);
            let expected_faces = FACES_PER_SEGMENT * (count - 1);
            assert_eq!(buffer.faces.len(), expected_faces);
            assert_eq!(buffer.points.len(), expected_faces * CORNERS_PER_FACE);

            let mut indices: Vec<usize> = buffer
                .faces
                .iter()
                .flat_map(|face| face.corners)
                .collect();
            indices.sort_unstable();
            let dense: Vec<usize> = (0..expected_faces * CORNERS_PER_FACE).collect();
            assert_eq!(indices, dense);
        }
    }

    #[test]
    fn point_index_is_face_times_four_plus_corner() {
        let beam = beam(4);
        let mut mesh = mesh();
        let buffer = mesh.rebuild(&beam, false);
        for (ordinal, face) in buffer.faces.iter().enumerate() {
            for corner in 0..CORNERS_PER_FACE {
                assert_eq!(face.corners[corner], ordinal * 4 + corner);
            }
        }
    }

    #[test]
    fn transparency_selects_exactly_one_representation() {
        let beam = beam(5);
        let mut mesh = mesh();

        match &mesh.rebuild(&beam, false).connectivity {
            Connectivity::Polygons(cells) => assert_eq!(cells.len(), 24),
            Connectivity::Lines(_) => panic!("filled mode emitted lines"),
        }

        match &mesh.rebuild(&beam, true).connectivity {
            Connectivity::Lines(cells) => {
                assert_eq!(cells.len(), 24);
                assert!(cells.iter().all(|cell| cell[0] == cell[4]));
            }
            Connectivity::Polygons(_) => panic!("wireframe mode emitted polygons"),
        }
        assert!(mesh.buffer().is_wireframe());
    }

    #[test]
    fn rebuild_replaces_previous_buffer() {
        let mut beam = beam(3);
        let mut mesh = mesh();
        mesh.rebuild(&beam, false);
        beam.apply_deflection(&[0.0, 1.0, 2.0]);
        let buffer = mesh.rebuild(&beam, false);
        assert_eq!(buffer.faces.len(), 12);
        let front = &buffer.faces[0];
        assert_eq!(front.kind, FaceKind::Front);
        assert_eq!(buffer.points[front.corners[2]], point(1.0, 2.0, 2.0));
    }

    #[test]
    fn box_faces_surround_the_centreline() {
        let mut mesh = mesh();
        let start = point(0.0, 0.0, 0.0);
        let end = point(1.0, 0.5, 0.0);
        let buffer = mesh.rebuild_segments(&[(start, end)], false);

        let corners_of = |kind: FaceKind| -> Vec<Point> {
            let face = buffer
                .faces
                .iter()
                .find(|face| face.kind == kind)
                .expect("face emitted");
            face.corners.iter().map(|&i| buffer.points[i]).collect()
        };

        assert!(corners_of(FaceKind::Front).iter().all(|p| p.z == 2.0));
        assert!(corners_of(FaceKind::Back).iter().all(|p| p.z == -2.0));
        assert_eq!(corners_of(FaceKind::Top)[1], point(1.0, 1.5, 2.0));
        assert_eq!(corners_of(FaceKind::Bottom)[0], point(0.0, -1.0, 2.0));
        assert!(corners_of(FaceKind::StartCap).iter().all(|p| p.x == 0.0));
        assert!(corners_of(FaceKind::EndCap).iter().all(|p| p.x == 1.0));
    }
}
