//! Camera pose, default placement and perspective presets.

use nalgebra::{Rotation3, Unit, Vector3};

use crate::geometry::{point, Point};

/// Position, focal point and view-up direction of the scene camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Point,
    /// Point the camera looks at.
    pub focal_point: Point,
    /// Direction considered "up" in the image.
    pub view_up: Point,
}

impl CameraPose {
    /// Create a pose with `+Y` as view-up.
    #[must_use]
    pub const fn new(position: Point, focal_point: Point) -> Self {
        Self {
            position,
            focal_point,
            view_up: point(0.0, 1.0, 0.0),
        }
    }

    /// Default pose for a beam of `node_count` nodes: above and in front of its middle.
    #[must_use]
    pub fn default_for(node_count: usize) -> Self {
        let middle = node_count as f64 / 2.0;
        Self::new(point(middle, 30.0, 30.0), point(middle, 0.0, 0.0))
    }

    /// Pose for one of the fixed perspective presets.
    #[must_use]
    pub fn preset(perspective: Perspective, node_count: usize) -> Self {
        let n = node_count as f64;
        let focal = point(n / 2.0, 0.0, 0.0);
        match perspective {
            Perspective::Xy => Self::new(point(n / 2.0, 0.0, 30.0), focal),
            Perspective::Yz => Self::new(point(n + 10.0, 0.0, 0.0), focal),
            Perspective::Xz => Self {
                view_up: point(0.0, 0.0, -1.0),
                ..Self::new(point(n / 2.0, n * 2.0, 0.0), focal)
            },
            Perspective::Iso => Self::new(point(-20.0, 10.0, 20.0), focal),
        }
    }

    /// Unit direction from the eye to the focal point, if they differ.
    #[must_use]
    pub fn direction(&self) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(
            self.focal_point.to_vector() - self.position.to_vector(),
            f64::EPSILON,
        )
    }

    /// Rotate the view-up about the direction of projection.
    pub fn roll(&mut self, degrees: f64) {
        let Some(axis) = self.direction() else {
            return;
        };
        let rotation = Rotation3::from_axis_angle(&axis, degrees.to_radians());
        self.view_up = Point::from(rotation * self.view_up.to_vector());
    }

    /// Swing the eye up or down around the focal point.
    ///
    /// Positive angles raise the eye towards the view-up direction.
    pub fn elevation(&mut self, degrees: f64) {
        let Some(direction) = self.direction() else {
            return;
        };
        let Some(right) = Unit::try_new(
            direction.cross(&self.view_up.to_vector()),
            f64::EPSILON,
        ) else {
            return;
        };
        let rotation = Rotation3::from_axis_angle(&right, -degrees.to_radians());
        let focal = self.focal_point.to_vector();
        let eye = rotation * (self.position.to_vector() - focal);
        self.position = Point::from(focal + eye);
        self.view_up = Point::from(rotation * self.view_up.to_vector());
    }
}

/// Fixed viewing directions offered by the perspective menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    /// Looking down `-Z` onto the XY plane.
    Xy,
    /// Looking down `-X` onto the YZ plane.
    Yz,
    /// Looking down `-Y` onto the XZ plane.
    Xz,
    /// Isometric view from the fixed end.
    Iso,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1.0e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1.0e-9);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1.0e-9);
    }

    #[test]
    fn default_pose_is_centred_on_the_beam() {
        let pose = CameraPose::default_for(21);
        assert_eq!(pose.position, point(10.5, 30.0, 30.0));
        assert_eq!(pose.focal_point, point(10.5, 0.0, 0.0));
        assert_eq!(pose.view_up, point(0.0, 1.0, 0.0));
    }

    #[test]
    fn presets_share_the_focal_point() {
        for perspective in [
            Perspective::Xy,
            Perspective::Yz,
            Perspective::Xz,
            Perspective::Iso,
        ] {
            let pose = CameraPose::preset(perspective, 20);
            assert_eq!(pose.focal_point, point(10.0, 0.0, 0.0));
            let direction = pose.direction().expect("eye differs from focal point");
            let up = pose.view_up.to_vector();
            assert!(direction.cross(&up).norm() > 0.5, "{perspective:?} up is degenerate");
        }
        assert_eq!(
            CameraPose::preset(Perspective::Yz, 20).position,
            point(30.0, 0.0, 0.0)
        );
    }

    #[test]
    fn elevation_swings_eye_over_the_focal_point() {
        let mut pose = CameraPose::new(point(0.0, 0.0, 10.0), point(0.0, 0.0, 0.0));
        pose.elevation(90.0);
        assert_point_eq(pose.position, point(0.0, 10.0, 0.0));
        assert_point_eq(pose.view_up, point(0.0, 0.0, -1.0));
    }

    #[test]
    fn roll_is_reversible() {
        let mut pose = CameraPose::default_for(10);
        let original = pose.view_up;
        pose.roll(2.0);
        assert!((pose.view_up.x - original.x).abs() > 1.0e-6);
        pose.roll(-2.0);
        assert_point_eq(pose.view_up, original);
        assert_eq!(pose.position, CameraPose::default_for(10).position);
    }

    #[test]
    fn degenerate_pose_ignores_nudges() {
        let eye = point(1.0, 1.0, 1.0);
        let mut pose = CameraPose::new(eye, eye);
        pose.roll(10.0);
        pose.elevation(10.0);
        assert_eq!(pose, CameraPose::new(eye, eye));
    }
}
