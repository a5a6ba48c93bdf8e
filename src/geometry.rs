//! Fundamental geometric types shared by the beam, mesh and camera.

use std::ops::Add;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Position in three dimensional scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Coordinate along the beam axis.
    pub x: f64,
    /// Coordinate along the deflection axis.
    pub y: f64,
    /// Coordinate along the depth axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::from(self.to_vector() + rhs.to_vector())
    }
}

/// Translation added to a picked node centre to place the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Component along the X axis.
    pub x: f64,
    /// Component along the Y axis.
    pub y: f64,
    /// Component along the Z axis.
    pub z: f64,
}

impl Offset {
    /// Create an [`Offset`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the offset into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Return a copy with one component replaced.
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }
}

/// One of the three scene axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Beam axis.
    X,
    /// Deflection axis.
    Y,
    /// Depth axis.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Map a spin-box index (0, 1, 2) onto an axis.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not 0, 1 or 2. Controls only ever emit those three
    /// indices, so anything else is a wiring bug.
    #[must_use]
    pub fn from_index(index: usize) -> Axis {
        match index {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("axis index {index} is out of range"),
        }
    }
}

/// RGB colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Pure red, the default node colour.
    pub const RED: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    /// Pure green, the default beam colour.
    pub const GREEN: Color = Color {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    /// Pure blue, used to highlight picked nodes.
    pub const BLUE: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };

    /// Create a colour, clamping each channel into `[0, 1]`.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use beamx::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Offset`] instances.
///
/// # Examples
/// ```
/// use beamx::offset;
///
/// let delta = offset(0.0, 2.0, 5.0);
/// assert_eq!(delta.z, 5.0);
/// ```
#[must_use]
pub const fn offset(x: f64, y: f64, z: f64) -> Offset {
    Offset::new(x, y, z)
}
