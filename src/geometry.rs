//! Planar geometry for bridge joints and members.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position of a joint on the design grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    /// Grid column, positive to the right.
    pub x: i32,
    /// Grid row, positive upwards; the deck lies on `y = 0`.
    pub y: i32,
}

impl GridPoint {
    /// Create a [`GridPoint`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert the grid position into metres.
    #[must_use]
    pub fn to_world(self, grid_size: f64) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y)) * grid_size
    }
}

/// A bridge joint. Numbers are one-based and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joint {
    /// One-based joint number.
    pub number: usize,
    /// Grid position.
    pub position: GridPoint,
}

impl Joint {
    /// Create a joint.
    #[must_use]
    pub const fn new(number: usize, x: i32, y: i32) -> Self {
        Self {
            number,
            position: GridPoint::new(x, y),
        }
    }
}

/// Length and direction cosines of a member, fixed when the member is created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberGeometry {
    /// Length in metres, always positive.
    pub length: f64,
    /// Cosine of the angle between the member axis and global X.
    pub cos_x: f64,
    /// Cosine of the angle between the member axis and global Y.
    pub cos_y: f64,
}

impl MemberGeometry {
    /// Geometry of the member running from `start` to `end`, or `None` when
    /// the two points coincide.
    ///
    /// # Examples
    /// ```
    /// use bridgex::{GridPoint, MemberGeometry};
    ///
    /// let geometry = MemberGeometry::between(GridPoint::new(0, 0), GridPoint::new(12, 16), 0.25)
    ///     .expect("distinct points");
    /// assert_eq!(geometry.length, 5.0);
    /// assert_eq!(geometry.cos_x, 0.6);
    /// ```
    #[must_use]
    pub fn between(start: GridPoint, end: GridPoint, grid_size: f64) -> Option<Self> {
        let delta = end.to_world(grid_size) - start.to_world(grid_size);
        let length = delta.norm();
        if length == 0.0 {
            return None;
        }
        let direction = delta / length;
        Some(Self {
            length,
            cos_x: direction.x,
            cos_y: direction.y,
        })
    }
}

/// Translation of a joint in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Displacement component along the global X axis.
    pub x: f64,
    /// Displacement component along the global Y axis.
    pub y: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn grid_points_scale_to_metres() {
        let world = GridPoint::new(16, -8).to_world(0.25);
        assert_eq!(world, Vector2::new(4.0, -2.0));
    }

    #[test]
    fn diagonal_member_has_unit_direction() {
        let geometry = MemberGeometry::between(GridPoint::new(16, 0), GridPoint::new(0, 16), 0.25)
            .expect("distinct points");
        assert_relative_eq!(geometry.length, 32.0_f64.sqrt());
        assert_relative_eq!(geometry.cos_x, -std::f64::consts::FRAC_1_SQRT_2, epsilon = 1.0e-12);
        assert_relative_eq!(geometry.cos_y, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1.0e-12);
        assert_relative_eq!(geometry.cos_x.powi(2) + geometry.cos_y.powi(2), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn coincident_points_have_no_geometry() {
        let point = GridPoint::new(3, 4);
        assert_eq!(MemberGeometry::between(point, point, 0.25), None);
    }
}
