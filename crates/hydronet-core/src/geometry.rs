//! Planar and spatial points.
//!
//! [`Point`] is the 2-D layout coordinate produced by the spring embedding;
//! [`Point3`] adds the scaled elevation axis used by the scene.

use serde::Serialize;

/// A point in the layout plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Lifts the point into space at height `z`.
    pub fn with_z(self, z: f64) -> Point3 {
        Point3::new(self.x, self.y, z)
    }
}

/// A point in scene space; `z` carries scaled elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn z(self) -> f64 {
        self.z
    }

    /// Returns the point with only its `z` coordinate multiplied.
    pub fn scale_z(self, factor: f64) -> Self {
        Self {
            z: self.z * factor,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);

        let diff = b.sub_point(a);
        assert_approx_eq!(f64, diff.hypot(), 5.0);
        assert_eq!(a.add_point(b), Point::new(5.0, 8.0));
        assert_eq!(a.scale(2.0), Point::new(2.0, 4.0));
    }

    #[test]
    fn test_point3_scale_z_keeps_plane() {
        let p = Point::new(0.5, -0.25).with_z(0.012);
        let scaled = p.scale_z(10.0);

        assert_approx_eq!(f64, scaled.x(), 0.5);
        assert_approx_eq!(f64, scaled.y(), -0.25);
        assert_approx_eq!(f64, scaled.z(), 0.12);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Adding then subtracting a point should return the original.
    fn check_add_sub_inverse(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result = p1.add_point(p2).sub_point(p2);

        prop_assert!(approx_eq!(f64, result.x(), p1.x(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, result.y(), p1.y(), epsilon = 1e-9));
        Ok(())
    }

    proptest! {
        #[test]
        fn add_sub_inverse(p1 in point_strategy(), p2 in point_strategy()) {
            check_add_sub_inverse(p1, p2)?;
        }
    }
}
