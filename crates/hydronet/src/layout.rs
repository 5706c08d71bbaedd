//! Two-dimensional layout of the network graph.
//!
//! [`spring::Engine`] places vertices with a seeded force-directed
//! simulation. The graph builder lifts the resulting points into 3-D using
//! node elevation.

pub mod spring;

use hydronet_core::geometry::Point;

/// Centers `positions` on their mean and scales them so that the largest
/// absolute coordinate equals `scale`.
///
/// A set whose points all coincide is only centered.
pub fn rescale(positions: &mut [Point], scale: f64) {
    if positions.is_empty() {
        return;
    }

    let count = positions.len() as f64;
    let sum = positions
        .iter()
        .fold(Point::default(), |acc, pos| acc.add_point(*pos));
    let mean = sum.scale(1.0 / count);

    let mut limit: f64 = 0.0;
    for pos in positions.iter_mut() {
        *pos = pos.sub_point(mean);
        limit = limit.max(pos.x().abs()).max(pos.y().abs());
    }

    if limit > 0.0 {
        for pos in positions.iter_mut() {
            *pos = pos.scale(scale / limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale() {
        let mut points = vec![Point::new(1.0, 1.0), Point::new(3.0, 2.0)];
        rescale(&mut points, 1.0);
        assert_eq!(points, vec![Point::new(-1.0, -0.5), Point::new(1.0, 0.5)]);
    }

    #[test]
    fn test_rescale_coincident_points() {
        let mut points = vec![Point::new(2.0, 2.0), Point::new(2.0, 2.0)];
        rescale(&mut points, 1.0);
        assert_eq!(points, vec![Point::default(), Point::default()]);
    }

    #[test]
    fn test_rescale_empty() {
        let mut points: Vec<Point> = Vec::new();
        rescale(&mut points, 1.0);
        assert!(points.is_empty());
    }
}
