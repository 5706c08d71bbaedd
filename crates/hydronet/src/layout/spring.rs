//! Seeded spring layout engine
//!
//! This module implements a Fruchterman-Reingold style force-directed
//! layout. Vertices repel each other, edges pull their endpoints together
//! in proportion to their weight, and a linearly cooling temperature caps
//! how far any vertex moves in one step.

use log::{debug, trace};
use petgraph::{graph::UnGraph, visit::EdgeRef};
use rand::{Rng, SeedableRng, rngs::StdRng};

use hydronet_core::geometry::Point;

use crate::layout::rescale;

/// Largest absolute coordinate after the final rescale.
const LAYOUT_EXTENT: f64 = 1.0;

/// Spring layout engine
///
/// The engine always runs exactly `iterations` steps. Initial positions are
/// drawn from a [`StdRng`] seeded with `seed`, so the same graph and the same
/// settings always produce the same positions.
#[derive(Debug, Clone)]
pub struct Engine {
    // Simulation parameters
    iterations: usize,
    seed: u64,
    // Lower bound on the distance between two vertices
    min_distance: f64,
}

impl Engine {
    /// Create a new spring layout engine
    pub fn new() -> Self {
        Self {
            iterations: 100,
            seed: 42,
            min_distance: 0.01,
        }
    }

    /// Set the number of iterations for the simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the seed used for the initial positions
    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }


    /// Draw initial positions in the unit square
    fn initialize_positions(&self, count: usize) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count)
            .map(|_| {
                let x: f64 = rng.random();
                let y: f64 = rng.random();
                Point::new(x, y)
            })
            .collect()
    }

    /// Computes one position per vertex, indexed like `graph.node_indices()`.
    ///
    /// `weight` maps edge data to the spring strength of that edge. Parallel
    /// edges add their weights; self-loops exert no force.
    pub fn calculate<N, E>(&self, graph: &UnGraph<N, E>, weight: impl Fn(&E) -> f64) -> Vec<Point> {
        let count = graph.node_count();
        match count {
            0 => return Vec::new(),
            1 => return vec![Point::default()],
            _ => {}
        }

        // Weighted adjacency lists
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); count];
        for edge in graph.edge_references() {
            let source = edge.source().index();
            let target = edge.target().index();
            if source == target {
                continue;
            }
            let w = weight(edge.weight());
            add_spring(&mut adjacency[source], target, w);
            add_spring(&mut adjacency[target], source, w);
        }

        let mut positions = self.initialize_positions(count);
        trace!(positions:? = positions; "Initial spring layout positions");

        // Optimal distance between vertices
        let k = (1.0 / count as f64).sqrt();

        // Temperature starts at a tenth of the initial extent and cools linearly
        let mut temperature = 0.1 * extent(&positions);
        let cooling = temperature / (self.iterations as f64 + 1.0);

        let mut displacements = vec![Point::default(); count];
        for _ in 0..self.iterations {
            // Repulsive forces between all vertices
            for (i, displacement) in displacements.iter_mut().enumerate() {
                let mut total = Point::default();
                for (j, &other) in positions.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let delta = positions[i].sub_point(other);
                    let distance = delta.hypot().max(self.min_distance);
                    total = total.add_point(delta.scale(k * k / (distance * distance)));
                }
                *displacement = total;
            }

            // Attractive forces along edges
            for (i, springs) in adjacency.iter().enumerate() {
                for &(j, w) in springs {
                    let delta = positions[i].sub_point(positions[j]);
                    let distance = delta.hypot().max(self.min_distance);
                    displacements[i] = displacements[i].sub_point(delta.scale(w * distance / k));
                }
            }

            // Move every vertex at most `temperature` along its displacement
            for (position, displacement) in positions.iter_mut().zip(&displacements) {
                let mut length = displacement.hypot();
                if length < self.min_distance {
                    length = 0.1;
                }
                *position = position.add_point(displacement.scale(temperature / length));
            }

            temperature -= cooling;
        }

        rescale(&mut positions, LAYOUT_EXTENT);

        debug!(
            vertex_count = count,
            iterations = self.iterations,
            seed = self.seed;
            "Spring layout computed"
        );
        positions
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn add_spring(springs: &mut Vec<(usize, f64)>, neighbor: usize, weight: f64) {
    match springs.iter_mut().find(|(index, _)| *index == neighbor) {
        Some((_, total)) => *total += weight,
        None => springs.push((neighbor, weight)),
    }
}

/// Larger of the x and y extents of a point set.
fn extent(positions: &[Point]) -> f64 {
    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for pos in positions {
        min_x = min_x.min(pos.x());
        min_y = min_y.min(pos.y());
        max_x = max_x.max(pos.x());
        max_y = max_y.max(pos.y());
    }
    (max_x - min_x).max(max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    fn path(n: usize) -> UnGraph<(), f64> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], 1.0);
        }
        graph
    }

    #[test]
    fn test_empty_and_single() {
        let engine = Engine::new();
        assert!(engine.calculate(&path(0), |w| *w).is_empty());

        let single = engine.calculate(&path(1), |w| *w);
        assert_eq!(single, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_deterministic_for_equal_seed() {
        let graph = path(6);
        let first = Engine::new().calculate(&graph, |w| *w);
        let second = Engine::new().calculate(&graph, |w| *w);
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_changes_positions() {
        let graph = path(6);
        let first = Engine::new().calculate(&graph, |w| *w);
        let second = Engine::new().set_seed(7).calculate(&graph, |w| *w);
        assert_ne!(first, second);
    }

    #[test]
    fn test_result_is_centered_and_scaled() {
        let positions = Engine::new().calculate(&path(5), |w| *w);

        let mean_x = positions.iter().map(|p| p.x()).sum::<f64>() / 5.0;
        let mean_y = positions.iter().map(|p| p.y()).sum::<f64>() / 5.0;
        assert_approx_eq!(f64, mean_x, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, mean_y, 0.0, epsilon = 1e-9);

        let limit = positions
            .iter()
            .flat_map(|p| [p.x().abs(), p.y().abs()])
            .fold(0.0, f64::max);
        assert_approx_eq!(f64, limit, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_isolated_vertices_are_finite() {
        let mut graph: UnGraph<(), f64> = UnGraph::new_undirected();
        for _ in 0..4 {
            graph.add_node(());
        }
        let positions = Engine::new().calculate(&graph, |w| *w);
        assert_eq!(positions.len(), 4);
        assert!(positions.iter().all(|p| p.x().is_finite() && p.y().is_finite()));
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let mut graph: UnGraph<(), f64> = UnGraph::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, a, 1.0);
        graph.add_edge(a, b, 1.0);
        graph.add_edge(a, b, 2.0);

        let positions = Engine::new().set_iterations(10).calculate(&graph, |w| *w);
        assert_eq!(positions.len(), 2);
        assert!(positions.iter().all(|p| p.x().is_finite() && p.y().is_finite()));
    }

    #[test]
    fn test_add_spring_sums_parallel_weights() {
        let mut springs = Vec::new();
        add_spring(&mut springs, 3, 1.5);
        add_spring(&mut springs, 4, 1.0);
        add_spring(&mut springs, 3, 2.0);
        assert_eq!(springs, vec![(3, 3.5), (4, 1.0)]);
    }

    #[test]
    fn test_extent() {
        let points = [Point::new(0.0, 0.0), Point::new(2.0, 0.5), Point::new(1.0, -1.0)];
        assert_approx_eq!(f64, extent(&points), 2.0);
    }
}
