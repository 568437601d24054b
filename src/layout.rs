//! Fruchterman-Reingold spring layout.
//!
//! Nodes repel each other globally and attract along edges. Each iteration
//! moves every node by at most the current temperature, which cools linearly
//! to zero. Initial positions come from a seeded `StdRng`, so the same graph
//! and seed always give the same picture.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { seed: 42, iterations: 50 }
    }
}

/// Positions for `node_count` nodes connected by `edges` (pairs of node
/// indices). Output is centred on the origin and scaled into [-1, 1].
pub fn spring_layout(node_count: usize, edges: &[(usize, usize)], cfg: &LayoutConfig) -> Vec<[f64; 2]> {
    match node_count {
        0 => return vec![],
        1 => return vec![[0.0, 0.0]],
        _ => {}
    }

    // Undirected, deduplicated springs in a fixed order; self-loops pull on nothing.
    let springs: BTreeSet<(usize, usize)> = edges
        .iter()
        .filter(|(a, b)| a != b)
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut pos: Vec<[f64; 2]> = (0..node_count)
        .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
        .collect();

    let k = (1.0 / node_count as f64).sqrt();
    let mut temperature = 0.1 * span(&pos);
    let cooling = temperature / (cfg.iterations as f64 + 1.0);

    for _ in 0..cfg.iterations {
        let mut displacement = vec![[0.0f64; 2]; node_count];

        // Repulsion between every pair.
        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let (dx, dy, distance) = delta(&pos, i, j);
                let force = k * k / (distance * distance);
                push(&mut displacement, i, j, dx * force, dy * force);
            }
        }

        // Attraction along edges.
        for &(i, j) in &springs {
            let (dx, dy, distance) = delta(&pos, i, j);
            let force = -distance / k;
            push(&mut displacement, i, j, dx * force, dy * force);
        }

        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d[0] * d[0] + d[1] * d[1]).sqrt().max(MIN_DISTANCE);
            p[0] += d[0] * temperature / length;
            p[1] += d[1] * temperature / length;
        }

        temperature -= cooling;
    }

    rescale(&mut pos);
    pos
}

/// Vector from `j` to `i` and its (clamped) length.
fn delta(pos: &[[f64; 2]], i: usize, j: usize) -> (f64, f64, f64) {
    let dx = pos[i][0] - pos[j][0];
    let dy = pos[i][1] - pos[j][1];
    (dx, dy, (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE))
}

/// Applies an equal and opposite push to `i` and `j`.
fn push(displacement: &mut [[f64; 2]], i: usize, j: usize, fx: f64, fy: f64) {
    displacement[i][0] += fx;
    displacement[i][1] += fy;
    displacement[j][0] -= fx;
    displacement[j][1] -= fy;
}

/// Largest extent of the point cloud along either axis.
fn span(pos: &[[f64; 2]]) -> f64 {
    (0..2)
        .map(|axis| {
            let (lo, hi) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
            hi - lo
        })
        .fold(0.0, f64::max)
}

fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean = pos.iter().fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
    let mean = [mean[0] / n, mean[1] / n];

    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
    }

    let limit = pos
        .iter()
        .flat_map(|p| [p[0].abs(), p[1].abs()])
        .fold(0.0, f64::max);
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= limit;
            p[1] /= limit;
        }
    }
}
