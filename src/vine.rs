use crate::noise::Noise2;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

pub const MIN_VINE_POINTS: usize = 10;
pub const MAX_VINE_POINTS: usize = 100_000;

/// Noise scale is floored here to keep lattice coordinates meaningful.
pub const MIN_NOISE_SCALE: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VineParams {
    pub start: DVec2,
    pub points: usize,
    pub step: f64,
    pub noise_scale: f64,
}

impl Default for VineParams {
    fn default() -> Self {
        Self {
            start: DVec2::ZERO,
            points: 200,
            step: 4.0,
            noise_scale: 0.01,
        }
    }
}

/// Builds a vine polyline by a noise-constrained random walk.
///
/// Each step samples the noise field at the current position, maps the
/// sample to a target heading in [0, 2π) and low-pass filters the current
/// heading 75%/25% toward it before advancing one fixed step. The filter
/// is what keeps the walk meandering instead of zig-zagging.
pub fn build_vine(seed: Seed, params: &VineParams) -> Vec<DVec2> {
    let count = params.points.clamp(MIN_VINE_POINTS, MAX_VINE_POINTS);
    let scale = params.noise_scale.max(MIN_NOISE_SCALE);
    let noise = Noise2::new(seed);

    let mut points = Vec::with_capacity(count);
    points.push(params.start);
    let mut pos = params.start;
    let mut heading = -FRAC_PI_2;
    for _ in 1..count {
        let n = noise.sample(pos.x * scale, pos.y * scale);
        let target = (n * 0.5 + 0.5) * TAU;
        heading = 0.75 * heading + 0.25 * target;
        pos += DVec2::new(params.step * heading.cos(), params.step * heading.sin());
        points.push(pos);
    }
    points
}
