use crate::geometry::Triangle;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Triangle count is 3^depth.
pub const MAX_GASKET_DEPTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SierpinskiParams {
    pub center: DVec2,
    pub size: f64,
    pub iterations: usize,
}

impl Default for SierpinskiParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            size: 100.0,
            iterations: 4,
        }
    }
}

/// Builds the Sierpinski gasket as a flat triangle list.
///
/// Only the three corner sub-triangles recurse; the inverted center
/// triangle is the hole and is never emitted.
pub fn build_sierpinski(params: &SierpinskiParams) -> Vec<Triangle> {
    let depth = params.iterations.min(MAX_GASKET_DEPTH);
    let size = params.size;
    let h = 3.0_f64.sqrt() / 2.0 * size;
    let top = DVec2::new(params.center.x, params.center.y - 2.0 * h / 3.0);
    let left = DVec2::new(params.center.x - size / 2.0, params.center.y + h / 3.0);
    let right = DVec2::new(params.center.x + size / 2.0, params.center.y + h / 3.0);

    let mut triangles = Vec::with_capacity(3usize.pow(depth as u32));
    subdivide(top, left, right, depth, &mut triangles);
    triangles
}

fn subdivide(a: DVec2, b: DVec2, c: DVec2, depth: usize, out: &mut Vec<Triangle>) {
    if depth == 0 {
        out.push(Triangle { a, b, c });
        return;
    }
    let m1 = (a + b) / 2.0;
    let m2 = (b + c) / 2.0;
    let m3 = (c + a) / 2.0;
    subdivide(a, m1, m3, depth - 1, out);
    subdivide(m1, b, m2, depth - 1, out);
    subdivide(m3, m2, c, depth - 1, out);
}
