use crate::geometry::Segment;
use crate::rng::Mulberry32;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Edge count is 3·4^iter; 6 keeps the snowflake around 12k edges.
pub const MAX_SNOWFLAKE_ITERATIONS: usize = 6;

/// Point count is 2^detail + 1.
pub const MAX_MOUNTAIN_DETAIL: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnowflakeParams {
    pub center: DVec2,
    pub size: f64,
    pub iterations: usize,
}

impl Default for SnowflakeParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            size: 50.0,
            iterations: 3,
        }
    }
}

/// Vertices of the initial equilateral triangle, apex up.
pub fn snowflake_base(center: DVec2, size: f64) -> [DVec2; 3] {
    let side = size * 2.0;
    let h = 3.0_f64.sqrt() / 2.0 * side;
    [
        DVec2::new(center.x, center.y - 2.0 * h / 3.0),
        DVec2::new(center.x + side / 2.0, center.y + h / 3.0),
        DVec2::new(center.x - side / 2.0, center.y + h / 3.0),
    ]
}

/// Builds the Koch snowflake: each iteration replaces every edge with the
/// four edges of the standard outward Koch bump.
pub fn build_snowflake(params: &SnowflakeParams) -> Vec<Segment> {
    let iterations = params.iterations.min(MAX_SNOWFLAKE_ITERATIONS);
    let [a, b, c] = snowflake_base(params.center, params.size);
    let mut edges = vec![
        Segment::new(a, b),
        Segment::new(b, c),
        Segment::new(c, a),
    ];
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(edges.len() * 4);
        for e in &edges {
            next.extend_from_slice(&koch_bump(e));
        }
        edges = next;
    }
    edges
}

/// Trisects the edge and rotates the middle third -60° (outward on
/// screen) into the bump peak.
fn koch_bump(e: &Segment) -> [Segment; 4] {
    let d = e.b - e.a;
    let p = e.a + d / 3.0;
    let q = e.a + d * 2.0 / 3.0;
    let u = q - p;
    let cos = 0.5;
    let sin = -(3.0_f64.sqrt()) / 2.0;
    let peak = DVec2::new(p.x + u.x * cos - u.y * sin, p.y + u.x * sin + u.y * cos);
    [
        Segment::new(e.a, p),
        Segment::new(p, peak),
        Segment::new(peak, q),
        Segment::new(q, e.b),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MountainParams {
    pub start: DVec2,
    pub end: DVec2,
    /// Initial vertical displacement range; each midpoint is offset by a
    /// draw in [-height/2, +height/2].
    pub height: f64,
    pub detail: usize,
    /// Displacement decay per pass, < 1 for decreasing high-frequency
    /// detail.
    pub jaggedness: f64,
}

impl Default for MountainParams {
    fn default() -> Self {
        Self {
            start: DVec2::new(0.0, 0.0),
            end: DVec2::new(400.0, 0.0),
            height: 120.0,
            detail: 7,
            jaggedness: 0.55,
        }
    }
}

/// Builds a mountain ridge by midpoint displacement. Seeded like every
/// other generator, so a saved session regenerates the same ridge.
pub fn build_mountain(seed: Seed, params: &MountainParams) -> Vec<DVec2> {
    let detail = params.detail.min(MAX_MOUNTAIN_DETAIL);
    let mut rng = Mulberry32::new(seed);
    let mut points = vec![params.start, params.end];
    let mut displacement = params.height;
    for _ in 0..detail {
        let mut next = Vec::with_capacity(points.len() * 2 - 1);
        next.push(points[0]);
        for pair in points.windows(2) {
            let mid = (pair[0] + pair[1]) / 2.0;
            let offset = (rng.next() - 0.5) * displacement;
            next.push(DVec2::new(mid.x, mid.y + offset));
            next.push(pair[1]);
        }
        points = next;
        displacement *= params.jaggedness;
    }
    points
}
