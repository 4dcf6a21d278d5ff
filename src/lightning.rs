use crate::geometry::Segment;
use crate::rng::Mulberry32;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Documented safe maximum for branch depth.
pub const MAX_BOLT_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightningParams {
    pub start: DVec2,
    pub end: DVec2,
    pub depth: usize,
    /// Stroke width of the trunk; sub-branches narrow to 60% per level.
    pub width: f64,
    /// Target length of one jittered step along a span.
    pub segment_length: f64,
    /// Spans shorter than this are emitted directly as leaf segments.
    pub min_segment_length: f64,
    /// Bound on the per-axis jitter applied at each step.
    pub jaggedness: f64,
    pub branch_probability: f64,
}

impl Default for LightningParams {
    fn default() -> Self {
        Self {
            start: DVec2::new(0.0, 0.0),
            end: DVec2::new(0.0, 300.0),
            depth: 4,
            width: 3.0,
            segment_length: 20.0,
            min_segment_length: 10.0,
            jaggedness: 16.0,
            branch_probability: 0.3,
        }
    }
}

/// One emitted discharge segment with its own stroke width, so
/// sub-branches render thinner than the trunk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoltSegment {
    pub seg: Segment,
    pub width: f64,
}

/// Builds a recursive lightning discharge as a flat segment list.
///
/// A zero-length base span yields an empty model.
pub fn build_lightning(seed: Seed, params: &LightningParams) -> Vec<BoltSegment> {
    if params.start == params.end {
        return Vec::new();
    }
    let depth = params.depth.min(MAX_BOLT_DEPTH);
    let mut builder = BoltBuilder {
        params,
        rng: Mulberry32::new(seed),
        segments: Vec::new(),
    };
    builder.branch(params.start, params.end, depth, params.width);
    builder.segments
}

struct BoltBuilder<'a> {
    params: &'a LightningParams,
    rng: Mulberry32,
    segments: Vec<BoltSegment>,
}

impl BoltBuilder<'_> {
    fn branch(&mut self, a: DVec2, b: DVec2, depth: usize, width: f64) {
        if depth == 0 {
            return;
        }

        let d = b - a;
        let len = d.length();
        if len < self.params.min_segment_length {
            self.segments.push(BoltSegment {
                seg: Segment::new(a, b),
                width,
            });
            return;
        }

        let steps = ((len / self.params.segment_length) as usize).max(1);
        let mut prev = a;
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let jag = self.params.jaggedness;
            let next = DVec2::new(
                a.x + d.x * t + (self.rng.next() - 0.5) * jag,
                a.y + d.y * t + (self.rng.next() - 0.5) * jag,
            );
            self.segments.push(BoltSegment {
                seg: Segment::new(prev, next),
                width,
            });

            // Branch draw happens every step; depth gates only the recursion.
            if self.rng.next() < self.params.branch_probability && depth > 1 {
                let deviation = (self.rng.next() - 0.5) * FRAC_PI_2;
                let branch_len = len * (0.3 + self.rng.next() * 0.3);
                let angle = d.y.atan2(d.x) + deviation;
                let tip = next + DVec2::new(angle.cos(), angle.sin()) * branch_len;
                self.branch(next, tip, depth - 1, width * 0.6);
            }

            prev = next;
        }
        // Close the span onto the exact endpoint.
        self.segments.push(BoltSegment {
            seg: Segment::new(prev, b),
            width,
        });
    }
}
