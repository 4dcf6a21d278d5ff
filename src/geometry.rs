use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An immutable directed line segment.
///
/// Coordinates use the screen convention of the consuming canvas layer:
/// y grows downward, so "up" is negative y. Segments are produced in
/// generation order; consumers rely on that order for layering and for
/// replaying per-segment random streams (e.g. color cycling).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }
}

/// A filled or stroked triangle, wound in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: DVec2,
    pub b: DVec2,
    pub c: DVec2,
}
