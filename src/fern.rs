use crate::rng::Mulberry32;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One affine map of the iterated-function system:
/// `(x, y) -> (a·x + b·y, c·x + d·y + f)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineMap {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub f: f64,
}

impl AffineMap {
    fn apply(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            self.a * p.x + self.b * p.y,
            self.c * p.x + self.d * p.y + self.f,
        )
    }

    /// Perturbs every coefficient once, at construction time.
    fn jittered(&self, rng: &mut Mulberry32) -> Self {
        let mut jitter = || (rng.next() - 0.5) * 0.1;
        Self {
            a: self.a + jitter(),
            b: self.b + jitter(),
            c: self.c + jitter(),
            d: self.d + jitter(),
            f: self.f + jitter(),
        }
    }
}

/// Stem contraction; never jittered, even for the space fern.
const STEM: AffineMap = AffineMap {
    a: 0.0,
    b: 0.0,
    c: 0.0,
    d: 0.16,
    f: 0.0,
};
const MAIN_FROND: AffineMap = AffineMap {
    a: 0.85,
    b: 0.04,
    c: -0.04,
    d: 0.85,
    f: 1.6,
};
const LEFT_LEAFLET: AffineMap = AffineMap {
    a: 0.2,
    b: -0.26,
    c: 0.23,
    d: 0.22,
    f: 1.6,
};
const RIGHT_LEAFLET: AffineMap = AffineMap {
    a: -0.15,
    b: 0.28,
    c: 0.26,
    d: 0.24,
    f: 0.44,
};

// Cumulative probability thresholds for map selection.
const P_STEM: f64 = 0.01;
const P_MAIN: f64 = 0.86;
const P_LEFT: f64 = 0.93;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FernParams {
    pub center: DVec2,
    pub size: f64,
    pub points: usize,
    /// Jitter the coefficient set once at construction, yielding a
    /// related but distinct attractor.
    pub space_fern: bool,
}

impl Default for FernParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            size: 30.0,
            points: 20_000,
            space_fern: false,
        }
    }
}

/// Samples the fern attractor for `points` iterations.
///
/// Each iteration draws one value, picks a map by cumulative threshold and
/// applies it to the running state; the emitted point is the state placed
/// in world coordinates around `center` (y flipped so the fern grows up).
pub fn build_fern(seed: Seed, params: &FernParams) -> Vec<DVec2> {
    let mut rng = Mulberry32::new(seed);
    let (main, left, right) = if params.space_fern {
        (
            MAIN_FROND.jittered(&mut rng),
            LEFT_LEAFLET.jittered(&mut rng),
            RIGHT_LEAFLET.jittered(&mut rng),
        )
    } else {
        (MAIN_FROND, LEFT_LEAFLET, RIGHT_LEAFLET)
    };

    let mut state = DVec2::ZERO;
    let mut points = Vec::with_capacity(params.points);
    for _ in 0..params.points {
        let r = rng.next();
        state = if r < P_STEM {
            STEM.apply(state)
        } else if r < P_MAIN {
            main.apply(state)
        } else if r < P_LEFT {
            left.apply(state)
        } else {
            right.apply(state)
        };
        points.push(DVec2::new(
            params.center.x + state.x * params.size,
            params.center.y - state.y * params.size,
        ));
    }
    points
}
