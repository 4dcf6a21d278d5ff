use crate::rng::Mulberry32;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrassParams {
    /// Base line center of the patch.
    pub origin: DVec2,
    pub width: f64,
    /// Number of blades.
    pub density: usize,
    pub min_height: f64,
    pub max_height: f64,
    /// Horizontal bend as a fraction of blade height.
    pub bend: f64,
    pub min_thickness: f64,
    pub max_thickness: f64,
}

impl Default for GrassParams {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            width: 80.0,
            density: 40,
            min_height: 15.0,
            max_height: 40.0,
            bend: 0.5,
            min_thickness: 1.0,
            max_thickness: 2.5,
        }
    }
}

/// One blade as a quadratic curve: start at the base, control point at
/// mid-height shifted by 60% of the bend, end at the bent tip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrassBlade {
    pub start: DVec2,
    pub control: DVec2,
    pub end: DVec2,
    pub thickness: f64,
}

/// Builds a grass patch of `density` curved blades.
pub fn build_grass(seed: Seed, params: &GrassParams) -> Vec<GrassBlade> {
    let mut rng = Mulberry32::new(seed);
    let mut blades = Vec::with_capacity(params.density);
    for _ in 0..params.density {
        let offset_x = (rng.next() - 0.5) * params.width;
        let height = params.min_height + rng.next() * (params.max_height - params.min_height);
        let bend = (rng.next() - 0.5) * params.bend * height;
        let base = DVec2::new(params.origin.x + offset_x, params.origin.y);
        blades.push(GrassBlade {
            start: base,
            control: DVec2::new(base.x + bend * 0.6, base.y - height * 0.5),
            end: DVec2::new(base.x + bend, base.y - height),
            thickness: params.min_thickness
                + rng.next() * (params.max_thickness - params.min_thickness),
        });
    }
    blades
}
