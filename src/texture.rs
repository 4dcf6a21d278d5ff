use crate::geometry::Segment;
use crate::rng::Mulberry32;
use crate::types::Seed;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureKind {
    Stipple,
    Hatch,
    CrossHatch,
    Bark,
    Scales,
    Fur,
    Ripples,
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureParams {
    pub kind: TextureKind,
    pub center: DVec2,
    /// Brush diameter; elements fill the disc of half this size.
    pub brush_size: f64,
    pub density: f64,
    pub scale: f64,
    /// Hatch direction in degrees; unused by the radial kinds.
    pub rotation_deg: f64,
    pub randomness: f64,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            kind: TextureKind::Stipple,
            center: DVec2::ZERO,
            brush_size: 60.0,
            density: 1.0,
            scale: 1.0,
            rotation_deg: 45.0,
            randomness: 0.5,
        }
    }
}

/// Geometry of one texture element, tagged by kind so the renderer knows
/// how to stroke or fill it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElementShape {
    Dot { pos: DVec2, size: f64 },
    Line(Segment),
    Curve { points: Vec<DVec2> },
    /// Upper half-circle arc of the given diameter.
    Arc { pos: DVec2, size: f64 },
    Polygon { points: Vec<DVec2>, filled: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureElement {
    pub shape: ElementShape,
    /// Per-element opacity override; used by cross-hatch's second pass.
    pub alpha: Option<f64>,
}

impl TextureElement {
    fn opaque(shape: ElementShape) -> Self {
        Self { shape, alpha: None }
    }
}

/// Builds the element field for one texture stamp.
pub fn build_texture(seed: Seed, params: &TextureParams) -> Vec<TextureElement> {
    let mut rng = Mulberry32::new(seed);
    let radius = params.brush_size / 2.0;
    let mut elements = Vec::new();
    match params.kind {
        TextureKind::Stipple => stipple(params, &mut rng, radius, &mut elements),
        TextureKind::Hatch => hatch(params, &mut rng, radius, params.rotation_deg, &mut elements),
        TextureKind::CrossHatch => cross_hatch(params, &mut rng, radius, &mut elements),
        TextureKind::Bark => bark(params, &mut rng, radius, &mut elements),
        TextureKind::Scales => scales(params, &mut rng, radius, &mut elements),
        TextureKind::Fur => fur(params, &mut rng, radius, &mut elements),
        TextureKind::Ripples => ripples(params, &mut rng, radius, &mut elements),
        TextureKind::Stone => stone(params, &mut rng, radius, &mut elements),
    }
    elements
}

/// Uniform dots over the disc; sqrt on the radial draw corrects the
/// polar area distortion.
fn stipple(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let count = (params.density * 200.0) as usize;
    for _ in 0..count {
        let angle = rng.next() * TAU;
        let dist = rng.next().sqrt() * radius;
        let pos = params.center + DVec2::new(angle.cos(), angle.sin()) * dist;
        let size = params.scale * (0.5 + rng.next() * params.randomness);
        out.push(TextureElement::opaque(ElementShape::Dot { pos, size }));
    }
}

fn hatch(
    params: &TextureParams,
    rng: &mut Mulberry32,
    radius: f64,
    rotation_deg: f64,
    out: &mut Vec<TextureElement>,
) {
    let spacing = 5.0 / params.density;
    let angle = rotation_deg.to_radians();
    let count = ((radius * 2.0) / spacing) as i64;

    for i in -count..=count {
        let offset = i as f64 * spacing;
        let perp = DVec2::new(-angle.sin(), angle.cos());
        let mid = params.center + perp * offset;
        let half = DVec2::new(angle.cos(), angle.sin()) * radius;
        let jitter = (rng.next() - 0.5) * params.randomness * spacing;
        out.push(TextureElement::opaque(ElementShape::Line(Segment::new(
            DVec2::new(mid.x - half.x + jitter, mid.y - half.y),
            DVec2::new(mid.x + half.x + jitter, mid.y + half.y),
        ))));
    }
}

/// Two hatch passes 90° apart; the second pass renders lighter.
fn cross_hatch(
    params: &TextureParams,
    rng: &mut Mulberry32,
    radius: f64,
    out: &mut Vec<TextureElement>,
) {
    hatch(params, rng, radius, params.rotation_deg, out);
    let first_pass = out.len();
    hatch(params, rng, radius, params.rotation_deg + 90.0, out);
    for e in &mut out[first_pass..] {
        e.alpha = Some(0.6);
    }
}

fn bark(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let count = (params.density * 15.0) as usize;
    for _ in 0..count {
        let x_offset = (rng.next() - 0.5) * radius * 2.0;
        let base = DVec2::new(params.center.x + x_offset, params.center.y - radius);
        let height = radius * 2.0 * params.scale;
        let wave_count = 2 + (rng.next() * 3.0) as usize;

        let steps = wave_count * 2;
        let mut points = Vec::with_capacity(steps + 1);
        for j in 0..=steps {
            let t = j as f64 / steps as f64;
            let wave = (t * wave_count as f64 * PI).sin() * 3.0 * params.randomness;
            points.push(DVec2::new(base.x + wave, base.y + t * height));
        }
        out.push(TextureElement::opaque(ElementShape::Curve { points }));
    }
}

/// Hex-offset grid of arcs clipped to the disc.
fn scales(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let scale_size = 10.0 * params.scale;
    let rows = ((radius * 2.0) / (scale_size * 0.7)) as usize;
    let cols = ((radius * 2.0) / scale_size) as usize;

    for row in 0..rows {
        for col in 0..cols {
            let x_offset = (row % 2) as f64 * scale_size * 0.5;
            let pos = DVec2::new(
                params.center.x - radius + col as f64 * scale_size + x_offset,
                params.center.y - radius + row as f64 * scale_size * 0.7,
            );
            if pos.distance(params.center) > radius {
                continue;
            }
            let size = scale_size * (0.8 + rng.next() * 0.4 * params.randomness);
            out.push(TextureElement::opaque(ElementShape::Arc { pos, size }));
        }
    }
}

/// Radial dots extended into short jittered-angle hairs.
fn fur(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let count = (params.density * 150.0) as usize;
    for _ in 0..count {
        let angle = rng.next() * TAU;
        let dist = rng.next().sqrt() * radius;
        let root = params.center + DVec2::new(angle.cos(), angle.sin()) * dist;

        let hair_angle = angle + (rng.next() - 0.5) * params.randomness * PI;
        let hair_len = 8.0 * params.scale * (0.5 + rng.next() * 0.5);
        let tip = root + DVec2::new(hair_angle.cos(), hair_angle.sin()) * hair_len;
        out.push(TextureElement::opaque(ElementShape::Line(Segment::new(
            root, tip,
        ))));
    }
}

/// Concentric noise-perturbed rings.
fn ripples(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let count = (5.0 + params.density * 5.0) as usize;
    const RING_STEPS: usize = 64;
    const WAVE_FREQ: f64 = 8.0;
    for i in 0..count {
        let ring_radius = i as f64 / count as f64 * radius;
        let wave_amp = 2.0 * params.scale * (1.0 + rng.next() * params.randomness);

        let mut points = Vec::with_capacity(RING_STEPS + 1);
        for j in 0..=RING_STEPS {
            let angle = j as f64 / RING_STEPS as f64 * TAU;
            let dist = ring_radius + (angle * WAVE_FREQ).sin() * wave_amp;
            points.push(params.center + DVec2::new(angle.cos(), angle.sin()) * dist);
        }
        out.push(TextureElement::opaque(ElementShape::Polygon {
            points,
            filled: false,
        }));
    }
}

/// Randomly placed irregular filled polygons.
fn stone(params: &TextureParams, rng: &mut Mulberry32, radius: f64, out: &mut Vec<TextureElement>) {
    let count = (params.density * 20.0) as usize;
    for _ in 0..count {
        let angle = rng.next() * TAU;
        let dist = rng.next().sqrt() * radius;
        let center = params.center + DVec2::new(angle.cos(), angle.sin()) * dist;

        let sides = 4 + (rng.next() * 3.0) as usize;
        let size = 8.0 * params.scale * (0.5 + rng.next() * 0.5);
        let mut points = Vec::with_capacity(sides);
        for j in 0..sides {
            let a = j as f64 / sides as f64 * TAU + rng.next() * params.randomness;
            let r = size * (0.8 + rng.next() * 0.4 * params.randomness);
            points.push(center + DVec2::new(a.cos(), a.sin()) * r);
        }
        out.push(TextureElement::opaque(ElementShape::Polygon {
            points,
            filled: true,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [TextureKind; 8] = [
        TextureKind::Stipple,
        TextureKind::Hatch,
        TextureKind::CrossHatch,
        TextureKind::Bark,
        TextureKind::Scales,
        TextureKind::Fur,
        TextureKind::Ripples,
        TextureKind::Stone,
    ];

    #[test]
    fn every_kind_is_deterministic() {
        for kind in ALL_KINDS {
            let p = TextureParams {
                kind,
                ..TextureParams::default()
            };
            assert_eq!(build_texture(42, &p), build_texture(42, &p), "{kind:?}");
        }
    }

    #[test]
    fn randomness_consuming_kinds_are_seed_sensitive() {
        // Scales with randomness 0 would be seed-insensitive; keep the
        // default randomness so every kind draws.
        for kind in ALL_KINDS {
            let p = TextureParams {
                kind,
                ..TextureParams::default()
            };
            assert_ne!(build_texture(1, &p), build_texture(2, &p), "{kind:?}");
        }
    }

    #[test]
    fn stipple_count_and_placement() {
        let p = TextureParams::default();
        let elements = build_texture(7, &p);
        assert_eq!(elements.len(), 200);
        let radius = p.brush_size / 2.0;
        for e in &elements {
            match &e.shape {
                ElementShape::Dot { pos, size } => {
                    assert!(pos.distance(p.center) <= radius + 1e-9);
                    assert!(*size > 0.0);
                }
                other => panic!("stipple produced {other:?}"),
            }
        }
    }

    #[test]
    fn cross_hatch_second_pass_is_lighter() {
        let p = TextureParams {
            kind: TextureKind::CrossHatch,
            ..TextureParams::default()
        };
        let elements = build_texture(3, &p);
        let flagged: Vec<_> = elements.iter().filter(|e| e.alpha == Some(0.6)).collect();
        let plain: Vec<_> = elements.iter().filter(|e| e.alpha.is_none()).collect();
        assert_eq!(flagged.len(), plain.len());
        assert!(!flagged.is_empty());
        // First pass comes first in emission order.
        assert!(elements[0].alpha.is_none());
        assert_eq!(elements[elements.len() - 1].alpha, Some(0.6));
    }

    #[test]
    fn fur_hairs_are_rooted_in_the_disc() {
        let p = TextureParams {
            kind: TextureKind::Fur,
            ..TextureParams::default()
        };
        let radius = p.brush_size / 2.0;
        let elements = build_texture(11, &p);
        assert_eq!(elements.len(), 150);
        for e in &elements {
            match &e.shape {
                ElementShape::Line(seg) => {
                    assert!(seg.a.distance(p.center) <= radius + 1e-9);
                }
                other => panic!("fur produced {other:?}"),
            }
        }
    }

    #[test]
    fn scales_arcs_stay_inside_the_disc() {
        let p = TextureParams {
            kind: TextureKind::Scales,
            ..TextureParams::default()
        };
        let radius = p.brush_size / 2.0;
        let elements = build_texture(5, &p);
        assert!(!elements.is_empty());
        for e in &elements {
            match &e.shape {
                ElementShape::Arc { pos, .. } => {
                    assert!(pos.distance(p.center) <= radius + 1e-9);
                }
                other => panic!("scales produced {other:?}"),
            }
        }
    }

    #[test]
    fn stone_polygons_have_four_to_six_sides() {
        let p = TextureParams {
            kind: TextureKind::Stone,
            ..TextureParams::default()
        };
        for e in build_texture(13, &p) {
            match &e.shape {
                ElementShape::Polygon { points, filled } => {
                    assert!(*filled);
                    assert!((4..=6).contains(&points.len()));
                }
                other => panic!("stone produced {other:?}"),
            }
        }
    }

    #[test]
    fn ripples_are_closed_rings() {
        let p = TextureParams {
            kind: TextureKind::Ripples,
            ..TextureParams::default()
        };
        let elements = build_texture(17, &p);
        assert_eq!(elements.len(), 10);
        for e in &elements {
            match &e.shape {
                ElementShape::Polygon { points, filled } => {
                    assert!(!*filled);
                    assert_eq!(points.len(), 65);
                }
                other => panic!("ripples produced {other:?}"),
            }
        }
    }

    #[test]
    fn zero_density_yields_an_empty_field() {
        for kind in [TextureKind::Stipple, TextureKind::Fur, TextureKind::Stone] {
            let p = TextureParams {
                kind,
                density: 0.0,
                ..TextureParams::default()
            };
            assert!(build_texture(1, &p).is_empty(), "{kind:?}");
        }
    }
}
