use crate::geometry::Segment;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

/// Growth is 5^iter draw tokens; 6 keeps the flower in the tens of
/// thousands of segments.
pub const MAX_FLOWER_ITERATIONS: usize = 6;

/// Defensive cap only; the dragon curve is normally caller-limited.
pub const MAX_DRAGON_ITERATIONS: usize = 20;

/// Turtle alphabet shared by the string-rewrite curves.
///
/// `Draw` and `DrawAlt` render identically; they are distinct symbol
/// classes because the dragon rewrite rules treat them differently, which
/// is what produces the correct fractal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    Draw,
    DrawAlt,
    TurnLeft,
    TurnRight,
    Push,
    Pop,
}

use Symbol::*;

/// `Draw -> Draw [ TurnLeft Draw ] Draw [ TurnRight Draw ] Draw`
static FLOWER_EXPANSION: [Symbol; 11] = [
    Draw, Push, TurnLeft, Draw, Pop, Draw, Push, TurnRight, Draw, Pop, Draw,
];
static DRAGON_DRAW_EXPANSION: [Symbol; 3] = [Draw, TurnLeft, DrawAlt];
static DRAGON_ALT_EXPANSION: [Symbol; 3] = [Draw, TurnRight, DrawAlt];

/// Applies a rewrite table to the axiom `iterations` times.
fn rewrite(
    axiom: &[Symbol],
    iterations: usize,
    rule: impl Fn(Symbol) -> Option<&'static [Symbol]>,
) -> Vec<Symbol> {
    let mut symbols = axiom.to_vec();
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(symbols.len() * 4);
        for &s in &symbols {
            match rule(s) {
                Some(expansion) => next.extend_from_slice(expansion),
                None => next.push(s),
            }
        }
        symbols = next;
    }
    symbols
}

#[derive(Clone, Copy, Debug)]
struct Turtle {
    pos: DVec2,
    heading: f64,
}

/// Walks the symbol string left to right, emitting one segment per draw
/// symbol. `TurnLeft` adds `turn` to the heading (clockwise on screen),
/// `TurnRight` subtracts it; push/pop save and restore the full cursor.
fn walk(symbols: &[Symbol], start: DVec2, heading: f64, step: f64, turn: f64) -> Vec<Segment> {
    let mut stack: Vec<Turtle> = Vec::new();
    let mut cur = Turtle {
        pos: start,
        heading,
    };
    let mut segments = Vec::new();
    for &s in symbols {
        match s {
            Draw | DrawAlt => {
                let next = cur.pos
                    + DVec2::new(step * cur.heading.cos(), step * cur.heading.sin());
                segments.push(Segment::new(cur.pos, next));
                cur.pos = next;
            }
            TurnLeft => cur.heading += turn,
            TurnRight => cur.heading -= turn,
            Push => stack.push(cur),
            Pop => {
                if let Some(saved) = stack.pop() {
                    cur = saved;
                }
            }
        }
    }
    segments
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowerParams {
    pub center: DVec2,
    pub step: f64,
    pub angle_deg: f64,
    pub iterations: usize,
}

impl Default for FlowerParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            step: 6.0,
            angle_deg: 25.0,
            iterations: 4,
        }
    }
}

/// Segment list plus the branch tips eligible for blossom decoration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowerModel {
    pub segments: Vec<Segment>,
    pub tips: Vec<DVec2>,
}

/// Builds the branching flower curve. Consumes no randomness; the output
/// is fully determined by the parameters.
pub fn build_flower(params: &FlowerParams) -> FlowerModel {
    let iterations = params.iterations.min(MAX_FLOWER_ITERATIONS);
    let symbols = rewrite(&[Draw], iterations, |s| match s {
        Draw => Some(&FLOWER_EXPANSION[..]),
        _ => None,
    });
    let segments = walk(
        &symbols,
        params.center,
        -FRAC_PI_2,
        params.step,
        params.angle_deg.to_radians(),
    );
    let tips = flower_tips(&segments);
    FlowerModel { segments, tips }
}

/// Endpoints never used as a start point by any segment.
///
/// The first segment's start is the plant root and is excluded even if it
/// otherwise qualifies. Bit-exact keying is sound here: coincident cursor
/// positions only arise from identical computations (pop restores the
/// saved cursor verbatim). Tip order follows first emission order.
pub fn flower_tips(segments: &[Segment]) -> Vec<DVec2> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };
    let key = |p: DVec2| (p.x.to_bits(), p.y.to_bits());

    let mut starts = HashSet::new();
    starts.insert(key(first.a));
    let mut seen_ends = HashSet::new();
    let mut ends = Vec::new();
    for seg in segments {
        starts.insert(key(seg.a));
        if seen_ends.insert(key(seg.b)) {
            ends.push(seg.b);
        }
    }
    ends.into_iter()
        .filter(|p| !starts.contains(&key(*p)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragonParams {
    pub center: DVec2,
    pub step: f64,
    pub iterations: usize,
}

impl Default for DragonParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            step: 5.0,
            iterations: 10,
        }
    }
}

/// Builds the Heighway dragon curve (2^iter segments).
pub fn build_dragon(params: &DragonParams) -> Vec<Segment> {
    let iterations = params.iterations.min(MAX_DRAGON_ITERATIONS);
    let symbols = rewrite(&[Draw], iterations, |s| match s {
        Draw => Some(&DRAGON_DRAW_EXPANSION[..]),
        DrawAlt => Some(&DRAGON_ALT_EXPANSION[..]),
        _ => None,
    });
    walk(&symbols, params.center, 0.0, params.step, FRAC_PI_2)
}
