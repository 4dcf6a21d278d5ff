use crate::rng::Mulberry32;
use crate::types::Seed;

/// 2-D coherent lattice noise, built once per seed.
///
/// Construction shuffles a 256-entry permutation table with a
/// [`Mulberry32`] stream, so the lattice is fully determined by the seed.
/// Sampling is continuous and smooth in (x, y); values are unbounded but
/// stay roughly within [-2, 2].
#[derive(Clone, Debug)]
pub struct Noise2 {
    perm: [u8; 512],
}

impl Noise2 {
    pub fn new(seed: Seed) -> Self {
        let mut rng = Mulberry32::new(seed);
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        // Fisher-Yates driven by the seeded stream.
        for i in (1..256).rev() {
            let j = (rng.next() * (i + 1) as f64) as usize;
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = table[i & 255];
        }
        Self { perm }
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }
}

/// Quintic fade curve, zero first and second derivatives at 0 and 1.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let u = if h < 2 { x } else { y };
    let v = if h < 2 { y } else { x };
    let su = if h & 1 != 0 { -u } else { u };
    let sv = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    su + sv
}
