use rand::RngCore;
use rand::seq::SliceRandom;

use crate::foundation::math::{fade, lerp};

const LATTICE: usize = 256;
const PERIOD: f64 = LATTICE as f64;

/// How lattice coordinates are reduced before lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseMode {
    /// Lattice indices masked with `& 255`. Only continuous for coordinates the caller keeps
    /// non-negative and bounded.
    Clamped,
    /// Coordinates reduced modulo 256 before flooring; the field is exactly periodic with
    /// period 256 on both axes.
    Wrapped,
}

/// Periodic 2D gradient noise over a shuffled permutation lattice.
///
/// The permutation and gradient tables are built once from the injected random source and
/// are immutable afterwards.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perm: [u8; LATTICE * 2],
    grad: [(f64, f64); LATTICE * 2],
}

impl NoiseField {
    /// Build the lattice from `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut order: Vec<u8> = (0..=255).collect();
        order.shuffle(rng);

        let mut perm = [0u8; LATTICE * 2];
        let mut grad = [(0.0, 0.0); LATTICE * 2];
        for (i, &p) in order.iter().enumerate() {
            let angle = f64::from(p % 16) * std::f64::consts::TAU / 16.0;
            let g = (angle.cos(), angle.sin());
            perm[i] = p;
            perm[i + LATTICE] = p;
            grad[i] = g;
            grad[i + LATTICE] = g;
        }
        Self { perm, grad }
    }

    /// Permutation entry at `i` (`0..512`).
    pub fn permutation(&self, i: usize) -> u8 {
        self.perm[i]
    }

    /// Sample in the given mode. Output lies in `[-1, 1]`.
    pub fn sample(&self, mode: NoiseMode, x: f64, y: f64) -> f64 {
        match mode {
            NoiseMode::Clamped => self.sample_clamped(x, y),
            NoiseMode::Wrapped => self.sample_wrapped(x, y),
        }
    }

    /// Sample with indices masked to the lattice.
    pub fn sample_clamped(&self, x: f64, y: f64) -> f64 {
        let (fx, fy) = (x.floor(), y.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        self.blend(xi, yi, xi + 1, yi + 1, x - fx, y - fy)
    }

    /// Sample on the 256-periodic torus. Use this for any unbounded axis.
    pub fn sample_wrapped(&self, x: f64, y: f64) -> f64 {
        let x = x.rem_euclid(PERIOD);
        let y = y.rem_euclid(PERIOD);
        let (fx, fy) = (x.floor(), y.floor());
        // rem_euclid can round up to exactly PERIOD for tiny negative inputs.
        let xi = (fx as usize) & 255;
        let yi = (fy as usize) & 255;
        self.blend(
            xi,
            yi,
            (xi + 1) % LATTICE,
            (yi + 1) % LATTICE,
            x - fx,
            y - fy,
        )
    }

    fn blend(&self, x0: usize, y0: usize, x1: usize, y1: usize, dx: f64, dy: f64) -> f64 {
        let p0 = usize::from(self.perm[y0]);
        let p1 = usize::from(self.perm[y1]);

        let n00 = dot(self.grad[x0 + p0], dx, dy);
        let n01 = dot(self.grad[x0 + p1], dx, dy - 1.0);
        let n10 = dot(self.grad[x1 + p0], dx - 1.0, dy);
        let n11 = dot(self.grad[x1 + p1], dx - 1.0, dy - 1.0);

        let u = fade(dx);
        let v = fade(dy);
        lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
    }
}

fn dot(g: (f64, f64), x: f64, y: f64) -> f64 {
    g.0 * x + g.1 * y
}

#[cfg(test)]
#[path = "../../tests/unit/noise/field.rs"]
mod tests;
