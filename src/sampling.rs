//! Random sampling of particle properties.
//!
//! Every randomized particle property is described by a [`Span`]: a pair of
//! bounds written with as many decimals as the effect needs. Sampling draws
//! from the decimal grid implied by those bounds, so `Span(0.5, 1.0)` yields
//! values like `0.5, 0.6, ... 0.9` and `Span(5.0, 15.0)` yields whole numbers.
//!
//! Bounds may be given in either order. `Span(-10.0, -50.0)` samples from
//! `[-50, -10]`; spans written low-to-high never reach their upper bound.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Finest decimal grid used when sampling (10^-6).
pub const MAX_PRECISION: u32 = 6;

/// A range of values to sample from, `(start, end)`.
///
/// Serializes as a two-element array, e.g. `[5.0, 15.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span(pub f32, pub f32);

impl Span {
    /// Create a span between two bounds.
    pub const fn new(start: f32, end: f32) -> Self {
        Self(start, end)
    }

    /// A span that always samples `value`.
    pub const fn fixed(value: f32) -> Self {
        Self(value, value)
    }

    /// First bound (inclusive).
    pub fn start(&self) -> f32 {
        self.0
    }

    /// Second bound (exclusive unless equal to the first).
    pub fn end(&self) -> f32 {
        self.1
    }

    /// Both bounds multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self(self.0 * factor, self.1 * factor)
    }

    /// Whether both bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    /// Draw a value from the decimal grid of this span.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.0 == self.1 {
            return self.0;
        }

        let start = f64::from(self.0);
        let end = f64::from(self.1);
        let places = decimal_places(start).max(decimal_places(end));
        let unit = 10f64.powi(places as i32);

        let lo = (start * unit).round();
        let hi = (end * unit).round();
        let raw = lo + (rng.gen::<f64>() * (hi - lo)).floor();

        (raw / unit) as f32
    }
}

impl From<[f32; 2]> for Span {
    fn from([start, end]: [f32; 2]) -> Self {
        Self(start, end)
    }
}

/// A pair of spans sampled independently into a 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span2 {
    pub x: Span,
    pub y: Span,
}

impl Span2 {
    pub const fn new(x: Span, y: Span) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x.scaled(factor),
            y: self.y.scaled(factor),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(self.x.sample(rng), self.y.sample(rng))
    }
}

/// Pick a uniformly random element, or `None` if `items` is empty.
pub fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

/// Smallest number of decimal places (up to [`MAX_PRECISION`]) that makes
/// `value` whole.
fn decimal_places(value: f64) -> u32 {
    let mut scaled = value.abs();
    // Bounds usually come from f32, whose rounding noise is ~1e-7 relative.
    let mut tolerance = scaled * 1e-6;
    let mut places = 0;
    while places < MAX_PRECISION && (scaled - scaled.round()).abs() > tolerance {
        scaled *= 10.0;
        tolerance *= 10.0;
        places += 1;
    }
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn on_grid(value: f32, places: i32) -> bool {
        let scaled = f64::from(value) * 10f64.powi(places);
        (scaled - scaled.round()).abs() < 1e-3
    }

    #[test]
    fn test_fixed_span_returns_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Span::fixed(0.015).sample(&mut rng), 0.015);
        assert_eq!(Span::new(0.0, 0.0).sample(&mut rng), 0.0);
    }

    #[test]
    fn test_integer_span_stays_integral() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = Span::new(5.0, 15.0).sample(&mut rng);
            assert!((5.0..15.0).contains(&v), "{v} out of range");
            assert_eq!(v, v.trunc());
        }
    }

    #[test]
    fn test_decimal_span_uses_decimal_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let v = Span::new(0.375, 0.5).sample(&mut rng);
            assert!(v >= 0.375 && v < 0.5);
            assert!(on_grid(v, 3), "{v} not on 0.001 grid");
        }
    }

    #[test]
    fn test_reversed_span() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let v = Span::new(-10.0, -50.0).sample(&mut rng);
            assert!((-50.0..=-10.0).contains(&v), "{v} out of range");
            assert_eq!(v, v.trunc());
        }
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(10.0), 0);
        assert_eq!(decimal_places(0.5), 1);
        assert_eq!(decimal_places(-0.3), 1);
        assert_eq!(decimal_places(0.0005), 4);
        // f32 inputs carry representation noise below the tolerance
        assert_eq!(decimal_places(f64::from(0.3f32)), 1);
        // Binary fractions that never terminate are capped
        assert_eq!(decimal_places(1.0 / 3.0), MAX_PRECISION);
    }

    #[test]
    fn test_choose() {
        let mut rng = StdRng::seed_from_u64(5);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());

        let items = [1, 2, 3];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = *choose(&mut rng, &items).unwrap();
            seen[v - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_span_serializes_as_pair() {
        let json = serde_json::to_string(&Span::new(-0.5, 0.5)).unwrap();
        assert_eq!(json, "[-0.5,0.5]");
    }
}
