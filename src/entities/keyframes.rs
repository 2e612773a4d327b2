//! Piecewise-linear keyframe curves driven by scroll progress.
//!
//! `Keyframes { keys: [a, b, c], values: [x, y, z] }` maps `a -> x`, `b -> y`,
//! `c -> z`, interpolates linearly between neighbours and holds the edge
//! value outside `[a, c]`.

use serde::{Deserialize, Serialize};

/// Evaluate the curve through (keys[i], values[i]) at `input`.
///
/// Keys must be non-decreasing; zero-length segments jump to the later value.
/// Mismatched or empty slices evaluate to 0.
pub fn interpolate(input: f32, keys: &[f32], values: &[f32]) -> f32 {
    if keys.is_empty() || keys.len() != values.len() {
        return 0.0;
    }
    let last = keys.len() - 1;
    if input <= keys[0] {
        return values[0];
    }
    if input >= keys[last] {
        return values[last];
    }

    for i in 0..last {
        let (k0, k1) = (keys[i], keys[i + 1]);
        if input < k1 {
            let span = k1 - k0;
            if span <= 0.0 {
                return values[i + 1];
            }
            let t = (input - k0) / span;
            return values[i] + (values[i + 1] - values[i]) * t;
        }
    }
    values[last]
}

/// Smooth ease-in-out on t in [0, 1]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    pub keys: Vec<f32>,
    pub values: Vec<f32>,
}

impl Keyframes {
    pub fn new(keys: &[f32], values: &[f32]) -> Self {
        Self {
            keys: keys.to_vec(),
            values: values.to_vec(),
        }
    }

    pub fn at(&self, input: f32) -> f32 {
        interpolate(input, &self.keys, &self.values)
    }

    /// Keys ascending and one value per key
    pub fn is_valid(&self) -> bool {
        !self.keys.is_empty()
            && self.keys.len() == self.values.len()
            && self.keys.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_interpolate_holds_edges() {
        let keys = [0.25, 0.3, 0.35, 0.4];
        let values = [0.0, 0.4, 0.4, 0.0];
        assert_eq!(interpolate(0.0, &keys, &values), 0.0);
        assert_eq!(interpolate(1.0, &keys, &values), 0.0);
        assert!(approx(interpolate(0.275, &keys, &values), 0.2));
        assert!(approx(interpolate(0.32, &keys, &values), 0.4));
        assert!(approx(interpolate(0.375, &keys, &values), 0.2));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(interpolate(0.5, &[], &[]), 0.0);
        assert_eq!(interpolate(0.5, &[0.0, 1.0], &[1.0]), 0.0);
        // Zero-length segment jumps
        assert_eq!(interpolate(0.5, &[0.0, 0.5, 0.5, 1.0], &[0.0, 0.0, 1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(approx(ease_in_out(0.5), 0.5));
        assert!(ease_in_out(0.25) < 0.25);
        assert_eq!(ease_in_out(7.0), 1.0);
    }

    #[test]
    fn test_validity() {
        assert!(Keyframes::new(&[0.0, 0.1], &[1.0, 0.0]).is_valid());
        assert!(!Keyframes::new(&[0.1, 0.0], &[1.0, 0.0]).is_valid());
        assert!(!Keyframes::new(&[0.1], &[]).is_valid());
    }
}
