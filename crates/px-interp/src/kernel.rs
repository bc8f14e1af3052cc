/// Two-point interpolation kernels.
///
/// Conventions:
/// - `weights(n)` returns `[left, right]` for a normalised offset
///   `n` in `[0, 1]` between two neighbouring samples; the pair sums to 1.
/// - `weights2d` is the outer product of the per-axis weights, flattened as
///   `[w00, w10, w01, w11]` (index `dy*2 + dx`), and also sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    Nearest,
    #[default]
    Linear,
    /// Rational reweighting `a = n^2 / ((1-n)^2 + n^2)`: flat like nearest
    /// around the sample centres, with a monotone S-shaped blend across the
    /// midpoint. Sharper than linear on pixel art without its blur.
    PLin,
}

impl Algorithm {
    #[inline]
    pub fn weights(self, n: f32) -> [f32; 2] {
        match self {
            Self::Nearest => {
                if n < 0.5 {
                    [1.0, 0.0]
                } else {
                    [0.0, 1.0]
                }
            }
            Self::Linear => [1.0 - n, n],
            Self::PLin => {
                let q = n * n;
                let r = 1.0 - n;
                let denom = r * r + q;
                // The denominator is bounded below by 0.5 for real n; the
                // guard keeps the symmetric tie if that ever changes.
                let a = if denom == 0.0 { 0.5 } else { q / denom };
                [1.0 - a, a]
            }
        }
    }

    #[inline]
    pub fn weights2d(self, nx: f32, ny: f32) -> [f32; 4] {
        let wx = self.weights(nx);
        let wy = self.weights(ny);
        [
            wx[0] * wy[0],
            wx[1] * wy[0],
            wx[0] * wy[1],
            wx[1] * wy[1],
        ]
    }
}

/// Splits a fractional source coordinate into the base index of its 2x2
/// neighbourhood and the normalised offset within it.
///
/// `floor` rounds toward negative infinity, so coordinates left of the
/// origin (rotated or translated borders) still produce offsets in `[0, 1)`.
#[inline]
pub fn split(s: f32) -> (i64, f32) {
    let base = s.floor();
    (base as i64, s - base)
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, split};

    const ALGORITHMS: [Algorithm; 3] = [Algorithm::Nearest, Algorithm::Linear, Algorithm::PLin];

    #[test]
    fn weights_partition_unity() {
        for algorithm in ALGORITHMS {
            for step in 0..=100 {
                let n = step as f32 / 100.0;
                let [a, b] = algorithm.weights(n);
                assert!(
                    (a + b - 1.0).abs() < 1e-6,
                    "{algorithm:?} at n={n}: {a} + {b}"
                );
                assert!(a >= 0.0 && b >= 0.0);
            }
        }
    }

    #[test]
    fn weights2d_partition_unity() {
        for algorithm in ALGORITHMS {
            for i in 0..=10 {
                for j in 0..=10 {
                    let w = algorithm.weights2d(i as f32 / 10.0, j as f32 / 10.0);
                    let sum: f32 = w.iter().sum();
                    assert!((sum - 1.0).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn nearest_switches_at_midpoint() {
        assert_eq!(Algorithm::Nearest.weights(0.49), [1.0, 0.0]);
        assert_eq!(Algorithm::Nearest.weights(0.5), [0.0, 1.0]);
    }

    #[test]
    fn plin_is_flat_near_centres_and_symmetric() {
        let [_, a_low] = Algorithm::PLin.weights(0.1);
        let [_, a_mid] = Algorithm::PLin.weights(0.5);
        let [_, a_high] = Algorithm::PLin.weights(0.9);

        // Well below the linear ramp near 0, exactly half at the midpoint,
        // and mirrored near 1.
        assert!(a_low < 0.1);
        assert!((a_mid - 0.5).abs() < 1e-6);
        assert!((a_low + a_high - 1.0).abs() < 1e-6);

        // Known value: a(0.25) = 0.0625 / (0.5625 + 0.0625) = 0.1.
        let [_, a] = Algorithm::PLin.weights(0.25);
        assert!((a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn split_floors_toward_negative_infinity() {
        assert_eq!(split(2.75), (2, 0.75));
        assert_eq!(split(3.0), (3, 0.0));

        let (base, n) = split(-0.25);
        assert_eq!(base, -1);
        assert!((n - 0.75).abs() < 1e-6);

        let (base, n) = split(-2.0);
        assert_eq!(base, -2);
        assert_eq!(n, 0.0);
    }
}
