use px_core::{Affine2, Point2f};

/// Maps a target pixel index to a fractional source coordinate along one
/// axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Cast1D {
    /// Centre-aligned scaling: `cast(i) = (i + 0.5)/scale - 0.5`.
    Proper { scale: f32 },
    /// Edge-to-edge scaling: `cast(i) = i * (orig-1)/(target-1)`. Cheaper,
    /// but crops the half-pixel border on each side.
    Fast { ratio: f32 },
    /// Precomputed lookup of another cast.
    Buffered(Vec<f32>),
}

impl Cast1D {
    pub fn proper(orig_len: usize, target_len: usize) -> Self {
        Self::Proper {
            scale: target_len as f32 / orig_len as f32,
        }
    }

    pub fn fast(orig_len: usize, target_len: usize) -> Self {
        let ratio = if target_len > 1 {
            (orig_len - 1) as f32 / (target_len - 1) as f32
        } else {
            0.0
        };
        Self::Fast { ratio }
    }

    /// Tabulates this cast over `0..target_len`.
    pub fn buffered(&self, target_len: usize) -> Self {
        Self::Buffered((0..target_len).map(|i| self.at(i)).collect())
    }

    #[inline]
    pub fn at(&self, i: usize) -> f32 {
        match self {
            Self::Proper { scale } => (i as f32 + 0.5) / scale - 0.5,
            Self::Fast { ratio } => i as f32 * ratio,
            Self::Buffered(table) => table[i],
        }
    }
}

/// Maps a target pixel to a fractional source position, either per axis or
/// through an inverse affine matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Cast2D {
    PerAxis { x: Cast1D, y: Cast1D },
    Matrix {
        inverse: Affine2,
        correct_x: f32,
        correct_y: f32,
    },
}

impl Cast2D {
    pub fn per_axis(x: Cast1D, y: Cast1D) -> Self {
        Self::PerAxis { x, y }
    }

    /// Matrix cast with the default half-pixel correction, so the logical
    /// sample point sits at pixel centres: `p' = M*(p + 0.5) - 0.5`.
    pub fn matrix(inverse: Affine2) -> Self {
        Self::with_correction(inverse, 0.5, 0.5)
    }

    pub fn with_correction(inverse: Affine2, correct_x: f32, correct_y: f32) -> Self {
        Self::Matrix {
            inverse,
            correct_x,
            correct_y,
        }
    }

    #[inline]
    pub fn map(&self, xt: usize, yt: usize) -> (f32, f32) {
        match self {
            Self::PerAxis { x, y } => (x.at(xt), y.at(yt)),
            Self::Matrix {
                inverse,
                correct_x,
                correct_y,
            } => {
                let p = inverse.apply(Point2f {
                    x: xt as f32 + correct_x,
                    y: yt as f32 + correct_y,
                });
                (p.x - correct_x, p.y - correct_y)
            }
        }
    }

    /// The inverse matrix, when this cast carries one.
    pub fn inverse_matrix(&self) -> Option<Affine2> {
        match self {
            Self::PerAxis { .. } => None,
            Self::Matrix { inverse, .. } => Some(*inverse),
        }
    }
}

#[cfg(test)]
mod tests {
    use px_core::Affine2;

    use super::{Cast1D, Cast2D};

    #[test]
    fn proper_cast_aligns_pixel_centres() {
        // Doubling 2 -> 4: centres fall a quarter pixel either side of the
        // source samples.
        let cast = Cast1D::proper(2, 4);
        let got: Vec<f32> = (0..4).map(|i| cast.at(i)).collect();
        for (g, e) in got.iter().zip([-0.25f32, 0.25, 0.75, 1.25]) {
            assert!((g - e).abs() < 1e-6);
        }

        // Identity scale maps indices onto themselves.
        let identity = Cast1D::proper(5, 5);
        for i in 0..5 {
            assert!((identity.at(i) - i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn fast_cast_is_edge_to_edge() {
        let cast = Cast1D::fast(4, 7);
        assert!((cast.at(0) - 0.0).abs() < 1e-6);
        assert!((cast.at(6) - 3.0).abs() < 1e-6);
        assert!((cast.at(2) - 1.0).abs() < 1e-6);

        // A single-pixel target collapses onto the first source sample.
        let single = Cast1D::fast(4, 1);
        assert!((single.at(0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn buffered_matches_original() {
        let cast = Cast1D::proper(3, 8);
        let buffered = cast.buffered(8);
        for i in 0..8 {
            assert!((buffered.at(i) - cast.at(i)).abs() < 1e-6);
        }
    }

    #[test]
    fn matrix_cast_corrects_to_pixel_centres() {
        // Identity matrix: the correction must cancel out.
        let cast = Cast2D::matrix(Affine2::IDENTITY);
        let (sx, sy) = cast.map(3, 1);
        assert!((sx - 3.0).abs() < 1e-6);
        assert!((sy - 1.0).abs() < 1e-6);

        // Pure translation shifts the sampled position.
        let cast = Cast2D::matrix(Affine2::translation(-2.0, 1.0));
        let (sx, sy) = cast.map(3, 1);
        assert!((sx - 1.0).abs() < 1e-6);
        assert!((sy - 2.0).abs() < 1e-6);
    }

    #[test]
    fn matrix_cast_halves_under_downscale() {
        // Inverse of a x2 upscale: target pixel centres map to half source
        // steps around the origin sample.
        let inverse = Affine2::scaling(0.5, 0.5);
        let cast = Cast2D::matrix(inverse);
        let (sx, _) = cast.map(0, 0);
        assert!((sx - -0.25).abs() < 1e-6);
        let (sx, _) = cast.map(1, 0);
        assert!((sx - 0.25).abs() < 1e-6);
    }
}
