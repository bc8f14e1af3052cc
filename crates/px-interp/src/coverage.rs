use px_core::{Affine2, Image, Point2f};

/// 1D blend shape across the soft border of the coverage mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Linear,
    Step,
    PLin,
}

impl Transition {
    /// Blend value for a normalised distance `d` in `[0, 1]` from the inner
    /// edge of the border band.
    #[inline]
    pub fn blend(self, d: f32) -> f32 {
        match self {
            Self::Linear => 1.0 - d,
            Self::Step => {
                if d < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::PLin => {
                let q = d * d;
                let r = 1.0 - d;
                let denom = r * r + q;
                if denom == 0.0 { 0.5 } else { 1.0 - q / denom }
            }
        }
    }
}

/// Per-target-pixel alpha describing how the mapped source rectangle covers
/// the target.
///
/// A pixel deep inside the mapped rectangle gets 1, a pixel outside the
/// half-pixel soft border gets 0, and the border band blends between the two
/// with the configured transition shape. The two axis contributions
/// multiply, which gives rotated outputs soft corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    inverse: Affine2,
    orig_w: f32,
    orig_h: f32,
    x_range: f32,
    y_range: f32,
    transition: Transition,
}

impl Coverage {
    pub fn new(inverse: Affine2, orig_w: usize, orig_h: usize, transition: Transition) -> Self {
        Self::with_ranges(inverse, orig_w, orig_h, 0.5, 0.5, transition)
    }

    pub fn with_ranges(
        inverse: Affine2,
        orig_w: usize,
        orig_h: usize,
        x_range: f32,
        y_range: f32,
        transition: Transition,
    ) -> Self {
        Self {
            inverse,
            orig_w: orig_w as f32,
            orig_h: orig_h as f32,
            x_range,
            y_range,
            transition,
        }
    }

    #[inline]
    pub fn alpha(&self, xt: usize, yt: usize) -> f32 {
        let p = self.inverse.apply(Point2f {
            x: xt as f32 + 0.5,
            y: yt as f32 + 0.5,
        });
        let ax = axis_alpha(p.x - 0.5, self.orig_w, self.x_range, self.transition);
        if ax == 0.0 {
            return 0.0;
        }
        ax * axis_alpha(p.y - 0.5, self.orig_h, self.y_range, self.transition)
    }

    /// Rasterises the mask over a `width x height` target.
    pub fn render(&self, width: usize, height: usize) -> Image<f32> {
        let mut mask = Image::new_fill(width, height, 1, 0.0f32);
        for yt in 0..height {
            let row = mask.row_mut(yt);
            for (xt, out) in row.iter_mut().enumerate() {
                *out = self.alpha(xt, yt);
            }
        }
        mask
    }
}

#[inline]
fn axis_alpha(s: f32, len: f32, range: f32, transition: Transition) -> f32 {
    let last = len - 1.0;
    if range <= 0.0 {
        return if s >= 0.0 && s <= last { 1.0 } else { 0.0 };
    }
    if s < -range || s > last + range {
        return 0.0;
    }
    if s >= range && s <= last - range {
        return 1.0;
    }
    // Inside the soft border: normalised distance from the inner edge over
    // the 2*range band.
    let d = if s < range {
        (range - s) / (2.0 * range)
    } else {
        (s - (last - range)) / (2.0 * range)
    };
    transition.blend(d.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use px_core::Affine2;

    use super::{Coverage, Transition};

    #[test]
    fn transition_shapes() {
        assert!((Transition::Linear.blend(0.25) - 0.75).abs() < 1e-6);
        assert_eq!(Transition::Step.blend(0.49), 1.0);
        assert_eq!(Transition::Step.blend(0.5), 0.0);
        // p-lin keeps the ends and midpoint of the linear ramp.
        assert!((Transition::PLin.blend(0.0) - 1.0).abs() < 1e-6);
        assert!((Transition::PLin.blend(0.5) - 0.5).abs() < 1e-6);
        assert!(Transition::PLin.blend(1.0).abs() < 1e-6);
        // ...but hugs them harder: blend(0.25) = 1 - 0.1 = 0.9 > 0.75.
        assert!((Transition::PLin.blend(0.25) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn identity_mapping_is_opaque_inside() {
        let cov = Coverage::new(Affine2::IDENTITY, 8, 8, Transition::Linear);
        for y in 1..7 {
            for x in 1..7 {
                assert_eq!(cov.alpha(x, y), 1.0);
            }
        }
    }

    #[test]
    fn translated_mapping_goes_transparent_outside() {
        // Source shifted far away: nothing in the target is covered.
        let inverse = Affine2::translation(100.0, 0.0);
        let cov = Coverage::new(inverse, 4, 4, Transition::Linear);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(cov.alpha(x, y), 0.0);
            }
        }
    }

    #[test]
    fn half_pixel_shift_blends_the_edge_column() {
        // The source sits half a pixel to the left of the target grid, so
        // the first column is halfway through the border band.
        let inverse = Affine2::translation(-0.5, 0.0);
        let cov = Coverage::new(inverse, 8, 8, Transition::Linear);

        // s = -0.5: on the outer edge.
        assert!(cov.alpha(0, 4).abs() < 1e-6);
        // s = 0.5: on the inner edge of a half-pixel border.
        assert_eq!(cov.alpha(1, 4), 1.0);
    }

    #[test]
    fn corners_multiply_axis_contributions() {
        // Shift both axes a quarter pixel out: the first row/column sample
        // sits three quarters into the border band, so each axis blends to
        // 0.25 and the corner is their product.
        let inverse = Affine2::translation(-0.25, -0.25);
        let cov = Coverage::new(inverse, 8, 8, Transition::Linear);

        let edge = cov.alpha(0, 4);
        assert!((edge - 0.25).abs() < 1e-6);
        let corner = cov.alpha(0, 0);
        assert!((corner - 0.25 * 0.25).abs() < 1e-6);
    }

    #[test]
    fn render_matches_alpha() {
        let cov = Coverage::new(Affine2::IDENTITY, 4, 4, Transition::PLin);
        let mask = cov.render(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(mask.get(x as isize, y as isize, 0), cov.alpha(x, y));
            }
        }
    }
}
