use crate::Error;
use crate::affine::Affine2;

/// Declarative description of a source-to-target transformation.
///
/// The builder applies, in order: expansion (unless `apply_expansion_last`),
/// translation, scaling, rotation, expansion-last. Rotation happens about the
/// origin; the rotated bounding box is shifted back into the positive
/// quadrant and the target canvas grows to enclose it (unless
/// `rotation_rescaling` is off, in which case the canvas keeps its
/// pre-rotation size and the result clips).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSetup {
    pub rotation_angle: f64,
    pub rotation_in_degrees: bool,
    pub rotation_rescaling: bool,
    pub scaling_x: f32,
    pub scaling_y: f32,
    /// When false, `scaling_x`/`scaling_y` are absolute target dimensions.
    pub relative_scaling: bool,
    pub translate_x: f32,
    pub translate_y: f32,
    pub expand_left: f32,
    pub expand_top: f32,
    pub expand_right: f32,
    pub expand_bottom: f32,
    pub apply_expansion_last: bool,
    pub original_width: f32,
    pub original_height: f32,
}

impl Default for TransformSetup {
    fn default() -> Self {
        Self {
            rotation_angle: 0.0,
            rotation_in_degrees: true,
            rotation_rescaling: true,
            scaling_x: 1.0,
            scaling_y: 1.0,
            relative_scaling: true,
            translate_x: 0.0,
            translate_y: 0.0,
            expand_left: 0.0,
            expand_top: 0.0,
            expand_right: 0.0,
            expand_bottom: 0.0,
            apply_expansion_last: false,
            original_width: 0.0,
            original_height: 0.0,
        }
    }
}

/// Built forward/inverse pair plus the enclosing target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPair {
    pub forward: Affine2,
    pub inverse: Affine2,
    pub target_width: usize,
    pub target_height: usize,
}

impl TransformSetup {
    pub fn for_size(width: usize, height: usize) -> Self {
        Self {
            original_width: width as f32,
            original_height: height as f32,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Result<TransformPair, Error> {
        if !(self.original_width >= 1.0) || !(self.original_height >= 1.0) {
            return Err(Error::ZeroDimension);
        }

        let mut m = Affine2::IDENTITY;
        let mut w = self.original_width;
        let mut h = self.original_height;

        let has_expansion = self.expand_left != 0.0
            || self.expand_top != 0.0
            || self.expand_right != 0.0
            || self.expand_bottom != 0.0;

        if has_expansion && !self.apply_expansion_last {
            m.bx += self.expand_left;
            m.by += self.expand_top;
            w += self.expand_left + self.expand_right;
            h += self.expand_top + self.expand_bottom;
        }

        m.bx += self.translate_x;
        m.by += self.translate_y;

        let (sx, sy) = if self.relative_scaling {
            (self.scaling_x, self.scaling_y)
        } else {
            (
                self.scaling_x / self.original_width,
                self.scaling_y / self.original_height,
            )
        };
        // Scaling composes over everything accumulated so far, so an
        // expansion border or translation applied before it scales with the
        // content.
        m.ax *= sx;
        m.axy *= sx;
        m.bx *= sx;
        m.ayx *= sy;
        m.ay *= sy;
        m.by *= sy;
        if self.relative_scaling {
            w *= sx;
            h *= sy;
        } else {
            w = self.scaling_x;
            h = self.scaling_y;
        }

        let theta = if self.rotation_in_degrees {
            self.rotation_angle.to_radians()
        } else {
            self.rotation_angle
        };
        if theta != 0.0 {
            let s = theta.sin() as f32;
            let c = theta.cos() as f32;
            m = Affine2 {
                ax: c,
                axy: s,
                ayx: -s,
                ay: c,
                bx: 0.0,
                by: 0.0,
            } * m;

            if self.rotation_rescaling {
                // Re-anchor the rotated bounding box into the positive
                // quadrant. The offsets depend on which half-planes the
                // rotated corners fall into.
                if s >= 0.0 {
                    m.by += w * s;
                } else {
                    m.bx -= h * s;
                }
                if c < 0.0 {
                    m.bx -= w * c;
                    m.by -= h * c;
                }
                let rw = c.abs() * w + s.abs() * h;
                let rh = s.abs() * w + c.abs() * h;
                w = rw;
                h = rh;
            }
        }

        if has_expansion && self.apply_expansion_last {
            m.bx += self.expand_left;
            m.by += self.expand_top;
            w += self.expand_left + self.expand_right;
            h += self.expand_top + self.expand_bottom;
        }

        let inverse = m.try_inverse().ok_or(Error::Singular)?;

        Ok(TransformPair {
            forward: m,
            inverse,
            // The slack absorbs rotation round-off so exact multiples of 90
            // degrees do not spill into an extra row/column.
            target_width: ((w - 1e-4).ceil() as usize).max(1),
            target_height: ((h - 1e-4).ceil() as usize).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TransformSetup;
    use crate::geom::Point2f;

    #[test]
    fn identity_setup_round_trips() {
        let pair = TransformSetup::for_size(8, 6).build().expect("valid setup");

        assert_eq!(pair.target_width, 8);
        assert_eq!(pair.target_height, 6);
        let p = Point2f { x: 3.25, y: 1.5 };
        assert!((pair.forward.apply(p) - p).norm() < 1e-6);
        assert!((pair.inverse.apply(p) - p).norm() < 1e-6);
    }

    #[test]
    fn rotation_45_degrees_dims_and_round_trip() {
        let setup = TransformSetup {
            rotation_angle: 45.0,
            ..TransformSetup::for_size(4, 4)
        };
        let pair = setup.build().expect("valid setup");

        // |cos|*4 + |sin|*4 = 5.657
        assert_eq!(pair.target_width, 6);
        assert_eq!(pair.target_height, 6);
        assert!(pair.target_width >= 4);

        for p in [
            Point2f { x: 0.0, y: 0.0 },
            Point2f { x: 4.0, y: 0.0 },
            Point2f { x: 1.3, y: 2.7 },
        ] {
            let round_trip = pair.inverse.apply(pair.forward.apply(p));
            assert!((round_trip - p).norm() < 1e-4);
        }
    }

    #[test]
    fn rotation_90_degrees_anchors_into_positive_quadrant() {
        let setup = TransformSetup {
            rotation_angle: 90.0,
            ..TransformSetup::for_size(3, 3)
        };
        let pair = setup.build().expect("valid setup");

        assert_eq!(pair.target_width, 3);
        assert_eq!(pair.target_height, 3);

        // (x, y) -> (y, h - x): the top-left corner lands on the bottom-left.
        let p = pair.forward.apply(Point2f { x: 0.5, y: 0.5 });
        assert!((p - Point2f { x: 0.5, y: 2.5 }).norm() < 1e-4);
        let center = pair.forward.apply(Point2f { x: 1.5, y: 1.5 });
        assert!((center - Point2f { x: 1.5, y: 1.5 }).norm() < 1e-4);
    }

    #[test]
    fn negative_rotation_anchors_on_x() {
        let setup = TransformSetup {
            rotation_angle: -90.0,
            ..TransformSetup::for_size(4, 2)
        };
        let pair = setup.build().expect("valid setup");

        assert_eq!(pair.target_width, 2);
        assert_eq!(pair.target_height, 4);

        // (x, y) -> (w - y, x) for a clockwise quarter turn.
        let p = pair.forward.apply(Point2f { x: 0.5, y: 0.5 });
        assert!((p - Point2f { x: 1.5, y: 0.5 }).norm() < 1e-4);
    }

    #[test]
    fn relative_and_absolute_scaling_agree() {
        let relative = TransformSetup {
            scaling_x: 2.0,
            scaling_y: 3.0,
            ..TransformSetup::for_size(10, 10)
        };
        let absolute = TransformSetup {
            scaling_x: 20.0,
            scaling_y: 30.0,
            relative_scaling: false,
            ..TransformSetup::for_size(10, 10)
        };

        let a = relative.build().expect("valid setup");
        let b = absolute.build().expect("valid setup");
        assert_eq!(a.target_width, 20);
        assert_eq!(a.target_height, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn expansion_first_offsets_before_scaling() {
        let setup = TransformSetup {
            expand_left: 2.0,
            expand_top: 1.0,
            expand_right: 2.0,
            expand_bottom: 1.0,
            scaling_x: 2.0,
            scaling_y: 2.0,
            ..TransformSetup::for_size(4, 4)
        };
        let pair = setup.build().expect("valid setup");

        assert_eq!(pair.target_width, 16);
        assert_eq!(pair.target_height, 12);
        // Source origin lands at the scaled expansion offset.
        let p = pair.forward.apply(Point2f { x: 0.0, y: 0.0 });
        assert!((p - Point2f { x: 4.0, y: 2.0 }).norm() < 1e-6);
    }

    #[test]
    fn expansion_last_offsets_after_scaling() {
        let setup = TransformSetup {
            expand_left: 2.0,
            expand_top: 1.0,
            expand_right: 2.0,
            expand_bottom: 1.0,
            apply_expansion_last: true,
            scaling_x: 2.0,
            scaling_y: 2.0,
            ..TransformSetup::for_size(4, 4)
        };
        let pair = setup.build().expect("valid setup");

        assert_eq!(pair.target_width, 12);
        assert_eq!(pair.target_height, 10);
        let p = pair.forward.apply(Point2f { x: 0.0, y: 0.0 });
        assert!((p - Point2f { x: 2.0, y: 1.0 }).norm() < 1e-6);
    }

    #[test]
    fn rotation_without_rescaling_keeps_dims() {
        let setup = TransformSetup {
            rotation_angle: 45.0,
            rotation_rescaling: false,
            ..TransformSetup::for_size(4, 4)
        };
        let pair = setup.build().expect("valid setup");

        assert_eq!(pair.target_width, 4);
        assert_eq!(pair.target_height, 4);
        // No re-anchoring: the origin stays put.
        let p = pair.forward.apply(Point2f { x: 0.0, y: 0.0 });
        assert!((p - Point2f { x: 0.0, y: 0.0 }).norm() < 1e-6);
    }

    #[test]
    fn unset_original_dims_is_an_error() {
        assert!(TransformSetup::default().build().is_err());
    }
}
