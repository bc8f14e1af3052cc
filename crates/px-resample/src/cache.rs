use px_core::Image;
use px_interp::Interp;

use crate::resizer::{PixelTaps, compute_taps};

/// One source tap of a baked target pixel. Coordinates are pre-clamped into
/// the source, so replay skips the border handling entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub sx: u32,
    pub sy: u32,
    pub weight: f32,
}

/// Pre-baked interpolation coefficients: four taps per target pixel, indexed
/// by `yt * target_width + xt`.
///
/// Valid only for the exact configuration it was baked from; any change to
/// dimensions or interpolation knobs requires a rebake.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientCache {
    taps: Vec<[Tap; 4]>,
}

impl CoefficientCache {
    pub fn bake(interp: &Interp, source: &Image<u8>) -> Self {
        let (tw, th) = (interp.target_width(), interp.target_height());
        let mut taps = Vec::with_capacity(tw * th);
        for yt in 0..th {
            for xt in 0..tw {
                taps.push(entry(compute_taps(
                    interp,
                    source.width(),
                    source.height(),
                    xt,
                    yt,
                )));
            }
        }
        Self { taps }
    }

    pub fn taps(&self) -> &[[Tap; 4]] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

fn entry(taps: PixelTaps) -> [Tap; 4] {
    let PixelTaps { xs, ys, w } = taps;
    [
        Tap {
            sx: xs[0] as u32,
            sy: ys[0] as u32,
            weight: w[0],
        },
        Tap {
            sx: xs[1] as u32,
            sy: ys[0] as u32,
            weight: w[1],
        },
        Tap {
            sx: xs[0] as u32,
            sy: ys[1] as u32,
            weight: w[2],
        },
        Tap {
            sx: xs[1] as u32,
            sy: ys[1] as u32,
            weight: w[3],
        },
    ]
}

#[cfg(test)]
mod tests {
    use px_core::Image;
    use px_interp::{Algorithm, Interp, PbccMode};

    use super::CoefficientCache;

    #[test]
    fn bake_produces_one_entry_per_target_pixel() {
        let source = Image::<u8>::new(4, 3, 1);
        let interp = Interp::init_resize(4, 3, 8, 6).expect("valid dims");
        let cache = CoefficientCache::bake(&interp, &source);

        assert_eq!(cache.len(), 8 * 6);
        for entry in cache.taps() {
            let sum: f32 = entry.iter().map(|t| t.weight).sum();
            assert!((sum - 1.0).abs() < 1e-6);
            for tap in entry {
                assert!((tap.sx as usize) < 4);
                assert!((tap.sy as usize) < 3);
            }
        }
    }

    #[test]
    fn nearest_bake_is_one_hot() {
        let source = Image::<u8>::new(2, 2, 1);
        let mut interp = Interp::init_resize(2, 2, 4, 4).expect("valid dims");
        interp.init_functions(Algorithm::Nearest, PbccMode::None, None);
        let cache = CoefficientCache::bake(&interp, &source);

        for entry in cache.taps() {
            let ones = entry.iter().filter(|t| t.weight == 1.0).count();
            let zeros = entry.iter().filter(|t| t.weight == 0.0).count();
            assert_eq!((ones, zeros), (1, 3));
        }
    }
}
