use px_core::{Error, Image};
use px_interp::{Interp, PbccMode, pbcc_correct, split};
use rayon::prelude::*;

use crate::cache::{CoefficientCache, Tap};

/// Execution strategy chosen at `optimize` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Serial,
    /// Partitions the target along X; every worker owns one full column.
    Parallel,
}

/// The resampling pipeline.
///
/// A resizer moves through four states: empty, configured (source, target,
/// and interpolation present), ready (`optimize` validated the configuration
/// and froze the execution plan), and cached-ready (`bake` stored the
/// per-pixel coefficients). `resize` runs from ready or cached-ready and is
/// idempotent; any setter drops the plan and cache, returning to configured.
///
/// Per target pixel: inverse-map the coordinate, split into base index and
/// fractional offset, optionally restrict the transition band, evaluate the
/// kernel, optionally apply the proximity correction, then accumulate the
/// 2x2 neighbourhood over every channel. That ordering is fixed; the
/// transition restriction must see raw offsets and the proximity correction
/// must see kernel output.
#[derive(Debug, Default)]
pub struct Resizer {
    source: Option<Image<u8>>,
    target: Option<Image<u8>>,
    interp: Option<Interp>,
    plan: Option<Execution>,
    cache: Option<CoefficientCache>,
}

impl Resizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&mut self, source: Image<u8>) -> &mut Self {
        self.source = Some(source);
        self.drop_plan();
        self
    }

    pub fn set_target(&mut self, target: Image<u8>) -> &mut Self {
        self.target = Some(target);
        self.drop_plan();
        self
    }

    pub fn set_interp(&mut self, interp: Interp) -> &mut Self {
        self.interp = Some(interp);
        self.drop_plan();
        self
    }

    pub fn source(&self) -> Option<&Image<u8>> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Image<u8>> {
        self.target.as_ref()
    }

    pub fn interp(&self) -> Option<&Interp> {
        self.interp.as_ref()
    }

    /// Removes the finished target from the resizer.
    pub fn take_target(&mut self) -> Option<Image<u8>> {
        self.drop_plan();
        self.target.take()
    }

    pub fn is_ready(&self) -> bool {
        self.plan.is_some()
    }

    /// The execution strategy frozen by `optimize`, if any.
    pub fn execution(&self) -> Option<Execution> {
        self.plan
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Validates the configuration and freezes the execution plan.
    ///
    /// Fails without side effects when a part is missing, when either image
    /// disagrees with the interpolation dimensions, or when the channel
    /// counts differ.
    pub fn optimize(&mut self, parallel: bool) -> Result<(), Error> {
        let source = self
            .source
            .as_ref()
            .ok_or(Error::NotConfigured("source image"))?;
        let target = self
            .target
            .as_ref()
            .ok_or(Error::NotConfigured("target image"))?;
        let interp = self
            .interp
            .as_ref()
            .ok_or(Error::NotConfigured("interpolation setup"))?;

        let orig = (interp.orig_width(), interp.orig_height());
        let actual_src = (source.width(), source.height());
        if orig != actual_src {
            return Err(Error::DimensionMismatch {
                expected: orig,
                actual: actual_src,
            });
        }
        let dims = (interp.target_width(), interp.target_height());
        let actual_tgt = (target.width(), target.height());
        if dims != actual_tgt {
            return Err(Error::DimensionMismatch {
                expected: dims,
                actual: actual_tgt,
            });
        }
        if source.channels() != target.channels() {
            return Err(Error::ChannelMismatch {
                source: source.channels(),
                target: target.channels(),
            });
        }

        self.plan = Some(if parallel {
            Execution::Parallel
        } else {
            Execution::Serial
        });
        Ok(())
    }

    /// Precomputes the coefficient cache so later `resize` calls only
    /// replay the weighted accumulation.
    pub fn bake(&mut self) -> Result<(), Error> {
        if self.plan.is_none() {
            return Err(Error::NotConfigured("execution plan"));
        }
        let source = self
            .source
            .as_ref()
            .ok_or(Error::NotConfigured("source image"))?;
        let interp = self
            .interp
            .as_ref()
            .ok_or(Error::NotConfigured("interpolation setup"))?;

        self.cache = Some(CoefficientCache::bake(interp, source));
        Ok(())
    }

    /// Runs the resampling pass, writing every target pixel.
    pub fn resize(&mut self) -> Result<(), Error> {
        let execution = self.plan.ok_or(Error::NotConfigured("execution plan"))?;
        let source = self
            .source
            .as_ref()
            .ok_or(Error::NotConfigured("source image"))?;
        let target = self
            .target
            .as_mut()
            .ok_or(Error::NotConfigured("target image"))?;
        let interp = self
            .interp
            .as_ref()
            .ok_or(Error::NotConfigured("interpolation setup"))?;

        let src = source.data();
        let src_w = source.width();
        let src_h = source.height();
        let channels = source.channels();

        match &self.cache {
            Some(cache) => {
                let tw = target.width();
                let taps = cache.taps();
                drive(target, execution, |xt, yt, out| {
                    accumulate_taps(src, src_w, channels, &taps[yt * tw + xt], out);
                });
            }
            None => {
                drive(target, execution, |xt, yt, out| {
                    let taps = compute_taps(interp, src_w, src_h, xt, yt);
                    accumulate(src, src_w, channels, &taps, out);
                });
            }
        }
        Ok(())
    }

    /// Drops the baked coefficients; the next `resize` recomputes weights
    /// per pixel, and `bake` may be called again.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    /// Returns the resizer to the empty state.
    pub fn reset(&mut self) {
        self.source = None;
        self.target = None;
        self.interp = None;
        self.drop_plan();
    }

    fn drop_plan(&mut self) {
        self.plan = None;
        self.cache = None;
    }
}

/// The positioned 2x2 window of one target pixel: clamped column and row
/// indices plus the `[w00, w10, w01, w11]` weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PixelTaps {
    pub(crate) xs: [usize; 2],
    pub(crate) ys: [usize; 2],
    pub(crate) w: [f32; 4],
}

/// Steps 1-5 of the per-pixel algorithm: map, split, restrict, weigh,
/// correct.
#[inline]
pub(crate) fn compute_taps(
    interp: &Interp,
    src_w: usize,
    src_h: usize,
    xt: usize,
    yt: usize,
) -> PixelTaps {
    let (sx, sy) = interp.cast().map(xt, yt);
    let (bx, nx) = split(sx);
    let (by, ny) = split(sy);
    let (nx, ny) = match interp.tar() {
        Some(tar) => tar.remap(nx, ny),
        None => (nx, ny),
    };
    let mut w = interp.algorithm().weights2d(nx, ny);
    if interp.pbcc() == PbccMode::Full {
        w = pbcc_correct(w, nx, ny);
    }
    PixelTaps {
        xs: [clamp_index(bx, src_w), clamp_index(bx + 1, src_w)],
        ys: [clamp_index(by, src_h), clamp_index(by + 1, src_h)],
        w,
    }
}

#[inline]
fn clamp_index(i: i64, len: usize) -> usize {
    if i < 0 { 0 } else { (i as usize).min(len - 1) }
}

/// Step 6: weighted accumulation over the 2x2 window for every channel,
/// clamped to `[0, 255]` and truncated to a byte.
#[inline]
fn accumulate(src: &[u8], src_w: usize, channels: usize, taps: &PixelTaps, out: &mut [u8]) {
    let row0 = taps.ys[0] * src_w;
    let row1 = taps.ys[1] * src_w;
    let p00 = (row0 + taps.xs[0]) * channels;
    let p10 = (row0 + taps.xs[1]) * channels;
    let p01 = (row1 + taps.xs[0]) * channels;
    let p11 = (row1 + taps.xs[1]) * channels;
    let [w00, w10, w01, w11] = taps.w;

    for (c, out_c) in out.iter_mut().enumerate() {
        let acc = src[p00 + c] as f32 * w00
            + src[p10 + c] as f32 * w10
            + src[p01 + c] as f32 * w01
            + src[p11 + c] as f32 * w11;
        *out_c = acc.clamp(0.0, 255.0) as u8;
    }
}

/// Cached variant of step 6. The term order matches `accumulate` exactly so
/// baked and unbaked runs produce identical bytes.
#[inline]
fn accumulate_taps(src: &[u8], src_w: usize, channels: usize, taps: &[Tap; 4], out: &mut [u8]) {
    let p00 = (taps[0].sy as usize * src_w + taps[0].sx as usize) * channels;
    let p10 = (taps[1].sy as usize * src_w + taps[1].sx as usize) * channels;
    let p01 = (taps[2].sy as usize * src_w + taps[2].sx as usize) * channels;
    let p11 = (taps[3].sy as usize * src_w + taps[3].sx as usize) * channels;

    for (c, out_c) in out.iter_mut().enumerate() {
        let acc = src[p00 + c] as f32 * taps[0].weight
            + src[p10 + c] as f32 * taps[1].weight
            + src[p01 + c] as f32 * taps[2].weight
            + src[p11 + c] as f32 * taps[3].weight;
        *out_c = acc.clamp(0.0, 255.0) as u8;
    }
}

struct TargetPtr(*mut u8);

// SAFETY: every parallel task writes only the pixels of its own target
// column, and distinct columns are disjoint address sets.
unsafe impl Send for TargetPtr {}
unsafe impl Sync for TargetPtr {}

/// Work horse of both resize paths: walks the target and hands each pixel's
/// channel slice to `per_pixel`.
///
/// The parallel arm partitions along X so each worker streams down one
/// column, reusing the source rows its inverse-mapped positions touch.
fn drive<F>(target: &mut Image<u8>, execution: Execution, per_pixel: F)
where
    F: Fn(usize, usize, &mut [u8]) + Send + Sync,
{
    let (tw, th) = (target.width(), target.height());
    let channels = target.channels();

    match execution {
        Execution::Serial => {
            for yt in 0..th {
                let row = target.row_mut(yt);
                for (xt, out) in row.chunks_exact_mut(channels).enumerate() {
                    per_pixel(xt, yt, out);
                }
            }
        }
        Execution::Parallel => {
            let out = TargetPtr(target.data_mut().as_mut_ptr());
            (0..tw).into_par_iter().for_each(|xt| {
                let out = &out;
                for yt in 0..th {
                    let offset = (yt * tw + xt) * channels;
                    // SAFETY: `offset + channels` is within the target
                    // buffer, and column `xt` is written by this task alone.
                    let pixel =
                        unsafe { core::slice::from_raw_parts_mut(out.0.add(offset), channels) };
                    per_pixel(xt, yt, pixel);
                }
            });
        }
    }
}
