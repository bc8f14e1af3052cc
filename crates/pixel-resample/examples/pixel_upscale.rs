//! Example: upscale a tiny pixel-art sprite with the three kernels.
//!
//! Builds an 8x8 grayscale sprite in code, upscales it x8 with Linear, PLin,
//! and PLin+PBCC+TAR, and prints one scanline of each result so the
//! difference between the blends is visible as numbers.
//!
//! Run from the workspace root:
//!   cargo run -p pixel-resample --example pixel_upscale

use pixel_resample::{Algorithm, Image, Interp, PbccMode, Resizer};

const SCALE: usize = 8;

fn sprite() -> Image<u8> {
    // A bright diamond on a dark field.
    let mut img = Image::new_fill(8, 8, 1, 32u8);
    let diamond = [
        (3, 1),
        (4, 1),
        (2, 2),
        (5, 2),
        (1, 3),
        (6, 3),
        (1, 4),
        (6, 4),
        (2, 5),
        (5, 5),
        (3, 6),
        (4, 6),
    ];
    for (x, y) in diamond {
        img.set(x, y, 0, 224);
    }
    img
}

fn upscale(
    source: &Image<u8>,
    algorithm: Algorithm,
    pbcc: PbccMode,
    transition_reduction: Option<f32>,
) -> Image<u8> {
    let (w, h) = (source.width(), source.height());
    let (tw, th) = (w * SCALE, h * SCALE);

    let mut interp = Interp::init_resize(w, h, tw, th).expect("valid dimensions");
    interp.init_functions(algorithm, pbcc, transition_reduction);

    let mut resizer = Resizer::new();
    resizer
        .set_source(source.clone())
        .set_target(Image::new(tw, th, 1))
        .set_interp(interp);
    resizer.optimize(true).expect("configuration is valid");
    resizer.resize().expect("resize");
    resizer.take_target().expect("target present")
}

fn main() {
    let source = sprite();

    let linear = upscale(&source, Algorithm::Linear, PbccMode::None, None);
    let plin = upscale(&source, Algorithm::PLin, PbccMode::None, None);
    let full = upscale(&source, Algorithm::PLin, PbccMode::Full, Some(2.0));

    // Scanline through the widest part of the diamond.
    let y = (3 * SCALE + SCALE / 2) as isize;
    println!("column,linear,plin,plin_pbcc_tar");
    for x in 0..source.width() * SCALE {
        println!(
            "{x},{},{},{}",
            linear.get(x as isize, y, 0),
            plin.get(x as isize, y, 0),
            full.get(x as isize, y, 0),
        );
    }
}
