use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use px_core::{Image, TransformSetup};
use px_interp::{Algorithm, Cast2D, Interp, PbccMode, Transition};
use px_resample::Resizer;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "px_gallery")]
#[command(about = "Run the pixel-resample engine on image files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "resize")]
    Resize(ResizeArgs),
    #[command(name = "rotate")]
    Rotate(RotateArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    #[arg(long, default_value = "plin")]
    algorithm: String,
}

#[derive(Args, Debug, Clone)]
struct ResizeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    width: usize,
    #[arg(long, required = true)]
    height: usize,
    #[arg(long, default_value_t = false)]
    pbcc: bool,
    #[arg(long)]
    transition_reduction: Option<f32>,
    #[arg(long, default_value_t = false)]
    parallel: bool,
    #[arg(long, default_value_t = false)]
    cached: bool,
}

#[derive(Args, Debug, Clone)]
struct RotateArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    angle: f64,
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    #[arg(long, default_value = "linear")]
    coverage: String,
}

#[derive(Debug, Clone, Serialize)]
struct MetaResize {
    input: String,
    source_width: usize,
    source_height: usize,
    channels: usize,
    target_width: usize,
    target_height: usize,
    algorithm: &'static str,
    pbcc: bool,
    transition_reduction: Option<f32>,
    parallel: bool,
    cached: bool,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRotate {
    input: String,
    source_width: usize,
    source_height: usize,
    channels: usize,
    target_width: usize,
    target_height: usize,
    algorithm: &'static str,
    angle_degrees: f64,
    scale: f32,
    coverage: &'static str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Resize(args) => run_resize(&args),
        Command::Rotate(args) => run_rotate(&args),
    }
}

fn run_resize(args: &ResizeArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("target dimensions must be at least 1x1");
    }
    let algorithm = parse_algorithm(&args.common.algorithm)?;
    let source = load_image(&args.common.input)?;
    let (src_w, src_h, channels) = (source.width(), source.height(), source.channels());

    let mut interp = Interp::init_resize(src_w, src_h, args.width, args.height)
        .context("building interpolation setup")?;
    interp.init_functions(
        algorithm,
        if args.pbcc {
            PbccMode::Full
        } else {
            PbccMode::None
        },
        args.transition_reduction,
    );

    let mut resizer = Resizer::new();
    resizer
        .set_source(source)
        .set_target(Image::new(args.width, args.height, channels))
        .set_interp(interp);
    resizer
        .optimize(args.parallel)
        .context("validating resampler configuration")?;
    if args.cached {
        resizer.bake().context("baking coefficient cache")?;
    }
    resizer.resize().context("resampling")?;
    let target = resizer.take_target().expect("target was configured");

    let out_dir = &args.common.out;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    save_image(&out_dir.join("resized.png"), &target)?;
    write_json(
        out_dir.join("meta.json"),
        &MetaResize {
            input: args.common.input.display().to_string(),
            source_width: src_w,
            source_height: src_h,
            channels,
            target_width: args.width,
            target_height: args.height,
            algorithm: algorithm_name(algorithm),
            pbcc: args.pbcc,
            transition_reduction: args.transition_reduction,
            parallel: args.parallel,
            cached: args.cached,
        },
    )
}

fn run_rotate(args: &RotateArgs) -> Result<()> {
    let algorithm = parse_algorithm(&args.common.algorithm)?;
    let transition = parse_transition(&args.coverage)?;
    let source = load_image(&args.common.input)?;
    let (src_w, src_h, channels) = (source.width(), source.height(), source.channels());

    let pair = TransformSetup {
        rotation_angle: args.angle,
        scaling_x: args.scale,
        scaling_y: args.scale,
        ..TransformSetup::for_size(src_w, src_h)
    }
    .build()
    .context("building transformation")?;

    let mut interp = Interp::init_transformation(
        src_w,
        src_h,
        pair.target_width,
        pair.target_height,
        Cast2D::matrix(pair.inverse),
    )
    .context("building interpolation setup")?;
    interp.init_functions(algorithm, PbccMode::None, None);
    let coverage = interp
        .coverage(transition)
        .expect("matrix cast always has coverage");

    let mut resizer = Resizer::new();
    resizer
        .set_source(source)
        .set_target(Image::new(pair.target_width, pair.target_height, channels))
        .set_interp(interp);
    resizer
        .optimize(false)
        .context("validating resampler configuration")?;
    resizer.resize().context("resampling")?;
    let target = resizer.take_target().expect("target was configured");

    let mask = coverage.render(pair.target_width, pair.target_height);

    let out_dir = &args.common.out;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    save_image_with_alpha(&out_dir.join("rotated.png"), &target, &mask)?;
    write_json(
        out_dir.join("meta.json"),
        &MetaRotate {
            input: args.common.input.display().to_string(),
            source_width: src_w,
            source_height: src_h,
            channels,
            target_width: pair.target_width,
            target_height: pair.target_height,
            algorithm: algorithm_name(algorithm),
            angle_degrees: args.angle,
            scale: args.scale,
            coverage: transition_name(transition),
        },
    )
}

fn parse_algorithm(name: &str) -> Result<Algorithm> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Algorithm::Nearest),
        "linear" | "bilinear" => Ok(Algorithm::Linear),
        "plin" | "p-lin" => Ok(Algorithm::PLin),
        other => bail!("unknown algorithm {other:?} (nearest, linear, plin)"),
    }
}

fn algorithm_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Nearest => "nearest",
        Algorithm::Linear => "linear",
        Algorithm::PLin => "plin",
    }
}

fn parse_transition(name: &str) -> Result<Transition> {
    match name.to_lowercase().as_str() {
        "linear" => Ok(Transition::Linear),
        "step" => Ok(Transition::Step),
        "plin" | "p-lin" => Ok(Transition::PLin),
        other => bail!("unknown coverage transition {other:?} (linear, step, plin)"),
    }
}

fn transition_name(transition: Transition) -> &'static str {
    match transition {
        Transition::Linear => "linear",
        Transition::Step => "step",
        Transition::PLin => "plin",
    }
}

fn load_image(path: &Path) -> Result<Image<u8>> {
    let decoded =
        image::open(path).with_context(|| format!("opening image {}", path.display()))?;

    if decoded.color().has_color() {
        let rgb = decoded.to_rgb8();
        let (w, h) = rgb.dimensions();
        Image::from_vec(w as usize, h as usize, 3, rgb.into_raw())
            .context("wrapping decoded rgb buffer")
    } else {
        let gray = decoded.to_luma8();
        let (w, h) = gray.dimensions();
        Image::from_vec(w as usize, h as usize, 1, gray.into_raw())
            .context("wrapping decoded gray buffer")
    }
}

fn save_image(path: &Path, img: &Image<u8>) -> Result<()> {
    let (w, h) = (img.width() as u32, img.height() as u32);
    match img.channels() {
        1 => GrayImage::from_raw(w, h, img.data().to_vec())
            .expect("buffer matches dimensions")
            .save(path)
            .with_context(|| format!("writing image {}", path.display())),
        3 => RgbImage::from_raw(w, h, img.data().to_vec())
            .expect("buffer matches dimensions")
            .save(path)
            .with_context(|| format!("writing image {}", path.display())),
        other => bail!("cannot encode {other}-channel image"),
    }
}

fn save_image_with_alpha(path: &Path, img: &Image<u8>, mask: &Image<f32>) -> Result<()> {
    let (w, h) = (img.width() as u32, img.height() as u32);
    let alpha = |x: usize, y: usize| {
        (mask.get(x as isize, y as isize, 0) * 255.0).round() as u8
    };

    match img.channels() {
        1 => {
            let mut data = Vec::with_capacity(img.data().len() * 2);
            for y in 0..img.height() {
                for x in 0..img.width() {
                    data.push(img.get(x as isize, y as isize, 0));
                    data.push(alpha(x, y));
                }
            }
            GrayAlphaImage::from_raw(w, h, data)
                .expect("buffer matches dimensions")
                .save(path)
                .with_context(|| format!("writing image {}", path.display()))
        }
        3 => {
            let mut data = Vec::with_capacity(img.data().len() / 3 * 4);
            for y in 0..img.height() {
                for x in 0..img.width() {
                    data.extend_from_slice(img.pixel(x, y));
                    data.push(alpha(x, y));
                }
            }
            RgbaImage::from_raw(w, h, data)
                .expect("buffer matches dimensions")
                .save(path)
                .with_context(|| format!("writing image {}", path.display()))
        }
        other => bail!("cannot encode {other}-channel image"),
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}
