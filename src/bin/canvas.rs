use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use celestium_canvas::{
    FrameNaming, GifOpts, IllustrateConfig, MarkerShape, RandomSeedArea, VideoConfig,
};

#[derive(Parser, Debug)]
#[command(name = "canvas", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backfill missing frames and encode them to a video (requires `ffmpeg` on PATH).
    Video(VideoArgs),
    /// Ring seed pixels on base images and assemble a shuffled, cropped GIF.
    Illustrate(IllustrateArgs),
}

#[derive(Parser, Debug)]
struct VideoArgs {
    /// Directory of numbered frames.
    #[arg(long, default_value = "video")]
    frames: PathBuf,

    /// Output video path.
    #[arg(long, default_value = "canvas.mp4")]
    out: PathBuf,

    /// Input frame rate.
    #[arg(long, default_value_t = 120)]
    fps: u32,

    /// ffmpeg video codec.
    #[arg(long, default_value = "libx265")]
    codec: String,

    /// Digits frame indices are zero-padded to.
    #[arg(long, default_value_t = 10)]
    pad: usize,

    /// Frame file extension.
    #[arg(long, default_value = "png")]
    ext: String,

    /// Keep an existing output instead of overwriting it.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct IllustrateArgs {
    /// JSON file with the `[x, y]` seed list.
    #[arg(long, default_value = "random.json")]
    seeds: PathBuf,

    /// Directory of base images.
    #[arg(long, default_value = "images")]
    images: PathBuf,

    /// Output GIF path.
    #[arg(long, default_value = "out.gif")]
    out: PathBuf,

    /// Ring drawn around each seed.
    #[arg(long, value_enum, default_value_t = MarkerChoice::Small)]
    marker: MarkerChoice,

    /// Copies of the processed image set in the animation.
    #[arg(long, default_value_t = 100)]
    replication: usize,

    /// Side of the square crop.
    #[arg(long, default_value_t = 200)]
    crop: u32,

    /// Reference canvas `WIDTHxHEIGHT` the crop window is centered on.
    /// The same window is applied to every image.
    #[arg(long, value_parser = parse_dimensions, default_value = "1280x720")]
    crop_canvas: (u32, u32),

    /// Fixed shuffle seed for reproducible output.
    #[arg(long)]
    shuffle_seed: Option<u64>,

    /// Replace the loaded seeds with as many random coordinates.
    #[arg(long)]
    randomize_seeds: bool,

    /// Per-frame GIF delay in milliseconds (0 leaves it to the viewer).
    #[arg(long, default_value_t = 0)]
    frame_delay_ms: u32,

    /// GIF quantizer speed, 1 (best) to 30 (fastest).
    #[arg(long, default_value_t = 10)]
    gif_speed: i32,

    /// Also write the animation as an MP4 (requires `ffmpeg` on PATH).
    #[arg(long)]
    video_out: Option<PathBuf>,

    /// Frame rate of the optional MP4.
    #[arg(long, default_value_t = 60)]
    video_fps: u32,

    /// Decode and annotate images in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarkerChoice {
    Small,
    Large,
}

fn parse_dimensions(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Video(args) => cmd_video(args),
        Command::Illustrate(args) => cmd_illustrate(args),
    }
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let cfg = VideoConfig {
        frames_dir: args.frames,
        naming: FrameNaming {
            width: args.pad,
            extension: args.ext,
        },
        fps: args.fps,
        codec: args.codec,
        out_path: args.out,
        overwrite: !args.no_overwrite,
    };

    let report = celestium_canvas::run_video(&cfg)?;
    for b in &report.gaps.filled {
        eprintln!("backfilled {} from {}", b.target.display(), b.source.display());
    }
    eprintln!(
        "wrote {} ({} frames)",
        report.out_path.display(),
        report.gaps.frame_count()
    );
    Ok(())
}

fn cmd_illustrate(args: IllustrateArgs) -> anyhow::Result<()> {
    let cfg = IllustrateConfig {
        seeds_path: args.seeds,
        images_dir: args.images,
        out_path: args.out,
        marker: match args.marker {
            MarkerChoice::Small => MarkerShape::Small,
            MarkerChoice::Large => MarkerShape::Large,
        },
        replication: args.replication,
        crop_side: args.crop,
        crop_canvas: args.crop_canvas,
        shuffle_seed: args.shuffle_seed,
        random_seeds: args.randomize_seeds.then(RandomSeedArea::default),
        gif: GifOpts {
            frame_delay_ms: args.frame_delay_ms,
            speed: args.gif_speed,
        },
        video_out: args.video_out,
        video_fps: args.video_fps,
        parallel: args.parallel,
    };

    let report = celestium_canvas::run_illustrate(&cfg)?;
    eprintln!(
        "wrote {} ({} frames from {} images)",
        report.gif_path.display(),
        report.frames,
        report.images
    );
    if let Some(path) = &report.video_path {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
