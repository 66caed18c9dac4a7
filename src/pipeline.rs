use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::config::{IllustrateConfig, VideoConfig};
use crate::encode::ffmpeg::{FfmpegEncoder, StreamEncodeConfig, encode_sequence};
use crate::foundation::core::Seed;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::frames::gap_fill::{GapFillReport, fill_gaps};
use crate::frames::sequence::FrameSequence;
use crate::illustrate::animation::{crop_all, replicate, shuffle_frames, write_gif};
use crate::illustrate::marker::{MarkerShape, MarkerStats, annotate};
use crate::illustrate::seeds::{load_seeds, random_seeds};

/// Outcome of [`run_video`].
#[derive(Clone, Debug)]
pub struct VideoReport {
    /// Backfilled frames and sequence length.
    pub gaps: GapFillReport,
    /// Encoded video path.
    pub out_path: PathBuf,
}

/// Backfill missing frames in `cfg.frames_dir`, then encode the sequence.
#[tracing::instrument(skip(cfg), fields(dir = %cfg.frames_dir.display()))]
pub fn run_video(cfg: &VideoConfig) -> CanvasResult<VideoReport> {
    cfg.validate()?;

    let seq = FrameSequence::scan(&cfg.frames_dir, cfg.naming.clone())?;
    let gaps = fill_gaps(&seq)?;
    encode_sequence(&cfg.encode_config())?;

    Ok(VideoReport {
        gaps,
        out_path: cfg.out_path.clone(),
    })
}

/// Outcome of [`run_illustrate`].
#[derive(Clone, Debug)]
pub struct IllustrateReport {
    /// Base images processed.
    pub images: usize,
    /// Seeds ringed in each image.
    pub seeds: usize,
    /// Marker pixels drawn and clipped over all images.
    pub markers: MarkerStats,
    /// Frames in the animation.
    pub frames: usize,
    /// Written GIF.
    pub gif_path: PathBuf,
    /// Written MP4, when requested.
    pub video_path: Option<PathBuf>,
}

/// Ring the seeds on every base image and assemble the shuffled, cropped GIF.
///
/// One crop window, centered on `cfg.crop_canvas`, is applied to every image;
/// an image too small to contain it fails the run.
#[tracing::instrument(skip(cfg), fields(images = %cfg.images_dir.display()))]
pub fn run_illustrate(cfg: &IllustrateConfig) -> CanvasResult<IllustrateReport> {
    cfg.validate()?;
    let window = cfg.crop_window()?;

    let mut rng = match cfg.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut seeds = load_seeds(&cfg.seeds_path)?;
    if let Some(area) = cfg.random_seeds {
        seeds = random_seeds(seeds.len(), area.width, area.height, area.margin, &mut rng)?;
        tracing::info!(count = seeds.len(), "replaced seeds with random coordinates");
    }

    let paths = list_images(&cfg.images_dir)?;
    if paths.is_empty() {
        return Err(CanvasError::validation(format!(
            "no images found in '{}'",
            cfg.images_dir.display()
        )));
    }
    tracing::info!(images = paths.len(), seeds = seeds.len(), "annotating");

    let annotated: Vec<(RgbaImage, MarkerStats)> = if cfg.parallel {
        paths
            .par_iter()
            .map(|p| load_and_annotate(p, &seeds, cfg.marker))
            .collect::<CanvasResult<_>>()?
    } else {
        paths
            .iter()
            .map(|p| load_and_annotate(p, &seeds, cfg.marker))
            .collect::<CanvasResult<_>>()?
    };

    let mut markers = MarkerStats::default();
    let mut processed = Vec::with_capacity(annotated.len());
    for (img, stats) in annotated {
        markers += stats;
        processed.push(img);
    }
    if markers.clipped > 0 {
        tracing::debug!(clipped = markers.clipped, "marker pixels fell outside images");
    }

    // Every copy of an image gets the same window, so crop once and replicate
    // indices instead of pixels.
    let crops = crop_all(&processed, window)?;
    drop(processed);

    let indices: Vec<usize> = (0..crops.len()).collect();
    let mut order = replicate(&indices, cfg.replication);
    shuffle_frames(&mut order, &mut rng);

    let frames = write_gif(&cfg.out_path, order.iter().map(|&i| &crops[i]), cfg.gif)?;

    let video_path = match &cfg.video_out {
        Some(path) => {
            let mut enc = FfmpegEncoder::new(StreamEncodeConfig {
                width: window.side,
                height: window.side,
                fps: cfg.video_fps,
                out_path: path.clone(),
                overwrite: true,
                bg_rgba: [0, 0, 0, 255],
            })?;
            for &i in &order {
                enc.encode_frame(&crops[i])?;
            }
            let written = enc.finish()?;
            tracing::info!(frames = written, path = %path.display(), "wrote video");
            Some(path.clone())
        }
        None => None,
    };

    Ok(IllustrateReport {
        images: crops.len(),
        seeds: seeds.len(),
        markers,
        frames,
        gif_path: cfg.out_path.clone(),
        video_path,
    })
}

/// Image files directly inside `dir`, in path order.
///
/// Entries whose extension is not a known image format are skipped.
pub fn list_images(dir: &Path) -> CanvasResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read image directory '{}'", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read entry of '{}'", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        if image::ImageFormat::from_path(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping non-image file");
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}

fn load_and_annotate(
    path: &Path,
    seeds: &[Seed],
    shape: MarkerShape,
) -> CanvasResult<(RgbaImage, MarkerStats)> {
    let mut img = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgba8();
    let stats = annotate(&mut img, seeds, shape).map_err(|e| match e {
        CanvasError::Validation(msg) => {
            CanvasError::validation(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;
    Ok((img, stats))
}
