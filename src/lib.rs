//! Tools for the celestium canvas renders.
//!
//! Two independent flows live here:
//!
//! - **Video**: backfill gaps in a directory of numbered frames
//!   (`0000000000.png`, `0000000001.png`, ...) by copying each missing frame's
//!   predecessor, then hand the contiguous sequence to the system `ffmpeg`.
//!   See [`run_video`].
//! - **Illustrate**: ring a fixed list of seed pixels on a folder of base
//!   images, keep each seed's own pixel untouched, then replicate, shuffle and
//!   crop the results into one looping GIF. See [`run_illustrate`].
//!
//! Both flows are sequential passes over small datasets. Errors are reported
//! through [`CanvasError`]; nothing is retried.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod frames;
mod illustrate;
mod pipeline;

pub use config::{IllustrateConfig, RandomSeedArea, VideoConfig};
pub use encode::ffmpeg::{
    FfmpegEncoder, SequenceEncodeConfig, StreamEncodeConfig, build_sequence_args,
    encode_sequence, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::core::{CropWindow, FrameIndex, Rgba8, Seed, WHITE};
pub use foundation::error::{CanvasError, CanvasResult};
pub use frames::gap_fill::{Backfill, GapFillReport, fill_gaps};
pub use frames::sequence::{FrameFile, FrameNaming, FrameSequence};
pub use illustrate::animation::{
    GifOpts, crop_all, crop_to, replicate, shuffle_frames, write_gif,
};
pub use illustrate::marker::{
    MarkerShape, MarkerStats, OutOfBounds, PixelCanvas, annotate, draw_marker,
};
pub use illustrate::seeds::{load_seeds, random_seeds, seeds_from_reader};
pub use pipeline::{IllustrateReport, VideoReport, list_images, run_illustrate, run_video};
