//! Run settings for both pipelines.
//!
//! `Default` reproduces the fixed constants the tools have always used; the
//! command line only overrides individual fields.

use std::path::PathBuf;

use crate::encode::ffmpeg::SequenceEncodeConfig;
use crate::foundation::core::CropWindow;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::frames::sequence::FrameNaming;
use crate::illustrate::animation::GifOpts;
use crate::illustrate::marker::MarkerShape;

/// Settings for backfilling and encoding a frame directory.
#[derive(Clone, Debug)]
pub struct VideoConfig {
    /// Directory holding the numbered frames.
    pub frames_dir: PathBuf,
    /// Frame file naming scheme.
    pub naming: FrameNaming,
    /// Input frame rate.
    pub fps: u32,
    /// `ffmpeg` video codec.
    pub codec: String,
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite the output if it exists.
    pub overwrite: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("video"),
            naming: FrameNaming::default(),
            fps: 120,
            codec: "libx265".to_string(),
            out_path: PathBuf::from("canvas.mp4"),
            overwrite: true,
        }
    }
}

impl VideoConfig {
    /// Reject settings that cannot produce a video.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.naming.width == 0 {
            return Err(CanvasError::validation("frame name width must be non-zero"));
        }
        if self.naming.extension.is_empty() || self.naming.extension.starts_with('.') {
            return Err(CanvasError::validation(
                "frame extension must be non-empty and given without a leading dot",
            ));
        }
        self.encode_config().validate()
    }

    /// `ffmpeg` invocation settings for this run.
    pub fn encode_config(&self) -> SequenceEncodeConfig {
        SequenceEncodeConfig {
            input_pattern: self.frames_dir.join(self.naming.ffmpeg_pattern()),
            fps: self.fps,
            codec: self.codec.clone(),
            out_path: self.out_path.clone(),
            overwrite: self.overwrite,
        }
    }
}

/// Canvas used to draw replacement seeds at random.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomSeedArea {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Minimum distance from every edge.
    pub margin: u32,
}

impl Default for RandomSeedArea {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            margin: 2,
        }
    }
}

/// Settings for the seed-marker illustration.
#[derive(Clone, Debug)]
pub struct IllustrateConfig {
    /// JSON file with the `[x, y]` seed list.
    pub seeds_path: PathBuf,
    /// Directory of base images.
    pub images_dir: PathBuf,
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Ring drawn around each seed.
    pub marker: MarkerShape,
    /// Copies of the processed set in the animation.
    pub replication: usize,
    /// Side of the square crop.
    pub crop_side: u32,
    /// Reference canvas `(width, height)` the crop window is centered on.
    ///
    /// The window is computed once and applied unchanged to every image, so
    /// every image must be at least `right x bottom` of that window.
    pub crop_canvas: (u32, u32),
    /// Fixed shuffle seed; `None` draws from the thread RNG.
    pub shuffle_seed: Option<u64>,
    /// Replace the loaded seeds with as many random ones in this area.
    pub random_seeds: Option<RandomSeedArea>,
    /// GIF encoding settings.
    pub gif: GifOpts,
    /// Also stream the animation to this MP4.
    pub video_out: Option<PathBuf>,
    /// Frame rate of the optional MP4.
    pub video_fps: u32,
    /// Decode and annotate images on the rayon pool.
    pub parallel: bool,
}

impl Default for IllustrateConfig {
    fn default() -> Self {
        Self {
            seeds_path: PathBuf::from("random.json"),
            images_dir: PathBuf::from("images"),
            out_path: PathBuf::from("out.gif"),
            marker: MarkerShape::Small,
            replication: 100,
            crop_side: 200,
            crop_canvas: (1280, 720),
            shuffle_seed: None,
            random_seeds: None,
            gif: GifOpts::default(),
            video_out: None,
            video_fps: 60,
            parallel: false,
        }
    }
}

impl IllustrateConfig {
    /// Reject settings that cannot produce an animation.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.replication == 0 {
            return Err(CanvasError::validation("replication factor must be non-zero"));
        }
        self.crop_window()?;
        if self.video_out.is_some() && self.video_fps == 0 {
            return Err(CanvasError::validation("video fps must be non-zero"));
        }
        if !(1..=30).contains(&self.gif.speed) {
            return Err(CanvasError::validation(format!(
                "gif speed must be within 1..=30, got {}",
                self.gif.speed
            )));
        }
        Ok(())
    }

    /// The crop window shared by every image of the run.
    pub fn crop_window(&self) -> CanvasResult<CropWindow> {
        let (width, height) = self.crop_canvas;
        CropWindow::centered(width, height, self.crop_side)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
