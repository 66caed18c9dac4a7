use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use rand::Rng;
use rand::seq::SliceRandom as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::core::CropWindow;
use crate::foundation::error::{CanvasError, CanvasResult};

/// `factor` back-to-back copies of `items`.
pub fn replicate<T: Clone>(items: &[T], factor: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * factor);
    for _ in 0..factor {
        out.extend_from_slice(items);
    }
    out
}

/// Shuffle `items` in place.
pub fn shuffle_frames<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Crop `img` to `window`.
///
/// The window is not moved or clamped; an image it does not fit inside is
/// rejected.
pub fn crop_to(img: &RgbaImage, window: CropWindow) -> CanvasResult<RgbaImage> {
    if !window.fits(img.width(), img.height()) {
        return Err(CanvasError::validation(format!(
            "crop window {side}x{side} at ({}, {}) does not fit inside a {}x{} image",
            window.left,
            window.top,
            img.width(),
            img.height(),
            side = window.side
        )));
    }
    Ok(image::imageops::crop_imm(img, window.left, window.top, window.side, window.side).to_image())
}

/// Crop every frame to the same `window`.
pub fn crop_all(frames: &[RgbaImage], window: CropWindow) -> CanvasResult<Vec<RgbaImage>> {
    frames.iter().map(|f| crop_to(f, window)).collect()
}

/// GIF output settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifOpts {
    /// Per-frame delay in milliseconds; 0 leaves it to the viewer.
    pub frame_delay_ms: u32,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: 0,
            speed: 10,
        }
    }
}

/// Write `frames` in order as one infinitely looping GIF. Returns the frame count.
#[tracing::instrument(skip(path, frames), fields(path = %path.display()))]
pub fn write_gif<'a, I>(path: &Path, frames: I, opts: GifOpts) -> CanvasResult<usize>
where
    I: IntoIterator<Item = &'a RgbaImage>,
{
    if !(1..=30).contains(&opts.speed) {
        return Err(CanvasError::validation(format!(
            "gif speed must be within 1..=30, got {}",
            opts.speed
        )));
    }

    let mut frames = frames.into_iter().peekable();
    if frames.peek().is_none() {
        return Err(CanvasError::validation("cannot write a gif with no frames"));
    }

    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create gif '{}'", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), opts.speed);
    encoder
        .set_repeat(Repeat::Infinite)
        .context("set gif repeat")?;

    let delay = Delay::from_numer_denom_ms(opts.frame_delay_ms, 1);
    let mut count = 0usize;
    for img in frames {
        encoder
            .encode_frame(Frame::from_parts(img.clone(), 0, 0, delay))
            .with_context(|| format!("encode gif frame {count}"))?;
        count += 1;
    }

    tracing::info!(frames = count, "wrote gif");
    Ok(count)
}

#[cfg(test)]
#[path = "../../tests/unit/illustrate/animation.rs"]
mod tests;
