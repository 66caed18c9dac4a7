use std::ffi::OsString;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbaImage;

use crate::foundation::error::{CanvasError, CanvasResult};

/// Settings for encoding a numbered image sequence already on disk.
#[derive(Clone, Debug)]
pub struct SequenceEncodeConfig {
    /// `printf`-style input pattern, e.g. `video/%010d.png`.
    pub input_pattern: PathBuf,
    /// Frames per second of the input sequence.
    pub fps: u32,
    /// Video codec passed to `-c:v`.
    pub codec: String,
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl SequenceEncodeConfig {
    /// Check the settings before spawning `ffmpeg`.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.fps == 0 {
            return Err(CanvasError::validation("encode fps must be non-zero"));
        }
        if self.codec.trim().is_empty() {
            return Err(CanvasError::validation("encode codec must be non-empty"));
        }
        if self.input_pattern.as_os_str().is_empty() {
            return Err(CanvasError::validation("input pattern must be non-empty"));
        }
        Ok(())
    }
}

/// Arguments passed to `ffmpeg` for a sequence encode (program name excluded).
pub fn build_sequence_args(cfg: &SequenceEncodeConfig) -> Vec<OsString> {
    let overwrite = if cfg.overwrite { "-y" } else { "-n" };
    let mut args: Vec<OsString> = vec![overwrite.into()];
    for a in ["-loglevel", "error", "-framerate"] {
        args.push(a.into());
    }
    args.push(cfg.fps.to_string().into());
    for a in ["-start_number", "0", "-i"] {
        args.push(a.into());
    }
    args.push(cfg.input_pattern.clone().into_os_string());
    args.push("-c:v".into());
    args.push(cfg.codec.clone().into());
    args.push(cfg.out_path.clone().into_os_string());
    args
}

/// Encode the image sequence described by `cfg` with a single `ffmpeg` run.
///
/// Blocks until `ffmpeg` exits. A non-zero exit status is reported together
/// with whatever `ffmpeg` printed to stderr.
#[tracing::instrument(skip(cfg), fields(out = %cfg.out_path.display(), fps = cfg.fps))]
pub fn encode_sequence(cfg: &SequenceEncodeConfig) -> CanvasResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(CanvasError::validation(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if !is_ffmpeg_on_path() {
        return Err(CanvasError::encode(
            "ffmpeg is required for video encoding, but was not found on PATH",
        ));
    }

    let output = Command::new("ffmpeg")
        .args(build_sequence_args(cfg))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            CanvasError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CanvasError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    tracing::info!("encoded video");
    Ok(())
}

/// Settings for [`FfmpegEncoder`], which streams in-memory frames to MP4.
#[derive(Clone, Debug)]
pub struct StreamEncodeConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background used to flatten transparent pixels (straight RGBA8).
    pub bg_rgba: [u8; 4],
}

impl StreamEncodeConfig {
    /// Check the settings before spawning `ffmpeg`.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(CanvasError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2.
            return Err(CanvasError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        self.frame_len()?;
        Ok(())
    }

    /// Byte length of one RGBA8 frame.
    pub fn frame_len(&self) -> CanvasResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                CanvasError::validation(format!(
                    "encode frame {}x{} is too large to buffer",
                    self.width, self.height
                ))
            })
    }
}

/// Spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
pub struct FfmpegEncoder {
    cfg: StreamEncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    frames: u64,
}

impl FfmpegEncoder {
    /// Start an `ffmpeg` process ready to receive frames.
    pub fn new(cfg: StreamEncodeConfig) -> CanvasResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(CanvasError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(CanvasError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let frame_len = cfg.frame_len()?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            CanvasError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CanvasError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| CanvasError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            scratch: vec![0u8; frame_len],
            cfg,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            frames: 0,
        })
    }

    /// Flatten `frame` over the background and write it to `ffmpeg`.
    pub fn encode_frame(&mut self, frame: &RgbaImage) -> CanvasResult<()> {
        if frame.width() != self.cfg.width || frame.height() != self.cfg.height {
            return Err(CanvasError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.cfg.width,
                self.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(&mut self.scratch, frame.as_raw(), self.cfg.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(CanvasError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            CanvasError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Close stdin, wait for `ffmpeg` and surface a failed exit status.
    pub fn finish(mut self) -> CanvasResult<u64> {
        drop(self.stdin.take());

        let status = self.child.wait().map_err(|e| {
            CanvasError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| CanvasError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| CanvasError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(CanvasError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        Ok(self.frames)
    }
}

fn flatten_to_opaque_rgba8(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> CanvasResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CanvasError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (mul_div255(s[0] as u16, a) + mul_div255(bg_r, inv)).min(255) as u8;
        d[1] = (mul_div255(s[1] as u16, a) + mul_div255(bg_g, inv)).min(255) as u8;
        d[2] = (mul_div255(s[2] as u16, a) + mul_div255(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> CanvasResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
