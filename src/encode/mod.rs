//! Video encoding through the system `ffmpeg` binary.

/// Sequence and streaming `ffmpeg` encoders.
pub mod ffmpeg;
