//! Numbered frame directories.

/// Backfilling of missing frames.
pub mod gap_fill;
/// Frame naming and directory scanning.
pub mod sequence;
