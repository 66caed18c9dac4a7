use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::frames::sequence::FrameSequence;

/// A frame file created by copying its predecessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backfill {
    /// Index that was missing.
    pub index: FrameIndex,
    /// File the copy was taken from.
    pub source: PathBuf,
    /// File that was written.
    pub target: PathBuf,
}

/// Outcome of [`fill_gaps`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapFillReport {
    /// Highest frame index in the directory.
    pub max_index: FrameIndex,
    /// Substitutions made, in index order.
    pub filled: Vec<Backfill>,
}

impl GapFillReport {
    /// Number of frames in the now contiguous sequence.
    pub fn frame_count(&self) -> u64 {
        self.max_index.0 + 1
    }
}

/// Make every index in `0..=max_index` resolve to a canonical frame file.
///
/// A missing frame is replaced by a copy of the frame before it. Gaps are filled
/// in ascending order, so a run of missing frames repeats the last frame that
/// existed before the run. Frame 0 has no predecessor; if it is missing nothing
/// is copied and a validation error is returned.
#[tracing::instrument(skip(seq), fields(dir = %seq.dir().display()))]
pub fn fill_gaps(seq: &FrameSequence) -> CanvasResult<GapFillReport> {
    let max_index = seq.max_index()?;
    let missing = seq.missing()?;

    if missing.first() == Some(&FrameIndex(0)) {
        return Err(CanvasError::validation(format!(
            "frame 0 ('{}') is missing and has no predecessor to copy from",
            seq.path_for(FrameIndex(0)).display()
        )));
    }

    let mut filled = Vec::with_capacity(missing.len());
    for index in missing {
        let Some(prev) = index.prev() else {
            continue;
        };
        let source = seq.path_for(prev);
        let target = seq.path_for(index);
        tracing::warn!(
            frame = index.0,
            source = %source.display(),
            "frame missing, copying predecessor"
        );
        std::fs::copy(&source, &target).with_context(|| {
            format!(
                "copy frame '{}' -> '{}'",
                source.display(),
                target.display()
            )
        })?;
        filled.push(Backfill {
            index,
            source,
            target,
        });
    }

    tracing::info!(
        frames = max_index.0 + 1,
        backfilled = filled.len(),
        "frame sequence is contiguous"
    );
    Ok(GapFillReport { max_index, filled })
}

#[cfg(test)]
#[path = "../../tests/unit/frames/gap_fill.rs"]
mod tests;
