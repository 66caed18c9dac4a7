use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CanvasError, CanvasResult};

/// File naming scheme of a frame directory: zero-padded index plus extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameNaming {
    /// Number of digits the index is padded to.
    pub width: usize,
    /// Extension without the leading dot.
    pub extension: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            width: 10,
            extension: "png".to_string(),
        }
    }
}

impl FrameNaming {
    /// Canonical file name for `idx`, e.g. `0000000042.png`.
    pub fn file_name(&self, idx: FrameIndex) -> String {
        format!("{:0width$}.{}", idx.0, self.extension, width = self.width)
    }

    /// Canonical path for `idx` inside `dir`.
    pub fn path_for(&self, dir: &Path, idx: FrameIndex) -> PathBuf {
        dir.join(self.file_name(idx))
    }

    /// `printf`-style pattern understood by the `ffmpeg` image2 demuxer.
    pub fn ffmpeg_pattern(&self) -> String {
        format!("%0{}d.{}", self.width, self.extension)
    }

    /// Frame index encoded in `path`, if its extension matches and its stem is numeric.
    pub fn parse_index(&self, path: &Path) -> Option<FrameIndex> {
        let ext = path.extension()?.to_str()?;
        if !ext.eq_ignore_ascii_case(&self.extension) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        stem.parse::<u64>().ok().map(FrameIndex)
    }
}

/// One frame file found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameFile {
    /// Index parsed from the file name.
    pub index: FrameIndex,
    /// Location of the file.
    pub path: PathBuf,
}

/// Frame files of a directory, ordered by index.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    dir: PathBuf,
    naming: FrameNaming,
    frames: Vec<FrameFile>,
}

impl FrameSequence {
    /// List `dir` and collect every file that names a frame under `naming`.
    ///
    /// Files that do not follow the naming scheme are skipped with a warning.
    pub fn scan(dir: impl Into<PathBuf>, naming: FrameNaming) -> CanvasResult<Self> {
        let dir = dir.into();
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("read frame directory '{}'", dir.display()))?;

        let mut frames = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("read entry of '{}'", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match naming.parse_index(&path) {
                Some(index) => frames.push(FrameFile { index, path }),
                None => tracing::warn!(path = %path.display(), "skipping non-frame file"),
            }
        }
        frames.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));

        Ok(Self { dir, naming, frames })
    }

    /// Directory the sequence was scanned from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames found on disk, ordered by index.
    pub fn frames(&self) -> &[FrameFile] {
        &self.frames
    }

    /// Highest index present.
    pub fn max_index(&self) -> CanvasResult<FrameIndex> {
        self.frames.last().map(|f| f.index).ok_or_else(|| {
            CanvasError::validation(format!(
                "no frames named like '{}' in '{}'",
                self.naming.file_name(FrameIndex(0)),
                self.dir.display()
            ))
        })
    }

    /// Canonical path for `idx` in this sequence's directory.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.naming.path_for(&self.dir, idx)
    }

    /// Indices in `0..=max_index` whose canonical file does not exist.
    pub fn missing(&self) -> CanvasResult<Vec<FrameIndex>> {
        let max = self.max_index()?;
        Ok((0..=max.0)
            .map(FrameIndex)
            .filter(|&idx| !self.path_for(idx).is_file())
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/sequence.rs"]
mod tests;
