use crate::foundation::error::{CanvasError, CanvasResult};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = image::Rgba<u8>;

/// Opaque white, the marker ring color.
pub const WHITE: Rgba8 = image::Rgba([255, 255, 255, 255]);

/// Position of a frame in a numbered sequence (0-based).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The frame before this one, or `None` for frame 0.
    pub fn prev(self) -> Option<FrameIndex> {
        self.0.checked_sub(1).map(FrameIndex)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel coordinate around which a marker is drawn.
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Seed {
    /// Column, counted from the left edge.
    pub x: u32,
    /// Row, counted from the top edge.
    pub y: u32,
}

impl Seed {
    /// Build a seed at `(x, y)`.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Whether the seed addresses a pixel of a `width x height` image.
    pub fn is_inside(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl From<[u32; 2]> for Seed {
    fn from([x, y]: [u32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Seed> for [u32; 2] {
    fn from(s: Seed) -> Self {
        [s.x, s.y]
    }
}

/// Square crop region in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Side length in pixels.
    pub side: u32,
}

impl CropWindow {
    /// Square of `side` pixels centered on a `width x height` reference canvas.
    ///
    /// The window is fixed by the canvas, not by the images it is applied to.
    pub fn centered(width: u32, height: u32, side: u32) -> CanvasResult<Self> {
        if side == 0 {
            return Err(CanvasError::validation("crop side must be non-zero"));
        }
        if side > width || side > height {
            return Err(CanvasError::validation(format!(
                "crop window {side}x{side} does not fit inside a {width}x{height} image"
            )));
        }
        Ok(Self {
            left: width / 2 - side / 2,
            top: height / 2 - side / 2,
            side,
        })
    }

    /// Right edge (exclusive).
    pub fn right(self) -> u32 {
        self.left + self.side
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> u32 {
        self.top + self.side
    }

    /// Whether the window lies entirely inside a `width x height` image.
    pub fn fits(self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
