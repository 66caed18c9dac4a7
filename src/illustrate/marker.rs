use image::RgbaImage;

use crate::foundation::core::{Rgba8, Seed, WHITE};
use crate::foundation::error::{CanvasError, CanvasResult};

/// A write that landed outside the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    /// Requested column.
    pub x: i64,
    /// Requested row.
    pub y: i64,
}

/// Mutable view over an RGBA image with signed, bounds-checked pixel access.
pub struct PixelCanvas<'a> {
    img: &'a mut RgbaImage,
}

impl<'a> PixelCanvas<'a> {
    /// Wrap `img` for marker drawing.
    pub fn new(img: &'a mut RgbaImage) -> Self {
        Self { img }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    fn in_bounds(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.img.width() && y < self.img.height()).then_some((x, y))
    }

    /// Write `px` at `(x, y)`. Leaves the image untouched outside its bounds.
    pub fn try_put_pixel(&mut self, x: i64, y: i64, px: Rgba8) -> Result<(), OutOfBounds> {
        let (ux, uy) = self.in_bounds(x, y).ok_or(OutOfBounds { x, y })?;
        self.img.put_pixel(ux, uy, px);
        Ok(())
    }
}

/// Ring pattern drawn around a seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerShape {
    /// 3x3 ring: the 8 neighbours of the seed.
    #[default]
    Small,
    /// 5x5 ring: the 16 pixels at distance 2 from the seed.
    Large,
}

impl MarkerShape {
    /// Distance of the ring from its center, in pixels.
    pub fn radius(self) -> i64 {
        match self {
            MarkerShape::Small => 1,
            MarkerShape::Large => 2,
        }
    }

    /// Ring pixel offsets relative to the center, row by row from the top.
    pub fn offsets(self) -> impl Iterator<Item = (i64, i64)> {
        let r = self.radius();
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(move |&(dx, dy)| dx.abs().max(dy.abs()) == r)
    }
}

/// Pixel counts of one [`draw_marker`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerStats {
    /// Ring pixels written.
    pub drawn: u32,
    /// Ring pixels skipped because they fell outside the image.
    pub clipped: u32,
}

impl std::ops::AddAssign for MarkerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.clipped += rhs.clipped;
    }
}

/// Draw the `shape` ring around `seed` in `color`.
///
/// Ring pixels outside the image are skipped and counted in
/// [`MarkerStats::clipped`].
pub fn draw_marker(
    canvas: &mut PixelCanvas<'_>,
    seed: Seed,
    shape: MarkerShape,
    color: Rgba8,
) -> MarkerStats {
    let (cx, cy) = (i64::from(seed.x), i64::from(seed.y));
    let mut stats = MarkerStats::default();
    for (dx, dy) in shape.offsets() {
        match canvas.try_put_pixel(cx + dx, cy + dy, color) {
            Ok(()) => stats.drawn += 1,
            Err(OutOfBounds { x, y }) => {
                tracing::trace!(x, y, "marker pixel outside image");
                stats.clipped += 1;
            }
        }
    }
    stats
}

/// Ring every seed in white while keeping each seed's own pixel unchanged.
///
/// All seed pixels are sampled before any ring is drawn and written back after
/// the last one, so a seed covered by a neighbour's ring keeps its color too.
pub fn annotate(
    img: &mut RgbaImage,
    seeds: &[Seed],
    shape: MarkerShape,
) -> CanvasResult<MarkerStats> {
    let (width, height) = img.dimensions();

    let mut originals = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        if !seed.is_inside(width, height) {
            return Err(CanvasError::validation(format!(
                "seed ({}, {}) lies outside the {width}x{height} image",
                seed.x, seed.y
            )));
        }
        originals.push((seed, *img.get_pixel(seed.x, seed.y)));
    }

    let mut canvas = PixelCanvas::new(img);
    let mut stats = MarkerStats::default();
    for &seed in seeds {
        stats += draw_marker(&mut canvas, seed, shape, WHITE);
    }

    for (seed, px) in originals {
        img.put_pixel(seed.x, seed.y, px);
    }

    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/illustrate/marker.rs"]
mod tests;
