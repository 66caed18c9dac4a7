use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::Rng;

use crate::foundation::core::Seed;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Parse a JSON array of `[x, y]` pairs.
pub fn seeds_from_reader<R: std::io::Read>(r: R) -> CanvasResult<Vec<Seed>> {
    serde_json::from_reader(r)
        .map_err(|e| CanvasError::validation(format!("parse seed list JSON: {e}")))
}

/// Load the seed list from a JSON file on disk.
pub fn load_seeds(path: impl AsRef<Path>) -> CanvasResult<Vec<Seed>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        CanvasError::validation(format!("open seed list '{}': {e}", path.display()))
    })?;
    let seeds = seeds_from_reader(BufReader::new(f))?;
    tracing::debug!(path = %path.display(), count = seeds.len(), "loaded seeds");
    Ok(seeds)
}

/// `count` seeds drawn uniformly from `[margin, width - margin] x [margin, height - margin]`.
///
/// Both bounds are inclusive, so with `margin = 2` a 1280x720 canvas yields
/// `x` in `2..=1278` and `y` in `2..=718`.
pub fn random_seeds<R: Rng + ?Sized>(
    count: usize,
    width: u32,
    height: u32,
    margin: u32,
    rng: &mut R,
) -> CanvasResult<Vec<Seed>> {
    if margin == 0 {
        return Err(CanvasError::validation("seed margin must be at least 1"));
    }
    if margin.saturating_mul(2) > width || margin.saturating_mul(2) > height {
        return Err(CanvasError::validation(format!(
            "seed margin {margin} leaves no room inside a {width}x{height} canvas"
        )));
    }

    Ok((0..count)
        .map(|_| {
            Seed::new(
                rng.gen_range(margin..=width - margin),
                rng.gen_range(margin..=height - margin),
            )
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/illustrate/seeds.rs"]
mod tests;
