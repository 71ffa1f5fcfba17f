//! Pure Deep Zoom geometry: level counts, per-level dimensions, tile grids.
//!
//! All functions here are pure and testable without any I/O or images.

/// Tile edge length in pixels, before overlap.
pub const TILE_SIZE: u32 = 254;

/// Pixels of overlap added on interior tile edges.
pub const TILE_OVERLAP: u32 = 1;

/// Number of pyramid levels for a full-resolution size.
///
/// Level 0 is at most 1x1; the highest level is the original size. Each
/// step down halves both dimensions (rounding up).
pub fn level_count(width: u32, height: u32) -> u32 {
    let mut dim = width.max(height).max(1);
    let mut levels = 1;
    while dim > 1 {
        dim = dim.div_ceil(2);
        levels += 1;
    }
    levels
}

/// Dimensions of `level`, where `max_level` is full resolution.
pub fn level_dimensions(width: u32, height: u32, level: u32, max_level: u32) -> (u32, u32) {
    let mut w = width.max(1);
    let mut h = height.max(1);
    for _ in level..max_level {
        w = w.div_ceil(2);
        h = h.div_ceil(2);
    }
    (w, h)
}

/// Tile columns and rows covering the given level dimensions.
pub fn tile_grid(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(TILE_SIZE), height.div_ceil(TILE_SIZE))
}

/// Pixel rectangle `(x, y, w, h)` of tile `(col, row)` at the given level
/// dimensions, including overlap on interior edges and clipped to the level.
pub fn tile_rect(width: u32, height: u32, col: u32, row: u32) -> (u32, u32, u32, u32) {
    let x = col * TILE_SIZE - if col > 0 { TILE_OVERLAP } else { 0 };
    let y = row * TILE_SIZE - if row > 0 { TILE_OVERLAP } else { 0 };

    let mut w = TILE_SIZE + if col > 0 { 2 * TILE_OVERLAP } else { TILE_OVERLAP };
    let mut h = TILE_SIZE + if row > 0 { 2 * TILE_OVERLAP } else { TILE_OVERLAP };
    w = w.min(width - x);
    h = h.min(height - y);

    (x, y, w, h)
}
