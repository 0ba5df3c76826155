//! Pixel Masks
//!
//! Bit-packed opacity fields used for exact (non-rectangular) collision.
//! A `BitMask` is one sprite's footprint; a `CollisionMask` wraps the mask of a
//! whole level bitmap and is never mutated once built.
//!
//! Overlap queries take the other mask's top-left position relative to this
//! mask's origin. Pixels outside a `BitMask` are empty. A `CollisionMask` is
//! walled in instead: past its left, right and bottom edges everything is
//! solid, above the top edge is open sky.

use image::RgbaImage;
use super::rect::PixelRect;

/// Alpha values strictly above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

const WORD_BITS: usize = 64;

/// A width x height field of solid/empty pixels, packed 64 per word per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMask {
    width: usize,
    height: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl BitMask {
    /// Create an empty mask
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height],
        }
    }

    /// Build from tightly packed RGBA bytes, one solid bit per opaque pixel
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8], threshold: u8) -> Self {
        let mut mask = Self::new(width, height);
        for (i, px) in rgba.chunks_exact(4).take(width * height).enumerate() {
            if px[3] > threshold {
                mask.set(i % width, i / width, true);
            }
        }
        mask
    }

    /// Build from a decoded image's alpha channel
    pub fn from_image(image: &RgbaImage) -> Self {
        Self::from_rgba(
            image.width() as usize,
            image.height() as usize,
            image.as_raw(),
            ALPHA_THRESHOLD,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rectangle covered by this mask when placed at the origin
    pub fn bounds(&self) -> PixelRect {
        PixelRect::sized(self.width as i32, self.height as i32)
    }

    /// Solid test; anything outside the mask is empty
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        let word = self.bits[y * self.words_per_row + x / WORD_BITS];
        (word >> (x % WORD_BITS)) & 1 == 1
    }

    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.words_per_row + x / WORD_BITS;
        let bit = 1u64 << (x % WORD_BITS);
        if solid {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Number of pixels solid in both masks with `other` placed at `offset`
    pub fn overlap_area(&self, other: &BitMask, offset: (i32, i32)) -> u32 {
        let mut area = 0;
        self.scan_overlap(other, offset, |_, _| {
            area += 1;
            true
        });
        area
    }

    /// True if any pixel is solid in both masks with `other` placed at `offset`
    pub fn overlaps(&self, other: &BitMask, offset: (i32, i32)) -> bool {
        let mut hit = false;
        self.scan_overlap(other, offset, |_, _| {
            hit = true;
            false
        });
        hit
    }

    /// Visit shared solid pixels until `visit` returns false
    fn scan_overlap<F>(&self, other: &BitMask, (ox, oy): (i32, i32), mut visit: F)
    where
        F: FnMut(i32, i32) -> bool,
    {
        let overlap = self.bounds();
        let placed = other.bounds().offset(ox, oy);
        if !overlap.intersects(&placed) {
            return;
        }

        let x0 = overlap.x.max(placed.x);
        let x1 = overlap.right().min(placed.right());
        let y0 = overlap.y.max(placed.y);
        let y1 = overlap.bottom().min(placed.bottom());

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - ox, y - oy) && !visit(x, y) {
                    return;
                }
            }
        }
    }
}

/// Immutable solid-pixel field of a level bitmap
#[derive(Debug, Clone)]
pub struct CollisionMask {
    mask: BitMask,
}

impl CollisionMask {
    pub fn new(mask: BitMask) -> Self {
        Self { mask }
    }

    /// Derive from the level image's alpha channel
    pub fn from_image(image: &RgbaImage) -> Self {
        Self::new(BitMask::from_image(image))
    }

    /// Level bounds in world space
    pub fn bounds(&self) -> PixelRect {
        self.mask.bounds()
    }

    /// Does `shape` placed with its top-left at `position` touch solid pixels
    /// or stick out through a wall or the floor?
    pub fn overlaps(&self, shape: &BitMask, position: (i32, i32)) -> bool {
        self.mask.overlaps(shape, position) || self.outside_area(shape, position) > 0
    }

    /// How many of `shape`'s pixels at `position` are solid: level pixels
    /// plus anything past a wall or the floor
    pub fn overlap_area(&self, shape: &BitMask, position: (i32, i32)) -> u32 {
        self.mask.overlap_area(shape, position) + self.outside_area(shape, position)
    }

    /// Shape pixels left of, right of or below the level
    fn outside_area(&self, shape: &BitMask, (x, y): (i32, i32)) -> u32 {
        let bounds = self.bounds();
        let placed = shape.bounds().at(x, y);
        if placed.x >= bounds.x && placed.right() <= bounds.right() && placed.bottom() <= bounds.bottom() {
            return 0;
        }

        let mut area = 0;
        for sy in 0..shape.height() as i32 {
            let wy = y.saturating_add(sy);
            for sx in 0..shape.width() as i32 {
                let wx = x.saturating_add(sx);
                let outside = wx < bounds.x || wx >= bounds.right() || wy >= bounds.bottom();
                if outside && shape.get(sx, sy) {
                    area += 1;
                }
            }
        }
        area
    }
}

#[cfg(test)]
impl BitMask {
    /// Create a mask with every pixel solid
    pub fn filled(width: usize, height: usize) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build from ASCII rows where `#` is solid
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut mask = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }
}
