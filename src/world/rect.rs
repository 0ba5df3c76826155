//! Integer rectangle type for world-space geometry

/// An axis-aligned rectangle in whole pixels (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size anchored at the origin
    pub const fn sized(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Center point, rounded toward the top-left like sprite rects usually are
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Same size, moved so its center sits on `(cx, cy)`
    pub fn centered_on(&self, cx: i32, cy: i32) -> Self {
        Self::new(cx - self.w / 2, cy - self.h / 2, self.w, self.h)
    }

    /// Same size, moved to a new top-left corner
    pub fn at(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.w, self.h)
    }

    /// Translate by an offset
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Check if point is inside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if two rectangles share any area
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Move this rectangle so it lies inside `bounds`.
    ///
    /// On an axis where `bounds` is smaller than the rectangle, the rectangle is
    /// pinned to the bounds' origin on that axis.
    pub fn clamped_inside(&self, bounds: &PixelRect) -> Self {
        Self::new(
            clamp_axis(self.x, self.w, bounds.x, bounds.w),
            clamp_axis(self.y, self.h, bounds.y, bounds.h),
            self.w,
            self.h,
        )
    }
}

fn clamp_axis(pos: i32, len: i32, min: i32, extent: i32) -> i32 {
    if len >= extent {
        return min;
    }
    pos.clamp(min, min + extent - len)
}
