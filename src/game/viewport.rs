//! Viewport
//!
//! Screen-sized window into the level. It follows the player's center and is
//! then clamped to the level bounds, with no smoothing.

use crate::world::PixelRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    rect: PixelRect,
    level: PixelRect,
}

impl Viewport {
    pub fn new(width: i32, height: i32, level: PixelRect) -> Self {
        Self {
            rect: PixelRect::sized(width, height).clamped_inside(&level),
            level,
        }
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Center on `target`, then keep inside the level
    pub fn follow(&mut self, target: &PixelRect) {
        let (cx, cy) = target.center();
        self.rect = self.rect.centered_on(cx, cy).clamped_inside(&self.level);
    }

    /// Window size changed; keeps the current center
    pub fn resize(&mut self, width: i32, height: i32) {
        let (cx, cy) = self.rect.center();
        self.rect = PixelRect::sized(width, height)
            .centered_on(cx, cy)
            .clamped_inside(&self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_on_target() {
        let mut vp = Viewport::new(860, 480, PixelRect::sized(2048, 1024));
        vp.follow(&PixelRect::new(1000, 500, 50, 50));
        assert_eq!(vp.rect(), PixelRect::new(1025 - 430, 525 - 240, 860, 480));
    }

    #[test]
    fn test_follow_clamps_to_level() {
        let mut vp = Viewport::new(860, 480, PixelRect::sized(2048, 1024));
        vp.follow(&PixelRect::new(0, 0, 50, 50));
        assert_eq!(vp.rect().top_left(), (0, 0));
        vp.follow(&PixelRect::new(2000, 1000, 50, 50));
        assert_eq!(vp.rect().top_left(), (2048 - 860, 1024 - 480));
    }

    #[test]
    fn test_small_level_pins_to_origin() {
        let mut vp = Viewport::new(860, 480, PixelRect::sized(400, 1024));
        vp.follow(&PixelRect::new(300, 600, 50, 50));
        assert_eq!(vp.rect().x, 0);
        assert_eq!(vp.rect().y, 625 - 240);
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut vp = Viewport::new(860, 480, PixelRect::sized(2048, 1024));
        vp.follow(&PixelRect::new(1000, 500, 50, 50));
        vp.resize(400, 200);
        assert_eq!(vp.rect(), PixelRect::new(1025 - 200, 525 - 100, 400, 200));
    }
}
