//! Game Renderer
//!
//! The session hands over a [`RenderFrame`] snapshot each frame; drawing it
//! is the only place that touches the GPU. Draw order: background fill, live
//! objects, player, then the level bitmap over them, then the pause overlay
//! and the HUD.

use macroquad::prelude::*;
use crate::asset::LevelTextures;
use crate::world::PixelRect;
use super::objects::ObjectKind;

/// Sky fill behind the level bitmap
const BACKGROUND: Color = Color::new(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0);
/// Outside the level (only visible when the level is smaller than the window)
const VOID: Color = Color::new(0.04, 0.04, 0.05, 1.0);

/// Which pause screen to show, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    Won,
}

impl Overlay {
    pub fn title(self) -> &'static str {
        match self {
            Overlay::None => "",
            Overlay::Paused => "Paused",
            Overlay::Won => "You reached the goal!",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Overlay::None => "",
            Overlay::Paused => "Press P again to unpause",
            Overlay::Won => "Press P to play the next level",
        }
    }
}

/// Everything needed to draw one frame, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: PixelRect,
    pub level: PixelRect,
    pub player: PixelRect,
    pub objects: Vec<(ObjectKind, PixelRect)>,
    pub overlay: Overlay,
    pub coins: u32,
}

impl RenderFrame {
    /// Objects that intersect the viewport
    pub fn visible_objects(&self) -> impl Iterator<Item = &(ObjectKind, PixelRect)> {
        self.objects.iter().filter(|(_, rect)| rect.intersects(&self.viewport))
    }
}

/// Draw a frame
pub fn draw_frame(frame: &RenderFrame, textures: &LevelTextures) {
    let (vx, vy) = (frame.viewport.x as f32, frame.viewport.y as f32);

    clear_background(VOID);
    draw_rectangle(
        frame.level.x as f32 - vx,
        frame.level.y as f32 - vy,
        frame.level.w as f32,
        frame.level.h as f32,
        BACKGROUND,
    );

    for (kind, rect) in frame.visible_objects() {
        let texture = match kind {
            ObjectKind::Coin => &textures.coin,
            ObjectKind::Goal => &textures.goal,
        };
        draw_texture(texture, rect.x as f32 - vx, rect.y as f32 - vy, WHITE);
    }

    draw_texture(&textures.player, frame.player.x as f32 - vx, frame.player.y as f32 - vy, WHITE);
    draw_texture(&textures.level, frame.level.x as f32 - vx, frame.level.y as f32 - vy, WHITE);

    if frame.overlay != Overlay::None {
        draw_overlay(frame.overlay);
    }
    draw_hud(frame.coins);
}

/// Dimmed screen with a title and a hint line
fn draw_overlay(overlay: Overlay) {
    let (w, h) = (screen_width(), screen_height());
    draw_rectangle(0.0, 0.0, w, h, Color::from_rgba(255, 255, 255, 140));

    let title = overlay.title();
    let title_dims = measure_text(title, None, 64, 1.0);
    draw_text(
        title,
        (w - title_dims.width) / 2.0,
        h / 3.0,
        64.0,
        BLACK,
    );

    let hint = overlay.hint();
    let hint_dims = measure_text(hint, None, 18, 1.0);
    draw_text(
        hint,
        (w - hint_dims.width) / 2.0,
        h / 3.0 + 30.0,
        18.0,
        Color::from_rgba(67, 67, 67, 255),
    );
}

/// Coin counter top-left, FPS top-right
fn draw_hud(coins: u32) {
    draw_text(&format!("Coins: {}", coins), 12.0, 24.0, 20.0, Color::from_rgba(30, 30, 36, 255));

    let fps = format!("FPS: {}", get_fps());
    let fps_dims = measure_text(&fps, None, 16, 1.0);
    draw_text(
        &fps,
        screen_width() - fps_dims.width - 12.0,
        22.0,
        16.0,
        Color::from_rgba(30, 30, 36, 200),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_text() {
        assert_eq!(Overlay::Paused.title(), "Paused");
        assert_eq!(Overlay::Won.hint(), "Press P to play the next level");
        assert_eq!(Overlay::None.title(), "");
    }

    #[test]
    fn test_visible_objects() {
        let frame = RenderFrame {
            viewport: PixelRect::new(100, 100, 860, 480),
            level: PixelRect::sized(2048, 1024),
            player: PixelRect::new(200, 200, 50, 50),
            objects: vec![
                (ObjectKind::Coin, PixelRect::new(0, 0, 32, 32)),
                (ObjectKind::Coin, PixelRect::new(90, 90, 32, 32)),
                (ObjectKind::Goal, PixelRect::new(1000, 300, 32, 32)),
            ],
            overlay: Overlay::None,
            coins: 0,
        };
        let visible: Vec<_> = frame.visible_objects().map(|(k, _)| *k).collect();
        assert_eq!(visible, vec![ObjectKind::Coin, ObjectKind::Goal]);
    }
}
