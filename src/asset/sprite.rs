//! Image decoding and collision shapes

use image::{imageops::FilterType, RgbaImage};
use crate::config::GameConfig;
use crate::world::{BitMask, CollisionMask, MapCatalog, MapDefinition};
use super::AssetError;

pub const PLAYER_SPRITE: &str = "player.png";
pub const COIN_SPRITE: &str = "coin.png";
pub const GOAL_SPRITE: &str = "goal.png";

/// Collision data of one level, everything the simulation needs
#[derive(Debug, Clone)]
pub struct LevelShapes {
    pub level: CollisionMask,
    pub player: BitMask,
    pub coin: BitMask,
    pub goal: BitMask,
}

/// Decoded RGBA images of one level
#[derive(Debug, Clone)]
pub struct LevelImages {
    pub level: RgbaImage,
    pub player: RgbaImage,
    pub coin: RgbaImage,
    pub goal: RgbaImage,
}

impl LevelImages {
    /// Check sizes and prepare the player sprite. Raw images in, ready images out.
    pub fn new(
        map: &MapDefinition,
        level_path: &str,
        level: RgbaImage,
        player: RgbaImage,
        coin: RgbaImage,
        goal: RgbaImage,
        player_size: u32,
    ) -> Result<Self, AssetError> {
        check_level_size(map, level_path, &level)?;
        Ok(Self {
            level,
            player: scale_sprite(&player, player_size),
            coin,
            goal,
        })
    }

    /// Alpha masks of every image
    pub fn shapes(&self) -> LevelShapes {
        LevelShapes {
            level: CollisionMask::from_image(&self.level),
            player: BitMask::from_image(&self.player),
            coin: BitMask::from_image(&self.coin),
            goal: BitMask::from_image(&self.goal),
        }
    }
}

/// Decode PNG/JPEG/BMP bytes into RGBA
pub fn decode_image(path: &str, bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| AssetError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
}

/// The level bitmap must be exactly as large as the map says
pub fn check_level_size(map: &MapDefinition, path: &str, level: &RgbaImage) -> Result<(), AssetError> {
    let found = level.dimensions();
    if found != (map.width, map.height) {
        return Err(AssetError::SizeMismatch {
            path: path.to_string(),
            expected: (map.width, map.height),
            found,
        });
    }
    Ok(())
}

/// Resize a sprite to a square, nearest-neighbour to keep hard alpha edges
pub fn scale_sprite(image: &RgbaImage, size: u32) -> RgbaImage {
    if image.dimensions() == (size, size) || size == 0 {
        return image.clone();
    }
    image::imageops::resize(image, size, size, FilterType::Nearest)
}

/// Read a file through macroquad (filesystem on native, HTTP on WASM)
async fn read_bytes(path: &str) -> Result<Vec<u8>, AssetError> {
    macroquad::file::load_file(path).await.map_err(|e| AssetError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })
}

async fn read_image(path: &str) -> Result<RgbaImage, AssetError> {
    let bytes = read_bytes(path).await?;
    decode_image(path, &bytes)
}

/// Load the level bitmap and sprites for `map`
pub async fn load_level_images(
    config: &GameConfig,
    catalog: &MapCatalog,
    map: &MapDefinition,
) -> Result<LevelImages, AssetError> {
    let sprite_dir = config.sprite_dir.trim_end_matches('/');
    let sprite = |name: &str| format!("{}/{}", sprite_dir, name);

    let level_path = catalog.resolve(&map.level);
    let level = read_image(&level_path).await?;
    let player = read_image(&sprite(PLAYER_SPRITE)).await?;
    let coin = read_image(&sprite(COIN_SPRITE)).await?;
    let goal = read_image(&sprite(GOAL_SPRITE)).await?;

    LevelImages::new(map, &level_path, level, player, coin, goal, config.player_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PixelRect;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Transparent except for a solid bottom band
    fn level_image(width: u32, height: u32, floor: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, y| {
            if y >= floor { Rgba([90, 60, 30, 255]) } else { Rgba([0, 0, 0, 0]) }
        })
    }

    fn small_map() -> MapDefinition {
        MapDefinition {
            width: 64,
            height: 32,
            player_start: (0, 0),
            goal: (40, 0),
            ..MapDefinition::default()
        }
    }

    #[test]
    fn test_decode_png() {
        let image = level_image(8, 4, 2);
        let decoded = decode_image("test.png", &png_bytes(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_image("broken.png", b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_size_mismatch() {
        let map = small_map();
        assert!(check_level_size(&map, "1.png", &level_image(64, 32, 20)).is_ok());
        let err = check_level_size(&map, "1.png", &level_image(64, 40, 20)).unwrap_err();
        assert!(matches!(err, AssetError::SizeMismatch { found: (64, 40), .. }));
    }

    #[test]
    fn test_player_is_scaled() {
        let sprite = RgbaImage::from_pixel(10, 20, Rgba([255, 0, 0, 255]));
        let scaled = scale_sprite(&sprite, 50);
        assert_eq!(scaled.dimensions(), (50, 50));
        assert!(scaled.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_shapes_from_images() {
        let sprite = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let images = LevelImages::new(
            &small_map(),
            "1.png",
            level_image(64, 32, 20),
            sprite.clone(),
            sprite.clone(),
            RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 0])),
            8,
        )
        .unwrap();

        let shapes = images.shapes();
        let dot = BitMask::filled(1, 1);
        assert_eq!(shapes.level.bounds(), PixelRect::sized(64, 32));
        assert!(shapes.level.overlaps(&dot, (0, 20)));
        assert!(!shapes.level.overlaps(&dot, (0, 19)));

        let solid = BitMask::filled(64, 64);
        assert_eq!(solid.overlap_area(&shapes.player, (0, 0)), 64);
        assert_eq!(solid.overlap_area(&shapes.coin, (0, 0)), 16);
        assert_eq!(solid.overlap_area(&shapes.goal, (0, 0)), 0);
    }
}
