//! GPU textures for drawing a level

use image::RgbaImage;
use macroquad::prelude::{FilterMode, Texture2D};
use super::{AssetError, LevelImages};

pub struct LevelTextures {
    pub level: Texture2D,
    pub player: Texture2D,
    pub coin: Texture2D,
    pub goal: Texture2D,
}

impl LevelTextures {
    /// Upload decoded images. Needs a graphics context.
    pub fn from_images(images: &LevelImages, level_path: &str) -> Result<Self, AssetError> {
        Ok(Self {
            level: upload(&images.level, level_path)?,
            player: upload(&images.player, "player sprite")?,
            coin: upload(&images.coin, "coin sprite")?,
            goal: upload(&images.goal, "goal sprite")?,
        })
    }
}

fn upload(image: &RgbaImage, name: &str) -> Result<Texture2D, AssetError> {
    let (width, height) = image.dimensions();
    let too_large = || AssetError::TooLarge {
        path: name.to_string(),
        width,
        height,
    };
    let w = u16::try_from(width).map_err(|_| too_large())?;
    let h = u16::try_from(height).map_err(|_| too_large())?;

    let texture = Texture2D::from_rgba8(w, h, image.as_raw());
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}
