//! Level assets
//!
//! Bitmaps a level needs besides its map definition: the level image itself
//! (whose alpha channel is the collision mask) and the player, coin and goal
//! sprites. Decoding and mask building are plain CPU work and testable
//! without a window; GPU textures are created from the decoded images.
//!
//! ```text
//! assets/
//! ├── maps/        # *.ron map definitions + their level bitmaps
//! └── sprites/     # player.png, coin.png, goal.png
//! ```

mod sprite;
mod texture;

pub use sprite::*;
pub use texture::LevelTextures;

/// Error type for asset loading
#[derive(Debug)]
pub enum AssetError {
    /// File could not be read
    Io { path: String, message: String },
    /// File is not a decodable image
    Decode { path: String, message: String },
    /// Level bitmap size differs from the map's declared size
    SizeMismatch {
        path: String,
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// Image is too large to upload as a texture
    TooLarge { path: String, width: u32, height: u32 },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io { path, message } => write!(f, "{}: I/O error: {}", path, message),
            AssetError::Decode { path, message } => write!(f, "{}: decode error: {}", path, message),
            AssetError::SizeMismatch { path, expected, found } => write!(
                f,
                "{}: level bitmap is {}x{}, map declares {}x{}",
                path, found.0, found.1, expected.0, expected.1
            ),
            AssetError::TooLarge { path, width, height } => {
                write!(f, "{}: {}x{} is too large for a texture", path, width, height)
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = AssetError::SizeMismatch {
            path: "maps/1.png".to_string(),
            expected: (2048, 1024),
            found: (100, 50),
        };
        assert_eq!(e.to_string(), "maps/1.png: level bitmap is 100x50, map declares 2048x1024");
    }
}
