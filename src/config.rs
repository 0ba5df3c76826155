//! Game configuration
//!
//! Window, map and pacing settings passed explicitly into session
//! construction. Native builds read an optional `config.ron` from the user's
//! config directory; any missing field falls back to its default.

use serde::{Serialize, Deserialize};

/// Name of the per-user config directory and file
const CONFIG_DIR_NAME: &str = "pixelhop";
const CONFIG_FILE_NAME: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title (the FPS readout is drawn in the HUD)
    pub window_title: String,
    /// Logical screen size; also the viewport size
    pub screen_width: u32,
    pub screen_height: u32,
    /// Directory holding map files and level bitmaps
    pub map_dir: String,
    /// Directory holding player/coin/goal sprites
    pub sprite_dir: String,
    /// Catalog index of the first map to play
    pub start_map: usize,
    /// Target simulation rate; 0 disables frame pacing
    pub fps: u32,
    /// Player sprite is scaled to this square size
    pub player_size: u32,
    /// Remote map list fetched at startup; empty disables the download
    pub map_list_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Pixelhop".to_string(),
            screen_width: 860,
            screen_height: 480,
            map_dir: "assets/maps".to_string(),
            sprite_dir: "assets/sprites".to_string(),
            start_map: 0,
            fps: 60,
            player_size: 50,
            map_list_url: String::new(),
        }
    }
}

impl GameConfig {
    /// Parse a RON config; fields left out keep their defaults
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Target frame duration in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        (self.fps > 0).then(|| 1.0 / self.fps as f64)
    }

    /// Location of the user's config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load the user's config, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Load from an explicit path. A missing file is silent; a broken one is logged.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                macroquad::logging::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_ron(&text) {
            Ok(config) => {
                macroquad::logging::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                macroquad::logging::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GameConfig::from_ron("(screen_width: 1280, start_map: 2)").unwrap();
        assert_eq!(config.screen_width, 1280);
        assert_eq!(config.start_map, 2);
        assert_eq!(config.screen_height, 480);
        assert_eq!(config.map_dir, "assets/maps");
    }

    #[test]
    fn test_round_trip() {
        let config = GameConfig {
            map_list_url: "https://example.com/maplist.json".to_string(),
            ..GameConfig::default()
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_frame_time() {
        let config = GameConfig::default();
        assert!((config.frame_time().unwrap() - 1.0 / 60.0).abs() < 1e-9);
        let unlocked = GameConfig { fps: 0, ..GameConfig::default() };
        assert_eq!(unlocked.frame_time(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.ron");

        assert_eq!(GameConfig::load_from(&path), GameConfig::default());

        std::fs::write(&path, "(fps: 30)").unwrap();
        assert_eq!(GameConfig::load_from(&path).fps, 30);

        std::fs::write(&path, "(fps: \"fast\")").unwrap();
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
    }
}
