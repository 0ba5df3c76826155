//! Map loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable map files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression
//!
//! Native builds can also convert the legacy JSON map data served by the
//! map list bootstrap.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use serde::{Serialize, Deserialize};
use super::rect::PixelRect;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum level width or height in pixels
    pub const MAX_LEVEL_SIZE: u32 = 16_384;
    /// Maximum number of collectibles in one map
    pub const MAX_COINS: usize = 4096;
    /// Maximum string length for names and file references
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum horizontal player speed (pixels per tick)
    pub const MAX_SPEED: f32 = 64.0;
}

/// Side length of the goal hitbox
pub const GOAL_SIZE: i32 = 32;

/// Everything a level needs besides its pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Level width in pixels (must match the bitmap)
    pub width: u32,
    /// Level height in pixels (must match the bitmap)
    pub height: u32,
    /// Player top-left at spawn
    pub player_start: (i32, i32),
    /// Maximum horizontal speed (pixels per tick)
    pub speed: f32,
    /// Level bitmap, relative to the map directory
    pub level: String,
    /// Collectible placements as (x, y, w, h)
    #[serde(default)]
    pub coins: Vec<(i32, i32, i32, i32)>,
    /// Goal top-left
    pub goal: (i32, i32),
}

impl MapDefinition {
    pub fn bounds(&self) -> PixelRect {
        PixelRect::sized(self.width as i32, self.height as i32)
    }

    pub fn coin_rects(&self) -> impl Iterator<Item = PixelRect> + '_ {
        self.coins.iter().map(|&(x, y, w, h)| PixelRect::new(x, y, w, h))
    }

    pub fn goal_rect(&self) -> PixelRect {
        PixelRect::new(self.goal.0, self.goal.1, GOAL_SIZE, GOAL_SIZE)
    }
}

impl Default for MapDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 2048,
            height: 1024,
            player_start: (50, 600),
            speed: 4.0,
            level: "1.png".to_string(),
            coins: Vec::new(),
            goal: (128, 780),
        }
    }
}

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    #[cfg(not(target_arch = "wasm32"))]
    JsonError(serde_json::Error),
    ValidationError(String),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for MapError {
    fn from(e: ron::error::SpannedError) -> Self {
        MapError::ParseError(e)
    }
}

impl From<ron::Error> for MapError {
    fn from(e: ron::Error) -> Self {
        MapError::SerializeError(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::JsonError(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::IoError(e) => write!(f, "IO error: {}", e),
            MapError::ParseError(e) => write!(f, "Parse error: {}", e),
            MapError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            #[cfg(not(target_arch = "wasm32"))]
            MapError::JsonError(e) => write!(f, "JSON error: {}", e),
            MapError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for MapError {}

/// Validate a map definition
pub fn validate_map(map: &MapDefinition) -> Result<(), MapError> {
    let fail = |msg: String| Err(MapError::ValidationError(msg));

    if map.width == 0 || map.height == 0 {
        return fail(format!("empty level ({}x{})", map.width, map.height));
    }
    if map.width > limits::MAX_LEVEL_SIZE || map.height > limits::MAX_LEVEL_SIZE {
        return fail(format!(
            "level too large ({}x{} > {})",
            map.width, map.height, limits::MAX_LEVEL_SIZE
        ));
    }
    if !map.speed.is_finite() || map.speed <= 0.0 || map.speed > limits::MAX_SPEED {
        return fail(format!("invalid speed {}", map.speed));
    }
    if map.level.is_empty() {
        return fail("missing level bitmap".to_string());
    }
    if map.level.len() > limits::MAX_STRING_LEN || map.name.len() > limits::MAX_STRING_LEN {
        return fail("name or bitmap reference too long".to_string());
    }
    let (sx, sy) = map.player_start;
    if !map.bounds().contains(sx, sy) {
        return fail(format!("player start ({}, {}) outside level", sx, sy));
    }
    if map.coins.len() > limits::MAX_COINS {
        return fail(format!("too many coins ({} > {})", map.coins.len(), limits::MAX_COINS));
    }
    for (i, rect) in map.coin_rects().enumerate() {
        if rect.w <= 0 || rect.h <= 0 {
            return fail(format!("coin {} has empty size {}x{}", i, rect.w, rect.h));
        }
    }
    Ok(())
}

/// Detect format: RON files start with '(' or whitespace, brotli is binary
fn is_plain_ron(bytes: &[u8]) -> bool {
    bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .unwrap_or(false)
}

/// Parse map data from bytes (plain or brotli-compressed RON)
pub fn parse_map_data(bytes: &[u8]) -> Result<MapDefinition, MapError> {
    let contents = if is_plain_ron(bytes) {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| MapError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e)
            )))?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
            .map_err(|e| MapError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e)
            )))?;
        String::from_utf8(decompressed)
            .map_err(|e| MapError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e)
            )))?
    };

    let map: MapDefinition = ron::from_str(&contents)?;
    validate_map(&map)?;
    Ok(map)
}

/// Serialize a map to compressed bytes
pub fn serialize_map(map: &MapDefinition) -> Result<Vec<u8>, MapError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(map, config)?;

    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    }).map_err(|e| MapError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("brotli compression failed: {}", e)
    )))?;

    Ok(compressed)
}

/// Save a map to a compressed RON file (brotli)
pub fn save_map<P: AsRef<Path>>(map: &MapDefinition, path: P) -> Result<(), MapError> {
    validate_map(map)?;
    let data = serialize_map(map)?;
    fs::write(path, data)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Legacy JSON map data (downloaded maps)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyCoins {
    List(Vec<[i32; 4]>),
    Literal(String),
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Deserialize)]
struct LegacyMap {
    width: u32,
    height: u32,
    player_start: [i32; 2],
    speed: f32,
    level: String,
    #[serde(default)]
    coinobjs: Option<LegacyCoins>,
    goalpos: [i32; 2],
}

/// Convert legacy JSON map data into a map definition
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_legacy_json(name: &str, bytes: &[u8]) -> Result<MapDefinition, MapError> {
    let legacy: LegacyMap = serde_json::from_slice(bytes)?;

    let coins = match legacy.coinobjs {
        None => Vec::new(),
        Some(LegacyCoins::List(list)) => list.into_iter().map(|[x, y, w, h]| (x, y, w, h)).collect(),
        Some(LegacyCoins::Literal(text)) => parse_rect_list(&text)
            .map_err(MapError::ValidationError)?,
    };

    let map = MapDefinition {
        name: name.to_string(),
        width: legacy.width,
        height: legacy.height,
        player_start: (legacy.player_start[0], legacy.player_start[1]),
        speed: legacy.speed,
        level: legacy.level,
        coins,
        goal: (legacy.goalpos[0], legacy.goalpos[1]),
    };
    validate_map(&map)?;
    Ok(map)
}

/// Parse a bracketed list of 4-tuples such as `"[(1, 2, 3, 4), [5, 6, 7, 8]]"`
pub fn parse_rect_list(text: &str) -> Result<Vec<(i32, i32, i32, i32)>, String> {
    let inner = text.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("expected a bracketed list, got {:?}", text))?;

    let numbers: Vec<i32> = inner
        .split(|c: char| c == ',' || c == '(' || c == ')' || c == '[' || c == ']')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map(|v| v as i32)
                .map_err(|e| format!("bad number {:?}: {}", s, e))
        })
        .collect::<Result<_, _>>()?;

    if numbers.len() % 4 != 0 {
        return Err(format!("{} values is not a list of rectangles", numbers.len()));
    }

    Ok(numbers.chunks_exact(4).map(|c| (c[0], c[1], c[2], c[3])).collect())
}
