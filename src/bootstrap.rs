//! Map bootstrap
//!
//! Fetches a remote map list at startup and installs every listed map into
//! the local map directory: the level bitmap is stored as-is, the JSON map
//! data is converted to a compressed `.ron` map next to it. The fetch is
//! attempted once; failures are logged and the game carries on with whatever
//! maps are already on disk.
//!
//! Map list format:
//!
//! ```text
//! {
//!   "num": 2,
//!   "url1img": "https://.../1.png",  "name1img": "1.png",
//!   "url1data": "https://.../1.json", "name1data": "1.json",
//!   ...
//! }
//! ```

use std::io::Read;
use indicatif::{ProgressBar, ProgressStyle};
use macroquad::logging::{info, warn};
use crate::config::GameConfig;
use crate::storage::{LocalStorage, StorageError};
use crate::world::{parse_legacy_json, save_map, MapError};

/// Largest download accepted for a single file (64 MB)
const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// Largest map count accepted from a map list
const MAX_LISTED_MAPS: usize = 256;

/// Error type for the bootstrap
#[derive(Debug)]
pub enum BootstrapError {
    /// Request failed or returned an error status
    Http(String),
    /// Map list is not the expected JSON
    MapList(String),
    Storage(StorageError),
    Map(MapError),
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::Http(msg) => write!(f, "HTTP error: {}", msg),
            BootstrapError::MapList(msg) => write!(f, "invalid map list: {}", msg),
            BootstrapError::Storage(e) => write!(f, "storage error: {}", e),
            BootstrapError::Map(e) => write!(f, "map error: {}", e),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<StorageError> for BootstrapError {
    fn from(e: StorageError) -> Self {
        BootstrapError::Storage(e)
    }
}

impl From<MapError> for BootstrapError {
    fn from(e: MapError) -> Self {
        BootstrapError::Map(e)
    }
}

/// One entry of the remote map list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapListing {
    pub image_url: String,
    pub image_name: String,
    pub data_url: String,
    pub data_name: String,
}

impl MapListing {
    /// File name of the converted map: the data file's stem with `.ron`
    pub fn map_file_name(&self) -> String {
        format!("{}.ron", file_stem(&self.data_name))
    }
}

fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Names come from the network; keep them inside the map directory
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
}

/// Parse the map list JSON into listings, in list order
pub fn parse_map_list(json: &serde_json::Value) -> Result<Vec<MapListing>, BootstrapError> {
    let count = match &json["num"] {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
    .ok_or_else(|| BootstrapError::MapList("missing or invalid \"num\"".to_string()))?;

    if count > MAX_LISTED_MAPS {
        return Err(BootstrapError::MapList(format!(
            "{} maps listed (max {})",
            count, MAX_LISTED_MAPS
        )));
    }

    let field = |key: String| -> Result<String, BootstrapError> {
        json[key.as_str()]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BootstrapError::MapList(format!("missing \"{}\"", key)))
    };

    let mut listings = Vec::with_capacity(count);
    for i in 1..=count {
        let listing = MapListing {
            image_url: field(format!("url{}img", i))?,
            image_name: field(format!("name{}img", i))?,
            data_url: field(format!("url{}data", i))?,
            data_name: field(format!("name{}data", i))?,
        };
        if !is_safe_file_name(&listing.image_name) || !is_safe_file_name(&listing.data_name) {
            return Err(BootstrapError::MapList(format!("unsafe file name in entry {}", i)));
        }
        listings.push(listing);
    }
    Ok(listings)
}

/// GET a URL into memory
fn fetch_bytes(url: &str) -> Result<Vec<u8>, BootstrapError> {
    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => BootstrapError::Http(format!("{}: HTTP {}", url, code)),
        other => BootstrapError::Http(format!("{}: {}", url, other)),
    })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| BootstrapError::Http(format!("{}: {}", url, e)))?;
    Ok(bytes)
}

fn fetch_map_list(url: &str) -> Result<Vec<MapListing>, BootstrapError> {
    let bytes = fetch_bytes(url)?;
    let json: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| BootstrapError::MapList(e.to_string()))?;
    parse_map_list(&json)
}

/// Store one downloaded map: the bitmap verbatim, the data converted to RON
pub fn install_map(
    storage: &LocalStorage,
    map_dir: &str,
    listing: &MapListing,
    image: &[u8],
    data: &[u8],
) -> Result<String, BootstrapError> {
    let map = parse_legacy_json(file_stem(&listing.data_name), data)?;
    let dir = map_dir.trim_end_matches('/');

    storage.write(format!("{}/{}", dir, listing.image_name), image)?;

    let file_name = listing.map_file_name();
    save_map(&map, storage.resolve(format!("{}/{}", dir, file_name)))?;
    Ok(file_name)
}

/// Download and install every map on the configured list.
/// Returns how many maps were installed; never fails.
pub fn run(config: &GameConfig, storage: &LocalStorage) -> usize {
    if config.map_list_url.trim().is_empty() {
        return 0;
    }

    let listings = match fetch_map_list(&config.map_list_url) {
        Ok(listings) => listings,
        Err(e) => {
            warn!("Map list unavailable, using local maps: {}", e);
            return 0;
        }
    };

    let pb = ProgressBar::new(listings.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("Downloading maps [{bar:30}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("█▓░"));
    }

    let mut installed = 0;
    for listing in &listings {
        pb.set_message(listing.data_name.clone());
        let result = fetch_bytes(&listing.image_url).and_then(|image| {
            let data = fetch_bytes(&listing.data_url)?;
            install_map(storage, &config.map_dir, listing, &image, &data)
        });
        match result {
            Ok(file_name) => {
                info!("Downloaded map {}", file_name);
                installed += 1;
            }
            Err(e) => warn!("Skipping map {}: {}", listing.data_name, e),
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Installed {} of {} maps", installed, listings.len()));
    installed
}
