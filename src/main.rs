//! Pixelhop: a pixel-mask platformer
//!
//! Levels are plain bitmaps; every pixel with enough alpha is solid ground.
//! - Nudge-and-shrink collision against the level's alpha mask
//! - Jump buffering, short hops and bounces off walls while falling
//! - Coins, a goal, and index-ordered level progression
//! - Optional map download from a remote map list at startup

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod asset;
#[cfg(not(target_arch = "wasm32"))]
mod bootstrap;
mod config;
mod game;
mod input;
#[cfg(not(target_arch = "wasm32"))]
mod storage;
mod world;

use std::sync::OnceLock;
use macroquad::prelude::*;
use macroquad::logging::{debug, error, info, warn};
use asset::{load_level_images, AssetError, LevelImages, LevelTextures};
use config::GameConfig;
use game::{draw_frame, FramePacer, GameSession, SessionOutcome};
use input::InputState;
use world::{MapCatalog, MapDefinition, MapError};

/// Config is needed before the window exists, so it is loaded once and shared
fn config() -> &'static GameConfig {
    static CONFIG: OnceLock<GameConfig> = OnceLock::new();
    CONFIG.get_or_init(GameConfig::load)
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.window_title.clone(),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Why a level could not be started
#[derive(Debug)]
enum LoadError {
    Map(MapError),
    Asset(AssetError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Map(e) => write!(f, "map: {}", e),
            LoadError::Asset(e) => write!(f, "asset: {}", e),
        }
    }
}

impl From<MapError> for LoadError {
    fn from(e: MapError) -> Self {
        LoadError::Map(e)
    }
}

impl From<AssetError> for LoadError {
    fn from(e: AssetError) -> Self {
        LoadError::Asset(e)
    }
}

/// Everything one level needs, loaded and uploaded
struct LoadedLevel {
    map: MapDefinition,
    images: LevelImages,
    textures: LevelTextures,
}

async fn load_level(config: &GameConfig, catalog: &MapCatalog, index: usize) -> Result<LoadedLevel, LoadError> {
    let map = catalog.load(index).await?;
    let images = load_level_images(config, catalog, &map).await?;
    let textures = LevelTextures::from_images(&images, &catalog.resolve(&map.level))?;
    Ok(LoadedLevel { map, images, textures })
}

/// Run one level until it is won and advanced past, or the game quits
async fn play(
    config: &GameConfig,
    index: usize,
    level: &LoadedLevel,
    input: &mut InputState,
    pacer: &mut FramePacer,
) -> SessionOutcome {
    let mut session = GameSession::new(config, &level.map, level.images.shapes());
    info!(
        "Playing map {} \"{}\" ({}x{}, {} coins)",
        index,
        session.map_name(),
        level.map.width,
        level.map.height,
        level.map.coins.len()
    );

    let mut window = (config.screen_width as i32, config.screen_height as i32);

    loop {
        pacer.begin_frame();

        let size = (screen_width() as i32, screen_height() as i32);
        if size != window {
            window = size;
            session.resize(size.0, size.1);
        }

        let outcome = session.tick(&input.sample());
        log_events(&mut session);
        if outcome != SessionOutcome::Continue {
            return outcome;
        }

        draw_frame(&session.render_frame(), &level.textures);

        pacer.wait();
        next_frame().await;
    }
}

fn log_events(session: &mut GameSession) {
    for e in session.events.coin_collected.drain() {
        info!("Coin collected ({} total)", e.total);
    }
    for e in session.events.goal_reached.drain() {
        info!("Reached the goal with {} coins", e.coins);
    }
    for e in session.events.impact.drain() {
        debug!("{:?} at ({}, {})", e.kind, e.position.0, e.position.1);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = config();
    info!("=== Pixelhop v{} ===", VERSION);

    #[cfg(not(target_arch = "wasm32"))]
    let catalog = {
        let storage = storage::LocalStorage::new();
        bootstrap::run(config, &storage);
        MapCatalog::discover(&storage, &config.map_dir)
    };
    #[cfg(target_arch = "wasm32")]
    let catalog = MapCatalog::discover_from_manifest(&config.map_dir).await;

    if catalog.is_empty() {
        error!("No maps found in {}", config.map_dir);
        return;
    }
    info!("Found {} maps in {}", catalog.len(), catalog.map_dir());

    let mut index = if config.start_map < catalog.len() {
        config.start_map
    } else {
        warn!("start_map {} is out of range, starting at 0", config.start_map);
        0
    };

    // Window close goes through the session like Escape does
    prevent_quit();

    let mut input = InputState::new();
    if input.has_gamepad() {
        info!("Gamepad connected");
    }
    let mut pacer = FramePacer::new(config.frame_time());

    loop {
        let level = match load_level(config, &catalog, index).await {
            Ok(level) => level,
            Err(e) => {
                error!("Could not load map {}: {}", index, e);
                return;
            }
        };

        match play(config, index, &level, &mut input, &mut pacer).await {
            SessionOutcome::Advance => match catalog.next_index(index) {
                Some(next) => index = next,
                None => {
                    info!("No more levels");
                    return;
                }
            },
            SessionOutcome::Quit | SessionOutcome::Continue => {
                info!("Quit");
                return;
            }
        }
    }
}
