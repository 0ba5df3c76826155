//! Game session
//!
//! One playthrough of one map. Owns the player, the live objects and the
//! viewport, and runs the per-frame update in a fixed order:
//! quit, pause handling, jump edges, ground sample, steering, motion,
//! object consumption, gravity, viewport follow.

use crate::asset::LevelShapes;
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::world::{CollisionMask, MapDefinition};
use super::event::{CoinCollectedEvent, Events, GoalReachedEvent, ImpactEvent};
use super::objects::{ObjectKind, ObjectRegistry};
use super::player::{Heading, PlayerBody};
use super::renderer::{Overlay, RenderFrame};
use super::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Paused,
    /// Goal reached; also counts as paused
    Won,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    /// Load the next map
    Advance,
    Quit,
}

pub struct GameSession {
    map_name: String,
    level: CollisionMask,
    pub player: PlayerBody,
    pub objects: ObjectRegistry,
    viewport: Viewport,
    state: SessionState,
    /// Armed when a pause press may toggle; a toggle disarms it until the key is released
    pause_armed: bool,
    pub events: Events,
}

impl GameSession {
    pub fn new(config: &GameConfig, map: &MapDefinition, shapes: LevelShapes) -> Self {
        let LevelShapes { level, player, coin, goal } = shapes;
        let player = PlayerBody::new(player, map.player_start, map.speed);
        let objects = ObjectRegistry::from_map(map, coin, goal);
        let mut viewport = Viewport::new(
            config.screen_width as i32,
            config.screen_height as i32,
            level.bounds(),
        );
        viewport.follow(&player.rect());

        Self {
            map_name: map.name.clone(),
            level,
            player,
            objects,
            viewport,
            state: SessionState::Playing,
            pause_armed: true,
            events: Events::new(),
        }
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    /// The window changed size
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport.resize(width, height);
    }

    /// Run one frame
    pub fn tick(&mut self, input: &FrameInput) -> SessionOutcome {
        if input.quit {
            return SessionOutcome::Quit;
        }

        if input.pause_pressed {
            if self.state == SessionState::Won {
                return SessionOutcome::Advance;
            }
            if self.pause_armed {
                self.state = match self.state {
                    SessionState::Playing => SessionState::Paused,
                    _ => SessionState::Playing,
                };
                self.pause_armed = false;
            }
        }
        if input.pause_released {
            self.pause_armed = true;
        }

        if self.state == SessionState::Playing {
            if input.jump_pressed {
                self.player.jump(&self.level);
            }
            if input.jump_released {
                self.player.release_jump();
            }
            self.update(Heading::from_held(input.left, input.right));
        }

        SessionOutcome::Continue
    }

    fn update(&mut self, heading: Heading) {
        self.player.sample_ground(&self.level);
        self.player.steer(heading);

        if let Some(kind) = self.player.advance(&self.level) {
            self.events.impact.send(ImpactEvent { kind, position: self.player.position });
        }

        for object in self.objects.consume_overlapping(self.player.shape(), self.player.position) {
            match object.kind {
                ObjectKind::Goal => {
                    self.state = SessionState::Won;
                    self.events.goal_reached.send(GoalReachedEvent {
                        object: object.id,
                        coins: self.player.collected,
                    });
                }
                ObjectKind::Coin => {
                    self.player.collected += 1;
                    self.events.coin_collected.send(CoinCollectedEvent {
                        object: object.id,
                        total: self.player.collected,
                    });
                }
            }
        }

        self.player.finish_tick();
        self.viewport.follow(&self.player.rect());
    }

    /// Snapshot for the renderer
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            viewport: self.viewport.rect(),
            level: self.level.bounds(),
            player: self.player.rect(),
            objects: self.objects.live().iter().map(|o| (o.kind, o.rect)).collect(),
            overlay: match self.state {
                SessionState::Playing => Overlay::None,
                SessionState::Paused => Overlay::Paused,
                SessionState::Won => Overlay::Won,
            },
            coins: self.player.collected,
        }
    }
}
