//! Game Module
//!
//! The playable side of a level: a single pixel-masked body moving through a
//! static collision mask, collecting objects until it reaches the goal.
//!
//! Key concepts:
//! - MotionResolver: nudge-and-shrink collision resolution against the mask
//! - PlayerBody: velocity, ground contact and the jump lifecycle
//! - ObjectRegistry: one-shot collectibles and the goal
//! - GameSession: per-frame update order and the pause/win state machine
//! - RenderFrame: what the renderer gets to see of a session

pub mod collision;
pub mod player;
pub mod objects;
pub mod viewport;
pub mod event;
pub mod session;
pub mod renderer;
pub mod pacing;

// Re-export main types
pub use collision::{Axis, MotionOutcome, MotionResolver, Resolution};
pub use player::{GroundContact, Heading, Impact, PlayerBody};
pub use objects::{CollectibleObject, ObjectId, ObjectKind, ObjectRegistry};
pub use viewport::Viewport;
pub use event::Events;
pub use session::{GameSession, SessionOutcome, SessionState};
pub use renderer::{draw_frame, Overlay, RenderFrame};
pub use pacing::FramePacer;
