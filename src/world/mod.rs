//! World module - pixel-mask levels
//!
//! Everything a level is made of before it is played:
//! - Map definitions (RON, optionally brotli-compressed) and their validation
//! - The ordered map catalog used for level progression
//! - Bit masks built from bitmap alpha channels, used for all collision
//! - Integer rectangles for objects, the player and the viewport

mod rect;
mod mask;
mod map;
mod catalog;

pub use rect::*;
pub use mask::*;
pub use map::*;
pub use catalog::*;
