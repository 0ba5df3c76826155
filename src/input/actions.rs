//! Game action definitions
//!
//! Every control the game reads, with its keyboard and gamepad bindings.

use macroquad::prelude::KeyCode;
use super::button;

/// All actions that can be triggered by input
///
/// Keyboard / gamepad:
/// - Left, A / D-pad left = MoveLeft
/// - Right, D / D-pad right = MoveRight
/// - Space, Up, W / South (A on Xbox) = Jump
/// - P / Start = Pause
/// - Escape / Select = Quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Pause,
        Action::Quit,
    ];

    /// Keys bound to this action
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            Action::MoveLeft => &[KeyCode::Left, KeyCode::A],
            Action::MoveRight => &[KeyCode::Right, KeyCode::D],
            Action::Jump => &[KeyCode::Space, KeyCode::Up, KeyCode::W],
            Action::Pause => &[KeyCode::P],
            Action::Quit => &[KeyCode::Escape],
        }
    }

    /// Gamepad buttons bound to this action
    pub fn buttons(self) -> &'static [u32] {
        match self {
            Action::MoveLeft => &[button::DPAD_LEFT],
            Action::MoveRight => &[button::DPAD_RIGHT],
            Action::Jump => &[button::SOUTH],
            Action::Pause => &[button::START],
            Action::Quit => &[button::SELECT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_bound() {
        for action in Action::ALL {
            assert!(!action.keys().is_empty(), "{:?} has no key", action);
            assert!(!action.buttons().is_empty(), "{:?} has no button", action);
        }
    }

    #[test]
    fn test_no_key_is_bound_twice() {
        let mut seen = Vec::new();
        for action in Action::ALL {
            for key in action.keys() {
                assert!(!seen.contains(key), "{:?} bound twice", key);
                seen.push(*key);
            }
        }
    }
}
