//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad input once per frame and folds
//! them into a [`FrameInput`], the only input the game session sees.

use macroquad::prelude::*;
use super::{Action, Gamepad};

/// Everything the session needs from one frame of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Held this frame
    pub left: bool,
    pub right: bool,
    /// Went down this frame
    pub jump_pressed: bool,
    /// Went up this frame
    pub jump_released: bool,
    pub pause_pressed: bool,
    pub pause_released: bool,
    /// Quit key or window close
    pub quit: bool,
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        action.keys().iter().any(|&k| is_key_down(k))
            || action.buttons().iter().any(|&b| self.gamepad.buttons().is_down(b))
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        action.keys().iter().any(|&k| is_key_pressed(k))
            || action.buttons().iter().any(|&b| self.gamepad.buttons().is_pressed(b))
    }

    /// Check if action was just released this frame
    pub fn action_released(&self, action: Action) -> bool {
        action.keys().iter().any(|&k| is_key_released(k))
            || action.buttons().iter().any(|&b| self.gamepad.buttons().is_released(b))
    }

    /// Poll devices and collect this frame's input
    pub fn sample(&mut self) -> FrameInput {
        self.poll();
        FrameInput {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            jump_pressed: self.action_pressed(Action::Jump),
            jump_released: self.action_released(Action::Jump),
            pause_pressed: self.action_pressed(Action::Pause),
            pause_released: self.action_released(Action::Pause),
            quit: self.action_pressed(Action::Quit) || is_quit_requested(),
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
