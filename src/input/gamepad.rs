//! Gamepad support
//!
//! Native: gilrs, polled once per frame into a button mask so pressed and
//! released edges can be derived from consecutive frames.
//! WASM: no gamepad backend; every query reports nothing held.

// Button bits in the per-frame mask (Web Gamepad API standard order)
pub mod button {
    pub const SOUTH: u32 = 0;       // A / Cross
    pub const EAST: u32 = 1;        // B / Circle
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Button state of two consecutive frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMask {
    current: u32,
    previous: u32,
}

impl ButtonMask {
    /// Advance one frame
    pub fn push(&mut self, mask: u32) {
        self.previous = self.current;
        self.current = mask;
    }

    pub fn is_down(&self, button: u32) -> bool {
        self.current & (1 << button) != 0
    }

    pub fn is_pressed(&self, button: u32) -> bool {
        self.is_down(button) && self.previous & (1 << button) == 0
    }

    pub fn is_released(&self, button: u32) -> bool {
        !self.is_down(button) && self.previous & (1 << button) != 0
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::{button, ButtonMask};
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use macroquad::logging::warn;

    pub struct Gamepad {
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: ButtonMask,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                buttons: ButtonMask::default(),
            }
        }

        /// Drain gilrs events and snapshot this frame's buttons
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                while gilrs.next_event().is_some() {}
            }
            let mask = self.read_mask();
            self.buttons.push(mask);
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::SOUTH; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::EAST; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }

            // The left stick doubles as a D-pad for walking
            let x = gp.value(Axis::LeftStickX);
            if gp.is_pressed(GilrsButton::DPadLeft) || x < -self.deadzone { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) || x > self.deadzone { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn buttons(&self) -> &ButtonMask {
            &self.buttons
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// WASM Implementation (no backend)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::ButtonMask;

    #[derive(Default)]
    pub struct Gamepad {
        buttons: ButtonMask,
    }

    impl Gamepad {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn buttons(&self) -> &ButtonMask {
            &self.buttons
        }
    }
}

pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        let mut mask = ButtonMask::default();
        mask.push(1 << button::SOUTH);
        assert!(mask.is_down(button::SOUTH));
        assert!(mask.is_pressed(button::SOUTH));
        assert!(!mask.is_released(button::SOUTH));

        mask.push(1 << button::SOUTH);
        assert!(mask.is_down(button::SOUTH));
        assert!(!mask.is_pressed(button::SOUTH));

        mask.push(0);
        assert!(!mask.is_down(button::SOUTH));
        assert!(mask.is_released(button::SOUTH));

        mask.push(0);
        assert!(!mask.is_released(button::SOUTH));
    }
}
