//! Frame pacing
//!
//! Holds each frame to a fixed time slice. Native sleeps for the bulk of the
//! remaining time and spin-waits the last couple of milliseconds for
//! precision; WASM can only spin (the browser paces frames anyway).

use macroquad::prelude::get_time;

/// Sleep until this close to the deadline, then spin
#[cfg(not(target_arch = "wasm32"))]
const SPIN_MARGIN: f64 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    /// Target frame duration in seconds (None = unlocked)
    target: Option<f64>,
    frame_start: f64,
}

impl FramePacer {
    pub fn new(target: Option<f64>) -> Self {
        Self { target, frame_start: 0.0 }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = get_time();
    }

    /// Seconds left in the current slice, given the current time
    pub fn remaining(&self, now: f64) -> f64 {
        match self.target {
            Some(target) => (target - (now - self.frame_start)).max(0.0),
            None => 0.0,
        }
    }

    /// Block until the frame's time slice is used up
    pub fn wait(&self) {
        let Some(target) = self.target else { return };
        if self.remaining(get_time()) <= 0.0 {
            return;
        }

        // Native: use sleep for bulk, then spin-wait for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            while get_time() - self.frame_start + SPIN_MARGIN < target {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - self.frame_start < target {
                std::hint::spin_loop();
            }
        }
        // WASM: just spin-wait (no thread::sleep available)
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - self.frame_start < target {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining() {
        let mut pacer = FramePacer::new(Some(1.0 / 60.0));
        pacer.frame_start = 10.0;
        assert!((pacer.remaining(10.0) - 1.0 / 60.0).abs() < 1e-12);
        assert!((pacer.remaining(10.01) - (1.0 / 60.0 - 0.01)).abs() < 1e-9);
        assert_eq!(pacer.remaining(11.0), 0.0);
    }

    #[test]
    fn test_unlocked() {
        let pacer = FramePacer::new(None);
        assert_eq!(pacer.remaining(0.0), 0.0);
        pacer.wait();
    }
}
