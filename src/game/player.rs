//! Player body
//!
//! Velocity, grounded/airborne state and the jump lifecycle of the single
//! moving body. Movement goes through [`MotionResolver`] one axis at a time;
//! vertical first, then horizontal.

use crate::world::{BitMask, CollisionMask, PixelRect};
use super::collision::{Axis, MotionOutcome, MotionResolver};

/// Movement constants, in pixels and ticks
pub mod tuning {
    /// Vertical velocity set by a jump
    pub const JUMP_VELOCITY: f32 = -9.0;
    /// Releasing jump caps upward velocity at this value
    pub const JUMP_CUT_VELOCITY: f32 = -4.0;
    /// Added to `y_vel` every airborne tick
    pub const GRAVITY: f32 = 0.25;
    /// Ticks after leaving the ground during which a jump is still accepted
    pub const JUMP_GRACE_TICKS: u32 = 15;
    /// Horizontal velocity multiplier when no direction is held
    pub const DECAY: f32 = 0.9;
    /// Vertical velocity multiplier on a bounce
    pub const RESTITUTION: f32 = -0.6;
}

/// Result of the once-per-tick ground sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundContact {
    /// Not sampled yet this tick
    #[default]
    Unknown,
    Touching,
    Clear,
}

/// Held horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    Left,
    Right,
    #[default]
    Idle,
}

impl Heading {
    /// Left wins when both directions are held
    pub fn from_held(left: bool, right: bool) -> Self {
        if left {
            Heading::Left
        } else if right {
            Heading::Right
        } else {
            Heading::Idle
        }
    }

    pub fn accel(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
            Heading::Idle => 0.0,
        }
    }
}

/// High-speed contact reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Landed,
    Bounced,
}

/// The player-controlled body
#[derive(Debug, Clone)]
pub struct PlayerBody {
    /// Per-pixel shape taken from the sprite alpha
    shape: BitMask,
    /// Top-left, integer pixels
    pub position: (i32, i32),
    pub x_vel: f32,
    pub y_vel: f32,
    /// Current acceleration in {-1, 0, 1}
    pub accel: f32,
    /// Maximum horizontal speed
    pub speed: f32,
    pub airborne: bool,
    /// Ticks spent airborne since the last grounded tick
    pub jump_buffer: u32,
    pub ground: GroundContact,
    /// Coins collected this level
    pub collected: u32,
}

impl PlayerBody {
    pub fn new(shape: BitMask, position: (i32, i32), speed: f32) -> Self {
        Self {
            shape,
            position,
            x_vel: 0.0,
            y_vel: 0.0,
            accel: 0.0,
            speed,
            airborne: false,
            jump_buffer: 0,
            ground: GroundContact::Unknown,
            collected: 0,
        }
    }

    pub fn shape(&self) -> &BitMask {
        &self.shape
    }

    /// Bounding rectangle in world space
    pub fn rect(&self) -> PixelRect {
        self.shape.bounds().at(self.position.0, self.position.1)
    }

    /// Sample one pixel below and remember the answer for this tick
    pub fn sample_ground(&mut self, level: &CollisionMask) {
        let touching = MotionResolver::new(level).is_on_ground(&self.shape, self.position);
        self.ground = if touching { GroundContact::Touching } else { GroundContact::Clear };
    }

    /// Accelerate toward `heading`, or decay when idle
    pub fn steer(&mut self, heading: Heading) {
        self.accel = heading.accel();
        self.x_vel += self.accel;
        if self.x_vel.abs() >= self.speed {
            self.x_vel = self.x_vel.signum() * self.speed;
        }
        if self.accel == 0.0 {
            let decayed = round3(self.x_vel * tuning::DECAY);
            // Rounding can pin small values (0.004 * 0.9 rounds back to 0.004)
            self.x_vel = if decayed == self.x_vel || decayed == 0.0 { 0.0 } else { decayed };
        }
    }

    /// Move for one tick: vertical resolution while airborne, then horizontal
    pub fn advance(&mut self, level: &CollisionMask) -> Option<Impact> {
        let resolver = MotionResolver::new(level);
        let mut impact = None;

        if !self.airborne {
            if self.ground == GroundContact::Clear {
                self.airborne = true;
            }
            self.y_vel = 0.0;
            self.jump_buffer = 0;
        } else {
            let r = resolver.resolve(&self.shape, self.position, self.y_vel, Axis::Vertical, self.y_vel, self.airborne);
            self.position = r.position;
            match r.outcome {
                MotionOutcome::Free => {}
                MotionOutcome::Blocked => self.airborne = false,
                MotionOutcome::Landed => {
                    self.y_vel = 0.0;
                    self.airborne = false;
                    impact = Some(Impact::Landed);
                }
                // Vertical resolution never bounces
                MotionOutcome::Bounced => {}
            }
            self.jump_buffer = self.jump_buffer.saturating_add(1);
        }

        if self.x_vel != 0.0 {
            let r = resolver.resolve(&self.shape, self.position, self.x_vel, Axis::Horizontal, self.y_vel, self.airborne);
            self.position = r.position;
            if r.outcome == MotionOutcome::Bounced {
                self.y_vel *= tuning::RESTITUTION;
                self.airborne = true;
                impact = Some(Impact::Bounced);
            }
        }

        impact
    }

    /// Jump if grounded with room above, or within the grace window after
    /// leaving the ground. The grace window does not look at the ceiling.
    /// Returns whether the jump happened.
    pub fn jump(&mut self, level: &CollisionMask) -> bool {
        let from_ground = !self.airborne && MotionResolver::new(level).has_room_above(&self.shape, self.position);
        if from_ground || self.jump_buffer < tuning::JUMP_GRACE_TICKS {
            self.y_vel = tuning::JUMP_VELOCITY;
            self.airborne = true;
            true
        } else {
            false
        }
    }

    /// Cut a rising jump short
    pub fn release_jump(&mut self) {
        if self.airborne && self.y_vel < tuning::JUMP_CUT_VELOCITY {
            self.y_vel = tuning::JUMP_CUT_VELOCITY;
        }
    }

    /// Gravity while airborne; grounded bodies have no vertical velocity.
    /// Ends the tick, so the ground sample is forgotten.
    pub fn finish_tick(&mut self) {
        if self.airborne {
            self.y_vel += tuning::GRAVITY;
        } else {
            self.y_vel = 0.0;
        }
        self.ground = GroundContact::Unknown;
    }
}

/// Round to three decimal places
fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 60x40 level with a floor from y = 30 down
    fn flat_level() -> CollisionMask {
        let mut mask = BitMask::new(60, 40);
        for y in 30..40 {
            for x in 0..60 {
                mask.set(x, y, true);
            }
        }
        CollisionMask::new(mask)
    }

    /// 4x4 body standing on the floor
    fn grounded_body() -> PlayerBody {
        PlayerBody::new(BitMask::filled(4, 4), (10, 26), 4.0)
    }

    fn tick(body: &mut PlayerBody, level: &CollisionMask, heading: Heading) -> Option<Impact> {
        body.sample_ground(level);
        body.steer(heading);
        let impact = body.advance(level);
        body.finish_tick();
        impact
    }

    #[test]
    fn test_heading_left_wins() {
        assert_eq!(Heading::from_held(true, true), Heading::Left);
        assert_eq!(Heading::from_held(false, true), Heading::Right);
        assert_eq!(Heading::from_held(false, false), Heading::Idle);
    }

    #[test]
    fn test_rest_on_ground() {
        let level = flat_level();
        let mut body = grounded_body();
        for _ in 0..10 {
            assert_eq!(tick(&mut body, &level, Heading::Idle), None);
        }
        assert_eq!(body.position, (10, 26));
        assert!(!body.airborne);
        assert_eq!(body.x_vel, 0.0);
        assert_eq!(body.y_vel, 0.0);
        assert_eq!(body.ground, GroundContact::Unknown);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut body = grounded_body();
        for _ in 0..10 {
            body.steer(Heading::Right);
            assert!(body.x_vel.abs() <= body.speed);
        }
        assert_eq!(body.x_vel, 4.0);
        for _ in 0..20 {
            body.steer(Heading::Left);
            assert!(body.x_vel.abs() <= body.speed);
        }
        assert_eq!(body.x_vel, -4.0);
    }

    #[test]
    fn test_fractional_speed_clamp() {
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (0, 0), 2.5);
        body.steer(Heading::Right);
        body.steer(Heading::Right);
        body.steer(Heading::Right);
        assert_eq!(body.x_vel, 2.5);
    }

    #[test]
    fn test_decay_law() {
        let mut body = grounded_body();
        body.x_vel = 4.0;
        body.steer(Heading::Idle);
        assert_eq!(body.x_vel, 3.6);
        body.steer(Heading::Idle);
        assert_eq!(body.x_vel, 3.24);
        body.steer(Heading::Idle);
        assert_eq!(body.x_vel, 2.916);
        body.steer(Heading::Idle);
        assert_eq!(body.x_vel, round3(2.916 * 0.9));
    }

    #[test]
    fn test_decay_reaches_zero() {
        let mut body = grounded_body();
        body.x_vel = -4.0;
        for _ in 0..200 {
            body.steer(Heading::Idle);
        }
        assert_eq!(body.x_vel, 0.0);
        assert!(body.x_vel.is_sign_positive());
    }

    #[test]
    fn test_walk_right_on_flat_ground() {
        let level = flat_level();
        let mut body = grounded_body();
        for _ in 0..5 {
            tick(&mut body, &level, Heading::Right);
        }
        // 1 + 2 + 3 + 4 + 4
        assert_eq!(body.position, (24, 26));
        assert!(!body.airborne);
    }

    #[test]
    fn test_walking_off_ledge_becomes_airborne() {
        let mut mask = BitMask::new(60, 40);
        for y in 30..40 {
            for x in 0..12 {
                mask.set(x, y, true);
            }
        }
        let level = CollisionMask::new(mask);
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (12, 26), 4.0);

        tick(&mut body, &level, Heading::Idle);
        assert!(body.airborne);
        assert_eq!(body.jump_buffer, 0);
        assert_eq!(body.y_vel, tuning::GRAVITY);

        tick(&mut body, &level, Heading::Idle);
        assert_eq!(body.jump_buffer, 1);
    }

    #[test]
    fn test_jump_from_ground() {
        let level = flat_level();
        let mut body = grounded_body();
        assert!(body.jump(&level));
        assert!(body.airborne);
        assert_eq!(body.y_vel, tuning::JUMP_VELOCITY);

        tick(&mut body, &level, Heading::Idle);
        assert_eq!(body.position.1, 26 - 9);
        assert_eq!(body.y_vel, tuning::JUMP_VELOCITY + tuning::GRAVITY);
    }

    #[test]
    fn test_jump_grace_window() {
        let level = flat_level();
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (10, 0), 4.0);
        body.airborne = true;

        body.jump_buffer = tuning::JUMP_GRACE_TICKS - 1;
        assert!(body.jump(&level));

        body.jump_buffer = tuning::JUMP_GRACE_TICKS;
        body.y_vel = 2.0;
        assert!(!body.jump(&level));
        assert_eq!(body.y_vel, 2.0);
    }

    #[test]
    fn test_ceiling_only_matters_outside_grace_window() {
        let mut mask = BitMask::new(20, 20);
        for x in 0..20 {
            mask.set(x, 5, true);
            mask.set(x, 10, true);
        }
        let level = CollisionMask::new(mask);

        // Fresh on the ground the grace window is open, ceiling or not
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (2, 6), 4.0);
        assert!(body.jump(&level));
        assert_eq!(body.y_vel, tuning::JUMP_VELOCITY);

        let mut body = PlayerBody::new(BitMask::filled(4, 4), (2, 6), 4.0);
        body.jump_buffer = tuning::JUMP_GRACE_TICKS;
        assert!(!body.jump(&level));
        assert!(!body.airborne);
        assert_eq!(body.y_vel, 0.0);

        // Same stale buffer with headroom
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (2, 12), 4.0);
        body.jump_buffer = tuning::JUMP_GRACE_TICKS;
        assert!(body.jump(&level));
    }

    #[test]
    fn test_release_jump_law() {
        let mut body = grounded_body();
        body.airborne = true;

        body.y_vel = -8.0;
        body.release_jump();
        assert_eq!(body.y_vel, tuning::JUMP_CUT_VELOCITY);

        body.y_vel = -2.0;
        body.release_jump();
        assert_eq!(body.y_vel, -2.0);

        body.y_vel = 3.0;
        body.release_jump();
        assert_eq!(body.y_vel, 3.0);

        body.airborne = false;
        body.y_vel = -8.0;
        body.release_jump();
        assert_eq!(body.y_vel, -8.0);
    }

    #[test]
    fn test_landing_zeroes_velocity() {
        let level = flat_level();
        // Bottom row at 25, floor at 30: a 5 pixel fall sinks one row in
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (10, 22), 4.0);
        body.airborne = true;
        body.y_vel = 5.0;

        body.sample_ground(&level);
        body.steer(Heading::Idle);
        let impact = body.advance(&level);

        assert_eq!(impact, Some(Impact::Landed));
        assert_eq!(body.y_vel, 0.0);
        assert!(!body.airborne);
        assert_eq!(body.position, (10, 26));
        assert!(!level.overlaps(body.shape(), body.position));
    }

    #[test]
    fn test_bounce_off_wall_while_falling() {
        let mut mask = BitMask::new(60, 40);
        for y in 0..40 {
            for x in 0..60 {
                if y >= 30 || x >= 20 {
                    mask.set(x, y, true);
                }
            }
        }
        let level = CollisionMask::new(mask);
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (15, 20), 4.0);
        body.airborne = true;
        body.y_vel = 5.0;
        body.x_vel = 3.0;
        body.ground = GroundContact::Clear;

        // Falls 5 freely, then hits the wall three rows above the floor
        let impact = body.advance(&level);
        assert_eq!(impact, Some(Impact::Bounced));
        assert!((body.y_vel + 3.0).abs() < 1e-6);
        assert!(body.airborne);
        assert_eq!(body.position, (16, 24));
        assert!(!level.overlaps(body.shape(), body.position));
    }

    #[test]
    fn test_wall_far_above_floor_only_blocks() {
        let mut mask = BitMask::new(60, 40);
        for y in 0..40 {
            for x in 0..60 {
                if y >= 30 || x >= 20 {
                    mask.set(x, y, true);
                }
            }
        }
        let level = CollisionMask::new(mask);
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (15, 5), 4.0);
        body.airborne = true;
        body.y_vel = 2.0;
        body.x_vel = 3.0;

        assert_eq!(body.advance(&level), None);
        assert_eq!(body.y_vel, 2.0);
        assert!(body.position.0 < 17);
    }

    #[test]
    fn test_gravity_and_ground_reset() {
        let mut body = grounded_body();
        body.ground = GroundContact::Touching;
        body.y_vel = 1.5;
        body.finish_tick();
        assert_eq!(body.y_vel, 0.0);
        assert_eq!(body.ground, GroundContact::Unknown);

        body.airborne = true;
        body.finish_tick();
        assert_eq!(body.y_vel, tuning::GRAVITY);
    }

    #[test]
    fn test_level_edges_hold_the_body() {
        let level = flat_level();

        let mut body = grounded_body();
        for _ in 0..60 {
            tick(&mut body, &level, Heading::Left);
            assert!(level.bounds().contains_rect(&body.rect()));
        }
        assert_eq!(body.position.0, 0);

        // Holding into a wall climbs it; the top edge still holds
        for _ in 0..60 {
            tick(&mut body, &level, Heading::Right);
            assert!(level.bounds().contains_rect(&body.rect()));
        }
        assert_eq!(body.position.0, 56);
    }

    #[test]
    fn test_jump_stops_at_top_edge() {
        let level = flat_level();
        let mut body = grounded_body();
        assert!(body.jump(&level));
        for _ in 0..120 {
            tick(&mut body, &level, Heading::Idle);
            assert!(level.bounds().contains_rect(&body.rect()));
        }
        assert_eq!(body.position, (10, 26));
        assert!(!body.airborne);
    }

    #[test]
    fn test_falling_through_gap_lands_on_bottom_edge() {
        // Floor with a gap wider than the body
        let mut mask = BitMask::new(60, 40);
        for y in 30..40 {
            for x in (0..60).filter(|x| !(20..30).contains(x)) {
                mask.set(x, y, true);
            }
        }
        let level = CollisionMask::new(mask);
        let mut body = PlayerBody::new(BitMask::filled(4, 4), (22, 20), 4.0);

        for _ in 0..10_000 {
            tick(&mut body, &level, Heading::Idle);
            assert!(level.bounds().contains_rect(&body.rect()));
        }
        assert_eq!(body.position, (22, 36));
        assert!(!body.airborne);
        assert_eq!(body.y_vel, 0.0);
    }
}
