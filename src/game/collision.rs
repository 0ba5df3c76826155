//! Collision System
//!
//! Nudge-and-shrink motion resolution against a level's pixel mask.
//!
//! The level has no polygons, normals or penetration depths, only solid
//! pixels. To move a body along one axis we try the full offset; while the
//! body would overlap solid pixels we lift it one pixel and shrink the
//! remaining offset by one pixel toward zero. The lift is always vertical,
//! whichever axis is being resolved, so walking into a slope or a small step
//! climbs it.
//!
//! High-speed contacts while falling get special treatment: a vertical
//! resolution lands the body, a horizontal one bounces it. The ground test
//! for an impact looks at one spot, as far below the body as it falls this
//! tick, so a platform thinner than that distance can be missed.
//!
//! The level's walls and floor come from [`CollisionMask`]; its top edge is
//! enforced here. Upward motion stops at the edge, and a body lifted past it
//! is set back onto the edge when there is room.

use macroquad::logging::warn;
use crate::world::{BitMask, CollisionMask};

/// Maximum lift iterations before giving up on a resolution
pub const MAX_RESOLVE_ITERATIONS: u32 = 100;

/// Minimum downward speed (pixels per tick) for a contact to count as an impact
pub const IMPACT_SPEED: f32 = 1.0;

/// Axis a resolution moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How a resolution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    /// The full offset fit without touching anything
    Free,
    /// Geometry or the top edge was in the way
    Blocked,
    /// High-speed vertical contact with ground below
    Landed,
    /// High-speed horizontal contact while falling onto ground
    Bounced,
}

/// Result of resolving one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Committed top-left position
    pub position: (i32, i32),
    /// Achieved displacement along the resolved axis
    pub offset: i32,
    pub outcome: MotionOutcome,
    /// The iteration cap was hit; `position` may still overlap
    pub capped: bool,
}

/// Motion queries and resolution against one level's collision mask
#[derive(Clone, Copy)]
pub struct MotionResolver<'a> {
    level: &'a CollisionMask,
}

impl<'a> MotionResolver<'a> {
    pub fn new(level: &'a CollisionMask) -> Self {
        Self { level }
    }

    /// Move `shape` from `position` by `offset` along `axis` as far as the mask allows.
    ///
    /// `y_vel` and `airborne` describe the body's vertical state and only
    /// decide whether a contact is a high-speed impact.
    pub fn resolve(
        &self,
        shape: &BitMask,
        position: (i32, i32),
        offset: f32,
        axis: Axis,
        y_vel: f32,
        airborne: bool,
    ) -> Resolution {
        let (x0, y0) = position;
        let top = self.level.bounds().y;
        let candidate = |lift: i32, remaining: f32| -> (i32, i32) {
            let step = remaining as i32;
            match axis {
                Axis::Horizontal => (x0.saturating_add(step), y0.saturating_sub(lift)),
                Axis::Vertical => (x0, y0.saturating_sub(lift).saturating_add(step)),
            }
        };

        let mut remaining = offset;
        let mut at_ceiling = false;
        if axis == Axis::Vertical && candidate(0, offset).1 < top {
            remaining = top.saturating_sub(y0) as f32;
            at_ceiling = true;
        }

        let mut lift = 0;
        let mut iterations = 0;
        let mut capped = false;

        while self.level.overlaps(shape, candidate(lift, remaining)) {
            lift += 1;
            remaining -= if remaining < 0.0 { -1.0 } else { 1.0 };
            iterations += 1;
            if iterations > MAX_RESOLVE_ITERATIONS {
                capped = true;
                warn!(
                    "Motion resolution gave up after {} iterations at ({}, {}) offset {:.2} ({:?}), {} pixels still overlap",
                    MAX_RESOLVE_ITERATIONS,
                    x0,
                    y0,
                    offset,
                    axis,
                    self.level.overlap_area(shape, candidate(lift, remaining))
                );
                break;
            }
        }

        let moved = iterations > 0;

        // The last lift was a trial; settle back down if that spot is free too
        if moved && !capped && lift > 0 && !self.level.overlaps(shape, candidate(lift - 1, remaining)) {
            lift -= 1;
        }

        let mut resolved = candidate(lift, remaining);
        if !capped && resolved.1 < top && !self.level.overlaps(shape, (resolved.0, top)) {
            resolved.1 = top;
        }

        let impact = moved
            && y_vel >= IMPACT_SPEED
            && airborne
            && self.ground_below(shape, resolved, impact_check_distance(y_vel));

        let outcome = match (moved, impact, axis) {
            (true, true, Axis::Vertical) => MotionOutcome::Landed,
            (true, true, Axis::Horizontal) => MotionOutcome::Bounced,
            (true, false, _) => MotionOutcome::Blocked,
            (false, _, _) if at_ceiling => MotionOutcome::Blocked,
            (false, _, _) => MotionOutcome::Free,
        };

        Resolution {
            position: resolved,
            offset: remaining as i32,
            outcome,
            capped,
        }
    }

    /// Is there solid ground one pixel below?
    pub fn is_on_ground(&self, shape: &BitMask, position: (i32, i32)) -> bool {
        self.ground_below(shape, position, 1)
    }

    /// Would the body overlap solid ground `distance` pixels further down?
    pub fn ground_below(&self, shape: &BitMask, position: (i32, i32), distance: i32) -> bool {
        self.level.overlaps(shape, (position.0, position.1.saturating_add(distance)))
    }

    /// Is the pixel row just above the body free and inside the level?
    /// Gates jumping into a ceiling.
    pub fn has_room_above(&self, shape: &BitMask, position: (i32, i32)) -> bool {
        position.1 > self.level.bounds().y && !self.level.overlaps(shape, (position.0, position.1 - 1))
    }
}

/// Impact checks look as far below as the body travels this tick
fn impact_check_distance(y_vel: f32) -> i32 {
    (y_vel as i32).max(1)
}
