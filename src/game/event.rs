//! Event System
//!
//! Gameplay facts produced during a tick (a coin was picked up, the goal was
//! reached, the player hit the ground hard). The session sends them; the main
//! loop drains and logs them after the frame.

use super::objects::ObjectId;
use super::player::Impact;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events
#[derive(Debug, Default)]
pub struct Events {
    /// Coin picked up
    pub coin_collected: EventQueue<CoinCollectedEvent>,
    /// Goal touched; the session is now won
    pub goal_reached: EventQueue<GoalReachedEvent>,
    /// High-speed landing or bounce
    pub impact: EventQueue<ImpactEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinCollectedEvent {
    pub object: ObjectId,
    /// Coins collected so far, this one included
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalReachedEvent {
    pub object: ObjectId,
    /// Coins collected on the way
    pub coins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactEvent {
    pub kind: Impact,
    /// Player top-left after the contact
    pub position: (i32, i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.impact.send(ImpactEvent { kind: Impact::Landed, position: (4, 8) });
        events.coin_collected.send(CoinCollectedEvent { object: ObjectId(2), total: 1 });

        // Queues are independent
        assert_eq!(events.impact.drain().count(), 1);
        assert_eq!(events.goal_reached.drain().count(), 0);
        let coins: Vec<_> = events.coin_collected.drain().collect();
        assert_eq!(coins, vec![CoinCollectedEvent { object: ObjectId(2), total: 1 }]);
    }
}
