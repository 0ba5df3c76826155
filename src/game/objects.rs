//! Collectible objects
//!
//! Coins and the goal of one level. Each object is consumed at most once: the
//! first frame the player's mask overlaps it, it leaves the live set for good.

use crate::world::{BitMask, MapDefinition, PixelRect};

/// Stable identifier within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Coin,
    Goal,
}

/// One live collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectibleObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Placement; the sprite mask is anchored at its top-left
    pub rect: PixelRect,
}

/// Live collectibles of the current level
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    objects: Vec<CollectibleObject>,
    coin_shape: BitMask,
    goal_shape: BitMask,
    goal_position: (i32, i32),
    next_id: u32,
}

impl ObjectRegistry {
    pub fn new(coin_shape: BitMask, goal_shape: BitMask, goal_position: (i32, i32)) -> Self {
        Self {
            objects: Vec::new(),
            coin_shape,
            goal_shape,
            goal_position,
            next_id: 0,
        }
    }

    /// Coins in map order, then the goal
    pub fn from_map(map: &MapDefinition, coin_shape: BitMask, goal_shape: BitMask) -> Self {
        let mut registry = Self::new(coin_shape, goal_shape, map.goal);
        for rect in map.coin_rects() {
            registry.insert(rect);
        }
        registry.insert(map.goal_rect());
        registry
    }

    /// Add an object. Its kind follows from whether it sits on the goal position.
    pub fn insert(&mut self, rect: PixelRect) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let kind = if self.is_goal_origin(rect) { ObjectKind::Goal } else { ObjectKind::Coin };
        self.objects.push(CollectibleObject { id, kind, rect });
        id
    }

    fn is_goal_origin(&self, rect: PixelRect) -> bool {
        rect.top_left() == self.goal_position
    }

    /// Collision shape used for objects of `kind`
    pub fn shape(&self, kind: ObjectKind) -> &BitMask {
        match kind {
            ObjectKind::Coin => &self.coin_shape,
            ObjectKind::Goal => &self.goal_shape,
        }
    }

    pub fn live(&self) -> &[CollectibleObject] {
        &self.objects
    }

    /// Remove an object. Removing one that is already gone does nothing.
    pub fn remove(&mut self, id: ObjectId) -> Option<CollectibleObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Does `shape` at `position` overlap this object's mask?
    pub fn touches(&self, object: &CollectibleObject, shape: &BitMask, position: (i32, i32)) -> bool {
        let offset = (object.rect.x - position.0, object.rect.y - position.1);
        shape.overlaps(self.shape(object.kind), offset)
    }

    /// Remove and return every object the body overlaps, in registry order
    pub fn consume_overlapping(&mut self, shape: &BitMask, position: (i32, i32)) -> Vec<CollectibleObject> {
        let hits: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|o| self.touches(o, shape, position))
            .map(|o| o.id)
            .collect();
        hits.into_iter().filter_map(|id| self.remove(id)).collect()
    }
}
