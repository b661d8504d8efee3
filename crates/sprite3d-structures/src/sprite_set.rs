//! Owned collection of billboard sprites.

use std::collections::BTreeMap;

use sprite3d_core::SpriteId;

use crate::billboard::BillboardSprite;

/// Sprites owned by one camera, keyed by id.
///
/// Membership is unique and iteration follows id (insertion) order.
#[derive(Debug, Default, Clone)]
pub struct SpriteSet {
    sprites: BTreeMap<SpriteId, BillboardSprite>,
    next_id: u64,
}

impl SpriteSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `sprite` and returns its new id.
    pub fn insert(&mut self, sprite: BillboardSprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.insert(id, sprite);
        id
    }

    /// Removes and returns a sprite.
    pub fn remove(&mut self, id: SpriteId) -> Option<BillboardSprite> {
        self.sprites.remove(&id)
    }

    /// Gets a sprite by id.
    pub fn get(&self, id: SpriteId) -> Option<&BillboardSprite> {
        self.sprites.get(&id)
    }

    /// Gets a mutable sprite by id.
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut BillboardSprite> {
        self.sprites.get_mut(&id)
    }

    /// Checks membership.
    pub fn contains(&self, id: SpriteId) -> bool {
        self.sprites.contains_key(&id)
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Returns true if there are no sprites.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// All ids in iteration order.
    pub fn ids(&self) -> Vec<SpriteId> {
        self.sprites.keys().copied().collect()
    }

    /// Iterates over `(id, sprite)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &BillboardSprite)> {
        self.sprites.iter().map(|(id, s)| (*id, s))
    }

    /// Iterates mutably over `(id, sprite)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SpriteId, &mut BillboardSprite)> {
        self.sprites.iter_mut().map(|(id, s)| (*id, s))
    }

    /// Mutable access to the sprites named by `ids`, or to every sprite
    /// when `ids` is `None`. Unknown ids are skipped.
    pub fn selection_mut<'a>(
        &'a mut self,
        ids: Option<&'a [SpriteId]>,
    ) -> Box<dyn Iterator<Item = &'a mut BillboardSprite> + 'a> {
        match ids {
            None => Box::new(self.sprites.values_mut()),
            Some(ids) => Box::new(
                self.sprites
                    .iter_mut()
                    .filter(move |(id, _)| ids.contains(*id))
                    .map(|(_, s)| s),
            ),
        }
    }

    /// Removes every sprite, returning them in iteration order.
    pub fn drain(&mut self) -> Vec<(SpriteId, BillboardSprite)> {
        std::mem::take(&mut self.sprites).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use sprite3d_core::TextureFrame;

    use super::*;

    fn sprite(x: f32) -> BillboardSprite {
        BillboardSprite::new(Vec3::new(x, 0.0, 0.0), TextureFrame::new("t", Vec2::ONE))
    }

    #[test]
    fn test_insert_remove() {
        let mut set = SpriteSet::new();
        let a = set.insert(sprite(1.0));
        let b = set.insert(sprite(2.0));
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
        assert!(set.contains(a));

        let removed = set.remove(a).unwrap();
        assert_eq!(removed.position3().x, 1.0);
        assert!(!set.contains(a));
        assert!(set.remove(a).is_none());
        assert_eq!(set.ids(), vec![b]);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut set = SpriteSet::new();
        let a = set.insert(sprite(0.0));
        set.remove(a);
        let b = set.insert(sprite(0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_selection() {
        let mut set = SpriteSet::new();
        let a = set.insert(sprite(0.0));
        let _b = set.insert(sprite(0.0));
        let c = set.insert(sprite(0.0));

        assert_eq!(set.selection_mut(None).count(), 3);

        let picked = [a, c, SpriteId(99)];
        for s in set.selection_mut(Some(&picked)) {
            s.set_position(Vec3::ONE);
        }
        let moved: Vec<_> = set
            .iter()
            .filter(|(_, s)| s.position3() == Vec3::ONE)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(moved, vec![a, c]);
    }

    #[test]
    fn test_drain() {
        let mut set = SpriteSet::new();
        set.insert(sprite(0.0));
        set.insert(sprite(1.0));
        let drained = set.drain();
        assert_eq!(drained.len(), 2);
        assert!(set.is_empty());
    }
}
