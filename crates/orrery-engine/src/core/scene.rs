use std::collections::HashMap;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec plus an id → slot index.
/// Entities are visited in spawn order; removal keeps that order.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity. An entity reusing a live id replaces the old one in place.
    pub fn spawn(&mut self, entity: Entity) {
        match self.index.get(&entity.id) {
            Some(&slot) => self.entities[slot] = entity,
            None => {
                self.index.insert(entity.id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.index.get(&id) {
            Some(&slot) => self.entities.get_mut(slot),
            None => None,
        }
    }

    /// Mutable access to two distinct entities at once (e.g. a mesh and its label).
    pub fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.entities.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.entities.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.tag == tag).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn respawn_replaces_in_place() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        scene.spawn(Entity::new(EntityId(1)).with_pos(Vec3::Y));
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(scene.get(EntityId(1)).unwrap().pos, Vec3::Y);
    }

    #[test]
    fn pair_access_is_disjoint() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        let (a, b) = scene.get_pair_mut(EntityId(2), EntityId(1)).unwrap();
        a.pos = Vec3::X;
        b.pos = a.pos;
        assert_eq!(scene.get(EntityId(1)).unwrap().pos, Vec3::X);
        assert!(scene.get_pair_mut(EntityId(1), EntityId(1)).is_none());
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("sun"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("asteroid"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("asteroid"));
        assert_eq!(scene.find_by_tag("sun").unwrap().id, EntityId(1));
        assert_eq!(scene.find_all_by_tag("asteroid").len(), 2);
    }
}
