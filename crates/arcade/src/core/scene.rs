use std::collections::HashMap;

use lina::Point2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a dense Vec plus an id → slot map and a kind index.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
    slots: HashMap<EntityId, usize>,
    kinds: HashMap<String, Vec<EntityId>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
            kinds: HashMap::new(),
        }
    }

    /// Add an entity to the scene. An entity with the same id is replaced
    /// and returned.
    pub fn spawn(&mut self, entity: Entity) -> Option<Entity> {
        let replaced = self.despawn(entity.id);
        if replaced.is_some() {
            log::warn!("spawn replaced existing entity {:?}", entity.id);
        }
        self.slots.insert(entity.id, self.entities.len());
        self.kinds
            .entry(entity.kind().to_owned())
            .or_default()
            .push(entity.id);
        self.entities.push(entity);
        replaced
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.slots.remove(&id)?;
        let entity = self.entities.swap_remove(idx);
        if let Some(moved) = self.entities.get(idx) {
            self.slots.insert(moved.id, idx);
        }
        if let Some(ids) = self.kinds.get_mut(entity.kind()) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.kinds.remove(entity.kind());
            }
        }
        Some(entity)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&idx| &self.entities[idx])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = *self.slots.get(&id)?;
        self.entities.get_mut(idx)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Ids of all entities of a kind, in spawn order.
    pub fn ids_of_kind(&self, kind: &str) -> &[EntityId] {
        self.kinds.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entities of a kind, in spawn order.
    pub fn by_kind<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.ids_of_kind(kind).iter().filter_map(|&id| self.get(id))
    }

    /// Entities of a kind whose position lies within `radius` of `center`.
    pub fn within(&self, kind: &str, center: Point2, radius: f64) -> Vec<EntityId> {
        let r2 = radius * radius;
        self.by_kind(kind)
            .filter(|e| e.pos().distance_sq_to(center) <= r2)
            .map(|e| e.id)
            .collect()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.slots.clear();
        self.kinds.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
