use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::components::material::{Color, TextureRef};

/// Uniform light applied to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

/// Scene registry using a flat Vec.
/// Entities are only ever added; nothing is removed for the lifetime of the page.
pub struct SceneRegistry {
    entities: Vec<Entity>,
    /// Equirectangular image drawn behind everything.
    pub background: Option<TextureRef>,
    pub ambient: AmbientLight,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a registry with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            background: None,
            ambient: AmbientLight::default(),
        }
    }

    /// Add an entity to the scene.
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Number of entities of the given kind.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
