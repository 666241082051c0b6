use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::{Mesh, Node};
use crate::components::transform::Transform;

/// What an entity is for. Used for filtering and reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Star field point, spawned once at startup.
    Star,
    /// Hand-placed decorative body (moon, box, ...).
    Decoration,
    /// Body materialized by the load pipeline.
    Planet,
}

/// Fat entity: a model tree plus its transform.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    pub kind: EntityKind,
    pub transform: Transform,
    /// Root of the model tree. Entities without meshes are invisible.
    pub model: Node,
}

impl Entity {
    /// Create a new decoration entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            kind: EntityKind::Decoration,
            transform: Transform::default(),
            model: Node::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.transform.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Uniform scale on all three axes.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vec3::splat(scale);
        self
    }

    /// Single-mesh model; the root node is named after the tag.
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.model = Node::from_mesh(self.tag.clone(), mesh);
        self
    }

    pub fn with_model(mut self, model: Node) -> Self {
        self.model = model;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }
}
