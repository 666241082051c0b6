use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Identifier of a recurring animation task registered with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u32);

/// Index into the geometry library.
/// The host renderer uploads one vertex buffer per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

impl GeometryId {
    /// Wire encoding used in render instances.
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}
