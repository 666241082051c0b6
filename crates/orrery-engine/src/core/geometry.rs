use crate::api::types::GeometryId;
use crate::components::mesh::MeshData;

/// Append-only store of vertex data, addressed by `GeometryId`.
///
/// Meshes reference geometry by id so that two hundred identical stars
/// share one vertex buffer on the host side.
pub struct GeometryLibrary {
    entries: Vec<MeshData>,
    /// Number of entries already handed to the host renderer.
    uploaded: usize,
}

impl GeometryLibrary {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(32),
            uploaded: 0,
        }
    }

    pub fn insert(&mut self, mesh: MeshData) -> GeometryId {
        let id = GeometryId(self.entries.len() as u32);
        self.entries.push(mesh);
        id
    }

    pub fn get(&self, id: GeometryId) -> Option<&MeshData> {
        self.entries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids registered since the last call. The host uploads these once.
    pub fn take_new(&mut self) -> std::ops::Range<u32> {
        let start = self.uploaded as u32;
        self.uploaded = self.entries.len();
        start..self.uploaded as u32
    }
}

impl Default for GeometryLibrary {
    fn default() -> Self {
        Self::new()
    }
}
