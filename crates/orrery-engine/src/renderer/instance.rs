use bytemuck::{Pod, Zeroable};

/// Per-mesh render data written to the shared frame buffer for the host renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Base color RGB + opacity.
    pub color: [f32; 4],
    /// Emissive RGB.
    pub emissive: [f32; 3],
    /// 1.0 if the host should apply scene lighting, 0.0 for flat shading.
    pub lit: f32,
    /// Index into the geometry library.
    pub geometry: f32,
    /// Texture id of the color map (0 = none).
    pub map: f32,
    /// Texture id of the normal map (0 = none).
    pub normal_map: f32,
    pub _pad: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// All mesh instances for one frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instances flattened to floats, ready to copy into the frame buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_matches_float_count() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
    }

    #[test]
    fn floats_view_covers_every_instance() {
        let mut buffer = RenderBuffer::new();
        buffer.push(RenderInstance { geometry: 3.0, ..Default::default() });
        buffer.push(RenderInstance { map: 7.0, ..Default::default() });
        let floats = buffer.as_floats();
        assert_eq!(floats.len(), 2 * RenderInstance::FLOATS);
        assert_eq!(floats[24], 3.0);
        assert_eq!(floats[RenderInstance::FLOATS + 25], 7.0);
    }
}
