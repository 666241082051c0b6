use crate::assets::registry::TextureTable;
use crate::bridge::protocol::*;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::{FrameData, Renderer};
use crate::systems::render::build_render_buffer;

/// Packs each frame into the flat f32 buffer described by `ProtocolLayout`.
pub struct FrameRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    instances: RenderBuffer,
    textures: TextureTable,
    frame_counter: u32,
    /// Instances dropped by the last draw.
    dropped: usize,
    overflow_warnings: u32,
}

impl FrameRenderer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        buffer[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        Self {
            instances: RenderBuffer::with_capacity(layout.max_instances),
            layout,
            buffer,
            textures: TextureTable::new(),
            frame_counter: 0,
            dropped: 0,
            overflow_warnings: 0,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn textures(&self) -> &TextureTable {
        &self.textures
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Instances written by the last draw.
    pub fn instance_count(&self) -> usize {
        self.buffer[HEADER_INSTANCE_COUNT] as usize
    }

    /// Overflow warnings logged so far; one per change in the dropped count.
    pub fn overflow_warnings(&self) -> u32 {
        self.overflow_warnings
    }

    fn note_dropped(&mut self, dropped: usize, capacity: usize) {
        if dropped == self.dropped {
            return;
        }
        if dropped > 0 {
            log::warn!(
                "frame has {} instances, capacity is {}",
                capacity + dropped,
                capacity
            );
            self.overflow_warnings += 1;
        } else {
            log::info!("frame back within capacity");
        }
        self.dropped = dropped;
    }
}

impl Renderer for FrameRenderer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn draw(&mut self, frame: &FrameData) {
        let background = frame
            .scene
            .background
            .as_ref()
            .map_or(0, |t| self.textures.intern(t));
        build_render_buffer(frame.scene.iter(), &mut self.textures, &mut self.instances);

        let total = self.instances.instances.len();
        let count = total.min(self.layout.max_instances);
        self.note_dropped(total - count, count);

        let floats = &self.instances.as_floats()[..count * INSTANCE_FLOATS];
        let start = self.layout.instance_data_offset;
        self.buffer[start..start + floats.len()].copy_from_slice(floats);

        let camera = frame.camera.uniform();
        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&camera));
        let start = self.layout.camera_offset;
        self.buffer[start..start + CAMERA_FLOATS].copy_from_slice(camera);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        let ambient = frame.scene.ambient;
        let header = &mut self.buffer[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_INSTANCE_COUNT] = count as f32;
        header[HEADER_BACKGROUND] = background as f32;
        header[HEADER_AMBIENT_R] = ambient.color.r;
        header[HEADER_AMBIENT_G] = ambient.color.g;
        header[HEADER_AMBIENT_B] = ambient.color.b;
        header[HEADER_AMBIENT_INTENSITY] = ambient.intensity;
        header[HEADER_GEOMETRY_COUNT] = frame.geometries.len() as f32;
        header[HEADER_TEXTURE_COUNT] = self.textures.len() as f32;
        header[HEADER_DROPPED_INSTANCES] = (total - count) as f32;
    }
}
