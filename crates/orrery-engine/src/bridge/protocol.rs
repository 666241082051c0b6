/// Shared frame buffer layout.
/// Must stay in sync with the host renderer's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: view 16 + projection 16 floats]
/// [Instances: max_instances × 28 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::OrreryConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_PROTOCOL_VERSION: usize = 4;
/// Texture id of the background (0 = none).
pub const HEADER_BACKGROUND: usize = 5;
pub const HEADER_AMBIENT_R: usize = 6;
pub const HEADER_AMBIENT_G: usize = 7;
pub const HEADER_AMBIENT_B: usize = 8;
pub const HEADER_AMBIENT_INTENSITY: usize = 9;
/// Number of geometries registered so far; the host uploads any it lacks.
pub const HEADER_GEOMETRY_COUNT: usize = 10;
/// Number of textures registered so far.
pub const HEADER_TEXTURE_COUNT: usize = 11;
/// Instances dropped because the scene outgrew `max_instances`.
pub const HEADER_DROPPED_INSTANCES: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (fixed by the wire format).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per render instance (fixed by the wire format).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,

    /// Offset (in floats) where the camera matrices begin.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from the instance capacity.
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_instances,
            instance_data_floats,
            camera_offset,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from an OrreryConfig.
    pub fn from_config(config: &OrreryConfig) -> Self {
        Self::new(config.max_instances)
    }
}
