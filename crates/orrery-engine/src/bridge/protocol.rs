/// Flat f32 buffer layout shared with the host page.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Instances: max_instances × 8 floats]
/// [Scenery: max_scenery_vertices × 8 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_VIEWPORT_WIDTH: usize = 3;
pub const HEADER_VIEWPORT_HEIGHT: usize = 4;
pub const HEADER_MAX_INSTANCES: usize = 5;
pub const HEADER_INSTANCE_COUNT: usize = 6;
pub const HEADER_MAX_SCENERY_VERTICES: usize = 7;
pub const HEADER_LINE_VERTEX_COUNT: usize = 8;
pub const HEADER_POINT_COUNT: usize = 9;
pub const HEADER_LOOP_COUNT: usize = 10;
pub const HEADER_MAX_LIGHTS: usize = 11;
pub const HEADER_LIGHT_COUNT: usize = 12;
pub const HEADER_MAX_EVENTS: usize = 13;
pub const HEADER_EVENT_COUNT: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera block: view-projection matrix (16) + eye (4).
pub const CAMERA_FLOATS: usize = 20;

/// Floats per render instance: x, y, z, radius, r, g, b, lit.
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per scenery vertex: x, y, z, r, g, b, a, size.
pub const SCENERY_VERTEX_FLOATS: usize = 8;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum scenery vertices (line loops and points together).
    pub max_scenery_vertices: usize,
    /// Maximum point lights.
    pub max_lights: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub scenery_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where scenery data begins.
    pub scenery_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_instances: usize,
        max_scenery_vertices: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let scenery_data_floats = max_scenery_vertices * SCENERY_VERTEX_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let scenery_data_offset = instance_data_offset + instance_data_floats;
        let light_data_offset = scenery_data_offset + scenery_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_scenery_vertices,
            max_lights,
            max_events,
            instance_data_floats,
            scenery_data_floats,
            light_data_floats,
            event_data_floats,
            camera_offset,
            instance_data_offset,
            scenery_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_scenery_vertices,
            config.max_lights,
            config.max_events,
        )
    }

    /// Header with capacities and protocol version filled in; counts zeroed.
    pub fn header(&self, viewport_width: f32, viewport_height: f32) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_VIEWPORT_WIDTH] = viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = viewport_height;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_MAX_SCENERY_VERTICES] = self.max_scenery_vertices as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header
    }
}
