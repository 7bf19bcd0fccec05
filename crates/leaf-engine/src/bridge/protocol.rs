//! Memory layout shared with the host page.
//! Must stay in sync with the page's `protocol.ts`.
//!
//! The host reads two flat f32 regions straight out of WASM memory each frame:
//! ```text
//! [Shapes: shape_count × 8 floats]   (x, y, width, height, style, label, alpha, rotation)
//! [Events: event_count × 4 floats]   (kind, a, b, c)
//! ```
//! Text fields are fetched separately as strings, one call per slot.

use crate::api::game::GameConfig;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: u32 = 1;

/// Capacities the host sizes its typed-array views with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolLayout {
    pub max_shapes: usize,
    pub max_events: usize,
}

impl ProtocolLayout {
    pub fn new(max_shapes: usize, max_events: usize) -> Self {
        Self {
            max_shapes,
            max_events,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_shapes, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::renderer::draw_list::ShapeInstance;

    #[test]
    fn default_layout() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_shapes, 256);
        assert_eq!(layout.max_events, 32);
    }

    #[test]
    fn wire_strides_match_structs() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), ShapeInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
