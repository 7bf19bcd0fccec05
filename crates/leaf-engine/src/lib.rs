pub mod api;
pub mod bridge;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent};
pub use bridge::protocol::{ProtocolLayout, PROTOCOL_VERSION};
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::draw_list::{DrawList, ShapeInstance};
pub use renderer::surface::{DrawSurface, TextSlot};
