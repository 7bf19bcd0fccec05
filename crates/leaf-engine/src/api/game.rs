use crate::api::types::GameEvent;
use crate::core::rng::Rng;
use crate::input::queue::InputQueue;
use crate::renderer::surface::DrawSurface;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units. Pointer coordinates share this space.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of shapes drawn per frame (default: 256).
    pub max_shapes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the context RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 600.0,
            world_height: 400.0,
            max_shapes: 256,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds the events that arrived since the
    /// previous frame on the first step of a frame, and is empty afterwards.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Read-only render pass. Issue every draw command for the frame.
    fn render(&self, _surface: &mut dyn DrawSurface) {}

    /// Apply settings delivered by the host as JSON.
    /// On error the game must keep its previous settings.
    fn load_settings(&mut self, _ctx: &mut EngineContext, _json: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rng: Rng::new(config.seed),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
        }
    }

    /// Emit a game event to be forwarded to the host page.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event capacity {} reached, dropping {:?}", self.max_events, event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_follows_config_seed() {
        let config = GameConfig {
            seed: 9,
            ..GameConfig::default()
        };
        let mut a = EngineContext::new(&config);
        let mut b = EngineContext::new(&config);
        assert_eq!(a.rng.next_u64(), b.rng.next_u64());
    }

    #[test]
    fn events_are_capped_per_frame() {
        let config = GameConfig {
            max_events: 2,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::new(&config);
        for i in 0..5 {
            ctx.emit_event(GameEvent::new(1.0, i as f32, 0.0, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
