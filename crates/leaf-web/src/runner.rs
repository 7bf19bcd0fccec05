use leaf_engine::{
    DrawList, DrawSurface, EngineContext, FixedTimestep, Game, GameConfig, InputEvent,
    InputQueue, ProtocolLayout, TextSlot,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game keeps a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    draw_list: DrawList,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            draw_list: DrawList::with_capacity(config.max_shapes),
            timestep: FixedTimestep::new(config.fixed_dt),
            layout: ProtocolLayout::from_config(&config),
            config,
            game,
            initialized: false,
        }
    }

    /// Initialize the game and draw the first frame. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.redraw();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one animation frame: fixed-step updates, then a full render pass.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input, step_dt);
            // Input belongs to the first step only; with zero steps it waits for the next frame.
            if step == 0 {
                self.input.clear();
            }
        }

        self.redraw();
    }

    /// Hand host-supplied JSON settings to the game. Returns whether they were accepted.
    pub fn load_settings(&mut self, json: &str) -> bool {
        match self.game.load_settings(&mut self.ctx, json) {
            Ok(()) => {
                self.config = self.game.config();
                self.layout = ProtocolLayout::from_config(&self.config);
                self.timestep = FixedTimestep::new(self.config.fixed_dt);
                self.draw_list = DrawList::with_capacity(self.config.max_shapes);
                if self.initialized {
                    self.redraw();
                }
                true
            }
            Err(err) => {
                log::error!("settings rejected: {err:#}");
                false
            }
        }
    }

    fn redraw(&mut self) {
        self.draw_list.begin_frame();
        self.game.render(&mut self.draw_list);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- Pointer accessors for direct WASM memory reads ----

    pub fn shapes_ptr(&self) -> *const f32 {
        self.draw_list.shapes_ptr()
    }

    pub fn shape_count(&self) -> u32 {
        self.draw_list.shape_count()
    }

    pub fn text(&self, slot: u32) -> String {
        self.draw_list.text(TextSlot(slot)).to_owned()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_shapes(&self) -> u32 {
        self.layout.max_shapes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}
