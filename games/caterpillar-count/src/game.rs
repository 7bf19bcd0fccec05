use glam::Vec2;
use leaf_engine::*;

use crate::caterpillar::Caterpillar;
use crate::field::{ClickOutcome, LeafField};
use crate::sequence::SequenceState;
use crate::settings::Settings;

pub const WORLD_WIDTH: f32 = 600.0;
pub const WORLD_HEIGHT: f32 = 400.0;
/// Shapes the host can draw per frame.
pub const MAX_SHAPES: usize = 128;
/// Eyes on the caterpillar head.
const EYE_COUNT: usize = 2;

/// Leaves render as ellipses this much taller than wide.
const LEAF_EXTRA_HEIGHT: f32 = 10.0;
const EYE_SIZE: f32 = 4.0;
const EYE_OFFSET: f32 = 5.0;
const SHAKE_PIXELS: f32 = 4.0;
const SHAKE_FREQUENCY: f32 = 40.0;

/// Host text fields.
pub const TEXT_INSTRUCTION: TextSlot = TextSlot(0);
pub const TEXT_SCORE: TextSlot = TextSlot(1);
pub const TEXT_BANNER: TextSlot = TextSlot(2);

pub const WIN_INSTRUCTION: &str = "You Won!";
pub const WIN_BANNER: &str = "You Win! Well Done!";

/// Shape styles, matched by the page's palette.
pub mod styles {
    pub const LEAF: u32 = 0;
    pub const SEGMENT: u32 = 1;
    pub const HEAD: u32 = 2;
    pub const EYE: u32 = 3;
}

/// Game event kinds (Rust -> page)
pub mod events {
    /// a = score, b = next expected number
    pub const PROGRESS: f32 = 1.0;
    /// a = clicked number, b/c = click position
    pub const MISS: f32 = 2.0;
    /// a = final score
    pub const WON: f32 = 3.0;
}

/// Custom event kinds (page -> Rust)
pub mod custom {
    pub const NEW_GAME: u32 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Won,
}

pub struct CaterpillarGame {
    settings: Settings,
    sequence: SequenceState,
    field: LeafField,
    caterpillar: Caterpillar,
    phase: GamePhase,
    /// Remaining screen-shake time in seconds.
    shake: f32,
}

impl CaterpillarGame {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            sequence: SequenceState::new(),
            field: LeafField::new(settings.field_params(), settings.seed),
            caterpillar: Caterpillar::new(settings.caterpillar_origin(), settings.segment_size, WORLD_WIDTH),
            phase: GamePhase::Playing,
            shake: 0.0,
            settings,
        }
    }

    pub fn sequence(&self) -> &SequenceState {
        &self.sequence
    }

    pub fn field(&self) -> &LeafField {
        &self.field
    }

    pub fn caterpillar(&self) -> &Caterpillar {
        &self.caterpillar
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Text for the instruction field.
    pub fn instruction_text(&self) -> String {
        match self.phase {
            GamePhase::Playing => self.sequence.instruction_text(),
            GamePhase::Won => WIN_INSTRUCTION.to_owned(),
        }
    }

    /// Start over with a fresh field drawn from `seed`.
    fn restart(&mut self, seed: u64) {
        self.sequence.reset();
        self.caterpillar.clear();
        self.phase = GamePhase::Playing;
        self.shake = 0.0;
        self.field.reseed(seed);
        self.deal_field();
    }

    fn deal_field(&mut self) {
        let expected = self.sequence.expected_number();
        let range = self.field.number_range(expected);
        self.field.populate(self.settings.leaf_count, range, expected);
    }

    fn handle_click(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        if self.phase == GamePhase::Won {
            return;
        }

        let outcome = self.field.resolve_click(pos.x, pos.y, &mut self.sequence);
        match outcome {
            ClickOutcome { hit: Some(leaf), matched: true } => {
                self.caterpillar.grow(leaf.number);
                let score = self.sequence.current_score();
                ctx.emit_event(GameEvent::new(
                    events::PROGRESS,
                    score as f32,
                    self.sequence.expected_number() as f32,
                    0.0,
                ));
                log::debug!("matched {}, length now {}", leaf.number, score);

                if self.settings.win_length.is_some_and(|len| score >= len) {
                    self.phase = GamePhase::Won;
                    self.field.clear();
                    ctx.emit_event(GameEvent::new(events::WON, score as f32, 0.0, 0.0));
                    log::info!("caterpillar reached length {}: game won", score);
                }
            }
            ClickOutcome { hit: Some(leaf), matched: false } => {
                self.shake = self.settings.shake_duration;
                ctx.emit_event(GameEvent::new(events::MISS, leaf.number as f32, pos.x, pos.y));
            }
            ClickOutcome { hit: None, .. } => {}
        }
    }

    /// Horizontal jitter while a wrong-click shake is running.
    fn shake_offset(&self) -> Vec2 {
        if self.shake <= 0.0 || self.settings.shake_duration <= 0.0 {
            return Vec2::ZERO;
        }
        let fade = self.shake / self.settings.shake_duration;
        Vec2::new((self.shake * SHAKE_FREQUENCY).sin() * SHAKE_PIXELS * fade, 0.0)
    }

    fn draw_leaves(&self, surface: &mut dyn DrawSurface, offset: Vec2) {
        for leaf in self.field.leaves().iter().filter(|l| l.alive) {
            let diameter = leaf.radius * 2.0;
            surface.draw_shape(
                ShapeInstance::ellipse(
                    leaf.pos + offset,
                    Vec2::new(diameter, diameter + LEAF_EXTRA_HEIGHT),
                    styles::LEAF,
                )
                .with_label(leaf.number),
            );
        }
    }

    fn draw_caterpillar(&self, surface: &mut dyn DrawSurface, offset: Vec2) {
        let size = Vec2::splat(self.caterpillar.segment_size());
        // Whatever the leaves leave over, minus the eyes. The oldest tail
        // segments are the ones dropped.
        let budget = MAX_SHAPES.saturating_sub(self.field.len() + EYE_COUNT);
        let segments = self.caterpillar.segments();
        let visible = &segments[..segments.len().min(budget)];
        // Tail first so the head ends up on top.
        for (i, segment) in visible.iter().enumerate().rev() {
            let style = if i == 0 { styles::HEAD } else { styles::SEGMENT };
            let pos = segment.pos + offset;
            surface.draw_shape(ShapeInstance::ellipse(pos, size, style).with_label(segment.number));
            if i == 0 {
                for dx in [-EYE_OFFSET, EYE_OFFSET] {
                    surface.draw_shape(ShapeInstance::ellipse(
                        pos + Vec2::new(dx, -EYE_OFFSET),
                        Vec2::splat(EYE_SIZE),
                        styles::EYE,
                    ));
                }
            }
        }
    }
}

impl Default for CaterpillarGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for CaterpillarGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            max_shapes: MAX_SHAPES,
            seed: self.settings.seed,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        self.deal_field();
        log::info!(
            "dealt {} leaves, looking for {}",
            self.field.len(),
            self.sequence.expected_number()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        if input.has_custom(custom::NEW_GAME) {
            let seed = ctx.rng.next_u64();
            self.restart(seed);
            ctx.emit_event(GameEvent::new(events::PROGRESS, 0.0, 1.0, 0.0));
            log::info!("new game");
        }

        for click in input.clicks() {
            self.handle_click(ctx, click);
        }

        self.field.tick(dt);
        self.shake = (self.shake - dt).max(0.0);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        let offset = self.shake_offset();
        self.draw_leaves(surface, offset);
        self.draw_caterpillar(surface, offset);

        surface.draw_text(TEXT_INSTRUCTION, &self.instruction_text());
        surface.draw_text(TEXT_SCORE, &self.sequence.score_text());
        if self.phase == GamePhase::Won {
            surface.draw_text(TEXT_BANNER, WIN_BANNER);
        }
    }

    fn load_settings(&mut self, _ctx: &mut EngineContext, json: &str) -> anyhow::Result<()> {
        let settings = Settings::from_json(json)?;
        log::info!("applying settings (seed {}, {} leaves)", settings.seed, settings.leaf_count);
        *self = Self::with_settings(settings);
        self.deal_field();
        Ok(())
    }
}
