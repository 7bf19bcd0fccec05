//! Drawing-surface contract.
//!
//! Games only ever write to a surface; they never read pixels or layout back.
//! The browser page (Canvas2D, DOM text) is one backend, `DrawList` is the
//! in-memory one used by the WASM bridge and by tests.

use super::draw_list::ShapeInstance;

/// Index of a host text field (instruction line, score line, banner, ...).
/// Games define their own slot constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextSlot(pub u32);

pub trait DrawSurface {
    /// Discard everything drawn in the previous frame.
    fn begin_frame(&mut self);

    /// Queue one shape. Shapes are drawn in submission order (later on top).
    fn draw_shape(&mut self, shape: ShapeInstance);

    /// Set the contents of a text field for this frame.
    fn draw_text(&mut self, slot: TextSlot, text: &str);
}
