use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::surface::{DrawSurface, TextSlot};

/// Per-shape draw data read by the host renderer straight out of WASM memory.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// X centre in world space.
    pub x: f32,
    /// Y centre in world space.
    pub y: f32,
    /// Ellipse width in world units.
    pub width: f32,
    /// Ellipse height in world units.
    pub height: f32,
    /// Game-defined style id (fill/stroke palette entry).
    pub style: f32,
    /// Number printed in the centre, or `ShapeInstance::NO_LABEL`.
    pub label: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Rotation in radians.
    pub rotation: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_LABEL: f32 = -1.0;

    /// An unlabeled ellipse centred at `pos`.
    pub fn ellipse(pos: Vec2, size: Vec2, style: u32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
            style: style as f32,
            label: Self::NO_LABEL,
            alpha: 1.0,
            rotation: 0.0,
        }
    }

    pub fn with_label(mut self, label: u32) -> Self {
        self.label = label as f32;
        self
    }

    pub fn label(&self) -> Option<u32> {
        (self.label >= 0.0).then_some(self.label as u32)
    }
}

/// Frame-sized buffer of shapes plus the current text fields.
#[derive(Debug)]
pub struct DrawList {
    shapes: Vec<ShapeInstance>,
    texts: Vec<String>,
    max_shapes: usize,
    overflowed: bool,
}

impl DrawList {
    pub fn with_capacity(max_shapes: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(max_shapes),
            texts: Vec::new(),
            max_shapes,
            overflowed: false,
        }
    }

    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    pub fn shapes_ptr(&self) -> *const f32 {
        self.shapes.as_ptr() as *const f32
    }

    pub fn shape_count(&self) -> u32 {
        self.shapes.len() as u32
    }

    /// Text currently held by a slot. Unset slots read as empty.
    pub fn text(&self, slot: TextSlot) -> &str {
        self.texts
            .get(slot.0 as usize)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All shapes carrying the given label, in draw order.
    pub fn shapes_labeled(&self, label: u32) -> impl Iterator<Item = &ShapeInstance> {
        self.shapes.iter().filter(move |s| s.label() == Some(label))
    }

    /// Whether any shape was dropped this frame for lack of capacity.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl DrawSurface for DrawList {
    fn begin_frame(&mut self) {
        self.shapes.clear();
        self.overflowed = false;
        for text in &mut self.texts {
            text.clear();
        }
    }

    fn draw_shape(&mut self, shape: ShapeInstance) {
        if self.shapes.len() >= self.max_shapes {
            if !self.overflowed {
                log::warn!("draw list full ({} shapes), dropping the rest of the frame", self.max_shapes);
            }
            self.overflowed = true;
            return;
        }
        self.shapes.push(shape);
    }

    fn draw_text(&mut self, slot: TextSlot, text: &str) {
        let idx = slot.0 as usize;
        if self.texts.len() <= idx {
            self.texts.resize_with(idx + 1, String::new);
        }
        let field = &mut self.texts[idx];
        field.clear();
        field.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_layout_matches_protocol() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), ShapeInstance::STRIDE_BYTES);
    }

    #[test]
    fn begin_frame_clears_shapes_and_texts() {
        let mut list = DrawList::default();
        list.draw_shape(ShapeInstance::ellipse(Vec2::new(1.0, 2.0), Vec2::splat(4.0), 0));
        list.draw_text(TextSlot(1), "hello");
        assert_eq!(list.shape_count(), 1);
        assert_eq!(list.text(TextSlot(1)), "hello");
        assert_eq!(list.text(TextSlot(0)), "");

        list.begin_frame();
        assert_eq!(list.shape_count(), 0);
        assert_eq!(list.text(TextSlot(1)), "");
    }

    #[test]
    fn labels_round_through_floats() {
        let shape = ShapeInstance::ellipse(Vec2::ZERO, Vec2::ONE, 2).with_label(17);
        assert_eq!(shape.label(), Some(17));
        assert_eq!(ShapeInstance::ellipse(Vec2::ZERO, Vec2::ONE, 2).label(), None);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut list = DrawList::with_capacity(2);
        for _ in 0..3 {
            list.draw_shape(ShapeInstance::default());
        }
        assert_eq!(list.shape_count(), 2);
        assert!(list.overflowed());
    }
}
