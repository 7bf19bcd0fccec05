use glam::Vec2;

/// One body segment, labelled with the number that grew it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub number: u32,
}

/// The caterpillar body. Purely visual: one segment per correct match, head first.
#[derive(Debug, Clone)]
pub struct Caterpillar {
    segments: Vec<Segment>,
    origin: Vec2,
    segment_size: f32,
    world_width: f32,
}

impl Caterpillar {
    pub fn new(origin: Vec2, segment_size: f32, world_width: f32) -> Self {
        Self {
            segments: Vec::with_capacity(16),
            origin,
            segment_size,
            world_width,
        }
    }

    /// Add a new head one segment to the right of the current one, turning
    /// downwards at the right edge of the world.
    pub fn grow(&mut self, number: u32) {
        let pos = match self.head() {
            None => self.origin,
            Some(head) => {
                let right = head.pos + Vec2::new(self.segment_size, 0.0);
                if right.x > self.world_width - self.segment_size {
                    head.pos + Vec2::new(0.0, self.segment_size)
                } else {
                    right
                }
            }
        };
        self.segments.insert(0, Segment { pos, number });
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Segments head first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_size(&self) -> f32 {
        self.segment_size
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_at_origin() {
        let mut c = Caterpillar::new(Vec2::new(100.0, 200.0), 30.0, 600.0);
        assert!(c.head().is_none());
        c.grow(1);
        assert_eq!(c.head().unwrap().pos, Vec2::new(100.0, 200.0));
        assert_eq!(c.head().unwrap().number, 1);
    }

    #[test]
    fn grows_to_the_right_head_first() {
        let mut c = Caterpillar::new(Vec2::new(100.0, 200.0), 30.0, 600.0);
        for n in 1..=3 {
            c.grow(n);
        }
        let numbers: Vec<u32> = c.segments().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
        assert_eq!(c.head().unwrap().pos, Vec2::new(160.0, 200.0));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn turns_down_at_right_edge() {
        let mut c = Caterpillar::new(Vec2::new(540.0, 200.0), 30.0, 600.0);
        c.grow(1);
        c.grow(2); // 570 still fits on the row
        assert_eq!(c.head().unwrap().pos, Vec2::new(570.0, 200.0));
        c.grow(3); // 600 does not
        assert_eq!(c.head().unwrap().pos, Vec2::new(570.0, 230.0));
        c.grow(4);
        assert_eq!(c.head().unwrap().pos, Vec2::new(570.0, 260.0));
    }

    #[test]
    fn clear_resets_to_origin() {
        let mut c = Caterpillar::new(Vec2::new(10.0, 10.0), 30.0, 600.0);
        c.grow(1);
        c.grow(2);
        c.clear();
        assert!(c.is_empty());
        c.grow(1);
        assert_eq!(c.head().unwrap().pos, Vec2::new(10.0, 10.0));
    }
}
