use glam::Vec2;
use leaf_engine::EntityId;

/// Stable handle of a leaf inside a `LeafField`. Never reused within a field.
pub type LeafId = EntityId;

/// Gentle figure-eight sway around a fixed anchor.
/// Position is a pure function of the field clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Rest position the leaf sways around.
    pub anchor: Vec2,
    /// Starting angle (radians), so leaves don't sway in lockstep.
    pub phase: f32,
    /// Largest offset from the anchor in world units.
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
}

impl Drift {
    pub fn still(anchor: Vec2) -> Self {
        Self {
            anchor,
            phase: 0.0,
            amplitude: 0.0,
            speed: 0.0,
        }
    }

    pub fn position_at(&self, t: f32) -> Vec2 {
        let angle = self.phase + self.speed * t;
        self.anchor + Vec2::new(angle.sin(), 0.5 * (2.0 * angle).sin()) * self.amplitude
    }
}

/// A clickable numbered target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    pub id: LeafId,
    pub number: u32,
    /// Current centre in world space.
    pub pos: Vec2,
    /// Click-target radius.
    pub radius: f32,
    /// False once consumed by a correct click.
    pub alive: bool,
    pub drift: Drift,
}

impl Leaf {
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Whether `point` falls strictly inside the click circle.
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_at(pos: Vec2) -> Leaf {
        Leaf {
            id: EntityId(1),
            number: 3,
            pos,
            radius: 20.0,
            alive: true,
            drift: Drift::still(pos),
        }
    }

    #[test]
    fn contains_is_a_circle() {
        let leaf = leaf_at(Vec2::new(100.0, 100.0));
        assert!(leaf.contains(Vec2::new(100.0, 100.0)));
        assert!(leaf.contains(Vec2::new(119.0, 100.0)));
        assert!(leaf.contains(Vec2::new(110.0, 110.0)));
        assert!(!leaf.contains(Vec2::new(120.0, 100.0)));
        assert!(!leaf.contains(Vec2::new(115.0, 115.0)));
    }

    #[test]
    fn still_drift_never_moves() {
        let drift = Drift::still(Vec2::new(5.0, 6.0));
        assert_eq!(drift.position_at(0.0), Vec2::new(5.0, 6.0));
        assert_eq!(drift.position_at(12.5), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn drift_stays_within_amplitude() {
        let drift = Drift {
            anchor: Vec2::new(200.0, 150.0),
            phase: 0.7,
            amplitude: 6.0,
            speed: 1.5,
        };
        for i in 0..200 {
            let t = i as f32 * 0.05;
            let offset = drift.position_at(t) - drift.anchor;
            assert!(offset.x.abs() <= 6.0 + 1e-4 && offset.y.abs() <= 3.0 + 1e-4, "t={t} offset={offset}");
        }
        // Deterministic in t.
        assert_eq!(drift.position_at(3.25), drift.position_at(3.25));
    }
}
