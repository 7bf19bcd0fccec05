//! Tunable game settings, loadable from JSON sent by the host page.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::FieldParams;
use crate::game::{MAX_SHAPES, WORLD_HEIGHT};

/// Most leaves a field may hold. The rest of the shape budget is left to the
/// caterpillar.
pub const MAX_LEAVES: usize = MAX_SHAPES / 4;
/// Largest drift offset from a leaf's anchor.
pub const MAX_DRIFT_AMPLITUDE: f32 = WORLD_HEIGHT / 8.0;
/// Upper bound on rejection-sampling attempts per leaf.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1024;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("leaf_count must be at least 1")]
    NoLeaves,
    #[error("leaf_count {leaf_count} exceeds the maximum of {max}")]
    TooManyLeaves { leaf_count: usize, max: usize },
    #[error("{leaf_count} leaves need {leaf_count} distinct numbers but the window only offers {available}")]
    NumberWindowTooSmall { leaf_count: usize, available: u64 },
    #[error("leaf_radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("spawn area {min:?}..{max:?} is empty or unbounded")]
    EmptySpawnArea { min: [f32; 2], max: [f32; 2] },
    #[error("segment_size must be positive, got {0}")]
    NonPositiveSegment(f32),
    #[error("drift_amplitude must be within 0..={max}, got {amplitude}")]
    DriftAmplitude { amplitude: f32, max: f32 },
    #[error("drift_speed must be finite and non-negative, got {0}")]
    DriftSpeed(f32),
    #[error("min_separation must be finite and non-negative, got {0}")]
    MinSeparation(f32),
    #[error("placement_attempts must be within 1..={max}, got {attempts}")]
    PlacementAttempts { attempts: u32, max: u32 },
    #[error("shake_duration must be finite and non-negative, got {0}")]
    ShakeDuration(f32),
    #[error("win_length must be at least 1 (use null to play forever)")]
    ZeroWinLength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for placement, numbering and drift.
    pub seed: u64,
    /// Leaves kept on the field.
    pub leaf_count: usize,
    /// How far below the expected number distractors may go (floored at 1).
    pub numbers_below: u32,
    /// How far above the expected number distractors may go.
    pub numbers_above: u32,
    pub leaf_radius: f32,
    /// Minimum centre distance between freshly spawned leaves.
    pub min_separation: f32,
    pub spawn_min: [f32; 2],
    pub spawn_max: [f32; 2],
    pub drift_amplitude: f32,
    pub drift_speed: f32,
    pub placement_attempts: u32,
    pub segment_size: f32,
    pub caterpillar_origin: [f32; 2],
    /// Score that ends the game. `None` plays forever.
    pub win_length: Option<u32>,
    /// Seconds of screen shake after clicking a wrong leaf.
    pub shake_duration: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            leaf_count: 4,
            numbers_below: 4,
            numbers_above: 4,
            leaf_radius: 20.0,
            min_separation: 80.0,
            spawn_min: [50.0, 50.0],
            spawn_max: [550.0, 300.0],
            drift_amplitude: 6.0,
            drift_speed: 1.5,
            placement_attempts: 64,
            segment_size: 30.0,
            caterpillar_origin: [100.0, 360.0],
            win_length: Some(10),
            shake_duration: 0.5,
        }
    }
}

impl Settings {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.leaf_count == 0 {
            return Err(SettingsError::NoLeaves);
        }
        if self.leaf_count > MAX_LEAVES {
            return Err(SettingsError::TooManyLeaves {
                leaf_count: self.leaf_count,
                max: MAX_LEAVES,
            });
        }
        // Tightest case is expected = 1, where the window below is empty.
        let available = self.numbers_above as u64 + 1;
        if self.leaf_count as u64 > available {
            return Err(SettingsError::NumberWindowTooSmall {
                leaf_count: self.leaf_count,
                available,
            });
        }
        if !(self.leaf_radius.is_finite() && self.leaf_radius > 0.0) {
            return Err(SettingsError::NonPositiveRadius(self.leaf_radius));
        }
        let [min_x, min_y] = self.spawn_min;
        let [max_x, max_y] = self.spawn_max;
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !(finite && min_x <= max_x && min_y <= max_y) {
            return Err(SettingsError::EmptySpawnArea {
                min: self.spawn_min,
                max: self.spawn_max,
            });
        }
        if !(self.segment_size.is_finite() && self.segment_size > 0.0) {
            return Err(SettingsError::NonPositiveSegment(self.segment_size));
        }
        if !(0.0..=MAX_DRIFT_AMPLITUDE).contains(&self.drift_amplitude) {
            return Err(SettingsError::DriftAmplitude {
                amplitude: self.drift_amplitude,
                max: MAX_DRIFT_AMPLITUDE,
            });
        }
        if !(self.drift_speed.is_finite() && self.drift_speed >= 0.0) {
            return Err(SettingsError::DriftSpeed(self.drift_speed));
        }
        if !(self.min_separation.is_finite() && self.min_separation >= 0.0) {
            return Err(SettingsError::MinSeparation(self.min_separation));
        }
        if !(1..=MAX_PLACEMENT_ATTEMPTS).contains(&self.placement_attempts) {
            return Err(SettingsError::PlacementAttempts {
                attempts: self.placement_attempts,
                max: MAX_PLACEMENT_ATTEMPTS,
            });
        }
        if !(self.shake_duration.is_finite() && self.shake_duration >= 0.0) {
            return Err(SettingsError::ShakeDuration(self.shake_duration));
        }
        if self.win_length == Some(0) {
            return Err(SettingsError::ZeroWinLength);
        }
        Ok(())
    }

    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            target_count: self.leaf_count,
            leaf_radius: self.leaf_radius,
            min_separation: self.min_separation,
            spawn_min: Vec2::from(self.spawn_min),
            spawn_max: Vec2::from(self.spawn_max),
            drift_amplitude: self.drift_amplitude,
            drift_speed: self.drift_speed,
            placement_attempts: self.placement_attempts,
            numbers_below: self.numbers_below,
            numbers_above: self.numbers_above,
        }
    }

    pub fn caterpillar_origin(&self) -> Vec2 {
        Vec2::from(self.caterpillar_origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.field_params(), FieldParams::default());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let settings = Settings::from_json(r#"{ "leaf_count": 6, "numbers_above": 8, "win_length": null }"#).unwrap();
        assert_eq!(settings.leaf_count, 6);
        assert_eq!(settings.numbers_above, 8);
        assert_eq!(settings.win_length, None);
        assert_eq!(settings.seed, 42);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Settings::from_json("{ leaf_count: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_unusable_values() {
        let cases = [
            (r#"{ "leaf_count": 0 }"#, "NoLeaves"),
            (r#"{ "leaf_count": 6 }"#, "NumberWindowTooSmall"),
            (r#"{ "leaf_radius": 0 }"#, "NonPositiveRadius"),
            (r#"{ "spawn_min": [300, 50], "spawn_max": [200, 300] }"#, "EmptySpawnArea"),
            (r#"{ "segment_size": -1 }"#, "NonPositiveSegment"),
            (r#"{ "win_length": 0 }"#, "ZeroWinLength"),
            (r#"{ "spawn_max": [1e39, 300] }"#, "EmptySpawnArea"),
            (r#"{ "drift_amplitude": -1 }"#, "DriftAmplitude"),
            (r#"{ "drift_amplitude": 1e39 }"#, "DriftAmplitude"),
            (r#"{ "drift_amplitude": 500 }"#, "DriftAmplitude"),
            (r#"{ "drift_speed": -0.5 }"#, "DriftSpeed"),
            (r#"{ "drift_speed": 1e39 }"#, "DriftSpeed"),
            (r#"{ "min_separation": -10 }"#, "MinSeparation"),
            (r#"{ "placement_attempts": 0 }"#, "PlacementAttempts"),
            (r#"{ "placement_attempts": 100000 }"#, "PlacementAttempts"),
            (r#"{ "shake_duration": -1 }"#, "ShakeDuration"),
        ];
        for (json, expected) in cases {
            let err = Settings::from_json(json).unwrap_err();
            assert!(format!("{err:?}").starts_with(expected), "{json} gave {err:?}");
        }
    }

    #[test]
    fn leaf_count_is_capped_by_the_shape_budget() {
        let err = Settings::from_json(r#"{ "leaf_count": 200, "numbers_above": 300, "min_separation": 0 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::TooManyLeaves { leaf_count: 200, max: MAX_LEAVES }));

        let json = format!(r#"{{ "leaf_count": {MAX_LEAVES}, "numbers_above": 64 }}"#);
        assert_eq!(Settings::from_json(&json).unwrap().leaf_count, MAX_LEAVES);
    }

    #[test]
    fn window_error_message() {
        let err = Settings::from_json(r#"{ "leaf_count": 7, "numbers_above": 2 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "7 leaves need 7 distinct numbers but the window only offers 3"
        );
    }
}
