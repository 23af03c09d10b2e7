use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

// Tuning for the paired YES/NO page.
pub const REPEL_RADIUS: f32 = 160.0;
pub const JUMP_MIN: f32 = 420.0;
pub const JUMP_MAX: f32 = 1180.0;
pub const RETARGET_COOLDOWN_MS: f64 = 1150.0;
pub const EASE_FAR: f32 = 0.06;
pub const EASE_NEAR: f32 = 0.20;
pub const SAFE_MARGIN: f32 = 70.0;
pub const EDGE_AVOIDANCE_STRENGTH: f32 = 0.85;
pub const CANDIDATE_COUNT: usize = 14;
pub const OVERLAP_PADDING: f32 = 10.0;
pub const PAIR_GAP: f32 = 60.0;
/// Fraction of the free vertical space above the paired start row.
pub const START_ROW_FRACTION: f32 = 0.75;

/// Center bias is `edge_avoidance_strength * CENTER_BIAS_SCALE`.
pub const CENTER_BIAS_SCALE: f32 = 0.10;
pub const JITTER_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
pub const MOUSE_SCORE_WEIGHT: f32 = 0.55;
pub const SAFETY_SCORE_WEIGHT: f32 = 0.45;

// Single-direction sampler: re-roll when the landing spot is still within
// this fraction of the repel radius.
pub const RETRY_LIMIT: usize = 4;
pub const RETRY_CLEARANCE_FRACTION: f32 = 0.8;

const LEGACY_REPEL_RADIUS: f32 = 140.0;
const LEGACY_JUMP_MIN: f32 = 70.0;
const LEGACY_EASE: f32 = 0.14;
const LEGACY_COOLDOWN_MS: f64 = 50.0;
pub const CAUGHT_LABEL: &str = "You got me! 🥲";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartLayout {
    Centered,
    #[default]
    PairedWithSibling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CandidateSampling {
    #[default]
    Weighted,
    SingleDirectionWithRetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Celebration,
    Refusal,
}

/// What a click that actually lands on the evasive element does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickAction {
    Navigate(Destination),
    Relabel(String),
}

impl Default for ClickAction {
    fn default() -> Self {
        ClickAction::Navigate(Destination::Refusal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub repel_radius: f32,
    pub jump_min: f32,
    pub jump_max: f32,
    pub retarget_cooldown_ms: f64,
    pub ease_far: f32,
    pub ease_near: f32,
    pub safe_margin: f32,
    pub edge_avoidance_strength: f32,
    pub candidate_count: usize,
    pub overlap_padding: f32,
    pub pair_gap: f32,
    pub enforce_overlap_avoidance: bool,
    pub start_layout: StartLayout,
    pub candidate_sampling: CandidateSampling,
    pub click_action: ClickAction,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            repel_radius: REPEL_RADIUS,
            jump_min: JUMP_MIN,
            jump_max: JUMP_MAX,
            retarget_cooldown_ms: RETARGET_COOLDOWN_MS,
            ease_far: EASE_FAR,
            ease_near: EASE_NEAR,
            safe_margin: SAFE_MARGIN,
            edge_avoidance_strength: EDGE_AVOIDANCE_STRENGTH,
            candidate_count: CANDIDATE_COUNT,
            overlap_padding: OVERLAP_PADDING,
            pair_gap: PAIR_GAP,
            enforce_overlap_avoidance: true,
            start_layout: StartLayout::PairedWithSibling,
            candidate_sampling: CandidateSampling::Weighted,
            click_action: ClickAction::default(),
        }
    }
}

impl ControllerConfig {
    /// The earlier single-button page: centered start, constant ease, no
    /// protected regions, one sampled direction with a few re-rolls.
    pub fn legacy() -> Self {
        Self {
            repel_radius: LEGACY_REPEL_RADIUS,
            jump_min: LEGACY_JUMP_MIN,
            retarget_cooldown_ms: LEGACY_COOLDOWN_MS,
            ease_far: LEGACY_EASE,
            ease_near: LEGACY_EASE,
            enforce_overlap_avoidance: false,
            start_layout: StartLayout::Centered,
            candidate_sampling: CandidateSampling::SingleDirectionWithRetry,
            click_action: ClickAction::Relabel(CAUGHT_LABEL.to_string()),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn center_bias(&self) -> f32 {
        self.edge_avoidance_strength * CENTER_BIAS_SCALE
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("repel_radius", self.repel_radius as f64),
            ("jump_min", self.jump_min as f64),
            ("jump_max", self.jump_max as f64),
            ("retarget_cooldown_ms", self.retarget_cooldown_ms),
            ("ease_far", self.ease_far as f64),
            ("ease_near", self.ease_near as f64),
            ("safe_margin", self.safe_margin as f64),
            ("edge_avoidance_strength", self.edge_avoidance_strength as f64),
            ("overlap_padding", self.overlap_padding as f64),
            ("pair_gap", self.pair_gap as f64),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.repel_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRepelRadius(self.repel_radius));
        }

        let non_negative = [
            ("jump_min", self.jump_min as f64),
            ("retarget_cooldown_ms", self.retarget_cooldown_ms),
            ("safe_margin", self.safe_margin as f64),
            ("overlap_padding", self.overlap_padding as f64),
            ("pair_gap", self.pair_gap as f64),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.jump_min > self.jump_max {
            return Err(ConfigError::InvertedJumpRange {
                min: self.jump_min,
                max: self.jump_max,
            });
        }

        for (field, value) in [("ease_far", self.ease_far), ("ease_near", self.ease_near)] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ConfigError::EaseOutOfRange { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.edge_avoidance_strength) {
            return Err(ConfigError::EdgeAvoidanceOutOfRange(
                self.edge_avoidance_strength,
            ));
        }

        if self.candidate_count == 0 {
            return Err(ConfigError::NoCandidates);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
        assert_eq!(ControllerConfig::legacy().validate(), Ok(()));
    }

    #[test]
    fn legacy_preset_uses_constant_ease() {
        let legacy = ControllerConfig::legacy();
        assert_eq!(legacy.ease_far, legacy.ease_near);
        assert_eq!(legacy.start_layout, StartLayout::Centered);
        assert!(!legacy.enforce_overlap_avoidance);
    }

    #[test]
    fn rejects_inverted_jump_range() {
        let config = ControllerConfig {
            jump_min: 500.0,
            jump_max: 100.0,
            ..ControllerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedJumpRange {
                min: 500.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn rejects_ease_outside_open_unit_interval() {
        let config = ControllerConfig {
            ease_near: 1.0,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EaseOutOfRange {
                field: "ease_near",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_candidates_and_nan() {
        let config = ControllerConfig {
            candidate_count: 0,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoCandidates));

        let config = ControllerConfig {
            safe_margin: f32::NAN,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "safe_margin",
                ..
            })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            ControllerConfig::from_json(r#"{ "repel_radius": 200.0, "candidate_count": 10 }"#)
                .unwrap();
        assert_eq!(config.repel_radius, 200.0);
        assert_eq!(config.candidate_count, 10);
        assert_eq!(config.jump_min, JUMP_MIN);
        assert_eq!(config.candidate_sampling, CandidateSampling::Weighted);
    }

    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = ControllerConfig::from_json(r#"{ "repel_radius": -1.0 }"#).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveRepelRadius(-1.0));

        let err = ControllerConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn click_action_round_trips_through_json() {
        let config = ControllerConfig::legacy();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ControllerConfig::from_json(&json).unwrap();
        assert_eq!(parsed.click_action, ClickAction::Relabel(CAUGHT_LABEL.into()));
    }
}
