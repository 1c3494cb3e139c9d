//! Engine configuration.

use repform_core::Result;
use serde::{Deserialize, Serialize};

use crate::exercise::Exercise;

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Landmark gate configuration
    #[serde(default)]
    pub gate: GateConfig,

    /// Per-exercise threshold overrides
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// A joint counts as visible only when its visibility exceeds this
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,

    /// Minimum time between two "awaiting user" notices (seconds)
    #[serde(default = "default_notice_cooldown_secs")]
    pub notice_cooldown_secs: f64,
}

fn default_min_visibility() -> f32 {
    0.5
}

fn default_notice_cooldown_secs() -> f64 {
    5.0
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_visibility: default_min_visibility(),
            notice_cooldown_secs: default_notice_cooldown_secs(),
        }
    }
}

/// Angle thresholds (degrees) replacing a rule set's built-in values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseThresholds {
    pub neutral: Option<f64>,
    pub arm: Option<f64>,
    pub target: Option<f64>,
    pub secondary_target: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverrides {
    pub squat: ExerciseThresholds,
    pub bicep_curl: ExerciseThresholds,
    pub push_up: ExerciseThresholds,
    pub shoulder_press: ExerciseThresholds,
    pub lunge: ExerciseThresholds,
}

impl ThresholdOverrides {
    pub fn for_exercise(&self, exercise: Exercise) -> &ExerciseThresholds {
        match exercise {
            Exercise::Squat => &self.squat,
            Exercise::BicepCurl => &self.bicep_curl,
            Exercise::PushUp => &self.push_up,
            Exercise::ShoulderPress => &self.shoulder_press,
            Exercise::Lunge => &self.lunge,
        }
    }
}

impl EngineConfig {
    /// Load configuration from file, with `REPFORM__`-prefixed environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("REPFORM").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("REPFORM").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.gate.min_visibility, 0.5);
        assert_eq!(config.gate.notice_cooldown_secs, 5.0);
        assert_eq!(
            *config.thresholds.for_exercise(Exercise::Lunge),
            ExerciseThresholds::default()
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [gate]
            notice_cooldown_secs = 3.0

            [thresholds.bicep_curl]
            target = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.gate.notice_cooldown_secs, 3.0);
        assert_eq!(config.gate.min_visibility, 0.5);
        assert_eq!(config.thresholds.bicep_curl.target, Some(30.0));
        assert_eq!(config.thresholds.bicep_curl.arm, None);
        assert_eq!(config.thresholds.squat.target, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.gate.min_visibility, 0.5);
    }
}
