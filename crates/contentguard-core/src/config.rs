//! Engine configuration
//!
//! All heuristic thresholds, pattern tables, cache limits and timeouts live
//! here, one record per concern. Defaults reproduce the shipped constants; any
//! field can be overridden from JSON without touching the evaluators.

use crate::error::{AnalysisError, Result};
use crate::statistics::StatisticKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-category detection thresholds
    pub thresholds: DetectionThresholds,
    /// Result cache limits
    pub cache: CacheConfig,
    /// Classifier timeouts
    pub timeouts: TimeoutConfig,
    /// Serve repeated keys from the result cache
    pub enable_cache: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: DetectionThresholds::default(),
            cache: CacheConfig::default(),
            timeouts: TimeoutConfig::default(),
            enable_cache: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::invalid(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits the engine cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_size == 0 {
            return Err(AnalysisError::invalid("cache.max_size must be at least 1"));
        }
        if self.cache.ttl_ms == 0 {
            return Err(AnalysisError::invalid("cache.ttl_ms must be positive"));
        }
        if self.timeouts.classifier_load_ms == 0 || self.timeouts.inference_ms == 0 {
            return Err(AnalysisError::invalid("timeouts must be positive"));
        }
        Ok(())
    }
}

/// Thresholds for all four evaluators
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    pub nsfw: NsfwThresholds,
    pub violence: ViolenceThresholds,
    pub drugs: DrugThresholds,
    pub weapons: WeaponThresholds,
}

/// Probability gates for the classifier's explicit-content classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NsfwThresholds {
    pub porn: f64,
    pub hentai: f64,
    pub sexy: f64,
}

impl Default for NsfwThresholds {
    fn default() -> Self {
        Self {
            porn: 0.6,
            hentai: 0.6,
            sexy: 0.7,
        }
    }
}

/// Violence rule: strong red cast plus high contrast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolenceThresholds {
    /// Minimum confidence to emit a category
    pub detection: f64,
    pub red_dominance: f64,
    pub contrast: f64,
    /// Confidence ceiling
    pub max_confidence: f64,
}

impl Default for ViolenceThresholds {
    fn default() -> Self {
        Self {
            detection: 0.65,
            red_dominance: 0.6,
            contrast: 0.7,
            max_confidence: 0.85,
        }
    }
}

/// Drug rule: best-matching visual pattern, with separate emit and block gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugThresholds {
    /// Raw pattern confidence needed to emit a category
    pub detection: f64,
    /// Boosted confidence needed to mark the category inappropriate
    pub blocking: f64,
    /// Multiplier applied to the raw confidence
    pub boost: f64,
    /// Confidence ceiling after boosting
    pub max_confidence: f64,
    /// Patterns, checked in order
    pub patterns: Vec<DrugPattern>,
}

impl Default for DrugThresholds {
    fn default() -> Self {
        Self {
            detection: 0.35,
            blocking: 0.45,
            boost: 1.3,
            max_confidence: 0.95,
            patterns: DrugPattern::defaults(),
        }
    }
}

/// One visual drug pattern.
///
/// Matches when both statistics strictly exceed their gates; its candidate
/// confidence is the mean of the two statistics times `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugPattern {
    /// Reason embedded in the category label
    pub reason: String,
    pub first: StatisticKind,
    pub first_gate: f64,
    pub second: StatisticKind,
    pub second_gate: f64,
    pub weight: f64,
}

impl DrugPattern {
    pub fn new(
        reason: impl Into<String>,
        (first, first_gate): (StatisticKind, f64),
        (second, second_gate): (StatisticKind, f64),
        weight: f64,
    ) -> Self {
        Self {
            reason: reason.into(),
            first,
            first_gate,
            second,
            second_gate,
            weight,
        }
    }

    /// Small objects, powder, pills, plant material, cylinders
    pub fn defaults() -> Vec<Self> {
        use StatisticKind::*;

        vec![
            Self::new(
                "small objects",
                (Sharpness, 0.4),
                (SmallObjectDensity, 0.3),
                1.0,
            ),
            Self::new(
                "powder substance",
                (WhiteDominance, 0.5),
                (Texture, 0.4),
                1.0,
            ),
            Self::new(
                "varied-color objects",
                (ColorVariety, 0.6),
                (Saturation, 0.5),
                0.8,
            ),
            Self::new(
                "plant material",
                (GreenDominance, 0.5),
                (Texture, 0.5),
                1.0,
            ),
            Self::new(
                "cylindrical objects",
                (LinearShapes, 0.4),
                (SmallObjectDensity, 0.3),
                0.9,
            ),
        ]
    }
}

/// Weapon rule: long straight edges on bright red/blue surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponThresholds {
    /// Minimum confidence to emit a category
    pub detection: f64,
    pub linear_shapes: f64,
    pub metallic: f64,
    /// Multiplier applied to linearShapes × metallic
    pub scale: f64,
    /// Confidence ceiling
    pub max_confidence: f64,
}

impl Default for WeaponThresholds {
    fn default() -> Self {
        Self {
            detection: 0.55,
            linear_shapes: 0.6,
            metallic: 0.5,
            scale: 0.85,
            max_confidence: 0.7,
        }
    }
}

/// Result cache limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached verdicts
    pub max_size: usize,
    /// Entry lifetime in milliseconds
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            ttl_ms: 5 * 60 * 1000,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

/// Bounds on the external classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Classifier initialization budget in milliseconds
    pub classifier_load_ms: u64,
    /// Per-image inference budget in milliseconds
    pub inference_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            classifier_load_ms: 30_000,
            inference_ms: 10_000,
        }
    }
}

impl TimeoutConfig {
    pub fn classifier_load(&self) -> Duration {
        Duration::from_millis(self.classifier_load_ms)
    }

    pub fn inference(&self) -> Duration {
        Duration::from_millis(self.inference_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.cache.max_size, 10);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.thresholds.nsfw.sexy, 0.7);
        assert_eq!(config.thresholds.drugs.patterns.len(), 5);
        assert!(config.enable_cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "thresholds": { "violence": { "detection": 0.5 } }, "cache": { "max_size": 3 } }"#,
        )
        .unwrap();

        assert_eq!(config.thresholds.violence.detection, 0.5);
        assert_eq!(config.thresholds.violence.contrast, 0.7);
        assert_eq!(config.cache.max_size, 3);
        assert_eq!(config.cache.ttl_ms, 300_000);
        assert_eq!(config.thresholds.drugs.patterns, DrugPattern::defaults());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "cache": { "max_size": 0 } }"#),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_drug_pattern_json() {
        let pattern: DrugPattern = serde_json::from_str(
            r#"{ "reason": "foil", "first": "metallic", "first_gate": 0.6,
                 "second": "texture", "second_gate": 0.3, "weight": 0.7 }"#,
        )
        .unwrap();

        assert_eq!(pattern.first, StatisticKind::Metallic);
        assert_eq!(pattern.weight, 0.7);
    }
}
