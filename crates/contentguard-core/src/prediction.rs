//! Class probabilities emitted by the external classifier

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single (label, probability) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    /// Class label as emitted by the classifier (e.g. "Porn", "Neutral")
    #[serde(alias = "className")]
    pub label: String,
    /// Probability in [0, 1]
    pub probability: f64,
}

impl ClassProbability {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Probability for `label`, or 0 when the classifier did not emit it.
///
/// Labels match exactly; the first occurrence wins.
pub fn probability_of(predictions: &[ClassProbability], label: &str) -> f64 {
    predictions
        .iter()
        .find(|p| p.label == label)
        .map(|p| p.probability)
        .unwrap_or(0.0)
}

/// Parses `Label=0.42`
impl FromStr for ClassProbability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, prob) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=PROBABILITY, got '{}'", s))?;

        let label = label.trim();
        if label.is_empty() {
            return Err(format!("missing label in '{}'", s));
        }

        let probability: f64 = prob
            .trim()
            .parse()
            .map_err(|e| format!("invalid probability in '{}': {}", s, e))?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(format!("probability {} is outside [0, 1]", probability));
        }

        Ok(Self::new(label, probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_lookup() {
        let predictions = vec![
            ClassProbability::new("Neutral", 0.7),
            ClassProbability::new("Porn", 0.2),
        ];

        assert_eq!(probability_of(&predictions, "Porn"), 0.2);
        assert_eq!(probability_of(&predictions, "Hentai"), 0.0);
        assert_eq!(probability_of(&predictions, "porn"), 0.0);
    }

    #[test]
    fn test_parse() {
        let p: ClassProbability = "Sexy=0.75".parse().unwrap();
        assert_eq!(p, ClassProbability::new("Sexy", 0.75));

        assert!("Sexy".parse::<ClassProbability>().is_err());
        assert!("=0.5".parse::<ClassProbability>().is_err());
        assert!("Porn=1.5".parse::<ClassProbability>().is_err());
    }

    #[test]
    fn test_deserialize_classifier_shape() {
        let json = r#"[{"className": "Porn", "probability": 0.61}]"#;
        let predictions: Vec<ClassProbability> = serde_json::from_str(json).unwrap();
        assert_eq!(predictions[0].label, "Porn");
    }
}
