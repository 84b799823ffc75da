//! Violence rule: strong red cast combined with high contrast

use contentguard_core::{ContentCategory, EvaluationResult, ImageStatistics, ViolenceThresholds};

pub const CATEGORY_LABEL: &str = "Possible violent content";
pub const WARNING: &str = "Possible violent content or blood";

pub fn evaluate(stats: &ImageStatistics, thresholds: &ViolenceThresholds) -> EvaluationResult {
    if stats.red_dominance <= thresholds.red_dominance || stats.contrast <= thresholds.contrast {
        return EvaluationResult::clean();
    }

    let confidence = (stats.red_dominance * stats.contrast).min(thresholds.max_confidence);
    if confidence <= thresholds.detection {
        return EvaluationResult::clean();
    }

    EvaluationResult::new(
        vec![ContentCategory::new(
            CATEGORY_LABEL,
            confidence,
            thresholds.detection,
        )],
        vec![WARNING.to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(red_dominance: f64, contrast: f64) -> ImageStatistics {
        ImageStatistics {
            red_dominance,
            contrast,
            ..Default::default()
        }
    }

    #[test]
    fn test_outer_gate_passes_inner_gate_fails() {
        // 0.61 × 0.71 = 0.433, below the 0.65 detection gate
        let result = evaluate(&stats(0.61, 0.71), &ViolenceThresholds::default());
        assert!(result.categories.is_empty());
        assert!(result.safe);
    }

    #[test]
    fn test_outer_gate_is_strict() {
        let result = evaluate(&stats(0.6, 1.0), &ViolenceThresholds::default());
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_confidence_is_capped() {
        let result = evaluate(&stats(1.0, 1.0), &ViolenceThresholds::default());

        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].confidence, 0.85);
        assert!(result.categories[0].is_inappropriate);
        assert!(!result.safe);
        assert_eq!(result.warnings, vec![WARNING]);
    }

    #[test]
    fn test_emits_above_detection() {
        let result = evaluate(&stats(0.9, 0.8), &ViolenceThresholds::default());
        assert!((result.categories[0].confidence - 0.72).abs() < 1e-9);
    }
}
