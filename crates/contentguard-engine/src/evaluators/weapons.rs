//! Weapons rule: long straight edges on bright metallic-looking surfaces

use contentguard_core::{ContentCategory, EvaluationResult, ImageStatistics, WeaponThresholds};

pub const CATEGORY_LABEL: &str = "Possible weapons present";

pub fn evaluate(stats: &ImageStatistics, thresholds: &WeaponThresholds) -> EvaluationResult {
    if stats.linear_shapes <= thresholds.linear_shapes || stats.metallic <= thresholds.metallic {
        return EvaluationResult::clean();
    }

    let confidence = (stats.linear_shapes * stats.metallic * thresholds.scale)
        .min(thresholds.max_confidence);
    if confidence <= thresholds.detection {
        return EvaluationResult::clean();
    }

    EvaluationResult::new(
        vec![ContentCategory::new(
            CATEGORY_LABEL,
            confidence,
            thresholds.detection,
        )],
        vec![CATEGORY_LABEL.to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(linear_shapes: f64, metallic: f64) -> ImageStatistics {
        ImageStatistics {
            linear_shapes,
            metallic,
            ..Default::default()
        }
    }

    #[test]
    fn test_detected() {
        // 0.9 × 0.8 × 0.85 = 0.612
        let result = evaluate(&stats(0.9, 0.8), &WeaponThresholds::default());

        assert_eq!(result.categories.len(), 1);
        assert!((result.categories[0].confidence - 0.612).abs() < 1e-9);
        assert!(result.categories[0].is_inappropriate);
        assert!(!result.safe);
    }

    #[test]
    fn test_inner_gate() {
        // 0.7 × 0.7 × 0.85 = 0.4165
        let result = evaluate(&stats(0.7, 0.7), &WeaponThresholds::default());
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_outer_gate_is_strict() {
        let thresholds = WeaponThresholds::default();
        assert!(evaluate(&stats(0.6, 1.0), &thresholds).safe);
        assert!(
            evaluate(&stats(1.0, 0.5), &WeaponThresholds::default())
                .categories
                .is_empty()
        );
    }

    #[test]
    fn test_confidence_capped() {
        let result = evaluate(&stats(1.0, 1.0), &WeaponThresholds::default());
        assert_eq!(result.categories[0].confidence, 0.7);
    }
}
