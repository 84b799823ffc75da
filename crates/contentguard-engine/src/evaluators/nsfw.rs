//! Explicit-content rule over classifier probabilities

use contentguard_core::{
    ClassProbability, ContentCategory, EvaluationResult, NsfwThresholds, probability_of,
};

/// Classifier labels this rule reads
pub const LABEL_PORN: &str = "Porn";
pub const LABEL_HENTAI: &str = "Hentai";
pub const LABEL_SEXY: &str = "Sexy";

/// Flag each explicit class whose probability exceeds its gate
pub fn evaluate(predictions: &[ClassProbability], thresholds: &NsfwThresholds) -> EvaluationResult {
    let rules = [
        (
            LABEL_PORN,
            thresholds.porn,
            "Pornography",
            "Explicit sexual content",
        ),
        (
            LABEL_HENTAI,
            thresholds.hentai,
            "Hentai content",
            "Animated sexual content",
        ),
        (
            LABEL_SEXY,
            thresholds.sexy,
            "Suggestive content",
            "Sexually suggestive content",
        ),
    ];

    let mut categories = Vec::new();
    let mut warnings = Vec::new();

    for (class, gate, label, warning) in rules {
        let probability = probability_of(predictions, class);
        if probability > gate {
            categories.push(ContentCategory::new(label, probability, gate));
            warnings.push(warning.to_string());
        }
    }

    EvaluationResult::new(categories, warnings)
}
