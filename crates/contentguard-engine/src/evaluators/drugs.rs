//! Drug paraphernalia rule
//!
//! Checks every configured pattern and keeps the strongest match. The raw
//! confidence must clear the detection gate for a category to be emitted; the
//! boosted confidence must clear the separate blocking gate for that category
//! to be marked inappropriate.

use contentguard_core::{
    ContentCategory, DrugPattern, DrugThresholds, EvaluationResult, ImageStatistics,
};
use tracing::debug;

pub const WARNING: &str = "Possible drug-related content";

/// Strongest matching pattern confidence and the reasons of every match
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternMatch {
    pub confidence: f64,
    pub reasons: Vec<String>,
}

/// Candidate confidence for one pattern, if both gates pass
fn pattern_confidence(stats: &ImageStatistics, pattern: &DrugPattern) -> Option<f64> {
    let first = stats.get(pattern.first);
    let second = stats.get(pattern.second);

    if first > pattern.first_gate && second > pattern.second_gate {
        Some((first + second) / 2.0 * pattern.weight)
    } else {
        None
    }
}

/// Match all patterns; confidence is the max across matches, not the sum
pub fn detect_patterns(stats: &ImageStatistics, patterns: &[DrugPattern]) -> PatternMatch {
    patterns
        .iter()
        .filter_map(|p| pattern_confidence(stats, p).map(|c| (p, c)))
        .fold(PatternMatch::default(), |mut acc, (pattern, confidence)| {
            acc.confidence = acc.confidence.max(confidence);
            acc.reasons.push(pattern.reason.clone());
            acc
        })
}

/// Category label embedding the matched reasons
pub fn category_label(reasons: &[String]) -> String {
    format!("Possible drug content ({})", reasons.join(", "))
}

pub fn evaluate(stats: &ImageStatistics, thresholds: &DrugThresholds) -> EvaluationResult {
    let matched = detect_patterns(stats, &thresholds.patterns);

    if matched.confidence <= thresholds.detection {
        debug!(confidence = matched.confidence, "No drug pattern detected");
        return EvaluationResult::clean();
    }

    let confidence = (matched.confidence * thresholds.boost).min(thresholds.max_confidence);
    let category = ContentCategory::new(
        category_label(&matched.reasons),
        confidence,
        thresholds.blocking,
    );

    debug!(
        raw = matched.confidence,
        confidence,
        blocked = category.is_inappropriate,
        reasons = ?matched.reasons,
        "Drug pattern detected"
    );

    let warnings = if category.is_inappropriate {
        vec![WARNING.to_string()]
    } else {
        Vec::new()
    };

    EvaluationResult::new(vec![category], warnings)
}
