//! Analysis results
//!
//! Evaluators emit [`EvaluationResult`]s; the aggregator merges the four of
//! them into one [`Verdict`].

use serde::{Deserialize, Serialize};

/// Content domain covered by one evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDomain {
    Nsfw,
    Violence,
    Drugs,
    Weapons,
}

impl ContentDomain {
    /// Evaluation order; aggregation uses it to break confidence ties
    pub const ALL: [ContentDomain; 4] = [
        ContentDomain::Nsfw,
        ContentDomain::Violence,
        ContentDomain::Drugs,
        ContentDomain::Weapons,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContentDomain::Nsfw => "nsfw",
            ContentDomain::Violence => "violence",
            ContentDomain::Drugs => "drugs",
            ContentDomain::Weapons => "weapons",
        }
    }
}

/// A flagged content category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCategory {
    /// Human-readable category label
    pub label: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Whether this category blocks the image
    pub is_inappropriate: bool,
}

impl ContentCategory {
    /// Create a category, flagging it when `confidence` strictly exceeds `threshold`
    pub fn new(label: impl Into<String>, confidence: f64, threshold: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            is_inappropriate: confidence > threshold,
        }
    }
}

/// Output of a single evaluator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Emitted categories, in emission order
    pub categories: Vec<ContentCategory>,
    /// True iff no emitted category is inappropriate
    pub safe: bool,
    /// Human-readable warnings
    pub warnings: Vec<String>,
}

impl EvaluationResult {
    /// Nothing detected
    pub fn clean() -> Self {
        Self {
            categories: Vec::new(),
            safe: true,
            warnings: Vec::new(),
        }
    }

    /// Build a result, deriving `safe` from the categories
    pub fn new(categories: Vec<ContentCategory>, warnings: Vec<String>) -> Self {
        let safe = categories.iter().all(|c| !c.is_inappropriate);
        Self {
            categories,
            safe,
            warnings,
        }
    }
}

/// Categories broken down by the evaluator that produced them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub nsfw: Vec<ContentCategory>,
    pub violence: Vec<ContentCategory>,
    pub drugs: Vec<ContentCategory>,
    pub weapons: Vec<ContentCategory>,
}

impl CategoryBreakdown {
    /// Categories for one domain
    pub fn get(&self, domain: ContentDomain) -> &[ContentCategory] {
        match domain {
            ContentDomain::Nsfw => &self.nsfw,
            ContentDomain::Violence => &self.violence,
            ContentDomain::Drugs => &self.drugs,
            ContentDomain::Weapons => &self.weapons,
        }
    }
}

/// Unified result of one image analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// All categories, highest confidence first
    pub categories: Vec<ContentCategory>,
    /// True iff no category is inappropriate
    pub overall_safe: bool,
    /// Warnings in evaluator order
    pub warnings: Vec<String>,
    /// Per-domain breakdown
    pub details: CategoryBreakdown,
}

impl Verdict {
    /// Categories that block the image
    pub fn flagged(&self) -> impl Iterator<Item = &ContentCategory> {
        self.categories.iter().filter(|c| c.is_inappropriate)
    }

    /// Highest-confidence category, if any
    pub fn top_category(&self) -> Option<&ContentCategory> {
        self.categories.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_threshold_is_strict() {
        assert!(!ContentCategory::new("x", 0.6, 0.6).is_inappropriate);
        assert!(ContentCategory::new("x", 0.61, 0.6).is_inappropriate);
    }

    #[test]
    fn test_evaluation_safe_flag() {
        assert!(EvaluationResult::clean().safe);

        let detected_only =
            EvaluationResult::new(vec![ContentCategory::new("a", 0.4, 0.45)], vec![]);
        assert!(detected_only.safe);

        let blocked = EvaluationResult::new(vec![ContentCategory::new("a", 0.5, 0.45)], vec![]);
        assert!(!blocked.safe);
    }

    #[test]
    fn test_breakdown_lookup() {
        let breakdown = CategoryBreakdown {
            drugs: vec![ContentCategory::new("d", 0.7, 0.45)],
            ..Default::default()
        };

        assert_eq!(breakdown.get(ContentDomain::Drugs).len(), 1);
        assert!(breakdown.get(ContentDomain::Nsfw).is_empty());
    }
}
