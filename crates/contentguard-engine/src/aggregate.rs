//! Merging evaluator outputs into a verdict

use contentguard_core::{CategoryBreakdown, ContentDomain, EvaluationResult, Verdict};

/// Merge the four evaluator results.
///
/// Categories are sorted by descending confidence. The sort is stable, so ties
/// keep NSFW, Violence, Drugs, Weapons order.
pub fn aggregate(
    nsfw: EvaluationResult,
    violence: EvaluationResult,
    drugs: EvaluationResult,
    weapons: EvaluationResult,
) -> Verdict {
    let overall_safe = nsfw.safe && violence.safe && drugs.safe && weapons.safe;
    let warnings = [
        nsfw.warnings,
        violence.warnings,
        drugs.warnings,
        weapons.warnings,
    ]
    .concat();

    let details = CategoryBreakdown {
        nsfw: nsfw.categories,
        violence: violence.categories,
        drugs: drugs.categories,
        weapons: weapons.categories,
    };

    let mut categories: Vec<_> = ContentDomain::ALL
        .iter()
        .flat_map(|&domain| details.get(domain).iter().cloned())
        .collect();
    categories.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    Verdict {
        categories,
        overall_safe,
        warnings,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentguard_core::ContentCategory;

    fn single(label: &str, confidence: f64) -> EvaluationResult {
        EvaluationResult::new(
            vec![ContentCategory::new(label, confidence, 0.0)],
            vec![format!("{} warning", label)],
        )
    }

    #[test]
    fn test_sort_with_stable_ties() {
        let verdict = aggregate(
            single("nsfw", 0.5),
            single("violence", 0.9),
            single("drugs", 0.9),
            single("weapons", 0.3),
        );

        let order: Vec<_> = verdict
            .categories
            .iter()
            .map(|c| (c.label.as_str(), c.confidence))
            .collect();
        assert_eq!(
            order,
            [("violence", 0.9), ("drugs", 0.9), ("nsfw", 0.5), ("weapons", 0.3)]
        );
    }

    #[test]
    fn test_full_tie_follows_domain_order() {
        let verdict = aggregate(
            single("nsfw", 0.7),
            single("violence", 0.7),
            single("drugs", 0.7),
            single("weapons", 0.7),
        );

        let labels: Vec<_> = verdict
            .categories
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ContentDomain::ALL.map(|d| d.name()));
        assert_eq!(verdict.top_category().unwrap().label, "nsfw");
        let weapons = verdict.details.get(ContentDomain::Weapons);
        assert_eq!(weapons[0].label, "weapons");
    }

    #[test]
    fn test_warnings_keep_evaluator_order() {
        let verdict = aggregate(
            single("nsfw", 0.1),
            EvaluationResult::clean(),
            single("drugs", 0.9),
            single("weapons", 0.5),
        );

        assert_eq!(
            verdict.warnings,
            ["nsfw warning", "drugs warning", "weapons warning"]
        );
        assert_eq!(verdict.details.nsfw.len(), 1);
        assert!(verdict.details.violence.is_empty());
    }

    #[test]
    fn test_overall_safe_is_conjunction() {
        let clean = aggregate(
            EvaluationResult::clean(),
            EvaluationResult::clean(),
            EvaluationResult::clean(),
            EvaluationResult::clean(),
        );
        assert!(clean.overall_safe);
        assert!(clean.categories.is_empty());

        let flagged = aggregate(
            EvaluationResult::clean(),
            EvaluationResult::clean(),
            EvaluationResult::clean(),
            single("weapons", 0.6),
        );
        assert!(!flagged.overall_safe);
        assert_eq!(flagged.flagged().count(), 1);
    }

    #[test]
    fn test_detected_but_not_blocking_stays_safe() {
        let drugs = EvaluationResult::new(
            vec![ContentCategory::new("drugs", 0.4, 0.45)],
            Vec::new(),
        );
        let verdict = aggregate(
            EvaluationResult::clean(),
            EvaluationResult::clean(),
            drugs,
            EvaluationResult::clean(),
        );

        assert!(verdict.overall_safe);
        assert_eq!(verdict.categories.len(), 1);
    }
}
