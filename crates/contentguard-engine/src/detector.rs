//! Local content detection
//!
//! Runs the full heuristic pipeline for one image: statistics extraction,
//! the four category evaluators, and aggregation. Stateless and synchronous.

use crate::aggregate::aggregate;
use crate::evaluators::{drugs, nsfw, violence, weapons};
use crate::features::extract_statistics;
use contentguard_core::{ClassProbability, DetectionThresholds, PixelBuffer, Result, Verdict};
use std::time::Instant;
use tracing::debug;

/// Heuristic detector bound to a threshold configuration
#[derive(Debug, Clone, Default)]
pub struct LocalDetector {
    thresholds: DetectionThresholds,
}

impl LocalDetector {
    pub fn new(thresholds: DetectionThresholds) -> Self {
        Self { thresholds }
    }

    /// Analyze one image given the classifier's predictions for it
    pub fn detect(
        &self,
        buffer: &PixelBuffer,
        predictions: &[ClassProbability],
    ) -> Result<Verdict> {
        let start = Instant::now();
        let stats = extract_statistics(buffer)?;

        debug!(
            width = buffer.width(),
            height = buffer.height(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Statistics computed"
        );

        let nsfw = nsfw::evaluate(predictions, &self.thresholds.nsfw);
        let violence = violence::evaluate(&stats, &self.thresholds.violence);
        let drugs = drugs::evaluate(&stats, &self.thresholds.drugs);
        let weapons = weapons::evaluate(&stats, &self.thresholds.weapons);

        debug!(
            nsfw_safe = nsfw.safe,
            violence_safe = violence.safe,
            drugs_safe = drugs.safe,
            weapons_safe = weapons.safe,
            "Evaluators completed"
        );

        Ok(aggregate(nsfw, violence, drugs, weapons))
    }

    /// Get the threshold configuration
    pub fn thresholds(&self) -> &DetectionThresholds {
        &self.thresholds
    }
}
