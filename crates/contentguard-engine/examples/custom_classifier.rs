//! Custom Classifier Example
//!
//! Plugs a hand-written classifier into the analyzer and runs a synthetic
//! image through the full pipeline twice, the second time from cache.
//!
//! Run with: cargo run --example custom_classifier

use async_trait::async_trait;
use contentguard_core::{BoxError, ClassProbability, PixelBuffer};
use contentguard_engine::{Classifier, ContentAnalyzer};
use std::time::Duration;

/// Scores images by how much of the frame is skin-toned
struct SkinToneClassifier;

fn is_skin_tone(p: &[f32]) -> bool {
    p[0] > 0.6 && p[1] > 0.4 && p[2] > 0.3 && p[0] > p[1] && p[1] > p[2]
}

#[async_trait]
impl Classifier for SkinToneClassifier {
    async fn classify(&self, image: &PixelBuffer) -> Result<Vec<ClassProbability>, BoxError> {
        let skin = image.pixels().filter(|p| is_skin_tone(p)).count() as f64
            / image.pixel_count() as f64;

        Ok(vec![
            ClassProbability::new("Neutral", 1.0 - skin),
            ClassProbability::new("Sexy", skin),
        ])
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = ContentAnalyzer::builder(|| async {
        // Stand-in for reading model weights
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, BoxError>(SkinToneClassifier)
    })
    .cache_capacity(4)
    .build()?;

    let image = PixelBuffer::from_fn(64, 64, |x, _| {
        if x < 52 {
            [0.9, 0.7, 0.55]
        } else {
            [0.1, 0.1, 0.1]
        }
    })?;

    for pass in 1..=2 {
        let report = analyzer
            .classify_and_analyze("synthetic://skin", &image)
            .await?;

        println!(
            "Pass {}: safe={} cached={}",
            pass, report.verdict.overall_safe, report.from_cache
        );
        for category in &report.verdict.categories {
            println!("  {} ({:.2})", category.label, category.confidence);
        }
    }

    let hit_rate = analyzer.cache_stats().hit_rate();
    println!("Cache hit rate: {:.0}%", hit_rate * 100.0);
    Ok(())
}
