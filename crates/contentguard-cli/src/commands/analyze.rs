//! Analyze command

use contentguard_core::{ClassProbability, ContentDomain, EngineConfig, Verdict};
use contentguard_engine::{ContentAnalyzer, StaticClassifier};
use std::convert::Infallible;
use std::fs;
use tracing::info;

/// Run the analysis; returns whether the image is safe
pub async fn run(
    config: EngineConfig,
    path: &str,
    predictions_file: Option<&str>,
    probs: Vec<ClassProbability>,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut predictions = match predictions_file {
        Some(file) => {
            let raw = fs::read_to_string(file)?;
            serde_json::from_str::<Vec<ClassProbability>>(&raw)?
        }
        None => Vec::new(),
    };
    // Command-line values override the file
    for prob in probs {
        predictions.retain(|p| p.label != prob.label);
        predictions.push(prob);
    }

    info!(
        "Analyzing {} with {} class probabilities",
        path,
        predictions.len()
    );

    let buffer = super::load_image(path)?;
    let analyzer = ContentAnalyzer::builder(move || {
        let predictions = predictions.clone();
        async move { Ok::<_, Infallible>(StaticClassifier::new(predictions)) }
    })
    .config(config)
    .build()?;

    let report = analyzer.classify_and_analyze(path, &buffer).await?;

    if json {
        let output = serde_json::json!({
            "image": path,
            "verdict": report.verdict,
            "predictions": report.predictions,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_verdict(path, &report.verdict);
    }

    Ok(report.verdict.overall_safe)
}

fn print_verdict(path: &str, verdict: &Verdict) {
    println!("Image: {}", path);
    let status = if verdict.overall_safe {
        "SAFE"
    } else {
        "UNSAFE"
    };
    let blocked = verdict.flagged().count();
    println!("Verdict: {} ({} blocked)", status, blocked);
    if let Some(top) = verdict.top_category() {
        let percent = top.confidence * 100.0;
        println!("Top category: {} ({:.1}%)", top.label, percent);
    }

    println!();
    println!("By domain:");
    for domain in ContentDomain::ALL {
        let categories = verdict.details.get(domain);
        if categories.is_empty() {
            println!("  {:<10} clear", domain.name());
            continue;
        }
        for category in categories {
            println!(
                "  {:<10} {:<48} {:>5.1}%{}",
                domain.name(),
                category.label,
                category.confidence * 100.0,
                if category.is_inappropriate {
                    "  [blocked]"
                } else {
                    ""
                }
            );
        }
    }

    if !verdict.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &verdict.warnings {
            println!("  - {}", warning);
        }
    }
}
