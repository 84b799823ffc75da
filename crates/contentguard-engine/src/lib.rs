//! ContentGuard Engine - Local Content Analysis
//!
//! This crate runs the content-safety heuristics on device and orchestrates
//! the external classifier around them.
//!
//! # Analysis Pipeline
//!
//! ```text
//! key ──→ [VerdictCache] ──hit──────────────────────────────────→ Verdict
//!              │ miss
//!              ↓
//!       [ClassifierLoader] → Classifier → [ClassProbability]
//!                                               ↓
//! PixelBuffer → features → ImageStatistics → evaluators → aggregate → Verdict
//! ```
//!
//! [`LocalDetector`] is the pure, synchronous part. [`ContentAnalyzer`] adds
//! the cache, single-flight classifier loading and timeouts.

pub mod aggregate;
pub mod analyzer;
pub mod cache;
pub mod classifier;
pub mod detector;
pub mod evaluators;
pub mod features;
pub mod loader;

// Re-export commonly used types
pub use aggregate::aggregate;
pub use analyzer::{AnalysisReport, ContentAnalyzer, ContentAnalyzerBuilder};
pub use cache::{CacheEntry, CacheStats, VerdictCache};
pub use classifier::{Classifier, StaticClassifier};
pub use detector::LocalDetector;
pub use features::extract_statistics;
pub use loader::{ClassifierLoader, LoaderState};
