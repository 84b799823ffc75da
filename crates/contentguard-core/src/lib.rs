//! ContentGuard Core - Content-safety analysis types
//!
//! ContentGuard classifies an image into content-safety categories (explicit
//! content, violence, drug paraphernalia, weapons) entirely on device. It
//! combines an external classifier's class probabilities with heuristic
//! statistics computed from the raw pixels.
//!
//! # Data Flow
//!
//! ```text
//! PixelBuffer ──→ ImageStatistics ──→ Violence / Drugs / Weapons ──┐
//!                                                                   ├──→ Verdict
//! Classifier ──→ [ClassProbability] ──→ NSFW ───────────────────────┘
//! ```
//!
//! This crate holds the data model, configuration records and error types.
//! The algorithms live in `contentguard-engine`.

pub mod config;
pub mod error;
pub mod image;
pub mod prediction;
pub mod statistics;
pub mod verdict;

// Re-export commonly used types
pub use config::{
    CacheConfig, DetectionThresholds, DrugPattern, DrugThresholds, EngineConfig, NsfwThresholds,
    TimeoutConfig, ViolenceThresholds, WeaponThresholds,
};
pub use error::{AnalysisError, AnalysisStage, BoxError, LoadError, Result};
pub use image::PixelBuffer;
pub use prediction::{ClassProbability, probability_of};
pub use statistics::{ImageStatistics, StatisticKind};
pub use verdict::{CategoryBreakdown, ContentCategory, ContentDomain, EvaluationResult, Verdict};
