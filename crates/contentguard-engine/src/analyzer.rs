//! Content analysis orchestration

use crate::cache::{CacheStats, VerdictCache};
use crate::classifier::Classifier;
use crate::detector::LocalDetector;
use crate::loader::ClassifierLoader;
use contentguard_core::{
    AnalysisError, BoxError, ClassProbability, DetectionThresholds, EngineConfig, PixelBuffer,
    Result, Verdict,
};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, info, info_span, warn};

/// Outcome of a full classify-and-analyze call
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Aggregated verdict
    pub verdict: Verdict,
    /// Classifier predictions the verdict was computed from
    pub predictions: Vec<ClassProbability>,
    /// Whether the verdict was served from the result cache
    pub from_cache: bool,
}

/// Analyzes images for unsafe content.
///
/// Owns the heuristic detector, the lazily loaded classifier and the result
/// cache. Safe to share between tasks behind an `Arc`.
pub struct ContentAnalyzer<C> {
    detector: LocalDetector,
    loader: ClassifierLoader<C>,
    cache: Mutex<VerdictCache>,
    config: EngineConfig,
}

impl<C: Classifier> ContentAnalyzer<C> {
    /// Create a new analyzer builder around a classifier factory
    pub fn builder<F, Fut, E>(factory: F) -> ContentAnalyzerBuilder<C>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<C, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        ContentAnalyzerBuilder::new(ClassifierLoader::new(factory))
    }

    /// Analyze an image whose classifier predictions are already known.
    ///
    /// Within the cache TTL a repeated `key` returns the cached verdict.
    pub fn analyze(
        &self,
        key: &str,
        buffer: &PixelBuffer,
        predictions: &[ClassProbability],
    ) -> Result<Verdict> {
        let span = info_span!("analyze", key);
        let _enter = span.enter();

        if let Some(hit) = self.cached(key) {
            return Ok(hit.verdict);
        }

        let verdict = self.detector.detect(buffer, predictions)?;
        self.store(key, &verdict, predictions);
        Ok(verdict)
    }

    /// Run the full pipeline: cache lookup, classifier load, inference,
    /// local detection and cache population.
    ///
    /// Nothing is cached when any step fails.
    pub async fn classify_and_analyze(
        &self,
        key: &str,
        buffer: &PixelBuffer,
    ) -> Result<AnalysisReport> {
        let span = info_span!("classify_and_analyze", key);
        self.run_pipeline(key, buffer).instrument(span).await
    }

    async fn run_pipeline(&self, key: &str, buffer: &PixelBuffer) -> Result<AnalysisReport> {
        if let Some(hit) = self.cached(key) {
            return Ok(hit);
        }

        let start = Instant::now();
        let classifier = self.loader.get().await?;

        let budget = self.config.timeouts.inference();
        let inference = tokio::time::timeout(budget, classifier.classify(buffer));
        let predictions = match inference.await {
            Ok(Ok(predictions)) => predictions,
            Ok(Err(e)) => {
                warn!(error = %e, "Classifier inference failed");
                return Err(AnalysisError::ClassifierInference(e.to_string()));
            }
            Err(_) => {
                warn!(
                    timeout_ms = budget.as_millis() as u64,
                    "Classifier inference timed out"
                );
                return Err(AnalysisError::InferenceTimedOut(budget));
            }
        };

        debug!(
            classes = predictions.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Inference completed"
        );

        let verdict = self.detector.detect(buffer, &predictions)?;
        self.store(key, &verdict, &predictions);

        debug!(
            overall_safe = verdict.overall_safe,
            categories = verdict.categories.len(),
            total_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Analysis completed"
        );

        Ok(AnalysisReport {
            verdict,
            predictions,
            from_cache: false,
        })
    }

    /// Drop every cached verdict
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Snapshot of the cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats().clone()
    }

    /// Number of cached verdicts
    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Get the heuristic detector
    pub fn detector(&self) -> &LocalDetector {
        &self.detector
    }

    /// Get the classifier loader
    pub fn loader(&self) -> &ClassifierLoader<C> {
        &self.loader
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn cached(&self, key: &str) -> Option<AnalysisReport> {
        if !self.config.enable_cache {
            return None;
        }

        self.lock_cache().get(key).map(|entry| AnalysisReport {
            verdict: entry.verdict.clone(),
            predictions: entry.predictions.clone(),
            from_cache: true,
        })
    }

    fn store(&self, key: &str, verdict: &Verdict, predictions: &[ClassProbability]) {
        if self.config.enable_cache {
            self.lock_cache()
                .insert(key, verdict.clone(), predictions.to_vec());
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, VerdictCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Analyzer builder
pub struct ContentAnalyzerBuilder<C> {
    loader: ClassifierLoader<C>,
    config: EngineConfig,
}

impl<C: Classifier> ContentAnalyzerBuilder<C> {
    /// Create a new builder around a classifier loader
    pub fn new(loader: ClassifierLoader<C>) -> Self {
        Self {
            loader,
            config: EngineConfig::default(),
        }
    }

    /// Set configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set detection thresholds
    pub fn thresholds(mut self, thresholds: DetectionThresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Set maximum number of cached verdicts
    pub fn cache_capacity(mut self, max_size: usize) -> Self {
        self.config.cache.max_size = max_size;
        self
    }

    /// Set cached verdict lifetime
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl_ms = ttl.as_millis() as u64;
        self
    }

    /// Set classifier initialization timeout
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.classifier_load_ms = timeout.as_millis() as u64;
        self
    }

    /// Set per-image inference timeout
    pub fn inference_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.inference_ms = timeout.as_millis() as u64;
        self
    }

    /// Enable/disable the result cache
    pub fn enable_cache(mut self, enabled: bool) -> Self {
        self.config.enable_cache = enabled;
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Result<ContentAnalyzer<C>> {
        self.config.validate()?;

        info!(
            cache_size = self.config.cache.max_size,
            cache_ttl_ms = self.config.cache.ttl_ms,
            cache_enabled = self.config.enable_cache,
            load_timeout_ms = self.config.timeouts.classifier_load_ms,
            "Building content analyzer"
        );

        Ok(ContentAnalyzer {
            detector: LocalDetector::new(self.config.thresholds.clone()),
            loader: self.loader.with_timeout(self.config.timeouts.classifier_load()),
            cache: Mutex::new(VerdictCache::from_config(&self.config.cache)),
            config: self.config,
        })
    }
}
