//! Error types for content analysis

use std::time::Duration;
use thiserror::Error;

/// Error type produced by external collaborators (classifier factory and inference)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Classifier initialization errors
///
/// Cloneable so a single failed load can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The factory returned an error
    #[error("classifier factory failed: {0}")]
    Failed(String),

    /// The factory did not resolve within the load timeout
    #[error("classifier load timed out after {0:?}")]
    TimedOut(Duration),
}

/// Pipeline stage at which an analysis failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    /// Input validation (pixel buffer, configuration)
    Input,
    /// Classifier initialization
    ClassifierLoad,
    /// Classifier inference
    Inference,
}

/// Content analysis errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Classifier initialization failed: {0}")]
    ClassifierInit(#[from] LoadError),

    #[error("Classifier inference failed: {0}")]
    ClassifierInference(String),

    #[error("Classifier inference timed out after {0:?}")]
    InferenceTimedOut(Duration),
}

impl AnalysisError {
    /// Stage that produced this error
    pub fn stage(&self) -> AnalysisStage {
        match self {
            AnalysisError::InvalidInput(_) => AnalysisStage::Input,
            AnalysisError::ClassifierInit(_) => AnalysisStage::ClassifierLoad,
            AnalysisError::ClassifierInference(_) | AnalysisError::InferenceTimedOut(_) => {
                AnalysisStage::Inference
            }
        }
    }

    /// Whether re-invoking the analysis could succeed.
    ///
    /// Malformed input fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AnalysisError::InvalidInput(_))
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(message.into())
    }
}

/// Result type for content analysis
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_stages() {
        assert_eq!(
            AnalysisError::invalid("empty").stage(),
            AnalysisStage::Input
        );
        assert_eq!(
            AnalysisError::from(LoadError::Failed("boom".into())).stage(),
            AnalysisStage::ClassifierLoad
        );
        assert_eq!(
            AnalysisError::InferenceTimedOut(Duration::from_secs(1)).stage(),
            AnalysisStage::Inference
        );
    }

    #[test]
    fn test_retryable() {
        let inference = AnalysisError::ClassifierInference("oom".into());
        let timed_out = AnalysisError::from(LoadError::TimedOut(Duration::from_secs(30)));

        assert!(!AnalysisError::invalid("zero area").is_retryable());
        assert!(inference.is_retryable());
        assert!(timed_out.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::from(LoadError::Failed("weights missing".into()));
        assert_eq!(
            err.to_string(),
            "Classifier initialization failed: classifier factory failed: weights missing"
        );
    }
}
