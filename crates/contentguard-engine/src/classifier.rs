//! External classifier abstraction
//!
//! The probabilistic classifier is supplied by the caller; the engine only
//! consumes the class probabilities it emits.

use async_trait::async_trait;
use contentguard_core::{BoxError, ClassProbability, PixelBuffer};

/// An initialized image classifier
#[async_trait]
pub trait Classifier: Send + Sync + 'static {
    /// Classify one image
    async fn classify(&self, image: &PixelBuffer) -> Result<Vec<ClassProbability>, BoxError>;
}

/// A classifier that always returns the same predictions
///
/// Useful when the probabilities were produced out of band, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticClassifier {
    predictions: Vec<ClassProbability>,
}

impl StaticClassifier {
    pub fn new(predictions: Vec<ClassProbability>) -> Self {
        Self { predictions }
    }
}

#[async_trait]
impl Classifier for StaticClassifier {
    async fn classify(&self, _image: &PixelBuffer) -> Result<Vec<ClassProbability>, BoxError> {
        Ok(self.predictions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_classifier() {
        let classifier = StaticClassifier::new(vec![ClassProbability::new("Neutral", 0.99)]);
        let image = PixelBuffer::solid(2, 2, [0.5; 3]).unwrap();

        let predictions = classifier.classify(&image).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "Neutral");
    }
}
