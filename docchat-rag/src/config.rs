//! Retrieval configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters for a thresholded similarity search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Number of top results to request from the store.
    pub top_k: usize,
    /// Minimum similarity score for a result to count as relevant.
    pub similarity_threshold: f32,
}

impl Default for RetrievalConfig {
    /// The stricter default used when the caller does not need high recall.
    fn default() -> Self {
        Self { top_k: 5, similarity_threshold: 0.4 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the number of top results to request.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the minimum similarity score for relevance.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Build the [`RetrievalConfig`], validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `top_k == 0` or the threshold is
    /// outside `[0, 1]`.
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        let threshold = self.config.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RagError::Config(format!(
                "similarity_threshold ({threshold}) must be within [0, 1]"
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RetrievalConfig::default();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.similarity_threshold, 0.4);
    }

    #[test]
    fn zero_top_k_is_rejected() {
        assert!(RetrievalConfig::builder().top_k(0).build().is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(RetrievalConfig::builder().similarity_threshold(1.5).build().is_err());
        assert!(RetrievalConfig::builder().similarity_threshold(-0.1).build().is_err());
    }
}
