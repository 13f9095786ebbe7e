//! Classifier configuration.

/// Tuning knobs for training and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentConfig {
    /// Minimum posterior for a classification to be turned into a command.
    pub threshold: f64,
    /// Lidstone smoothing added to every feature count.
    pub smoothing: f64,
    /// Minimum Jaro-Winkler similarity for a misspelled entity to match.
    pub fuzzy_threshold: f64,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            smoothing: 0.1,
            fuzzy_threshold: 0.92,
        }
    }
}

impl IntentConfig {
    /// Set the confidence threshold (clamped to 0-1).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the smoothing constant (must stay positive).
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.max(f64::EPSILON);
        self
    }

    /// Set the fuzzy entity threshold (clamped to 0-1).
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = IntentConfig::default();
        assert_eq!(cfg.threshold, 0.7);
        assert_eq!(cfg.smoothing, 0.1);
        assert_eq!(cfg.fuzzy_threshold, 0.92);
    }

    #[test]
    fn builder_methods_clamp() {
        let cfg = IntentConfig::default()
            .with_threshold(1.5)
            .with_smoothing(-1.0)
            .with_fuzzy_threshold(0.8);
        assert_eq!(cfg.threshold, 1.0);
        assert!(cfg.smoothing > 0.0);
        assert_eq!(cfg.fuzzy_threshold, 0.8);
    }
}
