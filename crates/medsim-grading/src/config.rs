//! Grading weights.

/// Points awarded and deducted on top of the base score.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingConfig {
    /// Bonus when every key action was taken, in order.
    pub order_bonus: f64,
    /// Deduction per logged command that matches a bad action.
    pub bad_action_penalty: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            order_bonus: 5.0,
            bad_action_penalty: 10.0,
        }
    }
}

impl GradingConfig {
    /// Set the in-order bonus (never negative).
    pub fn with_order_bonus(mut self, bonus: f64) -> Self {
        self.order_bonus = bonus.max(0.0);
        self
    }

    /// Set the per-action penalty (never negative).
    pub fn with_bad_action_penalty(mut self, penalty: f64) -> Self {
        self.bad_action_penalty = penalty.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GradingConfig::default();
        assert_eq!(cfg.order_bonus, 5.0);
        assert_eq!(cfg.bad_action_penalty, 10.0);
    }

    #[test]
    fn builder_methods() {
        let cfg = GradingConfig::default()
            .with_order_bonus(2.5)
            .with_bad_action_penalty(-3.0);
        assert_eq!(cfg.order_bonus, 2.5);
        assert_eq!(cfg.bad_action_penalty, 0.0);
    }
}
