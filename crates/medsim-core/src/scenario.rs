//! Scenario definitions: an initial state plus the author's reference actions.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::state::ScenarioState;

/// A complete training scenario as an author writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Short title shown when the session starts.
    pub title: String,
    /// One-paragraph dispatch text read to the player.
    #[serde(default)]
    pub summary: String,
    /// The state every session of this scenario starts from.
    pub initial_state: ScenarioState,
    /// Canonical commands an ideal assessment contains, in ideal order.
    #[serde(default)]
    pub perfect_actions: Vec<String>,
    /// Canonical commands that should never be issued.
    #[serde(default)]
    pub bad_actions: Vec<String>,
}

impl Scenario {
    /// Create a scenario with no reference actions.
    pub fn new(title: impl Into<String>, initial_state: ScenarioState) -> Self {
        Self {
            title: title.into(),
            summary: String::new(),
            initial_state,
            perfect_actions: Vec::new(),
            bad_actions: Vec::new(),
        }
    }

    /// Set the dispatch summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the perfect-action list.
    pub fn with_perfect_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.perfect_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bad-action list.
    pub fn with_bad_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bad_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the initial state.
    pub fn validate(&self) -> CoreResult<()> {
        self.initial_state.validate()
    }

    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scenario to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::patient::Patient;

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{
            "title": "Empty room",
            "initial_state": {
                "patient": { "name": "Lee", "age": 20 }
            }
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.title, "Empty room");
        assert!(scenario.perfect_actions.is_empty());
        assert!(scenario.initial_state.log.is_empty());
        assert_eq!(scenario.initial_state.patient.vitals.heart_rate, 80.0);
    }

    #[test]
    fn validate_reports_missing_chief_complaint() {
        let scenario = Scenario::new("No complaint", ScenarioState::new(Patient::new("Lee", 20)));
        assert!(matches!(
            scenario.validate(),
            Err(CoreError::MissingChiefComplaint)
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Scenario::from_json("{"), Err(CoreError::Json(_))));
    }
}
