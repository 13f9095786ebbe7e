//! Ailments and the treatments that address them.

use serde::{Deserialize, Serialize};

use crate::effects::Effects;

/// A treatment an ailment accepts, keyed by the apply/perform target name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Treatment {
    /// Target name, e.g. `splint` or `jawThrust`.
    pub key: String,
    /// What the treatment changes once applied.
    pub effects: Effects,
    /// Optional narration shown when the treatment is applied.
    pub narration: Option<String>,
}

impl Treatment {
    /// A treatment with no effects.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the treatment's effects.
    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    /// Set the narration.
    pub fn with_narration(mut self, text: impl Into<String>) -> Self {
        self.narration = Some(text.into());
        self
    }

    /// Case-insensitive key comparison.
    pub fn is_keyed(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Answers the patient gives about an ailment during history taking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Narrative {
    /// What the patient says is wrong.
    pub complaint: String,
    /// How it started.
    pub onset: String,
    /// What makes it better or worse.
    pub provocation: String,
    /// What it feels like.
    pub quality: String,
    /// Whether it spreads anywhere.
    pub radiation: String,
    /// How bad it is.
    pub severity: String,
    /// How long it has been going on.
    pub duration: String,
}

/// A medical condition affecting the patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ailment {
    /// Author-facing name, never shown to the player.
    pub name: String,
    /// History-taking answers.
    pub narrative: Narrative,
    /// Whether this is the reason the patient called for help.
    pub chief_complaint: bool,
    /// What the ailment does to the patient.
    pub effects: Effects,
    /// Treatments that address this ailment.
    pub treatments: Vec<Treatment>,
    /// Keys of treatments already applied.
    pub applied_treatments: Vec<String>,
}

impl Ailment {
    /// A new ailment with no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark as the chief complaint.
    pub fn as_chief_complaint(mut self) -> Self {
        self.chief_complaint = true;
        self
    }

    /// Set the narrative.
    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = narrative;
        self
    }

    /// Set the effects.
    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    /// Add a possible treatment.
    pub fn with_treatment(mut self, treatment: Treatment) -> Self {
        self.treatments.push(treatment);
        self
    }

    /// Whether the ailment lists `key` as a possible treatment.
    pub fn accepts(&self, key: &str) -> bool {
        self.treatments.iter().any(|t| t.is_keyed(key))
    }

    /// Whether `key` was already applied.
    pub fn has_applied(&self, key: &str) -> bool {
        self.applied_treatments
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Whether the ailment's own effects name the given part.
    pub fn affects_part(&self, part: &str) -> bool {
        self.effects.for_part(part).next().is_some()
    }

    /// Effects of every treatment already applied to this ailment.
    pub fn applied_effects(&self) -> impl Iterator<Item = &Effects> {
        self.treatments
            .iter()
            .filter(|t| self.has_applied(&t.key))
            .map(|t| &t.effects)
    }

    /// The ailment's own effects followed by every applied treatment's effects.
    pub fn active_effects(&self) -> impl Iterator<Item = &Effects> {
        std::iter::once(&self.effects).chain(self.applied_effects())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BodyPartEffect, NumericModifier};

    fn fracture() -> Ailment {
        Ailment::new("tibia fracture")
            .as_chief_complaint()
            .with_effects(Effects {
                body_parts: vec![BodyPartEffect::on("leftLeg")],
                ..Effects::default()
            })
            .with_treatment(Treatment::new("splint").with_effects(Effects {
                heart_rate: Some(NumericModifier::add(-10.0)),
                ..Effects::default()
            }))
            .with_treatment(Treatment::new("ice"))
    }

    #[test]
    fn accepts_listed_treatments_only() {
        let ailment = fracture();
        assert!(ailment.accepts("splint"));
        assert!(ailment.accepts("SPLINT"));
        assert!(!ailment.accepts("tourniquet"));
    }

    #[test]
    fn active_effects_include_applied_treatments() {
        let mut ailment = fracture();
        assert_eq!(ailment.active_effects().count(), 1);

        ailment.applied_treatments.push("splint".into());
        let active: Vec<_> = ailment.active_effects().collect();
        assert_eq!(active.len(), 2);
        assert_eq!(active[1].heart_rate, Some(NumericModifier::add(-10.0)));
    }

    #[test]
    fn affects_part_checks_own_effects() {
        let ailment = fracture();
        assert!(ailment.affects_part("leftleg"));
        assert!(!ailment.affects_part("rightLeg"));
    }
}
