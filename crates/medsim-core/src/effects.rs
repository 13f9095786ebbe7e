//! Effect bundles carried by ailments and treatments.

use serde::{Deserialize, Serialize};

use crate::body::Obstruction;
use crate::findings::{
    BleedSeverity, MotionFinding, PulseQuality, PulseRhythm, PupilEquality, PupilReactivity,
    PupilShape, RespiratoryEffort, RespiratoryRhythm, SensationFinding, SkinColor, SkinMoisture,
    SkinTemperature,
};

/// How a numeric modifier combines with the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Added to the value after all factors are applied.
    #[default]
    Additive,
    /// Multiplies the baseline.
    Multiplicative,
}

/// A change to a numeric vital sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericModifier {
    /// Delta (additive) or factor (multiplicative).
    pub value: f64,
    /// Combination rule.
    #[serde(default)]
    pub kind: ModifierKind,
}

impl NumericModifier {
    /// An additive delta.
    pub fn add(value: f64) -> Self {
        Self {
            value,
            kind: ModifierKind::Additive,
        }
    }

    /// A multiplicative factor.
    pub fn multiply(value: f64) -> Self {
        Self {
            value,
            kind: ModifierKind::Multiplicative,
        }
    }
}

/// Overrides for one or more named body parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyPartEffect {
    /// Names of the parts this override touches.
    pub parts: Vec<String>,
    /// Extra text shown when looking at the part.
    pub description: Option<String>,
    /// Obstruction state in which `description` is visible.
    pub obstruction: Obstruction,
    /// Extra text reported when palpating the part.
    pub palpation: Option<String>,
    /// Asserted motion finding.
    pub motion: Option<MotionFinding>,
    /// Asserted sensation finding (CSM parts only).
    pub sensation: Option<SensationFinding>,
    /// Asserted distal pulse quality (circulation and CSM parts only).
    pub circulation: Option<PulseQuality>,
}

impl BodyPartEffect {
    /// Create an override scoped to a single part.
    pub fn on(part: impl Into<String>) -> Self {
        Self {
            parts: vec![part.into()],
            ..Self::default()
        }
    }

    /// Whether this override names the given part (case-insensitive).
    pub fn touches(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p.eq_ignore_ascii_case(part))
    }

    /// Set the look text.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Make the look text visible only while the part is obstructed.
    pub fn while_obstructed(mut self) -> Self {
        self.obstruction = Obstruction::Obstructed;
        self
    }

    /// Set the palpation text.
    pub fn with_palpation(mut self, text: impl Into<String>) -> Self {
        self.palpation = Some(text.into());
        self
    }

    /// Assert a motion finding.
    pub fn with_motion(mut self, motion: MotionFinding) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Assert a sensation finding.
    pub fn with_sensation(mut self, sensation: SensationFinding) -> Self {
        self.sensation = Some(sensation);
        self
    }

    /// Assert a pulse quality.
    pub fn with_circulation(mut self, circulation: PulseQuality) -> Self {
        self.circulation = Some(circulation);
        self
    }
}

/// Everything an active ailment or applied treatment does to the patient.
///
/// Each field is optional: an absent field means the source has no opinion
/// on that attribute and does not compete during realization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    /// Heart rate modifier.
    pub heart_rate: Option<NumericModifier>,
    /// Asserted pulse rhythm.
    pub pulse_rhythm: Option<PulseRhythm>,
    /// Respiratory rate modifier.
    pub respiratory_rate: Option<NumericModifier>,
    /// Asserted respiratory rhythm.
    pub respiratory_rhythm: Option<RespiratoryRhythm>,
    /// Asserted respiratory effort.
    pub respiratory_effort: Option<RespiratoryEffort>,
    /// Asserted skin color.
    pub skin_color: Option<SkinColor>,
    /// Asserted skin temperature.
    pub skin_temperature: Option<SkinTemperature>,
    /// Asserted skin moisture.
    pub skin_moisture: Option<SkinMoisture>,
    /// Asserted pupil shape.
    pub pupil_shape: Option<PupilShape>,
    /// Asserted pupil equality.
    pub pupil_equality: Option<PupilEquality>,
    /// Asserted pupil reactivity.
    pub pupil_reactivity: Option<PupilReactivity>,
    /// Core temperature modifier.
    pub core_temperature: Option<NumericModifier>,
    /// Asserted bleeding severity.
    pub bleed: Option<BleedSeverity>,
    /// Per-part overrides.
    pub body_parts: Vec<BodyPartEffect>,
}

impl Effects {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides that touch the given part.
    pub fn for_part<'a>(&'a self, part: &'a str) -> impl Iterator<Item = &'a BodyPartEffect> {
        self.body_parts.iter().filter(move |e| e.touches(part))
    }

    /// Every part name referenced by this bundle.
    pub fn referenced_parts(&self) -> impl Iterator<Item = &str> {
        self.body_parts
            .iter()
            .flat_map(|e| e.parts.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_override_matching_ignores_case() {
        let effect = BodyPartEffect::on("leftLeg");
        assert!(effect.touches("leftleg"));
        assert!(effect.touches("LEFTLEG"));
        assert!(!effect.touches("rightLeg"));
    }

    #[test]
    fn for_part_filters_overrides() {
        let effects = Effects {
            body_parts: vec![
                BodyPartEffect::on("head").with_palpation("A boggy spot."),
                BodyPartEffect::on("leftLeg").with_motion(MotionFinding::Impaired),
                BodyPartEffect {
                    parts: vec!["leftLeg".into(), "leftFoot".into()],
                    circulation: Some(PulseQuality::Weak),
                    ..BodyPartEffect::default()
                },
            ],
            ..Effects::default()
        };
        assert_eq!(effects.for_part("leftleg").count(), 2);
        assert_eq!(effects.for_part("head").count(), 1);
        assert_eq!(effects.for_part("chest").count(), 0);
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let effects: Effects = serde_json::from_str(r#"{"bleed": "minor"}"#).unwrap();
        assert_eq!(effects.bleed, Some(BleedSeverity::Minor));
        assert!(effects.heart_rate.is_none());
        assert!(effects.body_parts.is_empty());
    }

    #[test]
    fn modifier_kind_defaults_to_additive() {
        let m: NumericModifier = serde_json::from_str(r#"{"value": 4.0}"#).unwrap();
        assert_eq!(m, NumericModifier::add(4.0));
    }
}
