//! The patient: identity, baseline vitals, body parts, and ailments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ailment::Ailment;
use crate::body::BodyPart;
use crate::error::{CoreError, CoreResult};
use crate::findings::{
    PulseRhythm, PupilEquality, PupilReactivity, PupilShape, RespiratoryEffort,
    RespiratoryRhythm, SkinColor, SkinMoisture, SkinTemperature,
};

/// Level of responsiveness, ordered from least to most responsive.
///
/// The derived `Ord` follows declaration order, so `Unresponsive` is the
/// minimum and `AlertOriented4` the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Responsiveness {
    /// No response to any stimulus.
    Unresponsive,
    /// Responds only to painful stimulus.
    Pain,
    /// Responds to voice but is not alert.
    Verbal,
    /// Awake, oriented to nothing.
    AlertOriented0,
    /// Oriented to person.
    AlertOriented1,
    /// Oriented to person and place.
    AlertOriented2,
    /// Oriented to person, place, and time.
    AlertOriented3,
    /// Oriented to person, place, time, and events.
    #[default]
    AlertOriented4,
}

impl fmt::Display for Responsiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresponsive => write!(f, "unresponsive"),
            Self::Pain => write!(f, "responsive only to painful stimuli"),
            Self::Verbal => write!(f, "responsive to verbal stimuli"),
            Self::AlertOriented0 => write!(f, "alert but not oriented"),
            Self::AlertOriented1 => write!(f, "alert and oriented to person"),
            Self::AlertOriented2 => write!(f, "alert and oriented to person and place"),
            Self::AlertOriented3 => write!(f, "alert and oriented to person, place, and time"),
            Self::AlertOriented4 => {
                write!(f, "alert and oriented to person, place, time, and events")
            }
        }
    }
}

/// Body position of the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Lying face up.
    #[default]
    Supine,
    /// Lying face down.
    Prone,
    /// Sitting up.
    Sitting,
    /// Standing.
    Standing,
    /// Lying on the side.
    Recovery,
}

impl Position {
    /// All positions.
    pub const ALL: [Position; 5] = [
        Self::Supine,
        Self::Prone,
        Self::Sitting,
        Self::Standing,
        Self::Recovery,
    ];

    /// Canonical command token.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Supine => "supine",
            Self::Prone => "prone",
            Self::Sitting => "sitting",
            Self::Standing => "standing",
            Self::Recovery => "recovery",
        }
    }

    /// Parse a command token.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
    }

    /// Narrative phrase, e.g. "lying on their back".
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Supine => "lying on their back",
            Self::Prone => "lying face down",
            Self::Sitting => "sitting up",
            Self::Standing => "standing",
            Self::Recovery => "lying on their side in the recovery position",
        }
    }
}

/// Baseline vital signs before any ailment or treatment is considered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vitals {
    /// Beats per minute.
    pub heart_rate: f64,
    /// Pulse rhythm.
    pub pulse_rhythm: PulseRhythm,
    /// Breaths per minute.
    pub respiratory_rate: f64,
    /// Respiratory rhythm.
    pub respiratory_rhythm: RespiratoryRhythm,
    /// Respiratory effort.
    pub respiratory_effort: RespiratoryEffort,
    /// Skin color.
    pub skin_color: SkinColor,
    /// Skin temperature.
    pub skin_temperature: SkinTemperature,
    /// Skin moisture.
    pub skin_moisture: SkinMoisture,
    /// Pupil shape.
    pub pupil_shape: PupilShape,
    /// Pupil equality.
    pub pupil_equality: PupilEquality,
    /// Pupil reactivity.
    pub pupil_reactivity: PupilReactivity,
    /// Core temperature in degrees Fahrenheit.
    pub core_temperature: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            heart_rate: 80.0,
            pulse_rhythm: PulseRhythm::Regular,
            respiratory_rate: 16.0,
            respiratory_rhythm: RespiratoryRhythm::Regular,
            respiratory_effort: RespiratoryEffort::Normal,
            skin_color: SkinColor::Pink,
            skin_temperature: SkinTemperature::Warm,
            skin_moisture: SkinMoisture::Dry,
            pupil_shape: PupilShape::Round,
            pupil_equality: PupilEquality::Equal,
            pupil_reactivity: PupilReactivity::Reactive,
            core_temperature: 98.6,
        }
    }
}

/// Instructions the player has given the patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructions {
    /// Told not to move.
    pub dont_move: bool,
    /// Agreed to accept care.
    pub accept_care: bool,
    /// Coached to breathe slowly.
    pub breathe: bool,
}

/// Pertinent past medical conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    /// Known heart problems.
    pub heart: bool,
    /// Asthma or other breathing problems.
    pub respiratory: bool,
    /// Diabetes.
    pub diabetes: bool,
    /// Seizure history.
    pub seizures: bool,
    /// High blood pressure.
    pub hypertension: bool,
}

impl Conditions {
    /// Human-readable names of the conditions that are present.
    pub fn present(&self) -> Vec<&'static str> {
        [
            (self.heart, "a heart condition"),
            (self.respiratory, "asthma"),
            (self.diabetes, "diabetes"),
            (self.seizures, "seizures"),
            (self.hypertension, "high blood pressure"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

/// SAMPLE history answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    /// Events leading up to the injury.
    pub events: String,
    /// Known allergies.
    pub allergies: String,
    /// Current medications.
    pub medications: String,
    /// Last food or drink.
    pub last_intake: String,
    /// Last urination or bowel movement.
    pub last_output: String,
    /// Past medical conditions.
    pub conditions: Conditions,
}

/// The patient the player is assessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender as the patient describes it.
    #[serde(default)]
    pub gender: String,
    /// Description seen from beside the patient.
    #[serde(default)]
    pub description_near: String,
    /// Description seen from a distance.
    #[serde(default)]
    pub description_far: String,
    /// Baseline vitals.
    #[serde(default)]
    pub vitals: Vitals,
    /// Level of responsiveness.
    #[serde(default)]
    pub responsiveness: Responsiveness,
    /// Current position.
    #[serde(default)]
    pub position: Position,
    /// Instructions given so far.
    #[serde(default)]
    pub instructions: Instructions,
    /// Whether someone is holding manual spine stabilization.
    #[serde(default)]
    pub spine_controlled: bool,
    /// Body parts, unique by name.
    #[serde(default)]
    pub body_parts: Vec<BodyPart>,
    /// Active ailments.
    #[serde(default)]
    pub ailments: Vec<Ailment>,
    /// Medical alert tag text, if the patient wears one.
    #[serde(default)]
    pub medical_tag: Option<String>,
    /// SAMPLE history.
    #[serde(default)]
    pub history: History,
}

impl Patient {
    /// A patient with default vitals and nothing else.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            gender: String::new(),
            description_near: String::new(),
            description_far: String::new(),
            vitals: Vitals::default(),
            responsiveness: Responsiveness::default(),
            position: Position::default(),
            instructions: Instructions::default(),
            spine_controlled: false,
            body_parts: Vec::new(),
            ailments: Vec::new(),
            medical_tag: None,
            history: History::default(),
        }
    }

    /// Look up a body part by name (case-insensitive).
    pub fn body_part(&self, name: &str) -> Option<&BodyPart> {
        self.body_parts.iter().find(|p| p.is_named(name))
    }

    /// Mutable body part lookup.
    pub fn body_part_mut(&mut self, name: &str) -> Option<&mut BodyPart> {
        self.body_parts.iter_mut().find(|p| p.is_named(name))
    }

    /// Look up a body part or report an integrity error.
    pub fn require_body_part(&self, name: &str) -> CoreResult<&BodyPart> {
        self.body_part(name)
            .ok_or_else(|| CoreError::UnknownBodyPart(name.to_string()))
    }

    /// The single chief-complaint ailment.
    pub fn chief_complaint(&self) -> CoreResult<&Ailment> {
        let mut chief = self.ailments.iter().filter(|a| a.chief_complaint);
        let first = chief.next().ok_or(CoreError::MissingChiefComplaint)?;
        if chief.next().is_some() {
            return Err(CoreError::MultipleChiefComplaints);
        }
        Ok(first)
    }

    /// Ailments whose own effects name the given part.
    pub fn ailments_affecting<'a>(&'a self, part: &'a str) -> impl Iterator<Item = &'a Ailment> {
        self.ailments.iter().filter(move |a| a.affects_part(part))
    }

    /// Check the integrity invariants of the patient definition.
    pub fn validate(&self) -> CoreResult<()> {
        for (i, part) in self.body_parts.iter().enumerate() {
            if self.body_parts[..i].iter().any(|p| p.is_named(&part.name)) {
                return Err(CoreError::DuplicateBodyPart(part.name.clone()));
            }
        }

        self.chief_complaint()?;

        for ailment in &self.ailments {
            let bundles = ailment
                .treatments
                .iter()
                .map(|t| &t.effects)
                .chain(std::iter::once(&ailment.effects));
            for effects in bundles {
                if let Some(missing) = effects
                    .referenced_parts()
                    .find(|name| self.body_part(name).is_none())
                {
                    return Err(CoreError::UnknownEffectTarget {
                        ailment: ailment.name.clone(),
                        part: missing.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BodyPartEffect, Effects};

    fn patient_with(ailments: Vec<Ailment>) -> Patient {
        let mut patient = Patient::new("Sam Ortiz", 41);
        patient.body_parts = vec![
            BodyPart::basic("head", "Normal."),
            BodyPart::limb("leftLeg", "Normal."),
        ];
        patient.ailments = ailments;
        patient
    }

    #[test]
    fn responsiveness_is_ordered() {
        assert!(Responsiveness::Unresponsive < Responsiveness::Pain);
        assert!(Responsiveness::Verbal < Responsiveness::AlertOriented0);
        assert!(Responsiveness::AlertOriented3 < Responsiveness::AlertOriented4);
    }

    #[test]
    fn position_parse_is_case_insensitive() {
        assert_eq!(Position::parse("Supine"), Some(Position::Supine));
        assert_eq!(Position::parse("recovery"), Some(Position::Recovery));
        assert_eq!(Position::parse("upside-down"), None);
    }

    #[test]
    fn body_part_lookup_ignores_case() {
        let patient = patient_with(vec![]);
        assert!(patient.body_part("LEFTLEG").is_some());
        assert!(patient.body_part("rightLeg").is_none());
        assert!(matches!(
            patient.require_body_part("tail"),
            Err(CoreError::UnknownBodyPart(name)) if name == "tail"
        ));
    }

    #[test]
    fn chief_complaint_must_be_unique() {
        let none = patient_with(vec![Ailment::new("a")]);
        assert!(matches!(none.chief_complaint(), Err(CoreError::MissingChiefComplaint)));

        let two = patient_with(vec![
            Ailment::new("a").as_chief_complaint(),
            Ailment::new("b").as_chief_complaint(),
        ]);
        assert!(matches!(two.chief_complaint(), Err(CoreError::MultipleChiefComplaints)));

        let one = patient_with(vec![Ailment::new("a").as_chief_complaint(), Ailment::new("b")]);
        assert_eq!(one.chief_complaint().unwrap().name, "a");
    }

    #[test]
    fn validate_rejects_duplicate_parts() {
        let mut patient = patient_with(vec![Ailment::new("a").as_chief_complaint()]);
        patient.body_parts.push(BodyPart::basic("HEAD", "Again."));
        assert!(matches!(
            patient.validate(),
            Err(CoreError::DuplicateBodyPart(name)) if name == "HEAD"
        ));
    }

    #[test]
    fn validate_rejects_effects_on_missing_parts() {
        let ailment = Ailment::new("burn").as_chief_complaint().with_effects(Effects {
            body_parts: vec![BodyPartEffect::on("rightArm")],
            ..Effects::default()
        });
        let patient = patient_with(vec![ailment]);
        assert!(matches!(
            patient.validate(),
            Err(CoreError::UnknownEffectTarget { part, .. }) if part == "rightArm"
        ));
    }

    #[test]
    fn conditions_present_lists_true_flags() {
        let conditions = Conditions {
            diabetes: true,
            hypertension: true,
            ..Conditions::default()
        };
        assert_eq!(conditions.present(), vec!["diabetes", "high blood pressure"]);
    }
}
