//! The structured command schema and its closed target vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patient::Position;

/// Declare a closed vocabulary of command tokens.
///
/// Generates the enum with serde names equal to the tokens, an `ALL` table,
/// `name()`, a case-insensitive `parse()`, and `Display`.
macro_rules! command_tokens {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &[$name] = &[$( $name::$variant ),+];

            /// Canonical command token.
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }

            /// Parse a command token, ignoring case.
            pub fn parse(s: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

command_tokens! {
    /// The fixed verb vocabulary.
    Verb {
        /// Observe something.
        Look => "look",
        /// Ask the patient a question.
        Ask => "ask",
        /// Measure a vital sign or limb finding.
        Measure => "measure",
        /// Feel a body part.
        Palpate => "palpate",
        /// Apply a treatment.
        Apply => "apply",
        /// Take manual control of something (the spine).
        Control => "control",
        /// Move yourself or the patient.
        Move => "move",
        /// Put on protective gear.
        Wear => "wear",
        /// Perform a procedure.
        Perform => "perform",
        /// Instruct the patient.
        Instruct => "instruct",
        /// Remove clothing or release control.
        Remove => "remove",
        /// Survey the scene or the patient.
        Survey => "survey",
    }
}

command_tokens! {
    /// Questions the player can ask.
    QuestionTarget {
        /// "What's your name?"
        Name => "name",
        /// "How old are you?"
        Age => "age",
        /// "What day is it?"
        Time => "time",
        /// "Where are we?"
        Location => "location",
        /// "What happened?"
        Events => "events",
        /// "What's bothering you?"
        Complaint => "complaint",
        /// "How did it start?"
        Onset => "onset",
        /// "Does anything make it better or worse?"
        Provocation => "provocation",
        /// "What does it feel like?"
        Quality => "quality",
        /// "Does it spread anywhere?"
        Radiation => "radiation",
        /// "How bad is it?"
        Severity => "severity",
        /// "How long has it hurt?"
        Duration => "duration",
        /// "Any allergies?"
        Allergies => "allergies",
        /// "Do you take any medications?"
        Medications => "medications",
        /// "Any medical problems?"
        History => "history",
        /// "When did you last eat or drink?"
        Intake => "intake",
        /// "When did you last use the bathroom?"
        Output => "output",
    }
}

/// What kind of knowledge a question draws on, for responsiveness gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionCategory {
    /// How the patient feels right now.
    Symptoms,
    /// Facts about themselves.
    Identity,
    /// Where they are.
    Location,
    /// What time it is.
    Time,
    /// What happened.
    Events,
}

impl QuestionTarget {
    /// The knowledge category this question depends on.
    pub fn category(&self) -> QuestionCategory {
        match self {
            Self::Name | Self::Age | Self::Allergies | Self::Medications | Self::History => {
                QuestionCategory::Identity
            }
            Self::Location => QuestionCategory::Location,
            Self::Time => QuestionCategory::Time,
            Self::Events | Self::Intake | Self::Output => QuestionCategory::Events,
            Self::Complaint
            | Self::Onset
            | Self::Provocation
            | Self::Quality
            | Self::Radiation
            | Self::Severity
            | Self::Duration => QuestionCategory::Symptoms,
        }
    }
}

command_tokens! {
    /// Things the player can measure.
    MeasureTarget {
        /// Heart rate and rhythm.
        Pulse => "pulse",
        /// Respiratory rate, rhythm, and effort.
        Respirations => "respirations",
        /// Skin color, temperature, and moisture.
        Skin => "skin",
        /// Pupil shape, equality, and reactivity.
        Pupils => "pupils",
        /// Core temperature.
        Temperature => "temperature",
        /// Level of responsiveness.
        Responsiveness => "responsiveness",
        /// Distal pulse in a limb.
        Circulation => "circulation",
        /// Feeling in a hand or foot.
        Sensation => "sensation",
        /// Movement of a body part.
        Motion => "motion",
    }
}

impl MeasureTarget {
    /// Whether this target is assessed on a specific body part.
    pub fn needs_body_part(&self) -> bool {
        matches!(self, Self::Circulation | Self::Sensation | Self::Motion)
    }
}

command_tokens! {
    /// Treatments applied with the `apply` verb.
    ApplyTarget {
        /// Immobilize a limb.
        Splint => "splint",
        /// Direct pressure on a wound.
        Pressure => "pressure",
        /// Arterial tourniquet.
        Tourniquet => "tourniquet",
        /// Wound dressing.
        Dressing => "dressing",
        /// Bandage over a dressing.
        Bandage => "bandage",
        /// Arm sling.
        Sling => "sling",
        /// Insulating blanket.
        Blanket => "blanket",
        /// Cold pack.
        Ice => "ice",
        /// Heat pack.
        Heat => "heat",
    }
}

command_tokens! {
    /// Procedures performed with the `perform` verb.
    PerformTarget {
        /// Chest compressions.
        Cpr => "cpr",
        /// Rescue breaths.
        RescueBreathing => "rescueBreathing",
        /// Jaw-thrust airway maneuver.
        JawThrust => "jawThrust",
        /// Head-tilt chin-lift airway maneuver.
        HeadTiltChinLift => "headTiltChinLift",
        /// Choking relief.
        AbdominalThrusts => "abdominalThrusts",
        /// Flush a wound with clean water.
        WoundIrrigation => "woundIrrigation",
    }
}

command_tokens! {
    /// Instructions given with the `instruct` verb.
    InstructTarget {
        /// Tell the patient not to move.
        DontMove => "dontMove",
        /// Ask consent to provide care.
        AcceptCare => "acceptCare",
        /// Coach slow, deep breathing.
        Breathe => "breathe",
    }
}

command_tokens! {
    /// Non-body-part targets of the `remove` verb.
    RemoveTarget {
        /// Release manual spine stabilization.
        Spine => "spine",
    }
}

command_tokens! {
    /// Targets of the `control` verb.
    ControlTarget {
        /// Take manual spine stabilization.
        Spine => "spine",
    }
}

/// Targets of the `move` verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    /// Approach the patient.
    In,
    /// Step back from the patient.
    Out,
    /// Reposition the patient.
    Position(Position),
}

impl MoveTarget {
    /// Parse a command token.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            other => Position::parse(other).map(Self::Position),
        }
    }

    /// Canonical command token.
    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Position(p) => p.name(),
        }
    }
}

/// The thing a command acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Object {
    /// The patient as a whole.
    Patient,
    /// The surroundings.
    Environment,
    /// Hazards in the surroundings.
    Hazards,
    /// A body part on the patient, by its canonical name.
    BodyPart(String),
    /// An unresolved token, validated by the verb's own vocabulary.
    Target(String),
}

impl Object {
    /// The token this object renders as in canonical syntax.
    pub fn token(&self) -> &str {
        match self {
            Self::Patient => "patient",
            Self::Environment => "environment",
            Self::Hazards => "hazards",
            Self::BodyPart(name) | Self::Target(name) => name,
        }
    }
}

/// A parsed, resolved command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// The action.
    pub verb: Verb,
    /// What it acts on.
    #[serde(default)]
    pub object: Option<Object>,
    /// Extra tokens after the object. Never `Some(vec![])`.
    #[serde(default)]
    pub modifiers: Option<Vec<String>>,
}

impl Command {
    /// A bare verb.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            object: None,
            modifiers: None,
        }
    }

    /// Set the object.
    pub fn with_object(mut self, object: Object) -> Self {
        self.object = Some(object);
        self
    }

    /// Set the modifiers; an empty list becomes `None`.
    pub fn with_modifiers(mut self, modifiers: Vec<String>) -> Self {
        self.modifiers = (!modifiers.is_empty()).then_some(modifiers);
        self
    }

    /// The modifier at `index`, if any.
    pub fn modifier(&self, index: usize) -> Option<&str> {
        self.modifiers
            .as_ref()
            .and_then(|m| m.get(index))
            .map(String::as_str)
    }

    /// All modifiers, empty when absent.
    pub fn modifier_list(&self) -> &[String] {
        self.modifiers.as_deref().unwrap_or(&[])
    }

    /// Whether any modifier equals `token` (case-insensitive).
    pub fn has_modifier(&self, token: &str) -> bool {
        self.modifier_list()
            .iter()
            .any(|m| m.eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        if let Some(object) = &self.object {
            write!(f, " {}", object.token())?;
        }
        for m in self.modifier_list() {
            write!(f, " {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_case_insensitively() {
        assert_eq!(Verb::parse("LOOK"), Some(Verb::Look));
        assert_eq!(Verb::parse("survey"), Some(Verb::Survey));
        assert_eq!(Verb::parse("dance"), None);
        assert_eq!(Verb::ALL.len(), 12);
    }

    #[test]
    fn camel_case_targets_parse_from_lowercase() {
        assert_eq!(PerformTarget::parse("jawthrust"), Some(PerformTarget::JawThrust));
        assert_eq!(InstructTarget::parse("dontmove"), Some(InstructTarget::DontMove));
        assert_eq!(PerformTarget::JawThrust.name(), "jawThrust");
    }

    #[test]
    fn move_targets() {
        assert_eq!(MoveTarget::parse("in"), Some(MoveTarget::In));
        assert_eq!(
            MoveTarget::parse("Recovery"),
            Some(MoveTarget::Position(Position::Recovery))
        );
        assert_eq!(MoveTarget::parse("sideways"), None);
    }

    #[test]
    fn question_categories() {
        assert_eq!(QuestionTarget::Name.category(), QuestionCategory::Identity);
        assert_eq!(QuestionTarget::Time.category(), QuestionCategory::Time);
        assert_eq!(QuestionTarget::Onset.category(), QuestionCategory::Symptoms);
        assert_eq!(QuestionTarget::Events.category(), QuestionCategory::Events);
    }

    #[test]
    fn empty_modifiers_become_absent() {
        let cmd = Command::new(Verb::Look)
            .with_object(Object::Patient)
            .with_modifiers(vec![]);
        assert_eq!(cmd.modifiers, None);
        assert_eq!(cmd.modifier(0), None);
    }

    #[test]
    fn display_is_canonical_syntax() {
        let cmd = Command::new(Verb::Apply)
            .with_object(Object::Target("splint".into()))
            .with_modifiers(vec!["leftLeg".into(), "tight".into()]);
        assert_eq!(cmd.to_string(), "apply splint leftLeg tight");
    }

    #[test]
    fn command_round_trips_through_json() {
        let cmd = Command::new(Verb::Palpate).with_object(Object::BodyPart("leftLeg".into()));
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
