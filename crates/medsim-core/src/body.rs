//! Body parts and their capability tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::findings::{MotionFinding, PulseQuality, SensationFinding};

/// Body part names used by the built-in vocabulary and the sample scenario.
///
/// Scenarios may define other names; these are the ones the intent layer
/// knows how to recognize in free text.
pub const STANDARD_BODY_PARTS: &[&str] = &[
    "head",
    "neck",
    "chest",
    "abdomen",
    "back",
    "pelvis",
    "leftArm",
    "rightArm",
    "leftHand",
    "rightHand",
    "leftLeg",
    "rightLeg",
    "leftFoot",
    "rightFoot",
];

/// Whether clothing or gear is covering a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Obstruction {
    /// Covered; only the obstructed description is visible.
    Obstructed,
    /// Exposed.
    #[default]
    Unobstructed,
}

impl fmt::Display for Obstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obstructed => write!(f, "obstructed"),
            Self::Unobstructed => write!(f, "unobstructed"),
        }
    }
}

/// What can be assessed on a part beyond motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyPartKind {
    /// Motion only (head, chest, back, ...).
    Basic,
    /// Has a distal pulse (arms, legs).
    Circulation {
        /// Baseline pulse quality.
        circulation: PulseQuality,
    },
    /// Circulation, sensation, and motion (hands, feet).
    Csm {
        /// Baseline pulse quality.
        circulation: PulseQuality,
        /// Baseline sensation.
        sensation: SensationFinding,
    },
}

impl BodyPartKind {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Circulation { .. } => "circulation",
            Self::Csm { .. } => "csm",
        }
    }

    /// Pulse quality, if this tier has one.
    pub fn circulation(&self) -> Option<PulseQuality> {
        match *self {
            Self::Basic => None,
            Self::Circulation { circulation } | Self::Csm { circulation, .. } => Some(circulation),
        }
    }

    /// Sensation, if this tier has one.
    pub fn sensation(&self) -> Option<SensationFinding> {
        match *self {
            Self::Basic | Self::Circulation { .. } => None,
            Self::Csm { sensation, .. } => Some(sensation),
        }
    }
}

/// A named anatomical region of the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    /// Unique (case-insensitive) name, e.g. `leftLeg`.
    pub name: String,
    /// What the player sees once the part is exposed.
    pub description: String,
    /// What the player sees while the part is covered.
    #[serde(default)]
    pub obstructed_description: String,
    /// Baseline palpation text.
    #[serde(default)]
    pub palpation: String,
    /// Baseline motion.
    #[serde(default)]
    pub motion: MotionFinding,
    /// Current obstruction state.
    #[serde(default)]
    pub obstruction: Obstruction,
    /// Capability tier and its tier-specific baseline findings.
    #[serde(flatten)]
    pub kind: BodyPartKind,
}

impl BodyPart {
    fn with_kind(name: impl Into<String>, description: impl Into<String>, kind: BodyPartKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            obstructed_description: String::new(),
            palpation: String::new(),
            motion: MotionFinding::Normal,
            obstruction: Obstruction::Unobstructed,
            kind,
        }
    }

    /// A part with motion only.
    pub fn basic(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(name, description, BodyPartKind::Basic)
    }

    /// A limb with a distal pulse.
    pub fn limb(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            description,
            BodyPartKind::Circulation {
                circulation: PulseQuality::Strong,
            },
        )
    }

    /// A hand or foot with circulation, sensation, and motion.
    pub fn extremity(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            description,
            BodyPartKind::Csm {
                circulation: PulseQuality::Strong,
                sensation: SensationFinding::Normal,
            },
        )
    }

    /// Cover the part, showing `text` until it is exposed.
    pub fn obstructed(mut self, text: impl Into<String>) -> Self {
        self.obstruction = Obstruction::Obstructed;
        self.obstructed_description = text.into();
        self
    }

    /// Set the baseline palpation text.
    pub fn with_palpation(mut self, text: impl Into<String>) -> Self {
        self.palpation = text.into();
        self
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether the part is covered.
    pub fn is_obstructed(&self) -> bool {
        self.obstruction == Obstruction::Obstructed
    }

    /// The description matching the current obstruction state.
    pub fn visible_description(&self) -> &str {
        match self.obstruction {
            Obstruction::Obstructed if !self.obstructed_description.is_empty() => {
                &self.obstructed_description
            }
            Obstruction::Obstructed => "It is covered.",
            Obstruction::Unobstructed => &self.description,
        }
    }

    /// Baseline pulse quality, if this tier has one.
    pub fn circulation(&self) -> Option<PulseQuality> {
        self.kind.circulation()
    }

    /// Baseline sensation, if this tier has one.
    pub fn sensation(&self) -> Option<SensationFinding> {
        self.kind.sensation()
    }
}
