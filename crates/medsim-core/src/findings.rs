//! Categorical clinical findings and their prominence tables.
//!
//! Every categorical attribute a patient or body part can show is a small
//! closed enum. Each value has a fixed priority: lower numbers are more
//! clinically prominent (more abnormal). When several active effects assert
//! different values for the same attribute, the most prominent one is what
//! the player observes. See [`most_prominent`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical finding with a fixed prominence priority.
pub trait Prominence: Copy {
    /// Priority of this value. Lower is more prominent.
    fn priority(self) -> u8;
}

/// Pick the most prominent of the asserted values.
///
/// Returns `None` when nothing was asserted. Ties keep the first value seen,
/// which is irrelevant in practice since equal priority means equal value.
pub fn most_prominent<T: Prominence>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values.into_iter().min_by_key(|v| v.priority())
}

/// Regularity of the heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseRhythm {
    /// Irregular beats.
    Irregular,
    /// Steady beats.
    #[default]
    Regular,
}

impl Prominence for PulseRhythm {
    fn priority(self) -> u8 {
        match self {
            Self::Irregular => 0,
            Self::Regular => 1,
        }
    }
}

impl fmt::Display for PulseRhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular => write!(f, "irregular"),
            Self::Regular => write!(f, "regular"),
        }
    }
}

/// Regularity of breathing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespiratoryRhythm {
    /// Irregular breaths.
    Irregular,
    /// Steady breaths.
    #[default]
    Regular,
}

impl Prominence for RespiratoryRhythm {
    fn priority(self) -> u8 {
        match self {
            Self::Irregular => 0,
            Self::Regular => 1,
        }
    }
}

impl fmt::Display for RespiratoryRhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular => write!(f, "irregular"),
            Self::Regular => write!(f, "regular"),
        }
    }
}

/// How hard the patient is working to breathe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespiratoryEffort {
    /// No breathing at all.
    Absent,
    /// Gasping, ineffective breaths.
    Agonal,
    /// Visible work of breathing.
    Labored,
    /// Quick, shallow breaths.
    Shallow,
    /// Easy, unlabored breathing.
    #[default]
    Normal,
}

impl Prominence for RespiratoryEffort {
    fn priority(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Agonal => 1,
            Self::Labored => 2,
            Self::Shallow => 3,
            Self::Normal => 4,
        }
    }
}

impl fmt::Display for RespiratoryEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Agonal => write!(f, "agonal"),
            Self::Labored => write!(f, "labored"),
            Self::Shallow => write!(f, "shallow"),
            Self::Normal => write!(f, "unlabored"),
        }
    }
}

/// Skin color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinColor {
    /// Blue or gray.
    Cyanotic,
    /// Pale or ashen.
    Pale,
    /// Blotchy, patchy discoloration.
    Mottled,
    /// Red.
    Flushed,
    /// Yellow.
    Jaundiced,
    /// Normal pink.
    #[default]
    Pink,
}

impl Prominence for SkinColor {
    fn priority(self) -> u8 {
        match self {
            Self::Cyanotic => 0,
            Self::Pale => 1,
            Self::Mottled => 2,
            Self::Flushed => 3,
            Self::Jaundiced => 4,
            Self::Pink => 5,
        }
    }
}

impl fmt::Display for SkinColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cyanotic => write!(f, "cyanotic"),
            Self::Pale => write!(f, "pale"),
            Self::Mottled => write!(f, "mottled"),
            Self::Flushed => write!(f, "flushed"),
            Self::Jaundiced => write!(f, "jaundiced"),
            Self::Pink => write!(f, "pink"),
        }
    }
}

/// Skin temperature to the touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinTemperature {
    /// Cold.
    Cold,
    /// Hot.
    Hot,
    /// Cool.
    Cool,
    /// Warm.
    #[default]
    Warm,
}

impl Prominence for SkinTemperature {
    fn priority(self) -> u8 {
        match self {
            Self::Cold => 0,
            Self::Hot => 1,
            Self::Cool => 2,
            Self::Warm => 3,
        }
    }
}

impl fmt::Display for SkinTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cold => write!(f, "cold"),
            Self::Hot => write!(f, "hot"),
            Self::Cool => write!(f, "cool"),
            Self::Warm => write!(f, "warm"),
        }
    }
}

/// Skin moisture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinMoisture {
    /// Sweaty or soaked.
    Wet,
    /// Slightly damp.
    Moist,
    /// Dry.
    #[default]
    Dry,
}

impl Prominence for SkinMoisture {
    fn priority(self) -> u8 {
        match self {
            Self::Wet => 0,
            Self::Moist => 1,
            Self::Dry => 2,
        }
    }
}

impl fmt::Display for SkinMoisture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wet => write!(f, "wet"),
            Self::Moist => write!(f, "moist"),
            Self::Dry => write!(f, "dry"),
        }
    }
}

/// Pupil shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PupilShape {
    /// Misshapen pupils.
    Irregular,
    /// Round pupils.
    #[default]
    Round,
}

impl Prominence for PupilShape {
    fn priority(self) -> u8 {
        match self {
            Self::Irregular => 0,
            Self::Round => 1,
        }
    }
}

impl fmt::Display for PupilShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular => write!(f, "irregular"),
            Self::Round => write!(f, "round"),
        }
    }
}

/// Whether both pupils are the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PupilEquality {
    /// Different sizes.
    Unequal,
    /// Same size.
    #[default]
    Equal,
}

impl Prominence for PupilEquality {
    fn priority(self) -> u8 {
        match self {
            Self::Unequal => 0,
            Self::Equal => 1,
        }
    }
}

impl fmt::Display for PupilEquality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unequal => write!(f, "unequal"),
            Self::Equal => write!(f, "equal"),
        }
    }
}

/// Pupil response to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PupilReactivity {
    /// No response.
    NonReactive,
    /// Slow response.
    Sluggish,
    /// Brisk constriction.
    #[default]
    Reactive,
}

impl Prominence for PupilReactivity {
    fn priority(self) -> u8 {
        match self {
            Self::NonReactive => 0,
            Self::Sluggish => 1,
            Self::Reactive => 2,
        }
    }
}

impl fmt::Display for PupilReactivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonReactive => write!(f, "non-reactive to light"),
            Self::Sluggish => write!(f, "sluggish to react to light"),
            Self::Reactive => write!(f, "reactive to light"),
        }
    }
}

/// Severity of visible bleeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BleedSeverity {
    /// Life-threatening bleeding.
    Major,
    /// Oozing or trickling blood.
    Minor,
    /// No bleeding.
    #[default]
    None,
}

impl Prominence for BleedSeverity {
    fn priority(self) -> u8 {
        match self {
            Self::Major => 0,
            Self::Minor => 1,
            Self::None => 2,
        }
    }
}

impl fmt::Display for BleedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::None => write!(f, "no"),
        }
    }
}

/// Distal pulse quality in a limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseQuality {
    /// No pulse can be felt.
    Absent,
    /// Faint, thready pulse.
    Weak,
    /// Pounding pulse.
    Bounding,
    /// Strong, normal pulse.
    #[default]
    Strong,
}

impl Prominence for PulseQuality {
    fn priority(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Weak => 1,
            Self::Bounding => 2,
            Self::Strong => 3,
        }
    }
}

impl fmt::Display for PulseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Weak => write!(f, "weak"),
            Self::Bounding => write!(f, "bounding"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Sensation in an extremity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensationFinding {
    /// Cannot feel touch at all.
    Absent,
    /// Reduced feeling.
    Diminished,
    /// Pins and needles.
    Tingling,
    /// Normal sensation.
    #[default]
    Normal,
}

impl Prominence for SensationFinding {
    fn priority(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Diminished => 1,
            Self::Tingling => 2,
            Self::Normal => 3,
        }
    }
}

impl fmt::Display for SensationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Diminished => write!(f, "diminished"),
            Self::Tingling => write!(f, "tingling"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Ability to move a body part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionFinding {
    /// Cannot move it.
    Absent,
    /// Moves with difficulty or pain.
    Impaired,
    /// Full movement.
    #[default]
    Normal,
}

impl Prominence for MotionFinding {
    fn priority(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Impaired => 1,
            Self::Normal => 2,
        }
    }
}

impl fmt::Display for MotionFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Impaired => write!(f, "impaired"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_priority_wins() {
        let asserted = [
            RespiratoryEffort::Labored,
            RespiratoryEffort::Absent,
            RespiratoryEffort::Normal,
        ];
        assert_eq!(most_prominent(asserted), Some(RespiratoryEffort::Absent));
    }

    #[test]
    fn assertion_order_does_not_matter() {
        let forward = [SkinColor::Cyanotic, SkinColor::Mottled];
        let backward = [SkinColor::Mottled, SkinColor::Cyanotic];
        assert_eq!(most_prominent(forward), most_prominent(backward));
        assert_eq!(most_prominent(forward), Some(SkinColor::Cyanotic));
    }

    #[test]
    fn nothing_asserted() {
        assert_eq!(most_prominent(Vec::<PulseQuality>::new()), None);
    }

    #[test]
    fn normal_values_are_least_prominent() {
        assert!(SkinColor::Pink.priority() > SkinColor::Pale.priority());
        assert!(PulseQuality::Strong.priority() > PulseQuality::Weak.priority());
        assert!(SensationFinding::Normal.priority() > SensationFinding::Tingling.priority());
        assert!(MotionFinding::Normal.priority() > MotionFinding::Impaired.priority());
        assert!(BleedSeverity::None.priority() > BleedSeverity::Minor.priority());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&PupilReactivity::NonReactive).unwrap();
        assert_eq!(json, "\"non_reactive\"");
        let back: PupilReactivity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PupilReactivity::NonReactive);
    }
}
