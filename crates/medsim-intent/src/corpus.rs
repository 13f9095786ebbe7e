//! The hand-authored training corpus.
//!
//! Intent names are `verb.target`. A target that names an entity category
//! (`bodypart`, `treatment`, `procedure`, `position`, `item`) is filled from
//! the recognized entities when the canonical command is built.

use crate::entity::EntityKind;

/// One intent and the utterances that teach it.
#[derive(Debug, Clone, Copy)]
pub struct IntentSpec {
    /// `verb.target`.
    pub name: &'static str,
    /// Entity kinds appended as modifiers, in order, when present.
    pub modifiers: &'static [EntityKind],
    /// Example utterances.
    pub examples: &'static [&'static str],
}

const fn intent(name: &'static str, examples: &'static [&'static str]) -> IntentSpec {
    IntentSpec {
        name,
        modifiers: &[],
        examples,
    }
}

const fn intent_with(
    name: &'static str,
    modifiers: &'static [EntityKind],
    examples: &'static [&'static str],
) -> IntentSpec {
    IntentSpec {
        name,
        modifiers,
        examples,
    }
}

const PART: &[EntityKind] = &[EntityKind::BodyPart];
const PART_AND_MANNER: &[EntityKind] = &[EntityKind::BodyPart, EntityKind::Qualifier];
const POSITION: &[EntityKind] = &[EntityKind::Position];

/// The built-in corpus.
pub const CORPUS: &[IntentSpec] = &[
    // look
    intent(
        "look.patient",
        &[
            "look at the patient",
            "look patient",
            "observe the patient",
            "what does the patient look like",
            "check on the patient",
            "get a general impression of the patient",
            "look over the patient",
            "glance at the patient",
        ],
    ),
    intent(
        "look.environment",
        &[
            "look around",
            "look around the area",
            "look at the surroundings",
            "look at the environment",
            "look environment",
            "what is around me",
            "examine the area",
            "describe the surroundings",
        ],
    ),
    intent(
        "look.hazards",
        &[
            "look for hazards",
            "look hazards",
            "check for dangers",
            "is the scene safe",
            "are there any hazards",
            "look for danger",
            "check the scene for hazards",
            "any threats nearby",
        ],
    ),
    intent(
        "look.bodypart",
        &[
            "look at the left arm",
            "look at his head",
            "examine the right leg",
            "inspect the chest",
            "view the left foot",
            "look at the neck",
            "check out the abdomen",
            "take a look at the right hand",
            "look leftleg",
        ],
    ),
    intent(
        "look.tag",
        &[
            "look at the medical tag",
            "read the medical bracelet",
            "check for a medic alert tag",
            "read the tag",
            "look tag",
            "check the medical id",
            "look at the bracelet",
            "is there a medical alert necklace",
        ],
    ),
    // survey
    intent(
        "survey.scene",
        &[
            "survey the scene",
            "survey scene",
            "scene survey",
            "size up the scene",
            "do a scene size up",
            "assess the scene",
            "survey the area",
        ],
    ),
    intent(
        "survey.patient",
        &[
            "survey the patient",
            "survey patient",
            "do a head to toe",
            "head to toe exam",
            "secondary survey",
            "full body exam",
            "do a full assessment of the patient",
            "run a head to toe check",
        ],
    ),
    // ask
    intent(
        "ask.name",
        &[
            "what is your name",
            "what's your name",
            "ask name",
            "ask their name",
            "who are you",
            "can you tell me your name",
            "what should i call you",
        ],
    ),
    intent(
        "ask.age",
        &[
            "how old are you",
            "what is your age",
            "ask age",
            "ask their age",
            "when were you born",
            "how old is the patient",
        ],
    ),
    intent(
        "ask.time",
        &[
            "what time is it",
            "what day is it",
            "do you know what day it is",
            "ask the time",
            "ask time",
            "what is the date",
            "what year is it",
        ],
    ),
    intent(
        "ask.location",
        &[
            "where are we",
            "do you know where you are",
            "ask location",
            "where are you right now",
            "what place is this",
            "ask where they are",
        ],
    ),
    intent(
        "ask.events",
        &[
            "what happened",
            "ask what happened",
            "ask events",
            "how did you get hurt",
            "tell me what happened",
            "how did this happen",
            "what led up to this",
        ],
    ),
    intent(
        "ask.complaint",
        &[
            "what's wrong",
            "what is bothering you",
            "what is your chief complaint",
            "ask complaint",
            "where does it hurt",
            "what's the problem",
            "are you hurt anywhere",
        ],
    ),
    intent(
        "ask.onset",
        &[
            "when did it start",
            "when did the pain start",
            "ask onset",
            "how did the pain begin",
            "did it come on suddenly",
            "what were you doing when it started",
        ],
    ),
    intent(
        "ask.provocation",
        &[
            "does anything make it better or worse",
            "what makes the pain worse",
            "ask provocation",
            "does movement make it hurt more",
            "what makes it better",
        ],
    ),
    intent(
        "ask.quality",
        &[
            "what does the pain feel like",
            "describe the pain",
            "ask quality",
            "is it sharp or dull",
            "what kind of pain is it",
        ],
    ),
    intent(
        "ask.radiation",
        &[
            "does the pain spread anywhere",
            "does it radiate",
            "ask radiation",
            "does the pain move anywhere else",
            "does the pain travel",
        ],
    ),
    intent(
        "ask.severity",
        &[
            "how bad is the pain",
            "on a scale of one to ten how bad is it",
            "rate your pain",
            "ask severity",
            "how much does it hurt",
            "how severe is the pain",
        ],
    ),
    intent(
        "ask.duration",
        &[
            "how long has it hurt",
            "how long have you had the pain",
            "ask duration",
            "how long has this been going on",
            "how long has it been hurting",
        ],
    ),
    intent(
        "ask.allergies",
        &[
            "do you have any allergies",
            "are you allergic to anything",
            "ask allergies",
            "any allergies",
            "allergic to anything",
        ],
    ),
    intent(
        "ask.medications",
        &[
            "do you take any medications",
            "are you on any medicine",
            "ask medications",
            "what meds do you take",
            "any prescriptions",
            "do you take any pills",
        ],
    ),
    intent(
        "ask.history",
        &[
            "any medical history",
            "do you have any medical problems",
            "ask history",
            "any past medical conditions",
            "do you have any health conditions",
            "ask about their past medical history",
        ],
    ),
    intent(
        "ask.intake",
        &[
            "when did you last eat",
            "when did you last eat or drink",
            "ask intake",
            "what did you last eat",
            "have you had anything to drink",
            "last oral intake",
        ],
    ),
    intent(
        "ask.output",
        &[
            "when did you last use the bathroom",
            "when did you last pee",
            "ask output",
            "last urination",
            "have you used the restroom today",
            "any vomiting",
        ],
    ),
    // measure
    intent(
        "measure.pulse",
        &[
            "check pulse",
            "check the pulse",
            "take a pulse",
            "measure pulse",
            "feel for a pulse",
            "what is the heart rate",
            "check the heart rate",
            "count the pulse",
            "take the patient's pulse",
            "how fast is the pulse",
        ],
    ),
    intent(
        "measure.respirations",
        &[
            "check breathing",
            "count respirations",
            "measure respirations",
            "how fast are they breathing",
            "check the respiratory rate",
            "watch the chest rise and fall",
            "check respirations",
            "listen to their breathing",
        ],
    ),
    intent(
        "measure.skin",
        &[
            "check skin",
            "check skin color",
            "feel the skin",
            "measure skin",
            "look at skin signs",
            "check skin temperature and moisture",
            "is the skin pale",
        ],
    ),
    intent(
        "measure.pupils",
        &[
            "check pupils",
            "look at the pupils",
            "shine a light in the eyes",
            "measure pupils",
            "check the eyes",
            "are the pupils equal",
        ],
    ),
    intent(
        "measure.temperature",
        &[
            "take temperature",
            "check temperature",
            "measure temperature",
            "does the patient have a fever",
            "check core temperature",
            "take their temp",
        ],
    ),
    intent(
        "measure.responsiveness",
        &[
            "check responsiveness",
            "check level of consciousness",
            "is the patient alert",
            "measure responsiveness",
            "check avpu",
            "are they awake",
            "check mental status",
        ],
    ),
    intent_with(
        "measure.circulation",
        PART,
        &[
            "check circulation in the left foot",
            "check the distal pulse on the right hand",
            "measure circulation leftfoot",
            "check cap refill in the left hand",
            "check distal circulation in the right foot",
            "is there circulation in the left leg",
        ],
    ),
    intent_with(
        "measure.sensation",
        PART,
        &[
            "check sensation in the left foot",
            "can you feel this on your right hand",
            "measure sensation",
            "check feeling in the left hand",
            "test sensation on the right foot",
            "can you feel me touching your foot",
        ],
    ),
    intent_with(
        "measure.motion",
        PART,
        &[
            "check motion in the left leg",
            "can you wiggle your toes",
            "wiggle your fingers for me",
            "measure motion",
            "check movement of the right arm",
            "check range of motion in the left foot",
        ],
    ),
    // palpate
    intent(
        "palpate.bodypart",
        &[
            "palpate the left leg",
            "feel the chest",
            "press on the abdomen",
            "touch the head",
            "palpate the neck",
            "feel along the right arm",
            "squeeze the pelvis",
            "palpate pelvis",
        ],
    ),
    // apply
    intent_with(
        "apply.treatment",
        PART_AND_MANNER,
        &[
            "apply a splint to the left leg",
            "splint the left leg",
            "put ice on the right arm",
            "apply pressure to the head",
            "bandage the head",
            "cover the patient with a blanket",
            "apply a tourniquet to the left arm",
            "wrap the left hand in a dressing",
            "apply splint leftleg",
        ],
    ),
    // perform
    intent(
        "perform.procedure",
        &[
            "perform cpr",
            "start cpr",
            "do chest compressions",
            "give rescue breaths",
            "open the airway with a jaw thrust",
            "do a head tilt chin lift",
            "perform abdominal thrusts",
            "irrigate the wound",
        ],
    ),
    // control
    intent(
        "control.spine",
        &[
            "control the spine",
            "control spine",
            "hold c-spine",
            "stabilize the head and neck",
            "take manual stabilization",
            "hold the head still",
            "maintain spinal precautions",
        ],
    ),
    // move
    intent(
        "move.in",
        &[
            "move in",
            "approach the patient",
            "walk over to the patient",
            "get closer",
            "go to the patient",
            "kneel beside the patient",
            "move closer",
        ],
    ),
    intent(
        "move.out",
        &[
            "move out",
            "step back",
            "back away",
            "move away from the patient",
            "step away",
            "get back",
        ],
    ),
    intent_with(
        "move.patient",
        POSITION,
        &[
            "move the patient to the recovery position",
            "roll them onto their side",
            "sit the patient up",
            "help them stand",
            "lay them supine",
            "put the patient in the recovery position",
            "move patient sitting",
            "log roll the patient prone",
        ],
    ),
    // wear
    intent(
        "wear.item",
        &[
            "put on gloves",
            "wear gloves",
            "don gloves",
            "put on a mask",
            "wear a mask",
            "glove up",
            "put on ppe",
        ],
    ),
    // instruct
    intent(
        "instruct.dontMove",
        &[
            "don't move",
            "stay still",
            "hold still",
            "please don't move",
            "keep still",
            "tell the patient not to move",
            "instruct dontmove",
        ],
    ),
    intent(
        "instruct.acceptCare",
        &[
            "can i help you",
            "may i help you",
            "do you consent to care",
            "ask for consent",
            "i'm an emt can i help",
            "is it okay if i treat you",
            "instruct acceptcare",
        ],
    ),
    intent(
        "instruct.breathe",
        &[
            "take slow deep breaths",
            "breathe slowly",
            "try to breathe deeply",
            "calm your breathing down",
            "instruct breathe",
            "breathe with me",
        ],
    ),
    // remove
    intent(
        "remove.bodypart",
        &[
            "remove clothing from the left leg",
            "cut the pants off the left leg",
            "expose the chest",
            "take the jacket off the abdomen",
            "expose the left leg",
            "cut away clothing from the right arm",
            "remove leftleg",
        ],
    ),
    intent(
        "remove.spine",
        &[
            "release the spine",
            "let go of the head",
            "stop holding c-spine",
            "release spinal control",
            "remove spine",
            "let go of c-spine",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use medsim_core::Verb;
    use std::collections::HashSet;

    #[test]
    fn every_intent_names_a_known_verb() {
        for spec in CORPUS {
            let (verb, _) = spec.name.split_once('.').unwrap();
            assert!(Verb::parse(verb).is_some(), "{}", spec.name);
        }
    }

    #[test]
    fn intent_names_are_unique_and_have_examples() {
        let mut seen = HashSet::new();
        for spec in CORPUS {
            assert!(seen.insert(spec.name), "duplicate {}", spec.name);
            assert!(!spec.examples.is_empty(), "{}", spec.name);
        }
    }

    #[test]
    fn every_verb_is_taught() {
        for verb in Verb::ALL {
            assert!(
                CORPUS.iter().any(|s| s.name.starts_with(&format!("{verb}."))),
                "{verb}"
            );
        }
    }
}
