//! Closed-vocabulary entity recognition.
//!
//! Entities are matched on normalized tokens. Multi-word phrases win over
//! shorter ones starting at the same position. A single token with no exact
//! match may still match a vocabulary word by Jaro-Winkler similarity, which
//! catches common misspellings such as `tourniqet`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;

use medsim_core::command::{ApplyTarget, PerformTarget};
use medsim_core::{Position, STANDARD_BODY_PARTS};
use serde::Serialize;
use strsim::jaro_winkler;

use crate::lexer::tokenize;

/// Shortest token considered for fuzzy matching.
const FUZZY_MIN_LEN: usize = 5;

/// Largest length difference tolerated by fuzzy matching.
const FUZZY_MAX_LEN_DELTA: usize = 2;

/// Kinds of entity the recognizer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A body part, canonical camel-case name.
    BodyPart,
    /// Something applied with `apply`.
    Treatment,
    /// Something done with `perform`.
    Procedure,
    /// A patient position.
    Position,
    /// Wearable gear.
    Item,
    /// A manner word appended as a modifier, e.g. `tight`.
    Qualifier,
}

impl EntityKind {
    /// Every kind.
    pub const ALL: [EntityKind; 6] = [
        Self::BodyPart,
        Self::Treatment,
        Self::Procedure,
        Self::Position,
        Self::Item,
        Self::Qualifier,
    ];

    /// Name used in intent targets, e.g. `look.bodypart`.
    pub fn category(&self) -> &'static str {
        match self {
            Self::BodyPart => "bodypart",
            Self::Treatment => "treatment",
            Self::Procedure => "procedure",
            Self::Position => "position",
            Self::Item => "item",
            Self::Qualifier => "qualifier",
        }
    }

    /// The kind an intent target names, if it is a generic category.
    pub fn from_category(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.category() == target)
    }

    /// Stand-in token used when delexicalizing text.
    pub fn placeholder(&self) -> String {
        format!("<{}>", self.category())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// One recognized entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// What kind of thing it is.
    pub kind: EntityKind,
    /// Canonical command token, e.g. `leftLeg`.
    pub value: String,
    /// Token index range in the normalized input.
    pub span: Range<usize>,
    /// Whether the match was fuzzy.
    pub fuzzy: bool,
}

const BODY_PART_SYNONYMS: &[(&str, &str)] = &[
    ("skull", "head"),
    ("scalp", "head"),
    ("face", "head"),
    ("throat", "neck"),
    ("ribs", "chest"),
    ("belly", "abdomen"),
    ("stomach", "abdomen"),
    ("tummy", "abdomen"),
    ("hips", "pelvis"),
    ("hip", "pelvis"),
    ("left arm", "leftArm"),
    ("right arm", "rightArm"),
    ("left hand", "leftHand"),
    ("right hand", "rightHand"),
    ("left wrist", "leftHand"),
    ("right wrist", "rightHand"),
    ("left leg", "leftLeg"),
    ("right leg", "rightLeg"),
    ("left shin", "leftLeg"),
    ("right shin", "rightLeg"),
    ("left foot", "leftFoot"),
    ("right foot", "rightFoot"),
    ("left ankle", "leftFoot"),
    ("right ankle", "rightFoot"),
];

const TREATMENT_SYNONYMS: &[(&str, &str)] = &[
    ("direct pressure", "pressure"),
    ("gauze", "dressing"),
    ("ice pack", "ice"),
    ("cold pack", "ice"),
    ("heat pack", "heat"),
    ("hot pack", "heat"),
    ("splints", "splint"),
];

const PROCEDURE_SYNONYMS: &[(&str, &str)] = &[
    ("chest compressions", "cpr"),
    ("compressions", "cpr"),
    ("rescue breathing", "rescueBreathing"),
    ("rescue breaths", "rescueBreathing"),
    ("jaw thrust", "jawThrust"),
    ("head tilt chin lift", "headTiltChinLift"),
    ("head tilt", "headTiltChinLift"),
    ("abdominal thrusts", "abdominalThrusts"),
    ("heimlich", "abdominalThrusts"),
    ("wound irrigation", "woundIrrigation"),
    ("irrigate", "woundIrrigation"),
];

const POSITION_SYNONYMS: &[(&str, &str)] = &[
    ("on their back", "supine"),
    ("lying flat", "supine"),
    ("lie down", "supine"),
    ("face down", "prone"),
    ("on their stomach", "prone"),
    ("sit up", "sitting"),
    ("sit", "sitting"),
    ("stand up", "standing"),
    ("stand", "standing"),
    ("recovery position", "recovery"),
    ("on their side", "recovery"),
    ("onto their side", "recovery"),
];

const ITEMS: &[(&str, &str)] = &[
    ("gloves", "gloves"),
    ("glove", "gloves"),
    ("ppe", "gloves"),
    ("mask", "mask"),
    ("face mask", "mask"),
    ("goggles", "goggles"),
    ("eye protection", "goggles"),
    ("gown", "gown"),
];

const QUALIFIERS: &[(&str, &str)] = &[
    ("tight", "tight"),
    ("tightly", "tight"),
    ("firmly", "firm"),
    ("firm", "firm"),
    ("gently", "gentle"),
    ("loosely", "loose"),
];

#[derive(Debug, Clone)]
struct Entry {
    kind: EntityKind,
    value: String,
}

/// Longest-match recognizer over the built-in vocabularies.
#[derive(Debug, Clone)]
pub struct Recognizer {
    phrases: HashMap<Vec<String>, Entry>,
    words: Vec<(String, Entry)>,
    known: HashSet<String>,
    max_len: usize,
    fuzzy_threshold: f64,
}

impl Recognizer {
    /// Build the recognizer. Earlier vocabularies win on duplicate phrases.
    pub fn new(fuzzy_threshold: f64) -> Self {
        let mut recognizer = Self {
            phrases: HashMap::new(),
            words: Vec::new(),
            known: HashSet::new(),
            max_len: 1,
            fuzzy_threshold,
        };

        for &part in STANDARD_BODY_PARTS {
            recognizer.add(EntityKind::BodyPart, part, part);
        }
        recognizer.add_all(EntityKind::BodyPart, BODY_PART_SYNONYMS);
        for target in ApplyTarget::ALL {
            recognizer.add(EntityKind::Treatment, target.name(), target.name());
        }
        recognizer.add_all(EntityKind::Treatment, TREATMENT_SYNONYMS);
        for target in PerformTarget::ALL {
            recognizer.add(EntityKind::Procedure, target.name(), target.name());
        }
        recognizer.add_all(EntityKind::Procedure, PROCEDURE_SYNONYMS);
        for position in Position::ALL {
            recognizer.add(EntityKind::Position, position.name(), position.name());
        }
        recognizer.add_all(EntityKind::Position, POSITION_SYNONYMS);
        recognizer.add_all(EntityKind::Item, ITEMS);
        recognizer.add_all(EntityKind::Qualifier, QUALIFIERS);
        recognizer
    }

    /// Exempt ordinary words from fuzzy matching, so that `spine` is never
    /// read as a misspelled `supine`.
    pub fn with_known_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known.extend(words.into_iter().map(Into::into));
        self
    }

    fn add_all(&mut self, kind: EntityKind, pairs: &[(&str, &str)]) {
        for &(surface, value) in pairs {
            self.add(kind, surface, value);
        }
    }

    fn add(&mut self, kind: EntityKind, surface: &str, value: &str) {
        let tokens = tokenize(surface);
        if tokens.is_empty() || self.phrases.contains_key(&tokens) {
            return;
        }
        let entry = Entry {
            kind,
            value: value.to_string(),
        };
        if let [word] = tokens.as_slice() {
            self.words.push((word.clone(), entry.clone()));
        }
        self.max_len = self.max_len.max(tokens.len());
        self.phrases.insert(tokens, entry);
    }

    /// Find entities in normalized tokens, left to right, without overlap.
    pub fn recognize(&self, tokens: &[String]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.exact(tokens, i).or_else(|| self.fuzzy(tokens, i)) {
                Some(entity) => {
                    i = entity.span.end;
                    entities.push(entity);
                }
                None => i += 1,
            }
        }
        entities
    }

    fn exact(&self, tokens: &[String], start: usize) -> Option<Entity> {
        let longest = self.max_len.min(tokens.len() - start);
        (1..=longest).rev().find_map(|len| {
            let end = start + len;
            self.phrases.get(&tokens[start..end]).map(|entry| Entity {
                kind: entry.kind,
                value: entry.value.clone(),
                span: start..end,
                fuzzy: false,
            })
        })
    }

    fn fuzzy(&self, tokens: &[String], start: usize) -> Option<Entity> {
        let token = &tokens[start];
        if token.len() < FUZZY_MIN_LEN || self.known.contains(token) {
            return None;
        }
        self.words
            .iter()
            .filter(|(word, _)| word.len().abs_diff(token.len()) <= FUZZY_MAX_LEN_DELTA)
            .map(|(word, entry)| (jaro_winkler(token, word), entry))
            .filter(|(score, _)| *score >= self.fuzzy_threshold)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, entry)| Entity {
                kind: entry.kind,
                value: entry.value.clone(),
                span: start..start + 1,
                fuzzy: true,
            })
    }
}

/// Replace every entity span with its kind's placeholder token.
pub fn delexicalize(tokens: &[String], entities: &[Entity]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    for entity in entities {
        out.extend(tokens[i..entity.span.start].iter().cloned());
        out.push(entity.kind.placeholder());
        i = entity.span.end;
    }
    out.extend(tokens[i..].iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str) -> Vec<(EntityKind, String)> {
        Recognizer::new(0.92)
            .recognize(&tokenize(text))
            .into_iter()
            .map(|e| (e.kind, e.value))
            .collect()
    }

    #[test]
    fn multi_word_body_parts() {
        assert_eq!(
            recognize("look at the left arm"),
            vec![(EntityKind::BodyPart, "leftArm".to_string())]
        );
        assert_eq!(
            recognize("palpate leftLeg"),
            vec![(EntityKind::BodyPart, "leftLeg".to_string())]
        );
    }

    #[test]
    fn longest_phrase_wins() {
        assert_eq!(
            recognize("start chest compressions"),
            vec![(EntityKind::Procedure, "cpr".to_string())]
        );
        assert_eq!(
            recognize("roll them on their back"),
            vec![(EntityKind::Position, "supine".to_string())]
        );
    }

    #[test]
    fn several_entities_in_order() {
        assert_eq!(
            recognize("apply a splint to the left leg tightly"),
            vec![
                (EntityKind::Treatment, "splint".to_string()),
                (EntityKind::BodyPart, "leftLeg".to_string()),
                (EntityKind::Qualifier, "tight".to_string()),
            ]
        );
    }

    #[test]
    fn misspellings_match_fuzzily() {
        let entities = Recognizer::new(0.92).recognize(&tokenize("apply a tourniqet"));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].value, "tourniquet");
        assert!(entities[0].fuzzy);
    }

    #[test]
    fn short_or_distant_words_do_not_fuzzy_match() {
        assert!(recognize("press on it").is_empty());
        assert!(recognize("patient").is_empty());
    }

    #[test]
    fn known_words_are_not_fuzzy_matched() {
        let tokens = tokenize("control the spine");
        assert_eq!(Recognizer::new(0.92).recognize(&tokens).len(), 1);
        let recognizer = Recognizer::new(0.92).with_known_words(["spine"]);
        assert!(recognizer.recognize(&tokens).is_empty());
    }

    #[test]
    fn delexicalized_tokens_use_placeholders() {
        let tokens = tokenize("put ice on the left foot");
        let entities = Recognizer::new(0.92).recognize(&tokens);
        assert_eq!(
            delexicalize(&tokens, &entities),
            vec!["put", "<treatment>", "on", "the", "<bodypart>"]
        );
    }
}
