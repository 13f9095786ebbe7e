//! Naive Bayes intent classifier and canonical command synthesis.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use medsim_core::Verb;

use crate::config::IntentConfig;
use crate::corpus::{CORPUS, IntentSpec};
use crate::entity::{Entity, EntityKind, Recognizer, delexicalize};
use crate::error::{IntentError, IntentResult};
use crate::lexer::{is_stopword, tokenize};

/// How many runner-up intents a classification keeps.
const ALTERNATIVES: usize = 3;

/// The result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// The input exactly as given.
    pub text: String,
    /// Best intent, if any feature was recognized.
    pub intent: Option<String>,
    /// Posterior probability of `intent`.
    pub confidence: f64,
    /// Recognized entities, left to right.
    pub entities: Vec<Entity>,
    /// Best intents with their posteriors, highest first.
    pub ranking: Vec<(String, f64)>,
}

impl Classification {
    /// The first entity of `kind`.
    pub fn entity(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == kind)
    }
}

/// A command string ready for the exact parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalCommand {
    /// The text to parse.
    pub text: String,
    /// Whether the text was synthesized from a classification.
    pub was_nlp_parsed: bool,
    /// Confidence of the classification it came from.
    pub confidence: f64,
}

impl CanonicalCommand {
    /// Use the input unchanged.
    pub fn passthrough(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            was_nlp_parsed: false,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct ClassModel {
    name: String,
    modifiers: Vec<EntityKind>,
    log_prior: f64,
    counts: HashMap<String, f64>,
    total: f64,
}

/// A trained, immutable classifier handle. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    config: IntentConfig,
    recognizer: Recognizer,
    classes: Vec<ClassModel>,
    vocabulary: HashSet<String>,
}

impl IntentClassifier {
    /// Train on the built-in corpus with default settings.
    pub fn standard() -> IntentResult<Self> {
        Self::train(CORPUS, IntentConfig::default())
    }

    /// Train on `corpus`.
    pub fn train(corpus: &[IntentSpec], config: IntentConfig) -> IntentResult<Self> {
        if corpus.is_empty() {
            return Err(IntentError::EmptyCorpus);
        }
        let recognizer = Recognizer::new(config.fuzzy_threshold).with_known_words(
            corpus
                .iter()
                .flat_map(|spec| spec.examples.iter())
                .flat_map(|example| tokenize(example)),
        );
        let total_examples: usize = corpus.iter().map(|s| s.examples.len()).sum();
        if total_examples == 0 {
            return Err(IntentError::EmptyCorpus);
        }

        let mut vocabulary = HashSet::new();
        let mut classes = Vec::with_capacity(corpus.len());
        for spec in corpus {
            validate(spec)?;
            let mut counts: HashMap<String, f64> = HashMap::new();
            for example in spec.examples {
                for feature in features(&recognizer, example).1 {
                    vocabulary.insert(feature.clone());
                    *counts.entry(feature).or_default() += 1.0;
                }
            }
            let total = counts.values().sum();
            classes.push(ClassModel {
                name: spec.name.to_string(),
                modifiers: spec.modifiers.to_vec(),
                log_prior: (spec.examples.len() as f64 / total_examples as f64).ln(),
                counts,
                total,
            });
        }

        info!(
            intents = classes.len(),
            examples = total_examples,
            features = vocabulary.len(),
            "intent classifier trained"
        );
        Ok(Self {
            config,
            recognizer,
            classes,
            vocabulary,
        })
    }

    /// The settings this classifier was trained with.
    pub fn config(&self) -> &IntentConfig {
        &self.config
    }

    /// Names of every known intent.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    /// Classify free text.
    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        let (entities, features) = features(&self.recognizer, &lowered);
        let known: Vec<&String> = features
            .iter()
            .filter(|f| self.vocabulary.contains(*f))
            .collect();

        if known.is_empty() {
            debug!(text = %lowered, "no known features");
            return Classification {
                text: text.to_string(),
                intent: None,
                confidence: 0.0,
                entities,
                ranking: Vec::new(),
            };
        }

        let smoothing = self.config.smoothing;
        let vocab = self.vocabulary.len() as f64;
        let scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                let denominator = (class.total + smoothing * vocab).ln();
                class.log_prior
                    + known
                        .iter()
                        .map(|f| {
                            let count = class.counts.get(*f).copied().unwrap_or(0.0);
                            (count + smoothing).ln() - denominator
                        })
                        .sum::<f64>()
            })
            .collect();

        let posterior = softmax(&scores);
        let mut ranking: Vec<(String, f64)> = self
            .classes
            .iter()
            .zip(posterior)
            .map(|(class, p)| (class.name.clone(), p))
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranking.truncate(ALTERNATIVES);

        let (intent, confidence) = ranking
            .first()
            .map(|(name, p)| (Some(name.clone()), *p))
            .unwrap_or((None, 0.0));
        debug!(text = %lowered, intent = ?intent, confidence, "classified");
        Classification {
            text: text.to_string(),
            intent,
            confidence,
            entities,
            ranking,
        }
    }

    /// Turn a classification into parser input.
    ///
    /// Below the threshold, or when a generic target has no matching entity,
    /// the original text passes through unchanged, case included.
    pub fn to_canonical(&self, classification: &Classification) -> CanonicalCommand {
        let passthrough = || CanonicalCommand::passthrough(classification.text.clone());
        if classification.confidence < self.config.threshold {
            return passthrough();
        }
        let Some(name) = classification.intent.as_deref() else {
            return passthrough();
        };
        let Some((verb, target)) = name.split_once('.') else {
            return passthrough();
        };

        let mut words = vec![verb.to_string()];
        let target_kind = EntityKind::from_category(target);
        match target_kind {
            Some(kind) => match classification.entity(kind) {
                Some(entity) => words.push(entity.value.clone()),
                None => return passthrough(),
            },
            None => words.push(target.to_string()),
        }

        let modifiers = self
            .classes
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.modifiers.as_slice())
            .unwrap_or_default();
        for kind in modifiers.iter().filter(|&&k| Some(k) != target_kind) {
            if let Some(entity) = classification.entity(*kind) {
                words.push(entity.value.clone());
            }
        }

        CanonicalCommand {
            text: words.join(" "),
            was_nlp_parsed: true,
            confidence: classification.confidence,
        }
    }

    /// Classify and convert in one step.
    pub fn canonicalize(&self, text: &str) -> CanonicalCommand {
        self.to_canonical(&self.classify(text))
    }
}

fn validate(spec: &IntentSpec) -> IntentResult<()> {
    let malformed = |reason: &str| IntentError::MalformedIntent {
        name: spec.name.to_string(),
        reason: reason.to_string(),
    };
    let (verb, target) = spec
        .name
        .split_once('.')
        .ok_or_else(|| malformed("expected verb.target"))?;
    if Verb::parse(verb).is_none() {
        return Err(malformed("unknown verb"));
    }
    if target.is_empty() {
        return Err(malformed("empty target"));
    }
    if spec.examples.is_empty() {
        return Err(malformed("no examples"));
    }
    Ok(())
}

/// Recognize entities, then build unigram and bigram features over the
/// delexicalized, stopword-free tokens.
fn features(recognizer: &Recognizer, text: &str) -> (Vec<Entity>, Vec<String>) {
    let tokens = tokenize(text);
    let entities = recognizer.recognize(&tokens);
    let words: Vec<String> = delexicalize(&tokens, &entities)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect();
    let bigrams = words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
    let features = words.iter().cloned().chain(bigrams).collect();
    (entities, features)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
