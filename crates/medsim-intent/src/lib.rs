//! Natural-language front end for Medsim commands.
//!
//! Free text is tokenized, entities from closed vocabularies are recognized
//! and replaced by placeholders, and a naive Bayes model picks a `verb.target`
//! intent. A confident classification is rewritten into canonical command
//! syntax; anything else passes through untouched for the exact parser.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod entity;
pub mod error;
pub mod lexer;

pub use classifier::{CanonicalCommand, Classification, IntentClassifier};
pub use config::IntentConfig;
pub use corpus::{CORPUS, IntentSpec};
pub use entity::{Entity, EntityKind, Recognizer};
pub use error::{IntentError, IntentResult};
