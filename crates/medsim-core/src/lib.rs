//! Core types for Medsim: the patient model, effect bundles, and scenario state.
//!
//! This crate is pure data. It knows nothing about parsing or narration;
//! the engine crate folds these types into observations and new states.
//! Everything here round-trips through JSON.

/// Ailments, their narratives, and the treatments they accept.
pub mod ailment;
/// Body parts and capability tiers.
pub mod body;
/// The structured command schema and target vocabularies.
pub mod command;
/// Effect bundles and numeric modifiers.
pub mod effects;
/// Error types used throughout the crate.
pub mod error;
/// Categorical findings and their prominence priorities.
pub mod findings;
/// The patient: identity, vitals, history.
pub mod patient;
/// The built-in demo scenario.
pub mod sample;
/// Scenario definitions with reference actions.
pub mod scenario;
/// The scenario state root, player, environment, and log.
pub mod state;

/// Re-export model types.
pub use ailment::{Ailment, Narrative, Treatment};
/// Re-export body part types.
pub use body::{BodyPart, BodyPartKind, Obstruction, STANDARD_BODY_PARTS};
/// Re-export the command schema.
pub use command::{Command, Object, Verb};
/// Re-export effect types.
pub use effects::{BodyPartEffect, Effects, ModifierKind, NumericModifier};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export patient types.
pub use patient::{Patient, Position, Responsiveness};
/// Re-export scenario types.
pub use scenario::Scenario;
/// Re-export state types.
pub use state::{Author, Distance, LogEntry, ScenarioState};
