//! The scenario state root and everything that hangs off it besides the patient.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ailment::Treatment;
use crate::error::CoreResult;
use crate::patient::Patient;

/// How far the player is from the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    /// Sizing up the scene from a distance.
    #[default]
    Far,
    /// Kneeling beside the patient.
    Near,
}

/// The player's own state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    /// Distance to the patient.
    pub distance: Distance,
    /// Items carried but not worn.
    pub inventory: Vec<String>,
    /// Items currently worn.
    pub worn: Vec<String>,
    /// Free-text notes taken during the session.
    pub notes: Vec<String>,
}

impl PlayerState {
    /// Whether the player is beside the patient.
    pub fn is_near(&self) -> bool {
        self.distance == Distance::Near
    }

    /// Whether an item is carried (case-insensitive).
    pub fn carries(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i.eq_ignore_ascii_case(item))
    }

    /// Whether an item is worn (case-insensitive).
    pub fn wears(&self, item: &str) -> bool {
        self.worn.iter().any(|i| i.eq_ignore_ascii_case(item))
    }

    /// Move an item from inventory to worn. Returns false if not carried.
    pub fn put_on(&mut self, item: &str) -> bool {
        if let Some(pos) = self
            .inventory
            .iter()
            .position(|i| i.eq_ignore_ascii_case(item))
        {
            let item = self.inventory.remove(pos);
            self.worn.push(item);
            true
        } else {
            false
        }
    }
}

/// The surroundings of the patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// What the player sees around them.
    pub description: String,
    /// Dangers present at the scene.
    pub hazards: Vec<String>,
}

/// Treatments that act on the patient as a whole rather than on one ailment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalTreatments {
    /// Treatments available regardless of ailment.
    pub catalog: Vec<Treatment>,
    /// Keys already applied.
    pub applied: Vec<String>,
}

impl GlobalTreatments {
    /// Catalog entry for `key`.
    pub fn get(&self, key: &str) -> Option<&Treatment> {
        self.catalog.iter().find(|t| t.is_keyed(key))
    }

    /// Whether `key` was already applied.
    pub fn has_applied(&self, key: &str) -> bool {
        self.applied.iter().any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Catalog entries that have been applied.
    pub fn applied_treatments(&self) -> impl Iterator<Item = &Treatment> {
        self.catalog.iter().filter(|t| self.has_applied(&t.key))
    }
}

/// Who wrote a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The player's command.
    Player,
    /// The engine's narration.
    Narrator,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Narrator => write!(f, "narrator"),
        }
    }
}

/// One line of the session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry id.
    pub id: Uuid,
    /// Who wrote it.
    pub author: Author,
    /// Canonical command for player entries, narration otherwise.
    pub text: String,
    /// Original player input when it differs from `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// A player entry.
    pub fn player(text: impl Into<String>) -> Self {
        Self::new(Author::Player, text.into())
    }

    /// A narrator entry.
    pub fn narrator(text: impl Into<String>) -> Self {
        Self::new(Author::Narrator, text.into())
    }

    fn new(author: Author, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text,
            raw: None,
            timestamp: Utc::now(),
        }
    }

    /// Record the original input if it differs from the canonical text.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw != self.text {
            self.raw = Some(raw);
        }
        self
    }
}

/// The root of everything the engine reads and writes.
///
/// Treated as immutable: every command produces a new value and callers
/// always continue from the most recently returned state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    /// Transcript of the session so far.
    #[serde(default)]
    pub log: Vec<LogEntry>,
    /// The player.
    #[serde(default)]
    pub player: PlayerState,
    /// The patient.
    pub patient: Patient,
    /// The surroundings.
    #[serde(default)]
    pub environment: Environment,
    /// Whole-patient treatments.
    #[serde(default)]
    pub treatments: GlobalTreatments,
}

impl ScenarioState {
    /// A fresh state for the given patient.
    pub fn new(patient: Patient) -> Self {
        Self {
            log: Vec::new(),
            player: PlayerState::default(),
            patient,
            environment: Environment::default(),
            treatments: GlobalTreatments::default(),
        }
    }

    /// Check the integrity invariants of the state.
    pub fn validate(&self) -> CoreResult<()> {
        self.patient.validate()
    }

    /// Player-authored log entries, in order.
    pub fn player_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(|e| e.author == Author::Player)
    }

    /// A copy of this state with additional log entries.
    pub fn with_log(&self, entries: impl IntoIterator<Item = LogEntry>) -> Self {
        let mut next = self.clone();
        next.log.extend(entries);
        next
    }

    /// A copy of this state with a note appended.
    pub fn with_note(&self, note: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.player.notes.push(note.into());
        next
    }

    /// Parse a state from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the state to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
