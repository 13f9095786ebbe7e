//! Error types for the scenario model.

use thiserror::Error;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Data-integrity violations in a scenario definition.
///
/// These indicate an authoring bug rather than a player mistake.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No ailment is flagged as the chief complaint.
    #[error("patient has no chief complaint")]
    MissingChiefComplaint,

    /// More than one ailment is flagged as the chief complaint.
    #[error("patient has more than one chief complaint")]
    MultipleChiefComplaints,

    /// A referenced body part does not exist on the patient.
    #[error("body part not found: {0}")]
    UnknownBodyPart(String),

    /// Two body parts share a name.
    #[error("duplicate body part: \"{0}\"")]
    DuplicateBodyPart(String),

    /// An effect bundle names a part the patient does not have.
    #[error("ailment \"{ailment}\" has an effect on missing body part \"{part}\"")]
    UnknownEffectTarget {
        /// The ailment owning the effect.
        ailment: String,
        /// The missing part name.
        part: String,
    },

    /// A scenario file could not be read or written as JSON.
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}
