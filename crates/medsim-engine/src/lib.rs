//! Command engine for Medsim.
//!
//! Turns a line of canonical command syntax into a [`Command`](medsim_core::Command),
//! runs it through the verb's guard/enrich/transform pipeline, and returns a
//! narrated [`Response`] with a fresh state. The realization engine folds the
//! patient's ailments and applied treatments into the observable vitals and
//! findings the handlers report.

pub mod error;
pub mod handlers;
pub mod narrate;
pub mod parser;
pub mod pipeline;
pub mod realize;
pub mod response;
pub mod session;

pub use error::{EngineError, EngineResult, ParseError};
pub use handlers::{Engine, execute_command};
pub use parser::resolve_command;
pub use pipeline::{Handler, Pipeline, Request};
pub use realize::{RealizedPart, RealizedPatient, realize_patient};
pub use response::{Response, ResultKind};
pub use session::{Session, Turn};
