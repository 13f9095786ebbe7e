//! Command parsing and object resolution.

mod resolver;

pub use resolver::{require_modifier, resolve_command, resolve_object};
