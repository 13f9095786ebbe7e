//! Session grading for Medsim.
//!
//! Compares the commands a player logged with the scenario's key actions and
//! forbidden actions, producing a 0-100 score, feedback, and a letter grade.

pub mod config;
pub mod grade;
pub mod report;

pub use config::GradingConfig;
pub use grade::{grade_scenario, grade_session, grade_session_with};
pub use report::{GradeReport, LetterGrade};
