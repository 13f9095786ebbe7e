//! Grade reports and letter grades.

use std::fmt;

use serde::Serialize;

/// Letter grade for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LetterGrade {
    /// 90 and above.
    A,
    /// 80 to 90.
    B,
    /// 70 to 80.
    C,
    /// 60 to 70.
    D,
    /// Below 60.
    F,
}

impl LetterGrade {
    /// Map a 0-100 score to a letter.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::A,
            s if s >= 80.0 => Self::B,
            s if s >= 70.0 => Self::C,
            s if s >= 60.0 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// The outcome of grading one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    /// Final score, clamped to 0-100.
    pub score: f64,
    /// Key actions found in the log.
    pub matched_actions: usize,
    /// Key actions the scenario defines.
    pub total_perfect_actions: usize,
    /// Logged commands that match a bad action.
    pub bad_actions_count: usize,
    /// Bonus points awarded for order.
    pub order_bonus: f64,
    /// Human-readable notes, summary first.
    pub feedback: Vec<String>,
}

impl GradeReport {
    /// Letter grade for the score.
    pub fn letter(&self) -> LetterGrade {
        LetterGrade::from_score(self.score)
    }

    /// The summary line.
    pub fn summary(&self) -> &str {
        self.feedback.first().map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_boundaries() {
        assert_eq!(LetterGrade::from_score(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(66.67), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(59.9), LetterGrade::F);
        assert_eq!(LetterGrade::from_score(0.0), LetterGrade::F);
    }

    #[test]
    fn letters_display() {
        assert_eq!(LetterGrade::B.to_string(), "B");
    }
}
