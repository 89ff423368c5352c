use serde::Serialize;
use std::fmt;

use crate::config::GradeThresholds;

/// Letter-grade bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

impl Letter {
    /// All buckets, best first.
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::F => "F",
        }
    }

    /// Human-readable grade range covered by this bucket, e.g. `80-89`.
    pub fn range_label(
        &self,
        thresholds: &GradeThresholds,
        min_grade: f64,
        max_grade: f64,
    ) -> String {
        let below = |next: f64| next - 1.0;
        match self {
            Letter::A => format!("{}-{}", thresholds.a_min, max_grade),
            Letter::B => format!("{}-{}", thresholds.b_min, below(thresholds.a_min)),
            Letter::C => format!("{}-{}", thresholds.c_min, below(thresholds.b_min)),
            Letter::D => format!("{}-{}", thresholds.d_min, below(thresholds.c_min)),
            Letter::F => format!("{}-{}", min_grade, below(thresholds.d_min)),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a numeric grade into a letter grade.
///
/// | Range (defaults) | Grade |
/// |------------------|-------|
/// | >= 90            | A     |
/// | >= 80            | B     |
/// | >= 70            | C     |
/// | >= 60            | D     |
/// | < 60             | F     |
pub fn letter_grade(grade: f64, thresholds: &GradeThresholds) -> Letter {
    match grade {
        g if g >= thresholds.a_min => Letter::A,
        g if g >= thresholds.b_min => Letter::B,
        g if g >= thresholds.c_min => Letter::C,
        g if g >= thresholds.d_min => Letter::D,
        _ => Letter::F,
    }
}
