//! Data types shared by validation, aggregation and presentation.

use serde::Serialize;

use crate::analyzers::grade::Letter;

/// A validated student. Only the validator constructs these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentEntry {
    pub(crate) name: String,
    pub(crate) grade: f64,
}

impl StudentEntry {
    pub(crate) fn new(name: String, grade: f64) -> Self {
        Self { name, grade }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }
}

/// Validated entries for a single submission, in submission order.
pub type Roster = Vec<StudentEntry>;

/// Count of students per letter bucket. Every bucket is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeDistribution {
    pub fn count(&self, letter: Letter) -> usize {
        match letter {
            Letter::A => self.a,
            Letter::B => self.b,
            Letter::C => self.c,
            Letter::D => self.d,
            Letter::F => self.f,
        }
    }

    pub(crate) fn increment(&mut self, letter: Letter) {
        let slot = match letter {
            Letter::A => &mut self.a,
            Letter::B => &mut self.b,
            Letter::C => &mut self.c,
            Letter::D => &mut self.d,
            Letter::F => &mut self.f,
        };
        *slot += 1;
    }

    /// `(letter, count)` pairs, best letter first.
    pub fn iter(&self) -> impl Iterator<Item = (Letter, usize)> + '_ {
        Letter::ALL.into_iter().map(|l| (l, self.count(l)))
    }
}

/// Summary statistics for a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_students: usize,
    pub average_grade: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
    pub top_students: Vec<StudentEntry>,
    pub grade_distribution: GradeDistribution,
}
