//! Input validation for student names, grades and whole submissions.
//!
//! Every check is a pure function of the raw text and the active
//! [`GradeConfig`]; nothing is remembered between submissions.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::analyzers::types::{Roster, StudentEntry};
use crate::analyzers::utility::round_to;
use crate::config::GradeConfig;
use crate::error::ValidationError;

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z '\-]+$").expect("Invalid regex pattern"));
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.(\d*))?|\.(\d+))$").expect("Invalid regex pattern")
});

/// Validates a student name and returns it in title case.
pub fn validate_name(raw: &str, config: &GradeConfig) -> Result<String, ValidationError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let length = name.chars().count();
    if length < config.min_name_length {
        return Err(ValidationError::TooShort {
            min: config.min_name_length,
        });
    }
    if length > config.max_name_length {
        return Err(ValidationError::TooLong {
            max: config.max_name_length,
        });
    }

    if !NAME_CHARS.is_match(name) {
        return Err(ValidationError::InvalidChars);
    }

    if name.contains("  ") {
        return Err(ValidationError::ConsecutiveSpaces);
    }

    if !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::MissingLetter);
    }

    Ok(title_case(name))
}

/// Lowercases `name` and capitalizes the first letter of every word.
/// Spaces and hyphens separate words.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        if at_word_start {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        at_word_start = c == ' ' || c == '-';
    }

    out
}

/// Validates a grade and returns it rounded to the configured precision.
pub fn validate_grade(raw: &str, config: &GradeConfig) -> Result<f64, ValidationError> {
    let text = raw.trim();

    if text.is_empty() {
        return Err(ValidationError::EmptyGrade);
    }

    let not_numeric = || ValidationError::NotNumeric {
        max_decimals: config.max_decimal_places,
    };

    let captures = DECIMAL.captures(text).ok_or_else(not_numeric)?;
    let decimals = captures
        .get(1)
        .or_else(|| captures.get(2))
        .map_or(0, |m| m.as_str().len());
    if decimals > config.max_decimal_places {
        return Err(not_numeric());
    }

    let value: f64 = text.parse().map_err(|_| not_numeric())?;

    if value < config.min_grade || value > config.max_grade {
        return Err(ValidationError::OutOfRange {
            min: config.min_grade,
            max: config.max_grade,
        });
    }

    // adding 0.0 turns a parsed "-0" into 0.0
    Ok(round_to(value, config.max_decimal_places as u32) + 0.0)
}

/// Per-field results for one non-blank row.
struct RowCheck {
    name: Result<String, ValidationError>,
    grade: Result<f64, ValidationError>,
}

impl RowCheck {
    fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Err(e) = &self.name {
            errors.push(e.clone());
        }
        if let Err(e) = &self.grade {
            errors.push(e.clone());
        }
        errors
    }
}

/// Returns `None` for rows where both fields are blank.
fn check_row(name: &str, grade: &str, config: &GradeConfig) -> Option<RowCheck> {
    if name.trim().is_empty() && grade.trim().is_empty() {
        return None;
    }

    Some(RowCheck {
        name: validate_name(name, config),
        grade: validate_grade(grade, config),
    })
}

/// Validates one name/grade pair.
///
/// Rows with both fields blank are skipped and yield `Ok(None)`. Otherwise
/// the name and grade are checked independently and every error is
/// returned.
pub fn validate_entry(
    name: &str,
    grade: &str,
    config: &GradeConfig,
) -> Result<Option<StudentEntry>, Vec<ValidationError>> {
    match check_row(name, grade, config) {
        None => Ok(None),
        Some(RowCheck {
            name: Ok(name),
            grade: Ok(grade),
        }) => Ok(Some(StudentEntry::new(name, grade))),
        Some(check) => Err(check.errors()),
    }
}

/// Validates a whole submission of parallel name and grade lists.
///
/// On failure returns one user-facing message per rejected row (or a single
/// message when the submission as a whole is unusable). A roster is only
/// returned when every non-blank row is valid.
pub fn validate_roster<N, G>(
    names: &[N],
    grades: &[G],
    config: &GradeConfig,
) -> Result<Roster, Vec<String>>
where
    N: AsRef<str>,
    G: AsRef<str>,
{
    if names.is_empty() || grades.is_empty() {
        return Err(vec![ValidationError::EmptyRoster.to_string()]);
    }

    let rows = names.len().max(grades.len());
    if rows > config.max_students {
        return Err(vec![
            ValidationError::TooManyStudents {
                max: config.max_students,
            }
            .to_string(),
        ]);
    }

    let mut roster = Roster::with_capacity(rows);
    let mut messages = Vec::new();

    for i in 0..rows {
        let name = names.get(i).map_or("", |n| n.as_ref());
        let grade = grades.get(i).map_or("", |g| g.as_ref());

        let Some(check) = check_row(name, grade, config) else {
            debug!(row = i + 1, "Skipping blank row");
            continue;
        };

        match check {
            RowCheck {
                name: Ok(name),
                grade: Ok(grade),
            } => roster.push(StudentEntry::new(name, grade)),
            check => messages.push(row_message(i + 1, &check)),
        }
    }

    if !messages.is_empty() {
        return Err(messages);
    }

    if roster.is_empty() {
        return Err(vec![
            ValidationError::NoValidEntries {
                min: config.min_grade,
                max: config.max_grade,
            }
            .to_string(),
        ]);
    }

    Ok(roster)
}

fn row_message(position: usize, check: &RowCheck) -> String {
    let details = check
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    match &check.name {
        Ok(name) => format!("Student {position} ({name}): {details}"),
        Err(_) => format!("Student {position}: {details}"),
    }
}
