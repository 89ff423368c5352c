//! Validation error taxonomy.

use thiserror::Error;

/// Every way a submitted name, grade, or roster can be rejected.
///
/// The `Display` text is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Student name cannot be empty.")]
    EmptyName,

    #[error("Student name must be at least {min} characters long.")]
    TooShort { min: usize },

    #[error("Student name cannot exceed {max} characters.")]
    TooLong { max: usize },

    #[error("Student name can only contain letters, spaces, hyphens, and apostrophes.")]
    InvalidChars,

    #[error("Student name cannot contain consecutive spaces.")]
    ConsecutiveSpaces,

    #[error("Student name must contain at least one letter.")]
    MissingLetter,

    #[error("Grade cannot be empty.")]
    EmptyGrade,

    #[error("Grade must be a number with at most {max_decimals} decimal places.")]
    NotNumeric { max_decimals: usize },

    #[error("Grade must be between {min} and {max}.")]
    OutOfRange { min: f64, max: f64 },

    #[error("Please enter at least one student name and grade.")]
    EmptyRoster,

    #[error("Maximum {max} students allowed per submission.")]
    TooManyStudents { max: usize },

    #[error("Please enter valid student names and grades ({min}-{max}).")]
    NoValidEntries { min: f64, max: f64 },
}
