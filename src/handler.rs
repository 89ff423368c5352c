//! Turns one raw submission into either a report or a list of errors.

use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::aggregate::{check_distribution_warnings, compute_statistics};
use crate::config::GradeConfig;
use crate::presenter::{Report, build_report};
use crate::validator::validate_roster;

/// Terminal result of handling a submission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Error { messages: Vec<String> },
    Report(Box<Report>),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    /// HTTP status code the outcome should be served with.
    pub fn http_status(&self) -> u16 {
        match self {
            Outcome::Error { .. } => 422,
            Outcome::Report(_) => 200,
        }
    }
}

/// Validates the submission and, if it is clean, aggregates it.
///
/// Distribution warnings are attached to the report and never turn it into
/// an error.
#[tracing::instrument(skip_all, fields(rows = names.len().max(grades.len())))]
pub fn handle_submission<N, G>(names: &[N], grades: &[G], config: &GradeConfig) -> Outcome
where
    N: AsRef<str>,
    G: AsRef<str>,
{
    let roster = match validate_roster(names, grades, config) {
        Ok(roster) => roster,
        Err(messages) => {
            warn!(errors = messages.len(), "Submission rejected");
            return Outcome::Error { messages };
        }
    };

    let statistics = compute_statistics(&roster, config);
    let warnings = check_distribution_warnings(&roster, config);

    info!(
        students = statistics.total_students,
        average = statistics.average_grade,
        highest = statistics.highest_grade,
        lowest = statistics.lowest_grade,
        warnings = warnings.len(),
        "Report computed"
    );

    Outcome::Report(Box::new(build_report(
        &roster,
        statistics,
        warnings,
        &config.thresholds,
    )))
}
