use crate::analyzers::grade::{Letter, letter_grade};
use crate::analyzers::types::{GradeDistribution, Roster, Statistics, StudentEntry};
use crate::analyzers::utility::{mean_scaled, to_scaled};
use crate::config::GradeConfig;

/// Share of the class below the D threshold that triggers a warning.
const FAILING_SHARE: f64 = 0.5;

/// Share of the class in a single letter bucket that triggers a warning.
const CLUSTER_SHARE: f64 = 0.8;

/// Aggregates a roster into a [`Statistics`] snapshot.
///
/// Every entry tied at the highest grade is reported as a top student, in
/// roster order. The average is read at the configured grade precision and
/// rounded half-up to two decimals.
pub fn compute_statistics(roster: &Roster, config: &GradeConfig) -> Statistics {
    if roster.is_empty() {
        return Statistics::default();
    }

    let places = config.max_decimal_places as u32;
    let scaled: Vec<i64> = roster.iter().map(|s| to_scaled(s.grade, places)).collect();

    let highest_grade = roster
        .iter()
        .map(|s| s.grade)
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest_grade = roster.iter().map(|s| s.grade).fold(f64::INFINITY, f64::min);

    let top_students: Vec<StudentEntry> = roster
        .iter()
        .filter(|s| s.grade == highest_grade)
        .cloned()
        .collect();

    let mut grade_distribution = GradeDistribution::default();
    for student in roster {
        grade_distribution.increment(letter_grade(student.grade, &config.thresholds));
    }

    Statistics {
        total_students: roster.len(),
        average_grade: mean_scaled(&scaled, places),
        highest_grade,
        lowest_grade,
        top_students,
        grade_distribution,
    }
}

/// Advisory checks on how grades are spread across the class.
///
/// Warnings never invalidate the roster; they are shown next to the report.
pub fn check_distribution_warnings(roster: &Roster, config: &GradeConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if roster.is_empty() {
        return warnings;
    }

    let thresholds = &config.thresholds;
    let total = roster.len();
    let first = roster[0].grade;

    if roster.iter().all(|s| s.grade == first) {
        warnings.push("All students have the same grade. Please verify the data.".to_string());
    }

    let failing = roster
        .iter()
        .filter(|s| s.grade < thresholds.d_min)
        .count();
    if failing as f64 > total as f64 * FAILING_SHARE {
        warnings.push(
            "More than 50% of students are failing. Please review the grading criteria."
                .to_string(),
        );
    }

    let mut buckets = GradeDistribution::default();
    for student in roster {
        buckets.increment(letter_grade(student.grade, thresholds));
    }

    for (letter, count) in buckets.iter() {
        if count as f64 > total as f64 * CLUSTER_SHARE {
            warnings.push(cluster_warning(letter, count, total, config));
        }
    }

    warnings
}

fn cluster_warning(letter: Letter, count: usize, total: usize, config: &GradeConfig) -> String {
    format!(
        "{} out of {} students are in the {} range. Consider reviewing the assessment.",
        count,
        total,
        letter.range_label(&config.thresholds, config.min_grade, config.max_grade)
    )
}
