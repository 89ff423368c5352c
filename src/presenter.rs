//! Display-oriented lookups: letter colours, status tiers and report rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::grade::{Letter, letter_grade};
use crate::analyzers::types::{Roster, Statistics};
use crate::analyzers::utility::format_grade;
use crate::config::GradeThresholds;

/// Performance tier shown next to each student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusTier {
    TopPerformer,
    Excellent,
    Good,
    NeedsImprovement,
    Failing,
}

/// A status tier with its label and colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub tier: StatusTier,
    pub text: &'static str,
    pub color_hint: &'static str,
}

/// Hex colour used for a grade's letter badge.
pub fn grade_color(grade: f64, thresholds: &GradeThresholds) -> &'static str {
    match letter_grade(grade, thresholds) {
        Letter::A => "#4caf50",
        Letter::B => "#8bc34a",
        Letter::C => "#ff9800",
        Letter::D => "#ff5722",
        Letter::F => "#f44336",
    }
}

/// Maps a grade to its status tier. A grade equal to the class maximum is
/// always the top tier.
pub fn status_label(grade: f64, highest_grade: f64, thresholds: &GradeThresholds) -> Status {
    let (tier, text, color_hint) = match grade {
        g if g == highest_grade => (StatusTier::TopPerformer, "Top Performer", "#ffd700"),
        g if g >= thresholds.a_min => (StatusTier::Excellent, "Excellent", "#4caf50"),
        g if g >= thresholds.b_min => (StatusTier::Good, "Good", "#8bc34a"),
        g if g >= thresholds.c_min => (StatusTier::NeedsImprovement, "Needs Improvement", "#ff9800"),
        _ => (StatusTier::Failing, "Failing", "#f44336"),
    };

    Status {
        tier,
        text,
        color_hint,
    }
}

/// One line of the per-student table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub grade: f64,
    pub grade_display: String,
    pub letter: Letter,
    pub letter_color: &'static str,
    pub status: Status,
    pub is_top: bool,
}

/// Everything the results view needs.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub statistics: Statistics,
    pub average_display: String,
    pub highest_display: String,
    pub lowest_display: String,
    pub top_names: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub warnings: Vec<String>,
}

/// Assembles a report with one row per student, in roster order.
pub fn build_report(
    roster: &Roster,
    statistics: Statistics,
    warnings: Vec<String>,
    thresholds: &GradeThresholds,
) -> Report {
    let highest = statistics.highest_grade;

    let rows = roster
        .iter()
        .map(|s| ReportRow {
            name: s.name().to_string(),
            grade: s.grade(),
            grade_display: format_grade(s.grade()),
            letter: letter_grade(s.grade(), thresholds),
            letter_color: grade_color(s.grade(), thresholds),
            status: status_label(s.grade(), highest, thresholds),
            is_top: s.grade() == highest,
        })
        .collect();

    Report {
        generated_at: Utc::now(),
        average_display: format_grade(statistics.average_grade),
        highest_display: format_grade(statistics.highest_grade),
        lowest_display: format_grade(statistics.lowest_grade),
        top_names: statistics
            .top_students
            .iter()
            .map(|s| s.name().to_string())
            .collect(),
        statistics,
        rows,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::compute_statistics;
    use crate::analyzers::types::StudentEntry;
    use crate::config::GradeConfig;

    #[test]
    fn test_status_tiers() {
        let t = GradeThresholds::default();
        assert_eq!(status_label(72.0, 72.0, &t).tier, StatusTier::TopPerformer);
        assert_eq!(status_label(95.0, 99.0, &t).tier, StatusTier::Excellent);
        assert_eq!(status_label(85.0, 99.0, &t).tier, StatusTier::Good);
        assert_eq!(status_label(70.0, 99.0, &t).tier, StatusTier::NeedsImprovement);
        assert_eq!(status_label(65.0, 99.0, &t).tier, StatusTier::Failing);
        assert_eq!(status_label(10.0, 99.0, &t).tier, StatusTier::Failing);
    }

    #[test]
    fn test_status_text_and_color() {
        let status = status_label(100.0, 100.0, &GradeThresholds::default());
        assert_eq!(status.text, "Top Performer");
        assert_eq!(status.color_hint, "#ffd700");
    }

    #[test]
    fn test_grade_color() {
        let t = GradeThresholds::default();
        assert_eq!(grade_color(90.0, &t), "#4caf50");
        assert_eq!(grade_color(61.0, &t), "#ff5722");
        assert_eq!(grade_color(3.0, &t), "#f44336");
    }

    #[test]
    fn test_build_report_rows() {
        let t = GradeThresholds::default();
        let roster = vec![
            StudentEntry::new("Ann".into(), 88.5),
            StudentEntry::new("Ben".into(), 92.0),
        ];
        let stats = compute_statistics(&roster, &GradeConfig::default());
        let report = build_report(&roster, stats, vec![], &t);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Ann");
        assert_eq!(report.rows[0].grade_display, "88.5");
        assert_eq!(report.rows[0].letter, Letter::B);
        assert!(!report.rows[0].is_top);
        assert!(report.rows[1].is_top);
        assert_eq!(report.rows[1].status.tier, StatusTier::TopPerformer);
        assert_eq!(report.top_names, vec!["Ben".to_string()]);
        assert_eq!(report.average_display, "90.25");
    }
}
