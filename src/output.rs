//! Output formatting and persistence for grade reports.
//!
//! Supports HTML rendering, JSON logging, CSV append of report rows, and
//! loading a raw roster from CSV.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use tracing::{debug, info};

use crate::analyzers::grade::Letter;
use crate::analyzers::utility::format_grade;
use crate::config::GradeConfig;
use crate::handler::Outcome;
use crate::presenter::Report;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::OpenOptions;
use std::path::Path;

/// Empty rows shown on a fresh form.
const INITIAL_FORM_ROWS: usize = 5;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("results.html", include_str!("../templates/results.html")),
    ("error.html", include_str!("../templates/error.html")),
];

#[derive(Serialize)]
struct Band {
    letter: Letter,
    range: String,
}

/// HTML views backed by the embedded Tera templates.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .context("failed to register templates")?;
        Ok(Self { tera })
    }

    /// The blank input form.
    pub fn render_form(&self, config: &GradeConfig) -> Result<String> {
        let bands: Vec<Band> = Letter::ALL
            .into_iter()
            .map(|letter| Band {
                letter,
                range: letter.range_label(&config.thresholds, config.min_grade, config.max_grade),
            })
            .collect();

        let mut context = Context::new();
        context.insert("rows", &INITIAL_FORM_ROWS.min(config.max_students));
        context.insert("max_students", &config.max_students);
        context.insert("max_name_length", &config.max_name_length);
        context.insert("min_grade", &format_grade(config.min_grade));
        context.insert("max_grade", &format_grade(config.max_grade));
        context.insert("bands", &bands);

        Ok(self.tera.render("form.html", &context)?)
    }

    /// The results page for a report, or the error page listing every
    /// validation message.
    pub fn render_outcome(&self, outcome: &Outcome) -> Result<String> {
        let mut context = Context::new();
        let template = match outcome {
            Outcome::Error { messages } => {
                context.insert("messages", messages);
                "error.html"
            }
            Outcome::Report(report) => {
                context.insert("report", report.as_ref());
                "results.html"
            }
        };

        Ok(self.tera.render(template, &context)?)
    }
}

/// Logs an outcome as pretty-printed JSON.
pub fn print_json(outcome: &Outcome) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

/// One CSV line per student in a report.
#[derive(Serialize)]
struct RosterRecord<'a> {
    generated_at: String,
    name: &'a str,
    grade: f64,
    letter: Letter,
    status: &'a str,
}

/// Appends every row of a [`Report`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_roster(path: &str, report: &Report) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = report.rows.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    let generated_at = report.generated_at.to_rfc3339();
    for row in &report.rows {
        writer.serialize(RosterRecord {
            generated_at: generated_at.clone(),
            name: &row.name,
            grade: row.grade,
            letter: row.letter,
            status: row.status.text,
        })?;
    }
    writer.flush()?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    grade: String,
}

/// Reads a `name,grade` CSV into raw, unvalidated name and grade lists.
pub fn load_roster_csv(path: &str) -> Result<(Vec<String>, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open roster {path}"))?;

    let mut names = Vec::new();
    let mut grades = Vec::new();
    for result in reader.deserialize() {
        let row: RawRow = result?;
        names.push(row.name);
        grades.push(row.grade);
    }

    debug!(path, rows = names.len(), "Roster CSV loaded");
    Ok((names, grades))
}
