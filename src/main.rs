//! CLI entry point for the grade roster tool.
//!
//! Provides subcommands for serving the web form and for producing a report
//! from a roster CSV file.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use grade_roster::{
    config::GradeConfig,
    handler::{Outcome, handle_submission},
    output::{append_roster, load_roster_csv, print_json},
    server::serve,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_roster")]
#[command(about = "Validate a class roster and report grade statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the grade entry form over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        addr: String,

        /// Optional JSON file with limits and thresholds
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Build a report from a CSV file with `name,grade` columns
    Report {
        /// Roster CSV to read
        #[arg(short, long, value_name = "CSV")]
        input: String,

        /// Optional JSON file with limits and thresholds
        #[arg(short, long)]
        config: Option<String>,

        /// How to print the report
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// CSV file to append the graded rows to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_roster.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_roster.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { addr, config } => {
            let config = load_config(config.as_deref())?;
            serve(&addr, config).await?;
        }
        Commands::Report {
            input,
            config,
            format,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let (names, grades) = load_roster_csv(&input)?;
            let outcome = handle_submission(&names, &grades, &config);

            match format {
                Format::Json => print_json(&outcome)?,
                Format::Text => print_text(&outcome),
            }

            match &outcome {
                Outcome::Error { messages } => {
                    bail!("roster {input} rejected with {} error(s)", messages.len())
                }
                Outcome::Report(report) => {
                    if let Some(path) = output {
                        append_roster(&path, report)?;
                        info!(path = %path, rows = report.rows.len(), "Rows appended");
                    }
                }
            }
        }
    }

    Ok(())
}

/// Defaults, then the optional JSON file, then `GRADE_*` variables.
#[tracing::instrument]
fn load_config(path: Option<&str>) -> Result<GradeConfig> {
    let config = match path {
        Some(path) => GradeConfig::load(path)?,
        None => GradeConfig::default(),
    }
    .with_env_overrides()?;

    config.validate()?;
    Ok(config)
}

fn print_text(outcome: &Outcome) {
    match outcome {
        Outcome::Error { messages } => {
            for message in messages {
                error!(message = %message, "Validation error");
            }
        }
        Outcome::Report(report) => {
            for row in &report.rows {
                info!(
                    name = %row.name,
                    grade = %row.grade_display,
                    letter = %row.letter,
                    status = row.status.text,
                    "Student"
                );
            }

            let stats = &report.statistics;
            let distribution = &stats.grade_distribution;
            info!(
                total = stats.total_students,
                average = %report.average_display,
                highest = %report.highest_display,
                lowest = %report.lowest_display,
                top = %report.top_names.join(", "),
                a = distribution.a,
                b = distribution.b,
                c = distribution.c,
                d = distribution.d,
                f = distribution.f,
                "Roster summary"
            );

            for warning in &report.warnings {
                warn!(warning = %warning, "Distribution notice");
            }
        }
    }
}
