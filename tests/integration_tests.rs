use grade_roster::analyzers::aggregate::compute_statistics;
use grade_roster::analyzers::types::GradeDistribution;
use grade_roster::config::GradeConfig;
use grade_roster::error::ValidationError;
use grade_roster::handler::{Outcome, handle_submission};
use grade_roster::server::serve_on;
use grade_roster::validator::validate_roster;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[test]
fn test_full_pipeline() {
    let config = GradeConfig::default();
    let roster = validate_roster(&["alice", "bob"], &["90", "80"], &config).unwrap();
    let stats = compute_statistics(&roster, &config);

    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.average_grade, 85.0);
    assert_eq!(stats.highest_grade, 90.0);
    assert_eq!(stats.lowest_grade, 80.0);
    assert_eq!(stats.top_students.len(), 1);
    assert_eq!(stats.top_students[0].name(), "Alice");
    assert_eq!(
        stats.grade_distribution,
        GradeDistribution {
            a: 1,
            b: 1,
            c: 0,
            d: 0,
            f: 0
        }
    );
}

#[test]
fn test_revalidating_normalized_roster_is_stable() {
    let config = GradeConfig::default();
    let first = validate_roster(
        &["  mary-jane watson", "PETER parker", "o'hara"],
        &["88.456", "91", " 70.5 "],
        &config,
    );
    // 88.456 has three decimals
    assert!(first.is_err());

    let roster = validate_roster(
        &["  mary-jane watson", "PETER parker", "o'hara"],
        &["88.45", "91", " 70.5 "],
        &config,
    )
    .unwrap();

    let names: Vec<String> = roster.iter().map(|s| s.name().to_string()).collect();
    let grades: Vec<String> = roster.iter().map(|s| s.grade().to_string()).collect();
    let again = validate_roster(&names, &grades, &config).unwrap();

    assert_eq!(roster, again);
    assert_eq!(
        compute_statistics(&roster, &config),
        compute_statistics(&again, &config)
    );
}

#[test]
fn test_oversized_submission_rejected_up_front() {
    let names: Vec<String> = (0..51).map(|i| format!("Student {i}")).collect();
    let grades: Vec<String> = vec!["75".to_string(); 51];

    let outcome = handle_submission(&names, &grades, &GradeConfig::default());
    let Outcome::Error { messages } = outcome else {
        panic!("expected an error outcome");
    };
    assert_eq!(
        messages,
        vec![ValidationError::TooManyStudents { max: 50 }.to_string()]
    );
}

#[test]
fn test_configured_limits_apply() {
    let mut config = GradeConfig::default();
    config.max_students = 2;
    config.thresholds.a_min = 95.0;

    let outcome = handle_submission(&["Ann", "Ben", "Cy"], &["90", "91", "92"], &config);
    assert!(outcome.is_error());

    let Outcome::Report(report) = handle_submission(&["Ann", "Ben"], &["94", "96"], &config)
    else {
        panic!("expected a report");
    };
    assert_eq!(report.statistics.grade_distribution.a, 1);
    assert_eq!(report.statistics.grade_distribution.b, 1);
}

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, GradeConfig::default()));
    format!("http://{addr}")
}

#[tokio::test]
async fn test_http_form_roundtrip() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let form = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(form.status(), 200);
    assert!(form.text().await.unwrap().contains("names[]"));

    let response = client
        .post(format!("{base}/process"))
        .form(&[
            ("names[]", "ann lee"),
            ("grades[]", "93"),
            ("names[]", "bob"),
            ("grades[]", "67.5"),
            ("names[]", ""),
            ("grades[]", ""),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Ann Lee"));
    assert!(html.contains("67.5%"));
    assert!(html.contains("80.25%"));
    assert!(html.contains("Top Performer"));
}

#[tokio::test]
async fn test_http_form_errors() {
    let base = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/process"))
        .form(&[("names[]", "x"), ("grades[]", "abc")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let html = response.text().await.unwrap();
    assert!(html.contains("Student 1: Student name must be at least 2 characters long."));
    assert!(html.contains("Grade must be a number"));
}

#[tokio::test]
async fn test_http_missing_lists() {
    let base = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/process"))
        .form(&[("other", "1")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Please enter at least one student name and grade.")
    );
}

#[tokio::test]
async fn test_json_api() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/report"))
        .json(&json!({ "names": ["ann", "ben", "cy"], "grades": [90, "90", 45.25] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["outcome"], "report");
    assert_eq!(body["statistics"]["total_students"], 3);
    assert_eq!(body["statistics"]["average_grade"], 75.08);
    assert_eq!(body["statistics"]["top_students"].as_array().unwrap().len(), 2);
    assert_eq!(body["statistics"]["grade_distribution"]["F"], 1);

    let rejected = client
        .post(format!("{base}/api/report"))
        .json(&json!({ "names": [], "grades": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 422);
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(body["outcome"], "error");
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server().await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}
