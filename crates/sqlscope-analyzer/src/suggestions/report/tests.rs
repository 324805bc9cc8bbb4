//! Tests for analysis reports

use super::*;
use chrono::Utc;
use pretty_assertions::assert_eq;

fn session_from(statements: &[(&str, u64)]) -> IngestSession {
    let mut session = IngestSession::new();
    for (sql, rows) in statements {
        session.push(*sql, *rows, 1.0, Utc::now());
    }
    session
}

#[test]
fn test_clean_log_scores_full_marks() {
    let session = session_from(&[
        ("SELECT * FROM orders WHERE customer_id = 7", 3),
        ("SELECT * FROM customers WHERE id = 7", 1),
    ]);
    let report = Analyzer::new().analyze(&session);

    assert_eq!(report.entry_count(), 0);
    assert_eq!(report.performance_score, 100);
    assert!(!report.has_critical_issues());
    assert!(report.summary.contains("No query anti-patterns"));
}

#[test]
fn test_warning_findings_reduce_score() {
    let session = session_from(&[
        ("SELECT * FROM orders", 2),
        ("SELECT * FROM items WHERE order_id = 1", 1),
        ("SELECT * FROM items WHERE order_id = 2", 1),
    ]);
    let report = Analyzer::new().analyze(&session);

    assert_eq!(report.entry_count(), 1);
    assert_eq!(report.performance_score, 90); // one warning, -10
    assert!(!report.has_critical_issues());
    assert!(report.summary.contains("1 warning(s)"));
}

#[test]
fn test_critical_findings_are_reported() {
    let mut statements = vec![("SELECT * FROM orders".to_string(), 2u64)];
    for i in 0..15 {
        statements.push((format!("SELECT * FROM items WHERE order_id = {i}"), 1));
    }
    let mut session = IngestSession::new();
    for (sql, rows) in &statements {
        session.push(sql.clone(), *rows, 1.0, Utc::now());
    }
    let report = Analyzer::new().analyze(&session);

    assert!(report.has_critical_issues());
    assert_eq!(report.performance_score, 75); // one critical, -25
    assert!(report.summary.contains("1 critical"));
}

#[test]
fn test_entries_match_input_order() {
    let session = session_from(&[
        ("SELECT * FROM audit_log", 50_000),
        ("SELECT * FROM products LIMIT 20 OFFSET 9000", 20),
    ]);
    let report = Analyzer::new().analyze(&session);

    let firsts: Vec<u64> = report
        .entries
        .iter()
        .map(|e| e.pattern.first_sequence())
        .collect();
    assert_eq!(firsts, vec![0, 1]);
}

#[test]
fn test_skipped_records_surface_in_report() {
    let mut session = session_from(&[("SELECT 1", 1)]);
    session.record_skipped();
    session.record_skipped();
    let report = Analyzer::new().analyze(&session);

    assert_eq!(report.records_skipped, 2);
    assert_eq!(report.records_analyzed, 1);
    assert!(report.summary.contains("2 malformed entries skipped"));
}

#[test]
fn test_custom_config_flows_through() {
    let config = DetectorConfig::new().with_offset_threshold(100);
    let analyzer = Analyzer::with_config(config);
    assert_eq!(analyzer.config().offset_threshold, 100);

    let session = session_from(&[("SELECT * FROM p LIMIT 20 OFFSET 150", 20)]);
    let report = analyzer.analyze(&session);
    assert_eq!(report.entry_count(), 1);
}

#[test]
fn test_report_serializes_to_json() {
    let session = session_from(&[
        ("SELECT * FROM orders", 2),
        ("SELECT * FROM items WHERE order_id = 1", 1),
        ("SELECT * FROM items WHERE order_id = 2", 1),
    ]);
    let report = Analyzer::new().analyze(&session);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["records_analyzed"], 3);
    assert_eq!(json["entries"][0]["pattern"]["kind"], "n_plus_one");
    assert!(json["entries"][0]["recommendation"]["remediation"]
        .as_str()
        .unwrap()
        .contains("JOIN"));
}
