//! Tests for the ingestor

use super::*;
use chrono::Utc;
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn entry(statement: &str) -> RawLogEntry {
    RawLogEntry::new(Utc::now(), statement, 1, 0.5)
}

#[test]
fn test_valid_entries_preserve_order() {
    let session = Ingestor::new().ingest(vec![
        entry("SELECT * FROM orders"),
        entry("SELECT * FROM items WHERE order_id = 1"),
        entry("SELECT * FROM items WHERE order_id = 2"),
    ]);
    assert_eq!(session.len(), 3);
    assert_eq!(session.skipped(), 0);
    let sequences: Vec<u64> = session.records().iter().map(|r| r.sequence_number).collect();
    assert_eq!(sequences, vec![0, 1, 2]);
}

#[test]
fn test_malformed_entries_are_skipped_and_counted() {
    let session = Ingestor::new().ingest(vec![
        entry("SELECT 1"),
        RawLogEntry::default(),
        entry("SELECT 2"),
        RawLogEntry {
            statement: Some("SELECT 3".to_string()),
            ..Default::default()
        },
    ]);
    assert_eq!(session.len(), 2);
    assert_eq!(session.skipped(), 2);
    // Valid records keep dense sequence numbers despite the skips.
    assert_eq!(session.records()[1].sequence_number, 1);
}

#[test]
fn test_empty_input_yields_empty_session() {
    let session = Ingestor::new().ingest(Vec::new());
    assert!(session.is_empty());
    assert_eq!(session.skipped(), 0);
}

#[test]
fn test_ingest_reader_counts_undecodable_lines() {
    let input = concat!(
        r#"{"timestamp":"2026-08-29T10:00:00Z","statement":"SELECT 1","row_count":1,"duration_ms":0.5}"#,
        "\n",
        "garbage line\n",
        r#"{"timestamp":"2026-08-29T10:00:01Z","statement":"SELECT 2","row_count":1,"duration_ms":0.4}"#,
        "\n",
    );
    let session = Ingestor::new().ingest_reader(Cursor::new(input)).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.skipped(), 1);
}

#[test]
fn test_ingest_reader_skips_entries_with_missing_metadata() {
    let input = concat!(
        r#"{"statement":"SELECT 1"}"#,
        "\n",
        r#"{"timestamp":"2026-08-29T10:00:01Z","statement":"SELECT 2","row_count":1,"duration_ms":0.4}"#,
        "\n",
    );
    let session = Ingestor::new().ingest_reader(Cursor::new(input)).unwrap();
    assert_eq!(session.len(), 1);
    assert_eq!(session.skipped(), 1);
    assert_eq!(session.records()[0].raw_statement, "SELECT 2");
}
