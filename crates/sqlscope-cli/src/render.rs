//! Terminal rendering for analysis output

use comfy_table::Table;
use sqlscope_analyzer::AnalysisReport;
use sqlscope_core::IngestSession;
use std::collections::HashMap;

/// Prints the findings table, numbered remediations, and the summary line.
pub fn print_report(report: &AnalysisReport<'_>) {
    if report.entries.is_empty() {
        println!("{}", report.summary);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Seq", "Pattern", "Severity", "Queries", "Time (ms)", "Finding",
    ]);
    for entry in &report.entries {
        table.add_row(vec![
            entry.pattern.first_sequence().to_string(),
            entry.pattern.kind.as_str().to_string(),
            entry.recommendation.severity.as_str().to_string(),
            entry.pattern.evidence_len().to_string(),
            format!("{:.1}", entry.pattern.total_duration_ms()),
            entry.recommendation.message.clone(),
        ]);
    }
    println!("{table}");

    println!();
    for (i, entry) in report.entries.iter().enumerate() {
        println!("{}. {}", i + 1, entry.recommendation.remediation);
    }
    println!();
    println!("{}", report.summary);
}

/// Prints shape frequencies, most frequent first; ties keep first-seen order.
pub fn print_shapes(session: &IngestSession, limit: usize) {
    // shape text -> (count, total duration, first sequence number)
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<(&str, u64, f64, u64)> = Vec::new();
    for record in session.records() {
        let key = record.shape.as_str();
        match index.get(key) {
            Some(&i) => {
                stats[i].1 += 1;
                stats[i].2 += record.duration_ms;
            }
            None => {
                index.insert(key, stats.len());
                stats.push((key, 1, record.duration_ms, record.sequence_number));
            }
        }
    }
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.3.cmp(&b.3)));

    let mut table = Table::new();
    table.set_header(vec!["Count", "Total (ms)", "Shape"]);
    for (shape, count, total_ms, _) in stats.into_iter().take(limit) {
        table.add_row(vec![
            count.to_string(),
            format!("{total_ms:.1}"),
            shape.to_string(),
        ]);
    }
    println!("{table}");

    if session.skipped() > 0 {
        println!();
        println!("{} malformed entries skipped", session.skipped());
    }
}
