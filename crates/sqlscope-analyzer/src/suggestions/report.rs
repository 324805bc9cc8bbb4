//! Analysis reports - detection and advice combined

use crate::detect::{DetectedPattern, DetectorConfig, PatternDetector};
use crate::suggestions::{Advisor, Recommendation, SeverityLevel};
use serde::Serialize;
use sqlscope_core::IngestSession;
use uuid::Uuid;

/// One finding: a detected pattern paired with its recommendation
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry<'a> {
    /// The detected pattern
    pub pattern: DetectedPattern<'a>,
    /// The remediation advice for it
    pub recommendation: Recommendation,
}

/// Result of analyzing one ingestion session.
///
/// Entries are ordered by the first evidence record of each pattern,
/// matching input sequence order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    /// Session the report was built from
    pub session_id: Uuid,
    /// Findings in input order
    pub entries: Vec<ReportEntry<'a>>,
    /// Number of records analyzed
    pub records_analyzed: usize,
    /// Number of malformed entries skipped during ingestion
    pub records_skipped: u64,
    /// Overall performance score (0-100, higher = better)
    pub performance_score: u8,
    /// Summary of the analysis
    pub summary: String,
}

impl<'a> AnalysisReport<'a> {
    fn new(session: &'a IngestSession) -> Self {
        Self {
            session_id: session.id(),
            entries: Vec::new(),
            records_analyzed: session.len(),
            records_skipped: session.skipped(),
            performance_score: 100,
            summary: String::new(),
        }
    }

    fn add_entry(&mut self, entry: ReportEntry<'a>) {
        let penalty = match entry.recommendation.severity {
            SeverityLevel::Critical => 25,
            SeverityLevel::Warning => 10,
            SeverityLevel::Info => 3,
        };
        self.performance_score = self.performance_score.saturating_sub(penalty);
        self.entries.push(entry);
    }

    /// Returns true if any finding is critical
    pub fn has_critical_issues(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.recommendation.severity.is_critical())
    }

    /// Number of findings
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn count_severity(&self, severity: SeverityLevel) -> usize {
        self.entries
            .iter()
            .filter(|e| e.recommendation.severity == severity)
            .count()
    }

    fn build_summary(&self) -> String {
        let skipped_note = if self.records_skipped > 0 {
            format!(" ({} malformed entries skipped)", self.records_skipped)
        } else {
            String::new()
        };

        if self.entries.is_empty() {
            return format!(
                "No query anti-patterns detected in {} records{}.",
                self.records_analyzed, skipped_note
            );
        }

        let critical = self.count_severity(SeverityLevel::Critical);
        let warnings = self.count_severity(SeverityLevel::Warning);
        let info = self.count_severity(SeverityLevel::Info);
        format!(
            "Found {} issue(s) in {} records{}: {} critical, {} warning(s), {} informational. \
             Performance score: {}/100",
            self.entries.len(),
            self.records_analyzed,
            skipped_note,
            critical,
            warnings,
            info,
            self.performance_score
        )
    }
}

/// Facade combining the pattern detector and the advisor
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    detector: PatternDetector,
    advisor: Advisor,
}

impl Analyzer {
    /// Creates an analyzer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with custom detector config
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            detector: PatternDetector::with_config(config),
            advisor: Advisor::new(),
        }
    }

    /// Returns the detector config
    pub fn config(&self) -> &DetectorConfig {
        self.detector.config()
    }

    /// Detects patterns in the session and pairs each with advice.
    pub fn analyze<'a>(&self, session: &'a IngestSession) -> AnalysisReport<'a> {
        let mut report = AnalysisReport::new(session);
        for pattern in self.detector.detect(session) {
            let recommendation = self.advisor.recommend(&pattern);
            report.add_entry(ReportEntry {
                pattern,
                recommendation,
            });
        }
        report.summary = report.build_summary();
        tracing::info!(
            session_id = %report.session_id,
            findings = report.entry_count(),
            score = report.performance_score,
            "analysis complete"
        );
        report
    }
}

#[cfg(test)]
mod tests;
