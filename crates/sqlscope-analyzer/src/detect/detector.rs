//! Query Pattern Detector
//!
//! Scans the records of an ingestion session once, in sequence order, and
//! flags anti-patterns. Detection is read-only: evidence is borrowed from
//! the session, so the output can never corrupt the ingested records.

use serde::{Deserialize, Serialize};
use sqlscope_core::{
    IngestSession, QueryRecord, StatementKind, StatementShape, has_limit_clause,
    has_where_clause, offset_literal,
};

/// Kind of detected anti-pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// One parent query followed by per-row child queries
    NPlusOne,
    /// Pagination with a large literal OFFSET
    OffsetPagination,
    /// Unfiltered SELECT returning many rows
    FullScan,
}

impl PatternKind {
    /// Returns the kind as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NPlusOne => "n_plus_one",
            Self::OffsetPagination => "offset_pagination",
            Self::FullScan => "full_scan",
        }
    }

    /// Returns a human-readable description of this pattern kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::NPlusOne => "N+1 query sequence (one parent, one query per row)",
            Self::OffsetPagination => "Offset-heavy pagination",
            Self::FullScan => "Unfiltered full scan",
        }
    }
}

/// A detected anti-pattern, with the records that evidence it.
///
/// Evidence entries are read-only borrows into the ingestion session, in
/// sequence order.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedPattern<'a> {
    /// Kind of pattern
    pub kind: PatternKind,
    /// Records evidencing the pattern, in sequence order
    pub evidence: Vec<&'a QueryRecord>,
    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,
}

impl<'a> DetectedPattern<'a> {
    fn new(kind: PatternKind, evidence: Vec<&'a QueryRecord>, confidence: f64) -> Self {
        Self {
            kind,
            evidence,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Number of records in the evidence
    pub fn evidence_len(&self) -> usize {
        self.evidence.len()
    }

    /// Sequence number of the first evidence record
    pub fn first_sequence(&self) -> u64 {
        self.evidence.first().map(|r| r.sequence_number).unwrap_or(0)
    }

    /// The shape the pattern fired on: for N+1 the repeated child shape,
    /// otherwise the shape of the flagged record.
    pub fn repeated_shape(&self) -> Option<&'a StatementShape> {
        self.evidence.last().map(|r| &r.shape)
    }

    /// For N+1 patterns, the parent query preceding the repeated run, when
    /// it was captured in the log.
    pub fn parent(&self) -> Option<&'a QueryRecord> {
        match (self.evidence.first(), self.evidence.last()) {
            (Some(first), Some(last)) if first.shape != last.shape => Some(first),
            _ => None,
        }
    }

    /// Number of repeated child queries (evidence minus the parent, if any)
    pub fn child_count(&self) -> usize {
        if self.parent().is_some() {
            self.evidence.len().saturating_sub(1)
        } else {
            self.evidence.len()
        }
    }

    /// Summed duration of the evidence records in milliseconds
    pub fn total_duration_ms(&self) -> f64 {
        self.evidence.iter().map(|r| r.duration_ms).sum()
    }

    /// Summed row count of the evidence records
    pub fn total_rows(&self) -> u64 {
        self.evidence.iter().map(|r| r.row_count).sum()
    }
}

/// Configuration for the pattern detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Literal OFFSET values above this are flagged as offset pagination
    pub offset_threshold: u64,
    /// Minimum consecutive same-shape repeats for an N+1 run (floor of 2)
    pub min_run_length: usize,
    /// Unfiltered SELECTs returning at least this many rows are full scans
    pub full_scan_row_threshold: u64,
    /// Whether the full-scan rule runs at all
    pub detect_full_scans: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            offset_threshold: 1000,
            min_run_length: 2,
            full_scan_row_threshold: 10_000,
            detect_full_scans: true,
        }
    }
}

impl DetectorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offset threshold
    pub fn with_offset_threshold(mut self, threshold: u64) -> Self {
        self.offset_threshold = threshold;
        self
    }

    /// Sets the minimum run length (values below 2 are raised to 2)
    pub fn with_min_run_length(mut self, length: usize) -> Self {
        self.min_run_length = length.max(2);
        self
    }

    /// Sets the full-scan row threshold
    pub fn with_full_scan_row_threshold(mut self, threshold: u64) -> Self {
        self.full_scan_row_threshold = threshold;
        self
    }

    /// Sets whether full scans are detected
    pub fn with_detect_full_scans(mut self, detect: bool) -> Self {
        self.detect_full_scans = detect;
        self
    }
}

/// Pattern detector that scans a session in sequence order
#[derive(Debug, Clone)]
pub struct PatternDetector {
    config: DetectorConfig,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector {
    /// Creates a detector with default config
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Creates a detector with custom config
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the detector config
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs all detection rules over the session.
    ///
    /// Rules are independent: one record may appear in several patterns of
    /// different kinds. The result is ordered by the sequence number of each
    /// pattern's first evidence record, matching input order.
    pub fn detect<'a>(&self, session: &'a IngestSession) -> Vec<DetectedPattern<'a>> {
        let records = session.records();
        let mut patterns = Vec::new();

        for record in records {
            self.check_offset_pagination(record, &mut patterns);
            self.check_full_scan(record, &mut patterns);
        }
        self.check_n_plus_one_runs(records, &mut patterns);

        // sort_by_key is stable, so same-record findings keep rule order.
        patterns.sort_by_key(|p| p.first_sequence());

        tracing::debug!(
            session_id = %session.id(),
            records = records.len(),
            patterns = patterns.len(),
            "detection pass complete"
        );
        patterns
    }

    fn check_offset_pagination<'a>(
        &self,
        record: &'a QueryRecord,
        patterns: &mut Vec<DetectedPattern<'a>>,
    ) {
        let Some(offset) = offset_literal(&record.raw_statement) else {
            return;
        };
        if offset > self.config.offset_threshold {
            let confidence = if offset >= self.config.offset_threshold.saturating_mul(10) {
                0.95
            } else {
                0.75
            };
            patterns.push(DetectedPattern::new(
                PatternKind::OffsetPagination,
                vec![record],
                confidence,
            ));
        }
    }

    fn check_full_scan<'a>(
        &self,
        record: &'a QueryRecord,
        patterns: &mut Vec<DetectedPattern<'a>>,
    ) {
        if !self.config.detect_full_scans {
            return;
        }
        // Probe the shape, not the raw text: literals are already stripped,
        // so a quoted 'where' cannot fake a predicate.
        let is_full_scan = record.kind == StatementKind::Select
            && record.row_count >= self.config.full_scan_row_threshold
            && !has_where_clause(record.shape.as_str())
            && !has_limit_clause(record.shape.as_str());
        if is_full_scan {
            patterns.push(DetectedPattern::new(PatternKind::FullScan, vec![record], 0.7));
        }
    }

    /// Flags each maximal run of >= `min_run_length` consecutive same-shape
    /// records. The record just before a run (always a different shape,
    /// since runs are maximal) is included as the parent query.
    fn check_n_plus_one_runs<'a>(
        &self,
        records: &'a [QueryRecord],
        patterns: &mut Vec<DetectedPattern<'a>>,
    ) {
        let min_run = self.config.min_run_length.max(2);
        let mut start = 0;
        for end in 1..=records.len() {
            let run_over = end == records.len() || records[end].shape != records[start].shape;
            if !run_over {
                continue;
            }
            let run_len = end - start;
            if run_len >= min_run {
                let parent = start.checked_sub(1).map(|p| &records[p]);
                let mut evidence = Vec::with_capacity(run_len + 1);
                if let Some(parent) = parent {
                    evidence.push(parent);
                }
                evidence.extend(records[start..end].iter());
                patterns.push(DetectedPattern::new(
                    PatternKind::NPlusOne,
                    evidence,
                    n_plus_one_confidence(run_len, parent.is_some()),
                ));
            }
            start = end;
        }
    }
}

/// Confidence grows with run length, drops when the parent query was not
/// captured, and stays below 1.0.
fn n_plus_one_confidence(run_len: usize, has_parent: bool) -> f64 {
    let base = 0.5 + 0.05 * run_len as f64;
    let base = if has_parent { base } else { base - 0.2 };
    base.clamp(0.1, 0.95)
}
