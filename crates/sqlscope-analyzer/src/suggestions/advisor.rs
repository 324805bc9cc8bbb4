//! Recommendation Engine - remediation advice for detected patterns

use crate::detect::{DetectedPattern, PatternKind};
use serde::{Deserialize, Serialize};
use sqlscope_core::offset_literal;

/// Severity level for recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    /// Critical issue that should be addressed immediately
    Critical,
    /// Warning that may impact performance
    Warning,
    /// Informational suggestion for optimization
    Info,
}

impl SeverityLevel {
    /// Returns true if this is a critical issue
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }

    /// Returns true if this is at least a warning
    pub fn is_warning_or_above(&self) -> bool {
        matches!(self, Self::Critical | Self::Warning)
    }

    /// Returns the severity level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Remediation advice for one detected pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Kind of pattern this advice addresses
    pub kind: PatternKind,
    /// Severity level
    pub severity: SeverityLevel,
    /// Human-readable message explaining the issue
    pub message: String,
    /// Suggested remediation
    pub remediation: String,
    /// Estimated impact on performance (0.0 - 1.0, higher = more impact)
    pub estimated_impact: f64,
}

impl Recommendation {
    fn new(
        kind: PatternKind,
        severity: SeverityLevel,
        message: impl Into<String>,
        remediation: impl Into<String>,
        estimated_impact: f64,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            remediation: remediation.into(),
            estimated_impact: estimated_impact.clamp(0.0, 1.0),
        }
    }
}

/// N+1 runs at least this long are critical rather than a warning.
const CRITICAL_RUN_LENGTH: usize = 10;

/// Pure mapping from detected patterns to remediation advice.
///
/// Deterministic: the same pattern kind and evidence always produce the
/// same text. No side effects beyond formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advisor;

impl Advisor {
    /// Creates a new advisor
    pub fn new() -> Self {
        Self
    }

    /// Maps a detected pattern to remediation advice.
    pub fn recommend(&self, pattern: &DetectedPattern<'_>) -> Recommendation {
        match pattern.kind {
            PatternKind::NPlusOne => self.recommend_n_plus_one(pattern),
            PatternKind::OffsetPagination => self.recommend_offset_pagination(pattern),
            PatternKind::FullScan => self.recommend_full_scan(pattern),
        }
    }

    fn recommend_n_plus_one(&self, pattern: &DetectedPattern<'_>) -> Recommendation {
        let children = pattern.child_count();
        let shape = pattern
            .repeated_shape()
            .map(|s| s.as_str())
            .unwrap_or("<unknown>");
        let message = match pattern.parent() {
            Some(parent) => format!(
                "Shape '{}' executed {} times in a row after parent query #{}, taking {:.1}ms total",
                shape,
                children,
                parent.sequence_number,
                pattern.total_duration_ms()
            ),
            None => format!(
                "Shape '{}' executed {} times in a row, taking {:.1}ms total",
                shape,
                children,
                pattern.total_duration_ms()
            ),
        };
        let remediation = format!(
            "Fetch the child rows in the parent query with a JOIN (JOIN FETCH in ORM terms), \
             or batch-load them with a single IN (...) query instead of {} per-row lookups",
            children
        );
        let severity = if children >= CRITICAL_RUN_LENGTH {
            SeverityLevel::Critical
        } else {
            SeverityLevel::Warning
        };
        let impact = children as f64 / (2.0 * CRITICAL_RUN_LENGTH as f64);
        Recommendation::new(PatternKind::NPlusOne, severity, message, remediation, impact)
    }

    fn recommend_offset_pagination(&self, pattern: &DetectedPattern<'_>) -> Recommendation {
        let offset = pattern
            .evidence
            .first()
            .and_then(|r| offset_literal(&r.raw_statement))
            .unwrap_or(0);
        let message = format!(
            "Pagination with literal OFFSET {} scans and discards {} rows before returning the page",
            offset, offset
        );
        let remediation = "Switch to keyset pagination: remember the last-seen key and page with \
                           WHERE key > ? ORDER BY key LIMIT n, backed by an index on the key"
            .to_string();
        Recommendation::new(
            PatternKind::OffsetPagination,
            SeverityLevel::Warning,
            message,
            remediation,
            0.6,
        )
    }

    fn recommend_full_scan(&self, pattern: &DetectedPattern<'_>) -> Recommendation {
        let message = format!(
            "Unfiltered SELECT returned {} rows with no WHERE or LIMIT",
            pattern.total_rows()
        );
        let remediation = "Restrict the result set with a predicate and index the filtered \
                           columns; add a LIMIT if only a page of rows is needed"
            .to_string();
        Recommendation::new(
            PatternKind::FullScan,
            SeverityLevel::Warning,
            message,
            remediation,
            0.5,
        )
    }
}
