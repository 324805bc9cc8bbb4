//! sqlscope Analyzer - Pattern detection and remediation advice
//!
//! This crate provides functionality for:
//! - Detecting N+1 sequences, offset-heavy pagination, and full scans in an
//!   ingested query log
//! - Mapping detected patterns to remediation recommendations
//! - Building a combined analysis report with a performance score

pub mod detect;
pub mod suggestions;

pub use detect::*;
pub use suggestions::*;
