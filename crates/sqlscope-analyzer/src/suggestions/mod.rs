//! Recommendation Module
//!
//! This module maps detected patterns to remediation advice and assembles
//! the combined analysis report. The mapping is pure formatting: the same
//! pattern kind and evidence always produce the same text.

mod advisor;
mod report;

pub use advisor::*;
pub use report::*;
