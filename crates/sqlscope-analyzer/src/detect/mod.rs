//! Query Pattern Detection Module
//!
//! This module scans the records of an ingestion session in sequence order
//! (single pass) and flags query anti-patterns: N+1 sequences, offset-heavy
//! pagination, and full scans.

mod detector;

pub use detector::*;
