//! sqlscope Core - Shared types for query-log analysis
//!
//! This crate provides the building blocks used across sqlscope:
//! - Query records carrying a normalized statement shape
//! - Statement normalization (literal stripping, shape fingerprints)
//! - Ingestion sessions that own the records of one pass over a log
//! - The common error type

pub mod error;
pub mod normalize;
pub mod record;
pub mod session;

pub use error::*;
pub use normalize::*;
pub use record::*;
pub use session::*;
