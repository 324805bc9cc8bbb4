//! sqlscope Ingest - Query log ingestion
//!
//! This crate turns raw query-log input into an [`IngestSession`]:
//! - [`RawLogEntry`] is the wire model (every field optional)
//! - [`JsonlReader`] decodes newline-delimited JSON logs lazily
//! - [`Ingestor`] validates entries, skipping and counting malformed ones
//!
//! [`IngestSession`]: sqlscope_core::IngestSession

pub mod entry;
pub mod ingestor;
pub mod reader;

pub use entry::*;
pub use ingestor::*;
pub use reader::*;
