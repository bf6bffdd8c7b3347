//! gcview-core — GC log parsing for gcview.
//!
//! This crate turns Java garbage-collection logs into a flat, ordered list of
//! [`GcEvent`] records. The rendering side lives in `gcview-render`; nothing in
//! here knows about charts.
//!
//! # Pipeline
//!
//! ```text
//! log file ──► parser (LogFormat grammar) ──► normalizer (K/M/G → MB) ──► Vec<GcEvent>
//! ```
//!
//! Parsing is a single synchronous pass. Lines that do not match the selected
//! grammar are dropped without a trace.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod types;

pub use error::GcLogError;
pub use parser::{parse_file, parse_line, parse_reader, parse_str};
pub use types::{GcEvent, LogFormat};
