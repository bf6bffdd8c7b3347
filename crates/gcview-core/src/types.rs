//! Core types for gcview-core.
//!
//! [`GcEvent`] is the one record type produced by the parser and consumed by
//! the renderer. [`LogFormat`] selects which line grammar the parser applies.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::UnknownFormat;

/// One garbage collection, as read from a single matching log line.
///
/// Sizes are in megabytes and `pause` is in milliseconds regardless of how the
/// log printed them. `before <= total` and `after <= total` are expected but
/// not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GcEvent {
    /// Seconds since JVM start.
    pub timestamp: f64,
    /// Collection type/cause label, verbatim from the log line.
    #[serde(rename = "type")]
    pub kind: String,
    /// `true` when `kind` contains `"Full"`.
    pub is_full: bool,
    /// Heap occupancy before the collection (MB).
    pub before: f64,
    /// Heap occupancy after the collection (MB).
    pub after: f64,
    /// Heap capacity at the time of the collection (MB).
    pub total: f64,
    /// Pause duration (ms).
    pub pause: f64,
    /// Date stamp decorating the line, when the JVM was asked to print one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_clock: Option<DateTime<FixedOffset>>,
}

impl GcEvent {
    /// Build a record, deriving `is_full` from the type label.
    pub fn new(
        timestamp: f64,
        kind: impl Into<String>,
        before: f64,
        after: f64,
        total: f64,
        pause: f64,
    ) -> Self {
        let kind = kind.into();
        Self {
            timestamp,
            is_full: kind.contains("Full"),
            kind,
            before,
            after,
            total,
            pause,
            wall_clock: None,
        }
    }

    pub fn with_wall_clock(mut self, wall_clock: Option<DateTime<FixedOffset>>) -> Self {
        self.wall_clock = wall_clock;
        self
    }
}

/// GC log dialect. Chosen once per parse; lines are never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// JDK 9+ unified logging (`-Xlog:gc`).
    #[default]
    #[value(name = "unified")]
    Unified,
    /// JDK 8 `-XX:+PrintGCDetails` output.
    #[value(name = "java8")]
    Java8,
}

impl LogFormat {
    pub const ALL: [LogFormat; 2] = [LogFormat::Unified, LogFormat::Java8];

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Unified => "unified",
            LogFormat::Java8 => "java8",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
