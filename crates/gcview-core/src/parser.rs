//! Parser — extracts [`GcEvent`] records from GC log text.
//!
//! Each [`LogFormat`] owns one compiled grammar and one pause-unit rule. The
//! grammar is picked once per parse; every line is searched with it and lines
//! that do not match are skipped. The grammars are deliberately narrow: a
//! well-formed line of a different shape (for example a JDK 8 `Full GC` line
//! carrying per-generation and Metaspace sections) does not match.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::GcLogError;
use crate::normalizer::to_megabytes;
use crate::types::{GcEvent, LogFormat};

lazy_static! {
    // [0.012s][info][gc] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 2.541ms
    static ref UNIFIED_RE: Regex = Regex::new(
        r"\[(?P<timestamp>\d+\.\d+)s\].*GC\(\d+\) (?P<type>.*?) (?P<before>\d+)(?P<unit_before>[KMG])->(?P<after>\d+)(?P<unit_after>[KMG])\((?P<total>\d+)(?P<unit_total>[KMG])\) (?P<pause>\d+\.\d+)ms"
    ).unwrap();

    // 2023-10-27T10:00:00.001+0900: 0.500: [GC (Allocation Failure) [PSYoungGen: 33280K->5118K(38400K)] 33280K->12450K(125952K), 0.0052340 secs]
    static ref JAVA8_RE: Regex = Regex::new(
        r":\s+(?P<timestamp>\d+\.\d+):\s+\[(?P<type>.*?) .*? (?P<before>\d+)(?P<unit_before>[KMG])->(?P<after>\d+)(?P<unit_after>[KMG])\((?P<total>\d+)(?P<unit_total>[KMG])\), (?P<pause>\d+\.\d+) secs\]"
    ).unwrap();

    // Optional `-Xlog:gc::time` / `-XX:+PrintGCDateStamps` decoration at line start.
    static ref WALL_CLOCK_RE: Regex = Regex::new(
        r"^\[?(?P<stamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4})"
    ).unwrap();
}

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

impl LogFormat {
    fn pattern(self) -> &'static Regex {
        match self {
            LogFormat::Unified => &*UNIFIED_RE,
            LogFormat::Java8 => &*JAVA8_RE,
        }
    }

    /// Unified logs print milliseconds, JDK 8 logs print seconds.
    fn pause_to_ms(self, pause: f64) -> f64 {
        match self {
            LogFormat::Unified => pause,
            LogFormat::Java8 => pause * 1000.0,
        }
    }
}

/// Parse a single line. Returns `None` when the line does not match `format`.
pub fn parse_line(line: &str, format: LogFormat) -> Option<GcEvent> {
    let caps = format.pattern().captures(line)?;

    let timestamp = number(&caps, "timestamp")?;
    let kind = caps.name("type")?.as_str();
    let before = size(&caps, "before", "unit_before")?;
    let after = size(&caps, "after", "unit_after")?;
    let total = size(&caps, "total", "unit_total")?;
    let pause = format.pause_to_ms(number(&caps, "pause")?);

    Some(
        GcEvent::new(timestamp, kind, before, after, total, pause)
            .with_wall_clock(wall_clock(line)),
    )
}

/// Parse every line of `text`, keeping file order.
pub fn parse_str(text: &str, format: LogFormat) -> Vec<GcEvent> {
    text.lines()
        .filter_map(|line| parse_line(line, format))
        .collect()
}

/// Parse every line readable from `reader`. Invalid UTF-8 is replaced lossily
/// line by line rather than failing the whole read.
pub fn parse_reader<R: BufRead>(mut reader: R, format: LogFormat) -> std::io::Result<Vec<GcEvent>> {
    let mut events = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(event) = parse_line(line.trim_end_matches(['\n', '\r']), format) {
            events.push(event);
        }
    }

    Ok(events)
}

/// Open `path` and parse it with `format`.
///
/// An unopenable file is fatal. A file with no matching lines is not: it
/// yields an empty vector and the caller decides what that means.
pub fn parse_file(path: impl AsRef<Path>, format: LogFormat) -> Result<Vec<GcEvent>, GcLogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GcLogError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let events = parse_reader(BufReader::new(file), format).map_err(|source| GcLogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        %format,
        events = events.len(),
        "parsed GC log"
    );
    Ok(events)
}

// ---------------------------------------------------------------------------
// Capture helpers
// ---------------------------------------------------------------------------

fn number(caps: &Captures<'_>, name: &str) -> Option<f64> {
    caps.name(name)?.as_str().parse().ok()
}

fn size(caps: &Captures<'_>, value: &str, unit: &str) -> Option<f64> {
    Some(to_megabytes(number(caps, value)?, caps.name(unit)?.as_str()))
}

fn wall_clock(line: &str) -> Option<DateTime<FixedOffset>> {
    let stamp = WALL_CLOCK_RE.captures(line)?.name("stamp")?.as_str();
    DateTime::parse_from_str(stamp, WALL_CLOCK_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    const UNIFIED_YOUNG: &str =
        "[0.012s][info][gc] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 2.541ms";
    const UNIFIED_FULL: &str =
        "[5.120s][info][gc] GC(9) Pause Full (System.gc()) 180M->60M(512M) 45.120ms";
    const JAVA8_MINOR: &str = "2023-10-27T10:00:00.001+0900: 0.500: [GC (Allocation Failure) [PSYoungGen: 33280K->5118K(38400K)] 33280K->12450K(125952K), 0.0052340 secs] [Times: user=0.01 sys=0.00, real=0.01 secs]";
    const JAVA8_FULL: &str = "2023-10-27T10:00:03.000+0900: 3.000: [Full GC (Ergonomics) [PSYoungGen: 5120K->0K(38400K)] [ParOldGen: 80000K->40000K(87552K)] 85120K->40000K(125952K), [Metaspace: 3000K->3000K(1056768K)], 0.0450000 secs] [Times: user=0.10 sys=0.00, real=0.05 secs]";

    #[test]
    fn unified_line_extracts_all_fields() {
        let event = parse_line(UNIFIED_YOUNG, LogFormat::Unified).expect("line should match");
        assert_eq!(event.timestamp, 0.012);
        assert_eq!(event.kind, "Pause Young (Normal) (G1 Evacuation Pause)");
        assert!(!event.is_full);
        assert_eq!(event.before, 24.0);
        assert_eq!(event.after, 4.0);
        assert_eq!(event.total, 256.0);
        assert_eq!(event.pause, 2.541);
        assert_eq!(event.wall_clock, None);
    }

    #[test]
    fn unified_full_collection_is_flagged() {
        let event = parse_line(UNIFIED_FULL, LogFormat::Unified).expect("line should match");
        assert_eq!(event.kind, "Pause Full (System.gc())");
        assert!(event.is_full);
    }

    #[test]
    fn unified_sizes_are_normalised_per_unit() {
        let line = "[1.000s][info][gc] GC(3) Pause Young (Normal) (G1 Evacuation Pause) 2048K->1G(2G) 1.000ms";
        let event = parse_line(line, LogFormat::Unified).expect("line should match");
        assert_eq!(event.before, 2.0);
        assert_eq!(event.after, 1024.0);
        assert_eq!(event.total, 2048.0);
    }

    #[test]
    fn java8_line_extracts_heap_totals_and_converts_pause() {
        let event = parse_line(JAVA8_MINOR, LogFormat::Java8).expect("line should match");
        assert_eq!(event.timestamp, 0.5);
        // The type capture stops at the first space after the bracket.
        assert_eq!(event.kind, "GC");
        assert!(!event.is_full);
        assert_eq!(event.before, 33280.0 / 1024.0);
        assert_eq!(event.after, 12450.0 / 1024.0);
        assert_eq!(event.total, 125952.0 / 1024.0);
        assert!((event.pause - 5.234).abs() < 1e-3, "pause = {}", event.pause);
    }

    #[test]
    fn java8_date_stamp_becomes_wall_clock() {
        let event = parse_line(JAVA8_MINOR, LogFormat::Java8).expect("line should match");
        let expected = DateTime::parse_from_rfc3339("2023-10-27T10:00:00.001+09:00").unwrap();
        assert_eq!(event.wall_clock, Some(expected));
    }

    #[test]
    fn bracketed_unified_date_stamp_becomes_wall_clock() {
        let line = format!("[2024-03-01T12:30:45.250+0000]{UNIFIED_YOUNG}");
        let event = parse_line(&line, LogFormat::Unified).expect("line should match");
        let expected = DateTime::parse_from_rfc3339("2024-03-01T12:30:45.250+00:00").unwrap();
        assert_eq!(event.wall_clock, Some(expected));
        assert_eq!(event.timestamp, 0.012);
    }

    #[test]
    fn java8_full_gc_with_metaspace_section_is_not_matched() {
        assert_eq!(parse_line(JAVA8_FULL, LogFormat::Java8), None);
    }

    #[rstest]
    #[case::unified_line_as_java8(UNIFIED_YOUNG, LogFormat::Java8)]
    #[case::java8_line_as_unified(JAVA8_MINOR, LogFormat::Unified)]
    #[case::safepoint_line("[0.100s][info][safepoint] Safepoint \"G1CollectForAllocation\"", LogFormat::Unified)]
    #[case::heap_region_line("[0.012s][info][gc,heap] GC(0) Eden regions: 1->0(9)", LogFormat::Unified)]
    #[case::empty("", LogFormat::Unified)]
    #[case::empty_java8("", LogFormat::Java8)]
    fn non_matching_lines_yield_nothing(#[case] line: &str, #[case] format: LogFormat) {
        assert_eq!(parse_line(line, format), None);
    }

    #[test]
    fn parse_str_keeps_file_order_and_skips_noise() {
        let text = [
            "[0.001s][info][gc] Using G1",
            UNIFIED_YOUNG,
            "garbage",
            UNIFIED_FULL,
        ]
        .join("\n");
        let events = parse_str(&text, LogFormat::Unified);
        let timestamps: Vec<f64> = events.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![0.012, 5.12]);
    }

    #[test]
    fn parse_reader_handles_crlf_and_invalid_utf8() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(UNIFIED_YOUNG.as_bytes());
        bytes.extend_from_slice(b"\r\n\xff\xfe not utf8\n");
        bytes.extend_from_slice(UNIFIED_FULL.as_bytes());
        let events = parse_reader(std::io::Cursor::new(bytes), LogFormat::Unified).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].pause, 45.12);
    }

    #[test]
    fn parse_file_reports_missing_file_as_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.log");
        let err = parse_file(&missing, LogFormat::Unified).unwrap_err();
        assert!(matches!(err, GcLogError::Open { .. }), "got {err:?}");
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn parse_file_with_no_matches_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "nothing to see here\n").unwrap();
        assert_eq!(parse_file(&path, LogFormat::Java8).unwrap(), vec![]);
    }

    proptest! {
        #[test]
        fn arbitrary_lines_never_panic(line in "\\PC{0,200}") {
            let _ = parse_line(&line, LogFormat::Unified);
            let _ = parse_line(&line, LogFormat::Java8);
        }

        #[test]
        fn unified_pause_is_taken_verbatim(ms in 0u32..100_000, frac in 0u32..1000) {
            let line = format!(
                "[1.000s][info][gc] GC(1) Pause Young (Normal) (G1 Evacuation Pause) 10M->5M(100M) {ms}.{frac:03}ms"
            );
            let event = parse_line(&line, LogFormat::Unified).unwrap();
            let expected: f64 = format!("{ms}.{frac:03}").parse().unwrap();
            prop_assert_eq!(event.pause, expected);
        }
    }
}
