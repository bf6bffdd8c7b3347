//! Sample logs used across harnesses.
//!
//! The on-disk samples live in `tests/assets/`. The in-memory corpora below
//! mirror the line shapes found there so tests can build small logs inline.

use std::path::{Path, PathBuf};

/// Ten matching unified-logging lines plus non-matching noise.
pub const SAMPLE_UNIFIED: &str = "sample_gc.log";

/// Three matching JDK 8 lines plus one `Full GC` line of a different shape.
pub const SAMPLE_JAVA8: &str = "sample_gc_java8.log";

pub fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("assets")
        .join(name)
}

/// Unified lines that match the grammar.
pub const CORPUS_UNIFIED: &[&str] = &[
    "[0.012s][info][gc] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 2.541ms",
    "[0.135s][info][gc] GC(1) Pause Young (Normal) (G1 Evacuation Pause) 30M->6M(256M) 3.102ms",
    "[0.301s][info][gc] GC(3) Pause Remark 20M->20M(256M) 1.204ms",
    "[1.500s][info][gc] GC(7) Pause Full (System.gc()) 160M->22M(256M) 45.120ms",
    "[1.902s][info][gc] GC(8) Pause Young (Normal) (G1 Evacuation Pause) 65536K->12288K(1G) 2.990ms",
];

/// JDK 8 lines that match the grammar.
pub const CORPUS_JAVA8: &[&str] = &[
    "2023-10-27T10:00:00.001+0900: 0.500: [GC (Allocation Failure) [PSYoungGen: 33280K->5118K(38400K)] 33280K->12450K(125952K), 0.0052340 secs] [Times: user=0.01 sys=0.00, real=0.01 secs]",
    "2023-10-27T10:00:00.801+0900: 1.300: [GC (Allocation Failure) [PSYoungGen: 38398K->5104K(71680K)] 45730K->28370K(159232K), 0.0081200 secs]",
    "jvm uptime: 2.000: [GC (Allocation Failure) [PSYoungGen: 71664K->5120K(71680K)] 94930K->61802K(159232K), 0.0123400 secs]",
];

/// Lines of either dialect that neither grammar accepts.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "[0.005s][info][gc] Using G1",
    "[0.288s][info][gc] GC(3) Concurrent Mark Cycle",
    "[0.012s][info][gc,heap] GC(0) Eden regions: 1->0(9)",
    "2023-10-27T10:00:02.501+0900: 3.000: [Full GC (Ergonomics) [PSYoungGen: 5120K->0K(71680K)] [ParOldGen: 56682K->40120K(87552K)] 61802K->40120K(159232K), [Metaspace: 3000K->3000K(1056768K)], 0.0450000 secs]",
    // Without a date stamp nothing precedes the uptime, so there is no colon to anchor on.
    "1.300: [GC (Allocation Failure) [PSYoungGen: 38398K->5104K(71680K)] 45730K->28370K(159232K), 0.0081200 secs]",
    "Heap",
    " PSYoungGen      total 71680K, used 20480K [0x00000000eab00000, 0x00000000f3200000, 0x0000000100000000)",
];

/// `count` synthetic unified lines, one collection every 100 ms.
pub fn corpus_unified_high_volume(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let before = 64 + (i % 128);
            format!(
                "[{}.{:03}s][info][gc] GC({i}) Pause Young (Normal) (G1 Evacuation Pause) {before}M->{}M(512M) {}.{:03}ms",
                i / 10,
                (i % 10) * 100,
                before / 4,
                1 + i % 9,
                i % 1000,
            )
        })
        .collect()
}

/// Write `lines` to a fresh file inside `dir` and return its path.
pub fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).expect("write test log");
    path
}
