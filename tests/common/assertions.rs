//! Domain-specific assertion macros for gcview harnesses.

/// Assert two floats are within `tol` of each other.
///
/// ```rust
/// assert_close!(event.pause, 5.234, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        let tol: f64 = $tol;
        if (actual - expected).abs() > tol {
            panic!(
                "assert_close! failed:\n  {}\n  expected: {}\n  actual:   {}\n  tolerance: {}",
                stringify!($actual),
                expected,
                actual,
                tol
            );
        }
    }};
}

/// Assert that every event's `is_full` flag agrees with its type label.
#[macro_export]
macro_rules! assert_full_flags_consistent {
    ($events:expr) => {{
        for (i, event) in $events.iter().enumerate() {
            let event: &gcview_core::GcEvent = event;
            if event.is_full != event.kind.contains("Full") {
                panic!(
                    "assert_full_flags_consistent! failed at index {}: kind={:?} is_full={}",
                    i, event.kind, event.is_full
                );
            }
        }
    }};
}

/// Assert that timestamps never decrease, i.e. events are in file order for a
/// log written by a single JVM.
pub fn assert_in_file_order(events: &[gcview_core::GcEvent]) {
    for pair in events.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "events out of order: {} then {}",
            pair[0].timestamp,
            pair[1].timestamp
        );
    }
}
