//! Test builders — ergonomic constructors for `GcEvent` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use gcview_core::GcEvent;

/// Fluent builder for [`GcEvent`] test fixtures.
///
/// ```rust
/// let event = GcEventBuilder::new(1.5)
///     .kind("Pause Full (System.gc())")
///     .heap(160.0, 22.0, 256.0)
///     .pause(45.12)
///     .build();
/// ```
pub struct GcEventBuilder {
    timestamp: f64,
    kind: String,
    before: f64,
    after: f64,
    total: f64,
    pause: f64,
}

impl GcEventBuilder {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            kind: "Pause Young (Normal) (G1 Evacuation Pause)".to_string(),
            before: 24.0,
            after: 4.0,
            total: 256.0,
            pause: 2.0,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn heap(mut self, before: f64, after: f64, total: f64) -> Self {
        self.before = before;
        self.after = after;
        self.total = total;
        self
    }

    pub fn pause(mut self, pause: f64) -> Self {
        self.pause = pause;
        self
    }

    pub fn build(self) -> GcEvent {
        GcEvent::new(
            self.timestamp,
            self.kind,
            self.before,
            self.after,
            self.total,
            self.pause,
        )
    }
}

/// A young collection at `timestamp`.
pub fn young_gc(timestamp: f64) -> GcEvent {
    GcEventBuilder::new(timestamp).build()
}

/// A full collection at `timestamp`.
pub fn full_gc(timestamp: f64) -> GcEvent {
    GcEventBuilder::new(timestamp)
        .kind("Pause Full (System.gc())")
        .heap(160.0, 22.0, 256.0)
        .pause(45.12)
        .build()
}

/// `n` alternating young/full collections, one per second.
pub fn build_events(n: usize) -> Vec<GcEvent> {
    (0..n)
        .map(|i| {
            if i % 4 == 3 {
                full_gc(i as f64)
            } else {
                young_gc(i as f64)
            }
        })
        .collect()
}
