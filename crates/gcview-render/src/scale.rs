//! Axis ranges, linear scales and tick placement.

/// A closed interval of data values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Smallest range covering every finite value, or `None` if there is none.
    pub fn covering(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Range>, v| match acc {
                None => Some(Range::new(v, v)),
                Some(r) => Some(Range::new(r.start.min(v), r.end.max(v))),
            })
    }

    /// `[0, max]` over the finite values, with `fraction` headroom on top.
    /// Falls back to `[0, 1]` when there is nothing positive to show.
    pub fn from_zero(values: impl IntoIterator<Item = f64>, fraction: f64) -> Self {
        let max = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            Range::new(0.0, max * (1.0 + fraction))
        } else {
            Range::new(0.0, 1.0)
        }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Grow both ends by `fraction` of the span, plus `extra` absolute units.
    /// A zero-width range is widened to `min_half_width` on each side first.
    pub fn padded(self, fraction: f64, extra: f64, min_half_width: f64) -> Self {
        let base = if self.span() > 0.0 {
            self
        } else {
            Range::new(self.start - min_half_width, self.end + min_half_width)
        };
        let pad = base.span() * fraction + extra;
        Range::new(base.start - pad, base.end + pad)
    }

    /// Round-number ticks inside the range, roughly `target` of them.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let step = nice_step(self.span(), target.max(1));
        if !(step.is_finite() && step > 0.0) {
            return vec![];
        }
        let first = (self.start / step).ceil() as i64;
        let last = (self.end / step + 1e-9).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// 1, 2 or 5 times a power of ten, close to `span / target`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target as f64;
    if !(raw.is_finite() && raw > 0.0) {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Format a tick value with just enough decimals for `step`.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    // Avoid "-0".
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Maps a data [`Range`] onto a pixel interval. `pixel_start` may exceed
/// `pixel_end` for y axes, where larger values sit higher on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Range,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(domain: Range, pixel_start: f64, pixel_end: f64) -> Self {
        Self {
            domain,
            pixel_start,
            pixel_end,
        }
    }

    pub fn domain(&self) -> Range {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 {
            return (self.pixel_start + self.pixel_end) / 2.0;
        }
        let t = (value - self.domain.start) / span;
        self.pixel_start + t * (self.pixel_end - self.pixel_start)
    }

    /// Pixel length of `delta` data units.
    pub fn length(&self, delta: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 {
            return 0.0;
        }
        (delta / span * (self.pixel_end - self.pixel_start)).abs()
    }
}
