//! SVG builders for the two charts.
//!
//! Both charts are drawn against the same [`TimeAxis`] and the same plot
//! frame, so a given timestamp lands on the same horizontal pixel in each.
//! Every data element carries its timestamp in `data-t` and each chart its
//! plot box in `data-plot`, which is what the page script redraws from when
//! the shared time range is zoomed or panned.

use std::borrow::Cow;
use std::fmt::{self, Write};

use gcview_core::config::ChartConfig;
use gcview_core::GcEvent;

use crate::scale::{nice_step, tick_label, LinearScale, Range};
use crate::theme::ChartTheme;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const X_TICKS: usize = 10;
const Y_TICKS: usize = 6;

/// Minimum rendered bar width, so short runs of dense events stay visible.
const MIN_BAR_PX: f64 = 1.0;

pub const HEAP_TITLE: &str = "Heap Usage Over Time";
pub const PAUSE_TITLE: &str = "GC Pause Times";
pub const BEFORE_LABEL: &str = "Before GC";
pub const AFTER_LABEL: &str = "After GC";

// ---------------------------------------------------------------------------
// Shared time axis
// ---------------------------------------------------------------------------

/// The time range shared by both charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    range: Range,
}

impl TimeAxis {
    /// Cover every finite timestamp with 2% padding and room for half a bar
    /// on either side. Falls back to `[0, 1]` when no timestamp is finite.
    pub fn for_events(events: &[GcEvent], bar_width: f64) -> Self {
        let covered = Range::covering(events.iter().map(|e| e.timestamp))
            .unwrap_or(Range::new(0.0, 1.0));
        let half_bar = bar_width.max(0.0) / 2.0;
        Self {
            range: covered.padded(0.02, half_bar, 0.5_f64.max(bar_width)),
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }
}

// ---------------------------------------------------------------------------
// Plot frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Frame {
    width: f64,
    height: f64,
}

impl Frame {
    fn new(config: &ChartConfig) -> Self {
        Self {
            width: f64::from(config.width).max(MARGIN_LEFT + MARGIN_RIGHT + 1.0),
            height: f64::from(config.height).max(MARGIN_TOP + MARGIN_BOTTOM + 1.0),
        }
    }

    fn left(&self) -> f64 {
        MARGIN_LEFT
    }
    fn right(&self) -> f64 {
        self.width - MARGIN_RIGHT
    }
    fn top(&self) -> f64 {
        MARGIN_TOP
    }
    fn bottom(&self) -> f64 {
        self.height - MARGIN_BOTTOM
    }

    fn x_scale(&self, axis: &TimeAxis) -> LinearScale {
        LinearScale::new(axis.range(), self.left(), self.right())
    }

    fn y_scale(&self, range: Range) -> LinearScale {
        LinearScale::new(range, self.bottom(), self.top())
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Heap occupancy scatter: one before and one after marker per event.
pub fn heap_chart(
    out: &mut impl Write,
    events: &[GcEvent],
    axis: &TimeAxis,
    config: &ChartConfig,
    theme: &ChartTheme,
) -> fmt::Result {
    let frame = Frame::new(config);
    let x = frame.x_scale(axis);
    let y = frame.y_scale(Range::from_zero(
        events.iter().flat_map(|e| [e.before, e.after]),
        0.05,
    ));
    let radius = config.point_size.max(1.0) / 2.0;

    open_svg(out, "heap-chart", HEAP_TITLE, &frame, theme)?;
    write_axes(out, &frame, &x, &y, "Time (s)", "Heap (M)", theme)?;

    let series: [(&str, &str, fn(&GcEvent) -> f64); 2] = [
        ("before", &theme.before, |e| e.before),
        ("after", &theme.after, |e| e.after),
    ];

    writeln!(out, r#"<g clip-path="url(#heap-chart-clip)">"#)?;
    for (series, color, value) in series {
        writeln!(out, r#"<g class="series" data-series="{series}" fill="{color}">"#)?;
        for event in events {
            let cx = x.map(event.timestamp);
            let cy = y.map(value(event));
            if !(cx.is_finite() && cy.is_finite()) {
                continue;
            }
            let time = TimeAttr(Some(event.timestamp));
            if event.is_full {
                write_diamond(out, cx, cy, radius * 1.25, time)?;
            } else {
                write_circle(out, cx, cy, radius, time)?;
            }
            writeln!(out, "<title>{}</title></{}>", escape(&heap_tooltip(event)), marker_tag(event))?;
        }
        writeln!(out, "</g>")?;
    }
    writeln!(out, "</g>")?;

    write_heap_legend(out, &frame, radius, theme)?;
    writeln!(out, "</svg>")
}

/// Pause bar chart: one bar per event, `bar_width` seconds wide.
pub fn pause_chart(
    out: &mut impl Write,
    events: &[GcEvent],
    axis: &TimeAxis,
    config: &ChartConfig,
    theme: &ChartTheme,
) -> fmt::Result {
    let frame = Frame::new(config);
    let x = frame.x_scale(axis);
    let y = frame.y_scale(Range::from_zero(events.iter().map(|e| e.pause), 0.05));
    let bar_px = x.length(config.bar_width).max(MIN_BAR_PX);
    let baseline = y.map(0.0);

    open_svg(out, "pause-chart", PAUSE_TITLE, &frame, theme)?;
    write_axes(out, &frame, &x, &y, "Time (s)", "Pause Time (ms)", theme)?;

    writeln!(out, r#"<g clip-path="url(#pause-chart-clip)">"#)?;
    writeln!(
        out,
        r#"<g class="series" data-series="pause" data-bar-width="{}" data-min-bar="{MIN_BAR_PX}" fill="{}">"#,
        config.bar_width, theme.pause
    )?;
    for event in events {
        let center = x.map(event.timestamp);
        let top = y.map(event.pause.max(0.0));
        if !(center.is_finite() && top.is_finite()) {
            continue;
        }
        writeln!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}><title>{}</title></rect>"#,
            center - bar_px / 2.0,
            top,
            bar_px,
            (baseline - top).max(0.0),
            TimeAttr(Some(event.timestamp)),
            escape(&pause_tooltip(event)),
        )?;
    }
    writeln!(out, "</g>\n</g>")?;
    writeln!(out, "</svg>")
}

// ---------------------------------------------------------------------------
// Tooltips
// ---------------------------------------------------------------------------

pub fn heap_tooltip(event: &GcEvent) -> String {
    let mut text = format!(
        "Time: {:.3}s\nType: {}\nBefore: {} M\nAfter: {} M\nTotal: {} M",
        event.timestamp,
        event.kind,
        fmt_num(event.before),
        fmt_num(event.after),
        fmt_num(event.total),
    );
    push_wall_clock(&mut text, event);
    text
}

pub fn pause_tooltip(event: &GcEvent) -> String {
    let mut text = format!(
        "Time: {:.3}s\nPause: {} ms\nType: {}",
        event.timestamp,
        fmt_num(event.pause),
        event.kind,
    );
    push_wall_clock(&mut text, event);
    text
}

fn push_wall_clock(text: &mut String, event: &GcEvent) {
    if let Some(stamp) = event.wall_clock {
        text.push_str("\nDate: ");
        text.push_str(&stamp.to_rfc3339());
    }
}

/// Up to three decimals, trailing zeros dropped.
pub fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

fn open_svg(
    out: &mut impl Write,
    id: &str,
    title: &str,
    frame: &Frame,
    theme: &ChartTheme,
) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" class="chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-plot="{l} {r} {t} {b}" role="img" aria-label="{title}">"#,
        w = frame.width,
        h = frame.height,
        l = frame.left(),
        r = frame.right(),
        t = frame.top(),
        b = frame.bottom(),
    )?;
    writeln!(
        out,
        r#"<defs><clipPath id="{id}-clip"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
        frame.left(),
        frame.top(),
        frame.right() - frame.left(),
        frame.bottom() - frame.top(),
    )?;
    writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        theme.background
    )?;
    writeln!(
        out,
        r#"<text class="title" x="{:.2}" y="24" fill="{}">{title}</text>"#,
        frame.left(),
        theme.text
    )
}

fn write_axes(
    out: &mut impl Write,
    frame: &Frame,
    x: &LinearScale,
    y: &LinearScale,
    x_label: &str,
    y_label: &str,
    theme: &ChartTheme,
) -> fmt::Result {
    writeln!(
        out,
        r#"<g class="axes" stroke="{}" fill="{}" font-size="11">"#,
        theme.axis_line, theme.text
    )?;

    writeln!(
        out,
        r#"<g class="x-ticks" data-grid="{}" data-count="{X_TICKS}">"#,
        theme.grid_line
    )?;
    let x_step = nice_step(x.domain().span(), X_TICKS);
    for tick in x.domain().ticks(X_TICKS) {
        let px = x.map(tick);
        writeln!(
            out,
            r#"<line class="grid" x1="{px:.2}" y1="{:.2}" x2="{px:.2}" y2="{:.2}" stroke="{}"/><text x="{px:.2}" y="{:.2}" text-anchor="middle" stroke="none">{}</text>"#,
            frame.top(),
            frame.bottom(),
            theme.grid_line,
            frame.bottom() + 16.0,
            tick_label(tick, x_step),
        )?;
    }
    writeln!(out, "</g>")?;

    let y_step = nice_step(y.domain().span(), Y_TICKS);
    for tick in y.domain().ticks(Y_TICKS) {
        let py = y.map(tick);
        writeln!(
            out,
            r#"<line class="grid" x1="{:.2}" y1="{py:.2}" x2="{:.2}" y2="{py:.2}" stroke="{}"/><text x="{:.2}" y="{:.2}" text-anchor="end" stroke="none">{}</text>"#,
            frame.left(),
            frame.right(),
            theme.grid_line,
            frame.left() - 6.0,
            py + 4.0,
            tick_label(tick, y_step),
        )?;
    }

    writeln!(
        out,
        r#"<line x1="{l:.2}" y1="{b:.2}" x2="{r:.2}" y2="{b:.2}"/><line x1="{l:.2}" y1="{t:.2}" x2="{l:.2}" y2="{b:.2}"/>"#,
        l = frame.left(),
        r = frame.right(),
        t = frame.top(),
        b = frame.bottom(),
    )?;
    writeln!(
        out,
        r#"<text class="axis-label" x="{:.2}" y="{:.2}" text-anchor="middle" stroke="none">{x_label}</text>"#,
        (frame.left() + frame.right()) / 2.0,
        frame.height - 12.0,
    )?;
    let mid_y = (frame.top() + frame.bottom()) / 2.0;
    writeln!(
        out,
        r#"<text class="axis-label" x="18" y="{mid_y:.2}" transform="rotate(-90 18 {mid_y:.2})" text-anchor="middle" stroke="none">{y_label}</text>"#,
    )?;
    writeln!(out, "</g>")
}

fn write_heap_legend(
    out: &mut impl Write,
    frame: &Frame,
    radius: f64,
    theme: &ChartTheme,
) -> fmt::Result {
    let x = frame.right() - 110.0;
    writeln!(out, r#"<g class="legend" font-size="12" fill="{}">"#, theme.text)?;
    for (row, (series, label, color)) in [
        ("before", BEFORE_LABEL, &theme.before),
        ("after", AFTER_LABEL, &theme.after),
    ]
    .into_iter()
    .enumerate()
    {
        let y = frame.top() + 14.0 + row as f64 * 18.0;
        writeln!(
            out,
            r#"<g class="legend-item" data-series="{series}"><circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{color}"/><text x="{:.2}" y="{:.2}">{label}</text></g>"#,
            x,
            y,
            x + 12.0,
            y + 4.0,
        )?;
    }
    let y = frame.top() + 14.0 + 2.0 * 18.0;
    write!(out, r#"<g class="legend-shape" fill="{}">"#, theme.axis_line)?;
    write_circle(out, x, y, radius, TimeAttr(None))?;
    write!(out, "</circle>")?;
    writeln!(out, r#"<text x="{:.2}" y="{:.2}">Minor</text>"#, x + 12.0, y + 4.0)?;
    write_diamond(out, x + 60.0, y, radius * 1.25, TimeAttr(None))?;
    write!(out, "</path>")?;
    writeln!(out, r#"<text x="{:.2}" y="{:.2}">Full</text></g>"#, x + 72.0, y + 4.0)?;
    writeln!(out, "</g>")
}

/// ` data-t="<seconds>"` on data elements, nothing on legend keys.
struct TimeAttr(Option<f64>);

impl fmt::Display for TimeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, r#" data-t="{t}""#),
            None => Ok(()),
        }
    }
}

/// Opens a `<circle>`; the caller closes it after adding children.
fn write_circle(out: &mut impl Write, cx: f64, cy: f64, r: f64, time: TimeAttr) -> fmt::Result {
    write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}"{time}>"#)
}

/// Opens a diamond `<path>`; the caller closes it after adding children.
fn write_diamond(
    out: &mut impl Write,
    cx: f64,
    cy: f64,
    r: f64,
    time: TimeAttr,
) -> fmt::Result {
    write!(
        out,
        r#"<path class="full" d="M{cx:.2} {:.2}L{:.2} {cy:.2}L{cx:.2} {:.2}L{:.2} {cy:.2}Z"{time}>"#,
        cy - r,
        cx + r,
        cy + r,
        cx - r,
    )
}

fn marker_tag(event: &GcEvent) -> &'static str {
    if event.is_full {
        "path"
    } else {
        "circle"
    }
}

/// Escape text for use in SVG/HTML content and attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
