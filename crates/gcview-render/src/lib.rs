//! gcview-render — turns parsed GC events into a self-contained HTML page.
//!
//! The page holds two SVG charts stacked vertically:
//!
//! 1. heap occupancy before/after each collection (scatter, full collections
//!    drawn as diamonds),
//! 2. pause duration per collection (bars).
//!
//! Both share one [`svg::TimeAxis`], so the charts line up horizontally, and
//! wheel zoom or drag pan on either chart moves that shared range for both.
//! Every marker and bar carries a `<title>` tooltip. There is no global
//! renderer state: everything a render needs travels in [`RenderConfig`].

pub mod html;
pub mod output;
pub mod scale;
pub mod svg;
pub mod theme;

use std::path::PathBuf;

use gcview_core::config::ChartConfig;
use gcview_core::GcEvent;

pub use output::ChartOutput;
pub use theme::ChartTheme;

/// Everything [`render`] needs: where to write, how big, which colours.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub output: PathBuf,
    pub chart: ChartConfig,
    pub theme: ChartTheme,
}

impl RenderConfig {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            chart: ChartConfig::default(),
            theme: ChartTheme::default(),
        }
    }

    pub fn with_chart(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Result of a render that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The document was written to this path.
    Written(PathBuf),
    /// There were no events; nothing was written.
    NoData,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to format chart document")]
    Format(#[from] std::fmt::Error),

    #[error("failed to serialise event data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the document in memory. `Ok(None)` when `events` is empty.
pub fn render_to_string(
    events: &[GcEvent],
    chart: &ChartConfig,
    theme: &ChartTheme,
) -> Result<Option<String>, RenderError> {
    if events.is_empty() {
        return Ok(None);
    }
    let axis = svg::TimeAxis::for_events(events, chart.bar_width);
    html::document(events, &axis, chart, theme).map(Some)
}

/// Render `events` into `config.output`.
///
/// With no events the output file is neither created nor touched and
/// [`RenderOutcome::NoData`] is returned.
pub fn render(events: &[GcEvent], config: &RenderConfig) -> Result<RenderOutcome, RenderError> {
    let Some(document) = render_to_string(events, &config.chart, &config.theme)? else {
        tracing::info!("no GC events to plot");
        return Ok(RenderOutcome::NoData);
    };

    let mut output = ChartOutput::create(&config.output)?;
    output.write_document(&document)?;
    let path = output.finish()?;

    tracing::debug!(
        path = %path.display(),
        events = events.len(),
        bytes = document.len(),
        "wrote GC chart"
    );
    Ok(RenderOutcome::Written(path))
}
