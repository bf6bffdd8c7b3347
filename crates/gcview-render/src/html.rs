//! Page assembly: both charts, the event data, the legend toggle script and
//! the shared zoom/pan script in one HTML document with no external references.

use std::fmt::Write;

use gcview_core::config::ChartConfig;
use gcview_core::GcEvent;

use crate::svg::{self, TimeAxis};
use crate::theme::ChartTheme;
use crate::RenderError;

pub const PAGE_TITLE: &str = "GC Analysis";

const LEGEND_SCRIPT: &str = r#"
document.querySelectorAll('.legend-item[data-series]').forEach(function (item) {
  item.addEventListener('click', function () {
    var chart = item.closest('svg');
    var series = chart.querySelector('.series[data-series="' + item.dataset.series + '"]');
    if (!series) { return; }
    var hidden = series.style.display === 'none';
    series.style.display = hidden ? '' : 'none';
    item.classList.toggle('muted', !hidden);
  });
});
"#;

// One time range for the whole page, kept in `data-x-domain` on the layout.
// Wheel zooms around the cursor, drag pans, double-click restores the range
// the page was rendered with.
const ZOOM_SCRIPT: &str = r#"
(function () {
  var layout = document.querySelector('.layout[data-x-domain]');
  if (!layout) { return; }
  var NS = 'http://www.w3.org/2000/svg';
  var charts = Array.prototype.slice.call(layout.querySelectorAll('svg.chart[data-plot]'));
  var home = layout.dataset.xDomain.split(' ').map(Number);
  var view = home.slice();
  var drag = null;

  function box(chart) { return chart.dataset.plot.split(' ').map(Number); }
  function toPx(b, domain, t) {
    return b[0] + (t - domain[0]) / (domain[1] - domain[0]) * (b[1] - b[0]);
  }
  function toTime(chart, clientX) {
    var b = box(chart);
    var rect = chart.getBoundingClientRect();
    var px = (clientX - rect.left) * chart.viewBox.baseVal.width / rect.width;
    return view[0] + (px - b[0]) / (b[1] - b[0]) * (view[1] - view[0]);
  }
  function niceStep(span, count) {
    var raw = span / count;
    var magnitude = Math.pow(10, Math.floor(Math.log10(raw)));
    var n = raw / magnitude;
    return (n < 1.5 ? 1 : n < 3 ? 2 : n < 7 ? 5 : 10) * magnitude;
  }
  function drawTicks(chart, b) {
    var group = chart.querySelector('.x-ticks');
    if (!group) { return; }
    while (group.firstChild) { group.removeChild(group.firstChild); }
    var step = niceStep(view[1] - view[0], Number(group.dataset.count));
    if (!(step > 0) || !isFinite(step)) { return; }
    var decimals = step < 1 ? Math.min(20, -Math.floor(Math.log10(step))) : 0;
    for (var i = Math.ceil(view[0] / step); i * step <= view[1]; i++) {
      var px = toPx(b, view, i * step);
      var line = document.createElementNS(NS, 'line');
      line.setAttribute('class', 'grid');
      line.setAttribute('x1', px); line.setAttribute('x2', px);
      line.setAttribute('y1', b[2]); line.setAttribute('y2', b[3]);
      line.setAttribute('stroke', group.dataset.grid);
      var label = document.createElementNS(NS, 'text');
      label.setAttribute('x', px); label.setAttribute('y', b[3] + 16);
      label.setAttribute('text-anchor', 'middle');
      label.setAttribute('stroke', 'none');
      label.textContent = (i * step).toFixed(decimals);
      group.appendChild(line);
      group.appendChild(label);
    }
  }
  function redraw() {
    layout.dataset.xDomain = view[0] + ' ' + view[1];
    charts.forEach(function (chart) {
      var b = box(chart);
      chart.querySelectorAll('circle[data-t], path[data-t]').forEach(function (m) {
        var t = Number(m.dataset.t);
        m.setAttribute('transform', 'translate(' + (toPx(b, view, t) - toPx(b, home, t)) + ' 0)');
      });
      chart.querySelectorAll('.series[data-bar-width]').forEach(function (series) {
        var width = Math.max(Number(series.dataset.minBar),
          Number(series.dataset.barWidth) * (b[1] - b[0]) / (view[1] - view[0]));
        series.querySelectorAll('rect[data-t]').forEach(function (bar) {
          bar.setAttribute('x', toPx(b, view, Number(bar.dataset.t)) - width / 2);
          bar.setAttribute('width', width);
        });
      });
      drawTicks(chart, b);
    });
  }

  charts.forEach(function (chart) {
    chart.addEventListener('wheel', function (e) {
      e.preventDefault();
      var t = toTime(chart, e.clientX);
      var k = e.deltaY < 0 ? 0.8 : 1.25;
      view = [t - (t - view[0]) * k, t + (view[1] - t) * k];
      redraw();
    }, { passive: false });
    chart.addEventListener('mousedown', function (e) {
      drag = { chart: chart, x: e.clientX, view: view.slice() };
    });
    chart.addEventListener('dblclick', function () {
      view = home.slice();
      redraw();
    });
  });
  window.addEventListener('mousemove', function (e) {
    if (!drag) { return; }
    var b = box(drag.chart);
    var rect = drag.chart.getBoundingClientRect();
    var px = (e.clientX - drag.x) * drag.chart.viewBox.baseVal.width / rect.width;
    var shift = px / (b[1] - b[0]) * (drag.view[1] - drag.view[0]);
    view = [drag.view[0] - shift, drag.view[1] - shift];
    redraw();
  });
  window.addEventListener('mouseup', function () { drag = null; });
})();
"#;

/// Build the whole document. `events` must not be empty.
pub(crate) fn document(
    events: &[GcEvent],
    axis: &TimeAxis,
    config: &ChartConfig,
    theme: &ChartTheme,
) -> Result<String, RenderError> {
    let mut page = String::with_capacity(4096 + events.len() * 600);

    writeln!(page, "<!DOCTYPE html>")?;
    writeln!(page, r#"<html lang="en">"#)?;
    writeln!(page, "<head>")?;
    writeln!(page, r#"<meta charset="utf-8">"#)?;
    writeln!(page, "<title>{PAGE_TITLE}</title>")?;
    writeln!(page, "<style>")?;
    writeln!(
        page,
        "body {{ margin: 16px; background: {bg}; color: {fg}; font-family: {font}; }}",
        bg = theme.background,
        fg = theme.text,
        font = theme.font,
    )?;
    writeln!(page, ".chart {{ display: block; margin-bottom: 12px; }}")?;
    writeln!(page, ".title {{ font-size: 16px; font-weight: bold; }}")?;
    writeln!(page, ".chart {{ cursor: grab; user-select: none; }}")?;
    writeln!(page, ".legend-item {{ cursor: pointer; }}")?;
    writeln!(page, ".legend-item.muted {{ opacity: 0.3; }}")?;
    writeln!(page, "</style>")?;
    writeln!(page, "</head>")?;
    writeln!(page, "<body>")?;
    writeln!(
        page,
        r#"<main class="layout" data-x-domain="{} {}">"#,
        axis.range().start,
        axis.range().end
    )?;

    svg::heap_chart(&mut page, events, axis, config, theme)?;
    svg::pause_chart(&mut page, events, axis, config, theme)?;

    writeln!(page, "</main>")?;
    writeln!(
        page,
        r#"<script type="application/json" id="gc-data">{}</script>"#,
        embedded_json(events)?
    )?;
    writeln!(page, "<script>{LEGEND_SCRIPT}</script>")?;
    writeln!(page, "<script>{ZOOM_SCRIPT}</script>")?;
    writeln!(page, "</body>")?;
    writeln!(page, "</html>")?;

    Ok(page)
}

/// Event list as JSON, safe to place inside a `<script>` element.
fn embedded_json(events: &[GcEvent]) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(events)?.replace("</", "<\\/"))
}
