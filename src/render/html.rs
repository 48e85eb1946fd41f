//! HTML dashboard rendering
//!
//! The page is self-contained: inline CSS, bar charts drawn with plain
//! elements, and a small script that keeps the city selector live over the
//! `/ws` socket.

use crate::datasets::SnapshotSummary;
use crate::models::{Cell, ReportData, ReportId, ReportResult, ResultScalar, ResultSeries, ResultTable};

/// Render the whole catalog as one page
pub fn render_dashboard(
    results: &[ReportResult],
    cities: &[String],
    selected_city: Option<&str>,
    summary: &SnapshotSummary,
) -> String {
    let sections: String = results
        .iter()
        .map(|result| render_section(result, cities, selected_city))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Food Donation Dashboard</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>Food Donation Dashboard</h1>
        <p class="subtitle">Interactive analytics for Providers, Receivers, Listings &amp; Claims</p>
        {sections}
        <footer>Snapshot <code>{fingerprint}</code> loaded {loaded_at}</footer>
    </div>
    <script>{js}</script>
</body>
</html>"#,
        css = inline_css(),
        js = inline_javascript(),
        sections = sections,
        fingerprint = html_escape(&summary.fingerprint[..summary.fingerprint.len().min(12)]),
        loaded_at = summary.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn render_section(result: &ReportResult, cities: &[String], selected_city: Option<&str>) -> String {
    let selector = if result.id.uses_city() {
        render_city_selector(cities, selected_city)
    } else {
        String::new()
    };

    format!(
        r#"<section class="report" id="{id}">
            <h2>{number}. {title}</h2>
            {selector}
            <div class="report-body">{body}</div>
        </section>
        "#,
        id = result.id,
        number = catalog_number(result.id),
        title = html_escape(&result.title),
        selector = selector,
        body = render_report_body(result),
    )
}

/// Render only the body of a report, as sent in `report_update` messages
pub fn render_report_body(result: &ReportResult) -> String {
    match &result.data {
        ReportData::Table(table) => render_table(table),
        ReportData::Series(series) => render_bar_chart(series),
        ReportData::Scalar(scalar) => render_metric(scalar),
    }
}

fn render_city_selector(cities: &[String], selected_city: Option<&str>) -> String {
    let options: String = cities
        .iter()
        .map(|city| {
            let selected = if Some(city.as_str()) == selected_city { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = html_escape(city),
                selected = selected,
                label = html_escape(city),
            )
        })
        .collect();

    format!(
        r#"<label class="selector">Select City <select id="city-select">{}</select></label>"#,
        options
    )
}

fn render_table(table: &ResultTable) -> String {
    if table.is_empty() {
        return r#"<p class="empty">No rows.</p>"#.to_string();
    }

    let header: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", html_escape(c)))
        .collect();

    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!(r#"<td class="{}">{}</td>"#, cell_class(cell), render_cell(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        header, rows
    )
}

fn render_bar_chart(series: &ResultSeries) -> String {
    if series.is_empty() {
        return r#"<p class="empty">No data.</p>"#.to_string();
    }

    let max = series.max_value();
    let bars: String = series
        .points
        .iter()
        .map(|point| {
            let value = point.value.as_f64().unwrap_or(0.0);
            let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
            format!(
                r#"<div class="bar-row"><span class="bar-label">{label}</span><span class="bar" style="width: {width:.1}%"></span><span class="bar-value">{value}</span></div>"#,
                label = html_escape(&point.label),
                width = width,
                value = render_cell(&point.value),
            )
        })
        .collect();

    format!(
        r#"<div class="chart" data-index="{index}" data-value="{value}">{bars}</div>"#,
        index = html_escape(&series.index_name),
        value = html_escape(&series.value_name),
        bars = bars,
    )
}

fn render_metric(scalar: &ResultScalar) -> String {
    format!(
        r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
        html_escape(&scalar.label),
        html_escape(&scalar.display),
    )
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Missing => String::new(),
        other => html_escape(&other.to_string()),
    }
}

fn cell_class(cell: &Cell) -> &'static str {
    match cell {
        Cell::Int(_) | Cell::Float(_) => "num",
        Cell::Text(_) => "text",
        Cell::Missing => "missing",
    }
}

fn catalog_number(id: ReportId) -> usize {
    ReportId::ALL.iter().position(|other| *other == id).map_or(0, |i| i + 1)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f6f7f9; color: #1f2933; }
.container { max-width: 960px; margin: 0 auto; padding: 24px; }
h1 { margin-bottom: 4px; }
.subtitle { color: #52606d; margin-top: 0; }
.report { background: #fff; border-radius: 8px; padding: 16px 20px; margin: 16px 0; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.report h2 { font-size: 1.15rem; margin-top: 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e4e7eb; padding: 6px 8px; text-align: left; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.bar-row { display: flex; align-items: center; margin: 4px 0; }
.bar-label { width: 30%; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar { display: inline-block; height: 14px; background: #3e7cb1; border-radius: 2px; margin: 0 8px; }
.bar-value { font-variant-numeric: tabular-nums; color: #52606d; }
.metric-label { color: #52606d; }
.metric-value { font-size: 2.2rem; font-weight: 600; }
.selector { display: block; margin-bottom: 12px; }
.empty { color: #9aa5b1; font-style: italic; }
footer { color: #9aa5b1; font-size: .8rem; margin-top: 24px; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
    var select = document.getElementById('city-select');
    var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
    var socket = new WebSocket(scheme + location.host + '/ws');

    socket.onmessage = function (event) {
        var message = JSON.parse(event.data);
        if (message.type === 'report_update') {
            var section = document.getElementById(message.data.report.id);
            if (section) {
                section.querySelector('.report-body').innerHTML = message.data.html;
            }
        } else if (message.type === 'snapshot_reloaded') {
            location.reload();
        }
    };

    if (select) {
        select.addEventListener('change', function () {
            socket.send(JSON.stringify({ type: 'select_city', data: { city: select.value } }));
            history.replaceState(null, '', '?city=' + encodeURIComponent(select.value));
        });
    }
})();
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::report_service::{ReportParams, run_catalog, run_report};
    use crate::test::fixture_snapshot;

    #[test]
    fn test_dashboard_contains_every_report() {
        let snapshot = fixture_snapshot();
        let results = run_catalog(&snapshot, &ReportParams::default());
        let html = render_dashboard(&results, &snapshot.cities(), Some("Shelbyville"), &snapshot.summary());

        for id in ReportId::ALL {
            assert!(html.contains(&format!("id=\"{}\"", id)));
        }
        assert!(html.contains("13. Total Quantity Donated by Each Provider"));
        assert!(html.contains(r#"<option value="Shelbyville" selected>"#));
        assert!(html.contains("1,515"));
    }

    #[test]
    fn test_missing_cells_render_blank() {
        assert_eq!(render_cell(&Cell::Missing), "");
        assert_eq!(cell_class(&Cell::Missing), "missing");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(html_escape("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_empty_table_body() {
        let snapshot = fixture_snapshot();
        let result = run_report(ReportId::ProviderContacts, &snapshot, &ReportParams::for_city("Atlantis"));
        assert_eq!(render_report_body(&result), r#"<p class="empty">No rows.</p>"#);
    }

    #[test]
    fn test_bar_widths_scale_to_max() {
        let snapshot = fixture_snapshot();
        let result = run_report(ReportId::ListingsByCity, &snapshot, &ReportParams::default());
        let body = render_report_body(&result);

        assert!(body.contains("width: 100.0%"));
        assert!(body.contains("width: 50.0%"));
    }
}
