//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use mastery_core::model::Percent;
use mastery_core::report::AnalysisReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Row shading for a success rate.
fn level_class(percent: Percent) -> &'static str {
    let p = percent.value();
    if p >= 80.0 {
        "high"
    } else if p >= 50.0 {
        "mid"
    } else {
        "low"
    }
}

/// Generate an HTML report from an analysis report.
pub fn generate_html(report: &AnalysisReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>mastery report: {}</title>\n",
        html_escape(&report.dataset.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Assessment analysis</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Dataset: <strong>{}</strong> | {} students | {} questions | {}</p>\n",
        html_escape(&report.dataset.name),
        report.dataset.students,
        report.dataset.questions,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Learning targets
    html.push_str("<section class=\"targets\">\n");
    html.push_str("<h2>Learning targets</h2>\n");
    if report.targets.is_empty() {
        html.push_str("<p class=\"meta\">No learning targets defined.</p>\n");
    } else {
        html.push_str("<table id=\"targets\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable('targets', 0)\">Target</th><th onclick=\"sortTable('targets', 1)\">Threshold</th><th onclick=\"sortTable('targets', 2)\">Mastered</th><th onclick=\"sortTable('targets', 3)\">Percent</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for t in &report.targets {
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{} of {}</td><td>{}/{}</td><td>{}</td></tr>\n",
                level_class(t.percent),
                html_escape(&t.name),
                t.threshold,
                t.question_count,
                t.count,
                t.total,
                t.percent
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Item analysis
    html.push_str("<section class=\"questions\">\n");
    html.push_str("<h2>Item analysis</h2>\n");
    html.push_str("<table id=\"questions\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable('questions', 0)\">Question</th><th onclick=\"sortTable('questions', 1)\">Correct</th><th onclick=\"sortTable('questions', 2)\">Percent</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for q in &report.questions {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}/{}</td><td>{}</td></tr>\n",
            level_class(q.percent),
            html_escape(&q.question),
            q.count_correct,
            q.total,
            q.percent
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --high: #dcfce7; --mid: #fef9c3; --low: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --high: #064e3b; --mid: #713f12; --low: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.high { background: var(--high); }
.mid { background: var(--mid); }
.low { background: var(--low); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function sortTable(id, col) {
  const table = document.getElementById(id);
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
