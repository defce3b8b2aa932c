//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use readstat_core::model::Gender;
use readstat_core::report::ReadingReport;

use crate::chart::{grouped_bar_chart, Series, COMPREHENSION_COLOR, WORD_RECOGNITION_COLOR};
use crate::format::{display_date, html_escape, percent, signed_percent};

/// Generate an HTML report from a reading report.
pub fn generate_html(report: &ReadingReport, title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} — {}</title>\n",
        html_escape(title),
        html_escape(&report.dataset.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">Dataset: <strong>{}</strong> | {} students | {} assessments | {}</p>\n",
        html_escape(&report.dataset.name),
        report.dataset.student_count,
        report.dataset.assessment_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary cards
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<div class=\"cards\">\n");
    let cards = match &report.summary {
        Some(s) => [
            ("avg-wr", "Avg Word Recognition", percent(s.avg_word_recognition)),
            ("avg-comprehension", "Avg Comprehension", percent(s.avg_comprehension)),
            ("total-assessments", "Total Assessments", s.count.to_string()),
            ("improvement-rate", "Improvement Rate", percent(s.improvement_rate)),
        ],
        None => [
            ("avg-wr", "Avg Word Recognition", NO_DATA.to_string()),
            ("avg-comprehension", "Avg Comprehension", NO_DATA.to_string()),
            ("total-assessments", "Total Assessments", "0".to_string()),
            ("improvement-rate", "Improvement Rate", NO_DATA.to_string()),
        ],
    };
    for (id, label, value) in &cards {
        html.push_str(&format!(
            "<div class=\"card\"><span class=\"label\">{label}</span><span class=\"value\" id=\"{id}\">{value}</span></div>\n"
        ));
    }
    html.push_str("</div>\n");
    html.push_str("</section>\n");

    // Reading levels
    html.push_str("<section class=\"levels\">\n");
    html.push_str("<h2>Reading Levels</h2>\n");
    html.push_str("<table id=\"readingLevelTable\">\n");
    html.push_str("<thead><tr><th>Level</th><th>Count</th><th>Percentage</th><th>Avg Word Recognition</th><th>Avg Comprehension</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for level in &report.reading_levels {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            level.level,
            level.count,
            percent(level.percentage_of_total),
            percent(level.avg_word_recognition),
            percent(level.avg_comprehension),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Assessment types
    html.push_str("<section class=\"types\">\n");
    html.push_str("<h2>Assessment Types</h2>\n");
    html.push_str("<table id=\"assessmentTypeTable\">\n");
    html.push_str("<thead><tr><th>Type</th><th>Count</th><th>Avg Word Recognition</th><th>Avg Comprehension</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (label, stats) in report.assessment_types.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(label),
            stats.count,
            percent(stats.avg_word_recognition),
            percent(stats.avg_comprehension),
        ));
    }
    html.push_str("</tbody></table>\n");
    if !report.assessment_types.is_empty() {
        let categories: Vec<String> = report
            .assessment_types
            .labels()
            .map(str::to_string)
            .collect();
        let series = [
            Series::new(
                "Word Recognition",
                WORD_RECOGNITION_COLOR,
                report
                    .assessment_types
                    .iter()
                    .map(|(_, s)| s.avg_word_recognition)
                    .collect(),
            ),
            Series::new(
                "Comprehension",
                COMPREHENSION_COLOR,
                report
                    .assessment_types
                    .iter()
                    .map(|(_, s)| s.avg_comprehension)
                    .collect(),
            ),
        ];
        html.push_str(&grouped_bar_chart(
            "Scores by assessment type",
            &categories,
            &series,
        ));
    }
    html.push_str("</section>\n");

    // Student progress
    html.push_str("<section class=\"progress\">\n");
    html.push_str("<h2>Student Progress</h2>\n");
    html.push_str("<table id=\"studentProgressTable\">\n");
    html.push_str("<thead><tr><th>Student</th><th>First Assessment</th><th>Latest Assessment</th><th>Word Recognition Progress</th><th>Comprehension Progress</th><th>Current Level</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for p in &report.progress {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            html_escape(&p.student_name),
            display_date(p.first_date),
            display_date(p.last_date),
            delta_class(p.word_recognition_delta),
            signed_percent(p.word_recognition_delta),
            delta_class(p.comprehension_delta),
            signed_percent(p.comprehension_delta),
            html_escape(&p.current_reading_level),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Gender chart, always drawn for both genders; empty buckets show zero.
    html.push_str("<section class=\"gender\">\n");
    html.push_str("<h2>Scores by Gender</h2>\n");
    let categories: Vec<String> = Gender::ALL.iter().map(|g| g.to_string()).collect();
    let series = [
        Series::new(
            "Word Recognition",
            WORD_RECOGNITION_COLOR,
            Gender::ALL
                .iter()
                .map(|g| report.gender.get(*g).avg_word_recognition)
                .collect(),
        ),
        Series::new(
            "Comprehension",
            COMPREHENSION_COLOR,
            Gender::ALL
                .iter()
                .map(|g| report.gender.get(*g).avg_comprehension)
                .collect(),
        ),
    ];
    html.push_str(&grouped_bar_chart("Scores by gender", &categories, &series));
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

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ReadingReport, title: &str, path: &Path) -> Result<()> {
    let html = generate_html(report, title);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const NO_DATA: &str = "No data";

fn delta_class(delta: f64) -> &'static str {
    if delta > 0.0 {
        "up"
    } else if delta < 0.0 {
        "down"
    } else {
        "flat"
    }
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --up: #15803d; --down: #b91c1c; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --up: #4ade80; --down: #f87171; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.cards { display: flex; flex-wrap: wrap; gap: 1rem; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; min-width: 12rem; }
.card .label { display: block; font-size: 0.85rem; color: #6b7280; }
.card .value { display: block; font-size: 1.6rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.up { color: var(--up); }
.down { color: var(--down); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
