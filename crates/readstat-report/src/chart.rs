//! Inline SVG grouped bar charts.
//!
//! Each category gets one bar per series. The value axis starts at zero and
//! is capped at 100, matching percentage scores.

use crate::format::html_escape;

pub const WORD_RECOGNITION_COLOR: &str = "#4e73df";
pub const COMPREHENSION_COLOR: &str = "#1cc88a";

/// Top of the value axis.
pub const AXIS_MAX: f64 = 100.0;

/// One dataset drawn across every category.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: &str, color: &str, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            values,
        }
    }
}

/// Render a grouped bar chart as an SVG element.
///
/// Missing values (a series shorter than `categories`) are drawn as zero.
pub fn grouped_bar_chart(title: &str, categories: &[String], series: &[Series]) -> String {
    let plot_height = 220.0;
    let top = 40.0;
    let left = 48.0;
    let bottom = 40.0;
    let bar_width = 28.0;
    let bar_gap = 4.0;
    let group_gap = 32.0;

    let per_group = series.len().max(1) as f64;
    let group_width = per_group * bar_width + (per_group - 1.0) * bar_gap;
    let plot_width = (categories.len().max(1) as f64) * (group_width + group_gap) + group_gap;
    let width = left + plot_width + 16.0;
    let height = top + plot_height + bottom;
    let baseline = top + plot_height;

    let mut svg = format!(
        "<svg class=\"chart\" width=\"{width}\" height=\"{height}\" role=\"img\" aria-label=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        html_escape(title)
    );

    // Legend
    let mut legend_x = left;
    for s in series {
        svg.push_str(&format!(
            "  <rect x=\"{legend_x}\" y=\"10\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            html_escape(&s.color)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"20\" font-size=\"12\" fill=\"currentColor\">{}</text>\n",
            legend_x + 16.0,
            html_escape(&s.label)
        ));
        legend_x += 24.0 + s.label.chars().count() as f64 * 7.0;
    }

    // Gridlines and axis ticks every 20 points
    for tick in (0..=100).step_by(20) {
        let y = baseline - tick as f64 / AXIS_MAX * plot_height;
        svg.push_str(&format!(
            "  <line x1=\"{left}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"currentColor\" stroke-opacity=\"0.15\"/>\n",
            left + plot_width
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{y}\" font-size=\"11\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{tick}</text>\n",
            left - 6.0
        ));
    }

    for (i, category) in categories.iter().enumerate() {
        let group_x = left + group_gap + i as f64 * (group_width + group_gap);

        for (j, s) in series.iter().enumerate() {
            let value = s.values.get(i).copied().unwrap_or(0.0).clamp(0.0, AXIS_MAX);
            let bar_height = value / AXIS_MAX * plot_height;
            let x = group_x + j as f64 * (bar_width + bar_gap);
            svg.push_str(&format!(
                "  <rect x=\"{x}\" y=\"{}\" width=\"{bar_width}\" height=\"{bar_height}\" fill=\"{}\" rx=\"3\"><title>{}: {:.1}%</title></rect>\n",
                baseline - bar_height,
                html_escape(&s.color),
                html_escape(&s.label),
                value
            ));
        }

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            group_x + group_width / 2.0,
            baseline + 18.0,
            html_escape(category)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
