//! The `readstat report` command.

use std::path::PathBuf;

use anyhow::Result;

use readstat_core::parser::load_datasets;
use readstat_core::report::ReadingReport;
use readstat_report::html::write_html_report;

use crate::config::load_config_from;

pub fn execute(
    dataset_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let formats: Vec<ReportFormat> = if format == "all" {
        vec![ReportFormat::Json, ReportFormat::Html]
    } else {
        format
            .split(',')
            .map(|f| ReportFormat::parse(f.trim()))
            .collect::<Result<_>>()?
    };

    let sets = load_datasets(&dataset_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no datasets found in {}",
        dataset_path.display()
    );

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for set in &sets {
        let report = ReadingReport::build(set);
        if report.summary.is_none() {
            tracing::warn!("dataset '{}' has no assessments", set.id);
        }

        for fmt in &formats {
            let path = output.join(format!(
                "report-{}-{timestamp}.{}",
                set.id,
                fmt.extension()
            ));
            match fmt {
                ReportFormat::Json => {
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                ReportFormat::Html => {
                    write_html_report(&report, &config.report_title, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Json,
    Html,
}

impl ReportFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            other => anyhow::bail!("unknown format: {other} (expected json, html, or all)"),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        }
    }
}
