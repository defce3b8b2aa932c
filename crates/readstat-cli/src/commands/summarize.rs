//! The `readstat summarize` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use readstat_core::model::Gender;
use readstat_core::parser::load_datasets;
use readstat_core::report::ReadingReport;
use readstat_report::format::{display_date, percent, signed_percent};

pub fn execute(dataset_path: PathBuf, format: String) -> Result<()> {
    let sets = load_datasets(&dataset_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no datasets found in {}",
        dataset_path.display()
    );
    let reports: Vec<ReadingReport> = sets.iter().map(ReadingReport::build).collect();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        "text" => {
            for report in &reports {
                print_report(report);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_report(report: &ReadingReport) {
    println!(
        "Dataset: {} ({} students, {} assessments)",
        report.dataset.name, report.dataset.student_count, report.dataset.assessment_count
    );

    match &report.summary {
        Some(s) => {
            println!("  Avg word recognition: {}", percent(s.avg_word_recognition));
            println!("  Avg comprehension:    {}", percent(s.avg_comprehension));
            println!("  Total assessments:    {}", s.count);
            println!("  Improvement rate:     {}", percent(s.improvement_rate));
        }
        None => {
            println!("  No data.");
            println!();
            return;
        }
    }

    let mut levels = Table::new();
    levels.set_header(vec![
        "Level",
        "Count",
        "Percentage",
        "Avg Word Recognition",
        "Avg Comprehension",
    ]);
    for l in &report.reading_levels {
        levels.add_row(vec![
            Cell::new(l.level),
            Cell::new(l.count),
            Cell::new(percent(l.percentage_of_total)),
            Cell::new(percent(l.avg_word_recognition)),
            Cell::new(percent(l.avg_comprehension)),
        ]);
    }
    println!("\nReading levels\n{levels}");

    let mut types = Table::new();
    types.set_header(vec![
        "Type",
        "Count",
        "Avg Word Recognition",
        "Avg Comprehension",
    ]);
    for (label, stats) in report.assessment_types.iter() {
        types.add_row(vec![
            Cell::new(label),
            Cell::new(stats.count),
            Cell::new(percent(stats.avg_word_recognition)),
            Cell::new(percent(stats.avg_comprehension)),
        ]);
    }
    println!("\nAssessment types\n{types}");

    let mut progress = Table::new();
    progress.set_header(vec![
        "Student",
        "First",
        "Latest",
        "WR Progress",
        "Comp Progress",
        "Current Level",
    ]);
    for p in &report.progress {
        progress.add_row(vec![
            Cell::new(&p.student_name),
            Cell::new(display_date(p.first_date)),
            Cell::new(display_date(p.last_date)),
            Cell::new(signed_percent(p.word_recognition_delta)),
            Cell::new(signed_percent(p.comprehension_delta)),
            Cell::new(&p.current_reading_level),
        ]);
    }
    println!("\nStudent progress\n{progress}");

    let mut gender = Table::new();
    gender.set_header(vec![
        "Gender",
        "Count",
        "Avg Word Recognition",
        "Avg Comprehension",
    ]);
    for g in Gender::ALL {
        let stats = report.gender.get(g);
        gender.add_row(vec![
            Cell::new(g),
            Cell::new(stats.count),
            Cell::new(percent(stats.avg_word_recognition)),
            Cell::new(percent(stats.avg_comprehension)),
        ]);
    }
    println!("\nBy gender\n{gender}\n");
}
