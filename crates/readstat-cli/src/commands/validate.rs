//! The `readstat validate` command.

use std::path::PathBuf;

use anyhow::Result;

use readstat_core::parser::{load_datasets, validate_dataset};

pub fn execute(dataset_path: PathBuf) -> Result<()> {
    let sets = load_datasets(&dataset_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        println!(
            "Dataset: {} ({} students, {} assessments)",
            set.name,
            set.students.len(),
            set.assessments.len()
        );

        let warnings = validate_dataset(set);
        for w in &warnings {
            let prefix = w
                .student_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All datasets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
