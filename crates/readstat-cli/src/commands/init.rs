//! The `readstat init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create readstat.toml
    if std::path::Path::new("readstat.toml").exists() {
        println!("readstat.toml already exists, skipping.");
    } else {
        std::fs::write("readstat.toml", SAMPLE_CONFIG)?;
        println!("Created readstat.toml");
    }

    // Create example dataset
    std::fs::create_dir_all("datasets")?;
    let example_path = std::path::Path::new("datasets/example.toml");
    if example_path.exists() {
        println!("datasets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DATASET)?;
        println!("Created datasets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your students and assessments to datasets/example.toml");
    println!("  2. Run: readstat validate --dataset datasets/example.toml");
    println!("  3. Run: readstat report --dataset datasets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# readstat configuration

output_dir = "./readstat-results"
default_format = "html"
report_title = "Reading Assessment Report"
"#;

const EXAMPLE_DATASET: &str = r#"[dataset]
id = "example"
name = "Example Class"
description = "A small example dataset to get started"

[[students]]
id = "s1"
name = "Student One"
gender = "female"

[[students]]
id = "s2"
name = "Student Two"
gender = "male"

[[assessments]]
student_id = "s1"
date = "2024-01-01"
type = "Running Record"
word_recognition = 70.0
comprehension = 65.0
reading_level = "Instructional"

[[assessments]]
student_id = "s1"
date = "2024-06-01"
type = "Running Record"
word_recognition = 85.0
comprehension = 80.0
reading_level = "Independent"

[[assessments]]
student_id = "s2"
date = "2024-02-15"
type = "Cloze"
word_recognition = 40.0
comprehension = 35.0
reading_level = "Frustration"
"#;
