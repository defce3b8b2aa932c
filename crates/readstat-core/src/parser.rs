//! TOML dataset parser.
//!
//! Loads datasets from TOML files and directories, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{Assessment, Dataset, Gender, Student};

/// Intermediate TOML structure for parsing dataset files.
#[derive(Debug, Deserialize)]
struct TomlDatasetFile {
    dataset: TomlDatasetHeader,
    #[serde(default)]
    students: Vec<TomlStudent>,
    #[serde(default)]
    assessments: Vec<TomlAssessment>,
}

#[derive(Debug, Deserialize)]
struct TomlDatasetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    id: String,
    name: String,
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessment {
    student_id: String,
    date: NaiveDate,
    #[serde(rename = "type")]
    assessment_type: String,
    word_recognition: f64,
    comprehension: f64,
    reading_level: String,
}

/// Parse a single TOML file into a `Dataset`.
pub fn parse_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_dataset_str(&content, path)
}

/// Parse a TOML string into a `Dataset` (useful for testing).
pub fn parse_dataset_str(content: &str, source_path: &Path) -> Result<Dataset> {
    let parsed: TomlDatasetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let students = parsed
        .students
        .into_iter()
        .map(|s| {
            let gender = match s.gender {
                Some(g) => Some(g.parse::<Gender>().map_err(|e| {
                    anyhow::anyhow!(
                        "student '{}': unknown gender '{}' (expected male or female)",
                        s.id,
                        e.label()
                    )
                })?),
                None => None,
            };
            Ok(Student {
                id: s.id,
                name: s.name,
                gender,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let assessments = parsed
        .assessments
        .into_iter()
        .map(|a| Assessment {
            student_id: a.student_id,
            date: a.date,
            assessment_type: a.assessment_type,
            word_recognition: a.word_recognition,
            comprehension: a.comprehension,
            reading_level: a.reading_level,
        })
        .collect();

    Ok(Dataset {
        id: parsed.dataset.id,
        name: parsed.dataset.name,
        description: parsed.dataset.description,
        students,
        assessments,
    })
}

/// Recursively load all `.toml` dataset files from a directory.
pub fn load_dataset_directory(dir: &Path) -> Result<Vec<Dataset>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_dataset_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_dataset(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single dataset file, or every dataset in a directory.
pub fn load_datasets(path: &Path) -> Result<Vec<Dataset>> {
    if path.is_dir() {
        load_dataset_directory(path)
    } else {
        Ok(vec![parse_dataset(path)?])
    }
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The student the warning concerns (if applicable).
    pub student_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a dataset for common issues.
///
/// Warnings never prevent aggregation; they point at records that the
/// statistics will exclude or that look like data entry mistakes.
pub fn validate_dataset(set: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate student IDs
    let mut seen_ids = HashSet::new();
    for student in &set.students {
        if !seen_ids.insert(student.id.as_str()) {
            warnings.push(ValidationWarning {
                student_id: Some(student.id.clone()),
                message: format!("duplicate student ID: {}", student.id),
            });
        }
    }

    for student in &set.students {
        if student.gender.is_none() {
            warnings.push(ValidationWarning {
                student_id: Some(student.id.clone()),
                message: "no gender recorded; excluded from gender breakdown".into(),
            });
        }
    }

    let mut per_student: HashMap<&str, usize> = HashMap::new();
    for (i, a) in set.assessments.iter().enumerate() {
        *per_student.entry(a.student_id.as_str()).or_default() += 1;

        if !seen_ids.contains(a.student_id.as_str()) {
            warnings.push(ValidationWarning {
                student_id: Some(a.student_id.clone()),
                message: format!("assessment #{} references an unknown student", i + 1),
            });
        }

        if a.level().is_none() {
            warnings.push(ValidationWarning {
                student_id: Some(a.student_id.clone()),
                message: format!(
                    "assessment #{} has unrecognized reading level '{}'",
                    i + 1,
                    a.reading_level
                ),
            });
        }

        for (field, value) in [
            ("word_recognition", a.word_recognition),
            ("comprehension", a.comprehension),
        ] {
            if !(0.0..=100.0).contains(&value) {
                warnings.push(ValidationWarning {
                    student_id: Some(a.student_id.clone()),
                    message: format!("assessment #{} has {field} {value} outside 0-100", i + 1),
                });
            }
        }
    }

    for student in &set.students {
        if !per_student.contains_key(student.id.as_str()) {
            warnings.push(ValidationWarning {
                student_id: Some(student.id.clone()),
                message: "no assessments; omitted from progress".into(),
            });
        }
    }

    warnings
}
