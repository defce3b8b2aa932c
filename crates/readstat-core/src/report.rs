//! Report bundle with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Dataset;
use crate::statistics::{
    group_by_gender, group_by_reading_level, group_by_type, overall_summary, student_progress,
    GenderBreakdown, LevelStats, OverallSummary, StudentProgress, TypeBreakdown,
};

/// Every aggregate computed for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the dataset.
    pub dataset: DatasetSummary,
    /// Overall averages, `None` when the dataset has no assessments.
    pub summary: Option<OverallSummary>,
    /// Breakdown by reading level, in display order.
    pub reading_levels: Vec<LevelStats>,
    /// Breakdown by assessment type, in first-seen order.
    pub assessment_types: TypeBreakdown,
    /// First-to-latest progress per student.
    pub progress: Vec<StudentProgress>,
    /// Breakdown by gender.
    pub gender: GenderBreakdown,
}

/// Summary of a dataset (without the records themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String,
    pub name: String,
    pub student_count: usize,
    pub assessment_count: usize,
}

impl ReadingReport {
    /// Run every aggregation over a dataset.
    pub fn build(dataset: &Dataset) -> Self {
        tracing::debug!(
            dataset = %dataset.id,
            students = dataset.students.len(),
            assessments = dataset.assessments.len(),
            "building report"
        );

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            dataset: DatasetSummary {
                id: dataset.id.clone(),
                name: dataset.name.clone(),
                student_count: dataset.students.len(),
                assessment_count: dataset.assessments.len(),
            },
            summary: overall_summary(&dataset.assessments),
            reading_levels: group_by_reading_level(&dataset.assessments),
            assessment_types: group_by_type(&dataset.assessments),
            progress: student_progress(&dataset.students, &dataset.assessments),
            gender: group_by_gender(&dataset.students, &dataset.assessments),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ReadingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
