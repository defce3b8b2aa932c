//! Core data model types for readstat.
//!
//! These are the records the aggregation layer reads: assessments, the
//! students they belong to, and the dataset that carries both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DatasetError;

/// A single reading assessment taken by one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Identifier of the student who took the assessment.
    pub student_id: String,
    /// Calendar date the assessment was taken.
    pub date: NaiveDate,
    /// Assessment instrument or method (data-driven label).
    #[serde(rename = "type")]
    pub assessment_type: String,
    /// Word recognition score, as a percentage (0-100).
    pub word_recognition: f64,
    /// Comprehension score, as a percentage (0-100).
    pub comprehension: f64,
    /// Reading level label as recorded. See [`Assessment::level`].
    pub reading_level: String,
}

impl Assessment {
    /// The reading level, if the recorded label is one of the known levels.
    pub fn level(&self) -> Option<ReadingLevel> {
        self.reading_level.parse().ok()
    }
}

/// Difficulty classification assigned per assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingLevel {
    Independent,
    Instructional,
    Frustration,
}

impl ReadingLevel {
    /// All levels in display order.
    pub const ALL: [ReadingLevel; 3] = [
        ReadingLevel::Independent,
        ReadingLevel::Instructional,
        ReadingLevel::Frustration,
    ];
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingLevel::Independent => write!(f, "Independent"),
            ReadingLevel::Instructional => write!(f, "Instructional"),
            ReadingLevel::Frustration => write!(f, "Frustration"),
        }
    }
}

impl FromStr for ReadingLevel {
    type Err = DatasetError;

    // Exact labels only; "independent" is not a level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Independent" => Ok(ReadingLevel::Independent),
            "Instructional" => Ok(ReadingLevel::Instructional),
            "Frustration" => Ok(ReadingLevel::Frustration),
            _ => Err(DatasetError::UnknownReadingLevel(s.to_string())),
        }
    }
}

/// A student whose assessments are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier referenced by [`Assessment::student_id`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Gender, when recorded.
    #[serde(default)]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(DatasetError::UnknownGender(s.to_string())),
        }
    }
}

/// A loaded collection of students and their assessments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique identifier for this dataset.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this dataset.
    #[serde(default)]
    pub description: String,
    /// Students referenced by the assessments.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Assessment records.
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}
