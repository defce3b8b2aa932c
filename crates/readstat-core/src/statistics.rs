//! Descriptive statistics over assessment records.
//!
//! Every function here is a pure read-only pass over the supplied slices.
//! Averages and deltas are rounded to one decimal place with [`round1`].

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Assessment, Gender, ReadingLevel, Student};

/// Comprehension percentage treated as zero improvement.
pub const IMPROVEMENT_BASELINE: f64 = 60.0;

/// Percentage points between the baseline and full (100%) improvement.
pub const IMPROVEMENT_RANGE: f64 = 40.0;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Running totals for one group of assessments.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    count: usize,
    total_word_recognition: f64,
    total_comprehension: f64,
}

impl Accumulator {
    fn add(&mut self, assessment: &Assessment) {
        self.count += 1;
        self.total_word_recognition += assessment.word_recognition;
        self.total_comprehension += assessment.comprehension;
    }

    /// Averages for the group. An empty group reports zeros.
    fn stats(&self) -> GroupStats {
        if self.count == 0 {
            return GroupStats::default();
        }
        let n = self.count as f64;
        GroupStats {
            count: self.count,
            avg_word_recognition: round1(self.total_word_recognition / n),
            avg_comprehension: round1(self.total_comprehension / n),
        }
    }
}

/// Averages across every assessment in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    /// Mean word recognition percentage.
    pub avg_word_recognition: f64,
    /// Mean comprehension percentage.
    pub avg_comprehension: f64,
    /// Number of assessments.
    pub count: usize,
    /// Comprehension average normalized against a fixed baseline.
    ///
    /// `(avg_comprehension - 60) / 40 * 100`. This compares the current
    /// average to a static baseline; it is not a first-to-last trend.
    pub improvement_rate: f64,
}

/// Compute overall averages. Returns `None` when there is no data.
pub fn overall_summary(assessments: &[Assessment]) -> Option<OverallSummary> {
    if assessments.is_empty() {
        return None;
    }

    let mut acc = Accumulator::default();
    for a in assessments {
        acc.add(a);
    }
    let stats = acc.stats();

    let improvement_rate = round1(
        (stats.avg_comprehension - IMPROVEMENT_BASELINE) / IMPROVEMENT_RANGE * 100.0,
    );

    Some(OverallSummary {
        avg_word_recognition: stats.avg_word_recognition,
        avg_comprehension: stats.avg_comprehension,
        count: stats.count,
        improvement_rate,
    })
}

/// Count and averages for one group of assessments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Number of assessments in the group.
    pub count: usize,
    /// Mean word recognition percentage (0.0 for an empty group).
    pub avg_word_recognition: f64,
    /// Mean comprehension percentage (0.0 for an empty group).
    pub avg_comprehension: f64,
}

impl GroupStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Statistics for one reading level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub level: ReadingLevel,
    pub count: usize,
    /// Share of the whole input collection, as a percentage.
    pub percentage_of_total: f64,
    pub avg_word_recognition: f64,
    pub avg_comprehension: f64,
}

/// Group assessments by reading level, in display order.
///
/// Levels without assessments are omitted. Assessments with an unrecognized
/// level label count toward the total but belong to no group.
pub fn group_by_reading_level(assessments: &[Assessment]) -> Vec<LevelStats> {
    let mut per_level: HashMap<ReadingLevel, Accumulator> = HashMap::new();
    let mut unrecognized = 0usize;

    for a in assessments {
        match a.level() {
            Some(level) => per_level.entry(level).or_default().add(a),
            None => unrecognized += 1,
        }
    }

    if unrecognized > 0 {
        tracing::debug!(unrecognized, "assessments with unrecognized reading level excluded");
    }

    let total = assessments.len() as f64;
    ReadingLevel::ALL
        .iter()
        .filter_map(|level| {
            let acc = per_level.get(level)?;
            let stats = acc.stats();
            Some(LevelStats {
                level: *level,
                count: stats.count,
                percentage_of_total: round1(stats.count as f64 / total * 100.0),
                avg_word_recognition: stats.avg_word_recognition,
                avg_comprehension: stats.avg_comprehension,
            })
        })
        .collect()
}

/// One entry of a [`TypeBreakdown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub label: String,
    pub stats: GroupStats,
}

/// Assessment-type label to statistics, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeBreakdown {
    entries: Vec<TypeEntry>,
}

impl TypeBreakdown {
    /// Statistics for a type label, if any assessment carried it.
    pub fn get(&self, label: &str) -> Option<&GroupStats> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupStats)> {
        self.entries.iter().map(|e| (e.label.as_str(), &e.stats))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group assessments by their type label.
pub fn group_by_type(assessments: &[Assessment]) -> TypeBreakdown {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Accumulator)> = Vec::new();

    for a in assessments {
        let slot = *index.entry(a.assessment_type.as_str()).or_insert_with(|| {
            groups.push((a.assessment_type.as_str(), Accumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(a);
    }

    TypeBreakdown {
        entries: groups
            .into_iter()
            .map(|(label, acc)| TypeEntry {
                label: label.to_string(),
                stats: acc.stats(),
            })
            .collect(),
    }
}

/// First-to-latest change for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub student_id: String,
    pub student_name: String,
    /// Date of the earliest assessment.
    pub first_date: NaiveDate,
    /// Date of the latest assessment.
    pub last_date: NaiveDate,
    /// Latest minus earliest word recognition.
    pub word_recognition_delta: f64,
    /// Latest minus earliest comprehension.
    pub comprehension_delta: f64,
    /// Reading level label of the latest assessment.
    pub current_reading_level: String,
    pub assessment_count: usize,
}

/// Compute per-student progress, in student order.
///
/// Students without assessments are omitted. Assessments sharing a date
/// keep their input order.
pub fn student_progress(students: &[Student], assessments: &[Assessment]) -> Vec<StudentProgress> {
    let mut by_student: HashMap<&str, Vec<&Assessment>> = HashMap::new();
    for a in assessments {
        by_student.entry(a.student_id.as_str()).or_default().push(a);
    }

    students
        .iter()
        .filter_map(|student| {
            let mut history = by_student.get(student.id.as_str())?.clone();
            // Stable: equal dates keep input order.
            history.sort_by_key(|a| a.date);

            let first = history.first()?;
            let last = history.last()?;

            Some(StudentProgress {
                student_id: student.id.clone(),
                student_name: student.name.clone(),
                first_date: first.date,
                last_date: last.date,
                word_recognition_delta: round1(last.word_recognition - first.word_recognition),
                comprehension_delta: round1(last.comprehension - first.comprehension),
                current_reading_level: last.reading_level.clone(),
                assessment_count: history.len(),
            })
        })
        .collect()
}

/// Averages per gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub male: GroupStats,
    pub female: GroupStats,
}

impl GenderBreakdown {
    pub fn get(&self, gender: Gender) -> &GroupStats {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}

/// Group assessments by the gender of the student who took them.
///
/// Assessments whose student is unknown or has no gender are excluded.
/// An empty bucket reports zero averages rather than "no data".
pub fn group_by_gender(students: &[Student], assessments: &[Assessment]) -> GenderBreakdown {
    let mut lookup: HashMap<&str, &Student> = HashMap::new();
    for s in students {
        lookup.entry(s.id.as_str()).or_insert(s);
    }

    let mut male = Accumulator::default();
    let mut female = Accumulator::default();
    let mut excluded = 0usize;

    for a in assessments {
        match lookup.get(a.student_id.as_str()).and_then(|s| s.gender) {
            Some(Gender::Male) => male.add(a),
            Some(Gender::Female) => female.add(a),
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        tracing::debug!(excluded, "assessments without a gendered student excluded");
    }

    GenderBreakdown {
        male: male.stats(),
        female: female.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assessment(
        student_id: &str,
        on: NaiveDate,
        kind: &str,
        wr: f64,
        comp: f64,
        level: &str,
    ) -> Assessment {
        Assessment {
            student_id: student_id.into(),
            date: on,
            assessment_type: kind.into(),
            word_recognition: wr,
            comprehension: comp,
            reading_level: level.into(),
        }
    }

    fn leveled(level: &str, wr: f64, comp: f64) -> Assessment {
        assessment("s1", date(2024, 1, 1), "Running Record", wr, comp, level)
    }

    fn student(id: &str, name: &str, gender: Option<Gender>) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            gender,
        }
    }

    #[test]
    fn round1_half_away_from_zero() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(12.25), 12.3);
        assert_eq!(round1(-12.25), -12.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn overall_summary_empty_is_no_data() {
        assert_eq!(overall_summary(&[]), None);
    }

    #[test]
    fn overall_summary_averages() {
        let data = vec![
            leveled("Independent", 90.0, 88.0),
            leveled("Independent", 80.0, 82.0),
            leveled("Frustration", 40.0, 40.0),
        ];
        let summary = overall_summary(&data).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg_word_recognition, 70.0);
        assert_eq!(summary.avg_comprehension, 70.0);
        assert_eq!(summary.improvement_rate, 25.0);
    }

    #[test]
    fn improvement_rate_below_baseline_is_negative() {
        let data = vec![leveled("Frustration", 50.0, 50.0)];
        let summary = overall_summary(&data).unwrap();
        assert_eq!(summary.improvement_rate, -25.0);
    }

    #[test]
    fn reading_level_scenario() {
        let data = vec![
            leveled("Independent", 90.0, 88.0),
            leveled("Independent", 80.0, 82.0),
            leveled("Frustration", 40.0, 35.0),
        ];
        let levels = group_by_reading_level(&data);
        assert_eq!(levels.len(), 2);

        assert_eq!(levels[0].level, ReadingLevel::Independent);
        assert_eq!(levels[0].count, 2);
        assert_eq!(levels[0].percentage_of_total, 66.7);
        assert_eq!(levels[0].avg_word_recognition, 85.0);
        assert_eq!(levels[0].avg_comprehension, 85.0);

        assert_eq!(levels[1].level, ReadingLevel::Frustration);
        assert_eq!(levels[1].count, 1);
        assert_eq!(levels[1].percentage_of_total, 33.3);
        assert_eq!(levels[1].avg_word_recognition, 40.0);
        assert_eq!(levels[1].avg_comprehension, 35.0);
    }

    #[test]
    fn reading_level_display_order() {
        let data = vec![
            leveled("Frustration", 40.0, 35.0),
            leveled("Instructional", 70.0, 70.0),
            leveled("Independent", 95.0, 90.0),
        ];
        let order: Vec<_> = group_by_reading_level(&data)
            .iter()
            .map(|l| l.level)
            .collect();
        assert_eq!(order, ReadingLevel::ALL.to_vec());
    }

    #[test]
    fn reading_level_unrecognized_counts_toward_total_only() {
        let data = vec![
            leveled("Independent", 90.0, 90.0),
            leveled("Advanced", 100.0, 100.0),
        ];
        let levels = group_by_reading_level(&data);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].count, 1);
        assert_eq!(levels[0].percentage_of_total, 50.0);
        assert_eq!(levels[0].avg_word_recognition, 90.0);
    }

    #[test]
    fn reading_level_labels_match_exactly() {
        let data = vec![
            leveled("Independent", 90.0, 88.0),
            leveled("independent", 80.0, 82.0),
            leveled(" FRUSTRATION ", 40.0, 35.0),
        ];
        let levels = group_by_reading_level(&data);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].level, ReadingLevel::Independent);
        assert_eq!(levels[0].count, 1);
        assert_eq!(levels[0].percentage_of_total, 33.3);
        assert_eq!(levels[0].avg_word_recognition, 90.0);
    }

    #[test]
    fn reading_level_empty_input() {
        assert!(group_by_reading_level(&[]).is_empty());
    }

    #[test]
    fn group_by_type_first_seen_order() {
        let d = date(2024, 1, 1);
        let data = vec![
            assessment("s1", d, "Running Record", 80.0, 70.0, "Instructional"),
            assessment("s1", d, "Cloze", 60.0, 50.0, "Frustration"),
            assessment("s2", d, "Running Record", 90.0, 90.0, "Independent"),
        ];
        let types = group_by_type(&data);
        assert_eq!(types.len(), 2);
        assert_eq!(
            types.labels().collect::<Vec<_>>(),
            vec!["Running Record", "Cloze"]
        );

        let rr = types.get("Running Record").unwrap();
        assert_eq!(rr.count, 2);
        assert_eq!(rr.avg_word_recognition, 85.0);
        assert_eq!(rr.avg_comprehension, 80.0);

        let cloze = types.get("Cloze").unwrap();
        assert_eq!(cloze.count, 1);
        assert!(types.get("Oral").is_none());
    }

    #[test]
    fn group_by_type_serializes_as_ordered_list() {
        let data = vec![leveled("Independent", 90.0, 80.0)];
        let json = serde_json::to_value(group_by_type(&data)).unwrap();
        assert_eq!(json[0]["label"], "Running Record");
        assert_eq!(json[0]["stats"]["count"], 1);
    }

    #[test]
    fn student_progress_deltas() {
        let students = vec![student("s1", "Ada", Some(Gender::Female))];
        let data = vec![
            assessment("s1", date(2024, 6, 1), "Running Record", 85.0, 80.0, "Independent"),
            assessment("s1", date(2024, 1, 1), "Running Record", 70.0, 65.0, "Instructional"),
        ];
        let progress = student_progress(&students, &data);
        assert_eq!(progress.len(), 1);

        let p = &progress[0];
        assert_eq!(p.student_name, "Ada");
        assert_eq!(p.first_date, date(2024, 1, 1));
        assert_eq!(p.last_date, date(2024, 6, 1));
        assert_eq!(p.word_recognition_delta, 15.0);
        assert_eq!(p.comprehension_delta, 15.0);
        assert_eq!(p.current_reading_level, "Independent");
        assert_eq!(p.assessment_count, 2);
    }

    #[test]
    fn student_progress_single_assessment_has_zero_delta() {
        let students = vec![student("s1", "Ada", None)];
        let data = vec![assessment("s1", date(2024, 3, 1), "Cloze", 72.0, 61.0, "Instructional")];
        let p = &student_progress(&students, &data)[0];
        assert_eq!(p.first_date, p.last_date);
        assert_eq!(p.word_recognition_delta, 0.0);
        assert_eq!(p.comprehension_delta, 0.0);
    }

    #[test]
    fn student_progress_omits_students_without_assessments() {
        let students = vec![
            student("s1", "Ada", None),
            student("s2", "Bo", None),
            student("s3", "Cy", None),
        ];
        let d = date(2024, 1, 1);
        let data = vec![
            assessment("s3", d, "Cloze", 50.0, 50.0, "Frustration"),
            assessment("s1", d, "Cloze", 60.0, 60.0, "Instructional"),
        ];
        let names: Vec<_> = student_progress(&students, &data)
            .into_iter()
            .map(|p| p.student_name)
            .collect();
        assert_eq!(names, vec!["Ada", "Cy"]);
    }

    #[test]
    fn student_progress_equal_dates_keep_input_order() {
        let students = vec![student("s1", "Ada", None)];
        let d = date(2024, 2, 2);
        let data = vec![
            assessment("s1", d, "Cloze", 60.0, 55.0, "Frustration"),
            assessment("s1", d, "Cloze", 75.0, 70.0, "Instructional"),
        ];
        let p = &student_progress(&students, &data)[0];
        assert_eq!(p.word_recognition_delta, 15.0);
        assert_eq!(p.current_reading_level, "Instructional");
    }

    #[test]
    fn gender_excludes_unknown_and_genderless_students() {
        let students = vec![
            student("m", "Bo", Some(Gender::Male)),
            student("f", "Ada", Some(Gender::Female)),
            student("n", "Cy", None),
        ];
        let d = date(2024, 1, 1);
        let data = vec![
            assessment("m", d, "Cloze", 80.0, 70.0, "Instructional"),
            assessment("m", d, "Cloze", 60.0, 50.0, "Frustration"),
            assessment("f", d, "Cloze", 90.0, 95.0, "Independent"),
            assessment("n", d, "Cloze", 10.0, 10.0, "Frustration"),
            assessment("ghost", d, "Cloze", 0.0, 0.0, "Frustration"),
        ];
        let genders = group_by_gender(&students, &data);
        assert_eq!(genders.male.count, 2);
        assert_eq!(genders.male.avg_word_recognition, 70.0);
        assert_eq!(genders.male.avg_comprehension, 60.0);
        assert_eq!(genders.female.count, 1);
        assert_eq!(genders.get(Gender::Female).avg_comprehension, 95.0);
    }

    #[test]
    fn gender_empty_bucket_reports_zero() {
        let students = vec![student("f", "Ada", Some(Gender::Female))];
        let data = vec![leveled("Independent", 90.0, 90.0)];
        let genders = group_by_gender(&students, &data);
        assert!(genders.male.is_empty());
        assert_eq!(genders.male.avg_word_recognition, 0.0);
        assert_eq!(genders.male.avg_comprehension, 0.0);
        // s1 is not in the student list either
        assert!(genders.female.is_empty());

        let none = group_by_gender(&[], &[]);
        assert_eq!(none, GenderBreakdown::default());
    }

    #[test]
    fn operations_are_idempotent() {
        let students = vec![student("s1", "Ada", Some(Gender::Female))];
        let data = vec![
            assessment("s1", date(2024, 1, 1), "Cloze", 70.0, 65.0, "Instructional"),
            assessment("s1", date(2024, 6, 1), "Running Record", 85.0, 80.0, "Independent"),
        ];
        let before = data.clone();

        assert_eq!(overall_summary(&data), overall_summary(&data));
        assert_eq!(group_by_reading_level(&data), group_by_reading_level(&data));
        assert_eq!(group_by_type(&data), group_by_type(&data));
        assert_eq!(
            student_progress(&students, &data),
            student_progress(&students, &data)
        );
        assert_eq!(
            group_by_gender(&students, &data),
            group_by_gender(&students, &data)
        );
        assert_eq!(data, before);
    }
}
