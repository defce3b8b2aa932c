use chrono::NaiveDate;
use proptest::prelude::*;
use readstat_core::model::{Assessment, Gender, ReadingLevel, Student};
use readstat_core::statistics::{
    group_by_gender, group_by_reading_level, group_by_type, overall_summary, round1,
    student_progress,
};

const TYPES: [&str; 4] = ["Running Record", "Cloze", "Oral Fluency", "Silent Reading"];
const STUDENTS: [&str; 4] = ["s1", "s2", "s3", "s4"];

fn score() -> impl Strategy<Value = f64> {
    (0u32..=1000).prop_map(|n| n as f64 / 10.0)
}

fn assessment() -> impl Strategy<Value = Assessment> {
    (
        0usize..STUDENTS.len(),
        0i64..365,
        0usize..TYPES.len(),
        score(),
        score(),
        0usize..ReadingLevel::ALL.len(),
    )
        .prop_map(|(student, day, kind, wr, comp, level)| Assessment {
            student_id: STUDENTS[student].to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day),
            assessment_type: TYPES[kind].to_string(),
            word_recognition: wr,
            comprehension: comp,
            reading_level: ReadingLevel::ALL[level].to_string(),
        })
}

fn students() -> Vec<Student> {
    [
        ("s1", "Ada", Some(Gender::Female)),
        ("s2", "Bo", Some(Gender::Male)),
        ("s3", "Cy", None),
    ]
    .into_iter()
    .map(|(id, name, gender)| Student {
        id: id.into(),
        name: name.into(),
        gender,
    })
    .collect()
}

proptest! {
    #[test]
    fn summary_averages_match_sum_over_count(data in prop::collection::vec(assessment(), 1..60)) {
        let summary = overall_summary(&data).unwrap();
        let n = data.len() as f64;
        let wr: f64 = data.iter().map(|a| a.word_recognition).sum();
        let comp: f64 = data.iter().map(|a| a.comprehension).sum();

        prop_assert_eq!(summary.count, data.len());
        prop_assert_eq!(summary.avg_word_recognition, round1(wr / n));
        prop_assert_eq!(summary.avg_comprehension, round1(comp / n));
        prop_assert!((0.0..=100.0).contains(&summary.avg_word_recognition));
        prop_assert!((0.0..=100.0).contains(&summary.avg_comprehension));
        prop_assert!(summary.improvement_rate.is_finite());
    }

    #[test]
    fn level_percentages_sum_to_hundred(data in prop::collection::vec(assessment(), 1..60)) {
        let levels = group_by_reading_level(&data);
        let total: f64 = levels.iter().map(|l| l.percentage_of_total).sum();
        prop_assert!((total - 100.0).abs() < 0.2, "sum was {}", total);
        prop_assert_eq!(levels.iter().map(|l| l.count).sum::<usize>(), data.len());
    }

    #[test]
    fn one_type_entry_per_distinct_label(data in prop::collection::vec(assessment(), 0..60)) {
        let types = group_by_type(&data);
        let mut distinct: Vec<&str> = data.iter().map(|a| a.assessment_type.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();

        prop_assert_eq!(types.len(), distinct.len());
        prop_assert_eq!(types.iter().map(|(_, s)| s.count).sum::<usize>(), data.len());
    }

    #[test]
    fn progress_covers_only_assessed_students(data in prop::collection::vec(assessment(), 0..60)) {
        let roster = students();
        let progress = student_progress(&roster, &data);
        for p in &progress {
            prop_assert!(data.iter().any(|a| a.student_id == p.student_id));
            prop_assert!(p.first_date <= p.last_date);
        }
        let expected = roster
            .iter()
            .filter(|s| data.iter().any(|a| a.student_id == s.id))
            .count();
        prop_assert_eq!(progress.len(), expected);
    }

    #[test]
    fn gender_buckets_only_count_gendered_students(data in prop::collection::vec(assessment(), 0..60)) {
        let genders = group_by_gender(&students(), &data);
        let male = data.iter().filter(|a| a.student_id == "s2").count();
        let female = data.iter().filter(|a| a.student_id == "s1").count();
        prop_assert_eq!(genders.male.count, male);
        prop_assert_eq!(genders.female.count, female);
    }

    #[test]
    fn aggregation_is_repeatable(data in prop::collection::vec(assessment(), 0..30)) {
        let roster = students();
        prop_assert_eq!(overall_summary(&data), overall_summary(&data));
        prop_assert_eq!(group_by_reading_level(&data), group_by_reading_level(&data));
        prop_assert_eq!(group_by_type(&data), group_by_type(&data));
        prop_assert_eq!(student_progress(&roster, &data), student_progress(&roster, &data));
        prop_assert_eq!(group_by_gender(&roster, &data), group_by_gender(&roster, &data));
    }
}
