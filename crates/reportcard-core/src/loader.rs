//! JSON dataset loader.
//!
//! Loads the four datasets from a data directory, and checks them for
//! cross-reference problems.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::model::{Assessment, Question, Student, StudentResponse};

pub const STUDENTS: &str = "students";
pub const QUESTIONS: &str = "questions";
pub const ASSESSMENTS: &str = "assessments";
pub const STUDENT_RESPONSES: &str = "student-responses";

/// A dataset that could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {dataset} dataset at {}: {source}", path.display())]
    Read {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {dataset} dataset at {}: {source}", path.display())]
    Parse {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Name of the dataset that failed.
    pub fn dataset(&self) -> &'static str {
        match self {
            LoadError::Read { dataset, .. } | LoadError::Parse { dataset, .. } => dataset,
        }
    }
}

/// Path of a named dataset inside a data directory.
pub fn dataset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

/// Parse one dataset from a JSON string (useful for testing).
pub fn parse_records<T: DeserializeOwned>(
    content: &str,
    dataset: &'static str,
    source_path: &Path,
) -> Result<Vec<T>, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::Parse {
        dataset,
        path: source_path.to_path_buf(),
        source,
    })
}

/// Read and parse one named dataset from a data directory.
pub fn load_records<T: DeserializeOwned>(
    dir: &Path,
    dataset: &'static str,
) -> Result<Vec<T>, LoadError> {
    let path = dataset_path(dir, dataset);
    let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
        dataset,
        path: path.clone(),
        source,
    })?;
    let records: Vec<T> = parse_records(&content, dataset, &path)?;
    tracing::debug!("loaded {} {} from {}", records.len(), dataset, path.display());
    Ok(records)
}

/// Load all four datasets. Every one must load.
///
/// Each dataset is attempted even after an earlier one fails, so every
/// problem gets logged; the first error is returned.
pub fn load_dataset(dir: &Path) -> Result<Dataset, LoadError> {
    let students = load_records::<Student>(dir, STUDENTS);
    let questions = load_records::<Question>(dir, QUESTIONS);
    let assessments = load_records::<Assessment>(dir, ASSESSMENTS);
    let responses = load_records::<StudentResponse>(dir, STUDENT_RESPONSES);

    for err in [
        students.as_ref().err(),
        questions.as_ref().err(),
        assessments.as_ref().err(),
        responses.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    {
        tracing::error!("{err}");
    }

    Ok(Dataset {
        students: students?,
        questions: questions?,
        assessments: assessments?,
        responses: responses?,
    })
}

/// A warning from dataset consistency checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyWarning {
    /// Dataset the offending record lives in.
    pub dataset: &'static str,
    /// Id of the offending record.
    pub record_id: String,
    /// Warning message.
    pub message: String,
}

impl ConsistencyWarning {
    fn new(dataset: &'static str, record_id: &str, message: impl Into<String>) -> Self {
        Self {
            dataset,
            record_id: record_id.to_string(),
            message: message.into(),
        }
    }
}

fn duplicate_ids<'a>(
    dataset: &'static str,
    ids: impl Iterator<Item = &'a str>,
    warnings: &mut Vec<ConsistencyWarning>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            warnings.push(ConsistencyWarning::new(
                dataset,
                id,
                format!("duplicate id: {id}"),
            ));
        }
    }
}

/// Check a dataset for cross-reference problems.
///
/// Nothing here rejects data; reports still run against an inconsistent
/// dataset and apply their own lookup rules.
pub fn validate_dataset(ds: &Dataset) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();

    duplicate_ids(STUDENTS, ds.students.iter().map(|s| s.id.as_str()), &mut warnings);
    duplicate_ids(QUESTIONS, ds.questions.iter().map(|q| q.id.as_str()), &mut warnings);
    duplicate_ids(
        ASSESSMENTS,
        ds.assessments.iter().map(|a| a.id.as_str()),
        &mut warnings,
    );
    duplicate_ids(
        STUDENT_RESPONSES,
        ds.responses.iter().map(|r| r.id.as_str()),
        &mut warnings,
    );

    // Answer key must name exactly one option
    for q in &ds.questions {
        let matches = q
            .config
            .options
            .iter()
            .filter(|o| o.id == q.config.key)
            .count();
        if matches != 1 {
            warnings.push(ConsistencyWarning::new(
                QUESTIONS,
                &q.id,
                format!("key {} matches {matches} options", q.config.key),
            ));
        }
    }

    for a in &ds.assessments {
        for aq in &a.questions {
            if ds.question(&aq.question_id).is_err() {
                warnings.push(ConsistencyWarning::new(
                    ASSESSMENTS,
                    &a.id,
                    format!("references unknown question {}", aq.question_id),
                ));
            }
        }
    }

    for r in &ds.responses {
        if ds.student(&r.student.id).is_err() {
            warnings.push(ConsistencyWarning::new(
                STUDENT_RESPONSES,
                &r.id,
                format!("references unknown student {}", r.student.id),
            ));
        }
        if ds.assessment(&r.assessment_id).is_none() {
            warnings.push(ConsistencyWarning::new(
                STUDENT_RESPONSES,
                &r.id,
                format!("references unknown assessment {}", r.assessment_id),
            ));
        }

        let mut correct = 0usize;
        let mut all_known = true;
        for answer in &r.responses {
            match ds.question(&answer.question_id) {
                Ok(q) => correct += usize::from(q.is_correct(&answer.response)),
                Err(_) => {
                    all_known = false;
                    warnings.push(ConsistencyWarning::new(
                        STUDENT_RESPONSES,
                        &r.id,
                        format!("references unknown question {}", answer.question_id),
                    ));
                }
            }
        }

        if r.is_completed() && all_known && correct != r.results.raw_score as usize {
            warnings.push(ConsistencyWarning::new(
                STUDENT_RESPONSES,
                &r.id,
                format!(
                    "raw score {} disagrees with {correct} correct answers",
                    r.results.raw_score
                ),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssessmentQuestion;

    const STUDENTS_JSON: &str = r#"[
        { "id": "student1", "firstName": "Tony", "lastName": "Stark", "yearLevel": 6 }
    ]"#;

    const QUESTIONS_JSON: &str = r#"[
        {
            "id": "numeracy1",
            "stem": "What is 2 + 2?",
            "type": "multiple-choice",
            "strand": "Number and Algebra",
            "config": {
                "options": [
                    { "id": "option1", "label": "A", "value": "3" },
                    { "id": "option2", "label": "B", "value": "4" }
                ],
                "key": "option2",
                "hint": "Basic addition"
            }
        }
    ]"#;

    const ASSESSMENTS_JSON: &str = r#"[
        {
            "id": "assessment1",
            "name": "Numeracy assessment",
            "questions": [ { "questionId": "numeracy1", "position": 1 } ]
        }
    ]"#;

    const RESPONSES_JSON: &str = r#"[
        {
            "id": "response1",
            "assessmentId": "assessment1",
            "assigned": "2021-12-14",
            "started": "2021-12-16",
            "completed": "2021-12-16",
            "student": { "id": "student1", "yearLevel": 6 },
            "responses": [ { "questionId": "numeracy1", "response": "option2" } ],
            "results": { "rawScore": 1 }
        }
    ]"#;

    fn write_data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            (STUDENTS, STUDENTS_JSON),
            (QUESTIONS, QUESTIONS_JSON),
            (ASSESSMENTS, ASSESSMENTS_JSON),
            (STUDENT_RESPONSES, RESPONSES_JSON),
        ] {
            std::fs::write(dataset_path(dir.path(), name), content).unwrap();
        }
        dir
    }

    #[test]
    fn load_complete_directory() {
        let dir = write_data_dir();
        let ds = load_dataset(dir.path()).unwrap();
        assert_eq!(ds.students.len(), 1);
        assert_eq!(ds.questions.len(), 1);
        assert_eq!(ds.assessments.len(), 1);
        assert_eq!(ds.responses.len(), 1);
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn missing_dataset_is_a_read_error() {
        let dir = write_data_dir();
        std::fs::remove_file(dataset_path(dir.path(), ASSESSMENTS)).unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.dataset(), ASSESSMENTS);
        assert!(err.to_string().contains("assessments.json"));
    }

    #[test]
    fn malformed_dataset_is_a_parse_error() {
        let dir = write_data_dir();
        std::fs::write(dataset_path(dir.path(), STUDENTS), "[{ not json").unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(err.dataset(), STUDENTS);
    }

    #[test]
    fn fractional_completed_and_odd_started_still_load() {
        let dir = write_data_dir();
        let responses = RESPONSES_JSON
            .replace(
                r#""completed": "2021-12-16""#,
                r#""completed": "2021-12-16T10:46:00.123""#,
            )
            .replace(r#""started": "2021-12-16""#, r#""started": "shortly after lunch""#);
        std::fs::write(dataset_path(dir.path(), STUDENT_RESPONSES), responses).unwrap();

        let ds = load_dataset(dir.path()).unwrap();
        let r = &ds.responses[0];
        assert_eq!(r.started, "shortly after lunch");
        assert_eq!(
            r.completed.as_ref().unwrap().as_str(),
            "2021-12-16T10:46:00.123"
        );
    }

    #[test]
    fn bad_timestamp_names_dataset_and_value() {
        let bad = RESPONSES_JSON.replace(r#""completed": "2021-12-16""#, r#""completed": "yesterday""#);
        let err = parse_records::<StudentResponse>(
            &bad,
            STUDENT_RESPONSES,
            Path::new("student-responses.json"),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("student-responses"), "got: {msg}");
        assert!(msg.contains("yesterday"), "got: {msg}");
    }

    #[test]
    fn missing_field_is_reported() {
        let err = parse_records::<Student>(
            r#"[{ "id": "s1", "firstName": "Tony", "yearLevel": 6 }]"#,
            STUDENTS,
            Path::new("students.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("lastName"));
    }

    #[test]
    fn validate_flags_key_problems_and_dangling_references() {
        let dir = write_data_dir();
        let mut ds = load_dataset(dir.path()).unwrap();
        ds.questions[0].config.key = "option9".into();
        ds.assessments.push(Assessment {
            id: "assessment2".into(),
            name: "Broken".into(),
            questions: vec![AssessmentQuestion {
                question_id: "ghost".into(),
                position: 1,
            }],
        });
        ds.responses[0].student.id = "student9".into();

        let warnings = validate_dataset(&ds);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.contains(&"key option9 matches 0 options"), "{messages:?}");
        assert!(messages.contains(&"references unknown question ghost"));
        assert!(messages.contains(&"references unknown student student9"));
        // raw score 1 no longer matches: the key is broken
        assert!(messages.iter().any(|m| m.contains("raw score 1 disagrees")));
    }

    #[test]
    fn validate_flags_duplicate_ids() {
        let dir = write_data_dir();
        let mut ds = load_dataset(dir.path()).unwrap();
        ds.students.push(ds.students[0].clone());
        let warnings = validate_dataset(&ds);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].dataset, STUDENTS);
        assert_eq!(warnings[0].message, "duplicate id: student1");
    }
}
