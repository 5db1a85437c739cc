//! The loaded, read-only collection of all four datasets.

use crate::error::{ReportError, ReportResult};
use crate::model::{Assessment, Question, Student, StudentResponse};
use crate::timestamp::Timestamp;

/// Everything a report needs, loaded once per run and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub questions: Vec<Question>,
    pub assessments: Vec<Assessment>,
    pub responses: Vec<StudentResponse>,
}

impl Dataset {
    /// Look up a student by id.
    pub fn student(&self, id: &str) -> ReportResult<&Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ReportError::StudentNotFound(id.to_string()))
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> ReportResult<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| ReportError::QuestionNotFound {
                question_id: id.to_string(),
            })
    }

    /// Look up an assessment by id.
    pub fn assessment(&self, id: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }

    /// Completed attempts of a student, in dataset order.
    pub fn completed_attempts(&self, student_id: &str) -> Vec<CompletedAttempt<'_>> {
        self.responses
            .iter()
            .filter(|r| r.student.id == student_id)
            .filter_map(|r| {
                r.completed.as_ref().map(|completed| CompletedAttempt {
                    response: r,
                    completed,
                })
            })
            .collect()
    }

    /// The most recent completed attempt of a student.
    ///
    /// Ties on the completion time go to the attempt that appears last in the
    /// dataset.
    pub fn latest_completed(&self, student_id: &str) -> ReportResult<CompletedAttempt<'_>> {
        // max_by_key returns the last of several equal maxima.
        self.completed_attempts(student_id)
            .into_iter()
            .max_by_key(|a| a.completed.naive())
            .ok_or_else(|| ReportError::NoCompletedAttempts {
                student_id: student_id.to_string(),
            })
    }

    /// Distinct strands across all questions, in first-seen order.
    pub fn strands(&self) -> Vec<&str> {
        let mut strands: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !strands.contains(&q.strand.as_str()) {
                strands.push(&q.strand);
            }
        }
        strands
    }
}

/// A student response known to be completed, paired with its completion time.
#[derive(Debug, Clone, Copy)]
pub struct CompletedAttempt<'a> {
    pub response: &'a StudentResponse,
    pub completed: &'a Timestamp,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn student_lookup() {
        let ds = tony("option2", 1);
        assert_eq!(ds.student("student1").unwrap().full_name(), "Tony Stark");
        assert_eq!(
            ds.student("nobody").unwrap_err(),
            ReportError::StudentNotFound("nobody".into())
        );
    }

    #[test]
    fn completed_attempts_skip_in_progress_and_other_students() {
        let mut ds = tony("option2", 1);
        ds.responses.push(attempt("r2", "student1", "a1", None, &[], 0));
        ds.responses
            .push(attempt("r3", "student2", "a1", Some("2021-12-20"), &[], 0));
        let ids: Vec<&str> = ds
            .completed_attempts("student1")
            .iter()
            .map(|a| a.response.id.as_str())
            .collect();
        assert_eq!(ids, vec!["response1"]);
    }

    #[test]
    fn latest_completed_picks_max_timestamp() {
        let mut ds = tony("option2", 1);
        ds.responses.insert(
            0,
            attempt("newer", "student1", "a1", Some("16/12/2022 09:00:00"), &[], 0),
        );
        ds.responses
            .push(attempt("older", "student1", "a1", Some("2020-01-01"), &[], 0));
        assert_eq!(ds.latest_completed("student1").unwrap().response.id, "newer");
    }

    #[test]
    fn latest_completed_tie_goes_to_last_in_dataset() {
        let mut ds = tony("option2", 1);
        ds.responses
            .push(attempt("same-time", "student1", "a1", Some("2021-12-16"), &[], 0));
        assert_eq!(ds.latest_completed("student1").unwrap().response.id, "same-time");
    }

    #[test]
    fn latest_completed_without_attempts() {
        let mut ds = tony("option2", 1);
        ds.responses.clear();
        assert!(matches!(
            ds.latest_completed("student1"),
            Err(ReportError::NoCompletedAttempts { .. })
        ));
    }

    #[test]
    fn strands_in_first_seen_order() {
        let ds = Dataset {
            questions: vec![
                question("q1", "Measurement", "option1"),
                question("q2", "Number and Algebra", "option1"),
                question("q3", "Measurement", "option1"),
                question("q4", "Statistics", "option1"),
            ],
            ..Dataset::default()
        };
        assert_eq!(
            ds.strands(),
            vec!["Measurement", "Number and Algebra", "Statistics"]
        );
    }
}
