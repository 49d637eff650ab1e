use crate::schema::submissions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub exercise_name: String,
    pub processed: bool,
    pub all_tests_passed: bool,
    pub pretest_error: Option<String>,
    pub requests_review: bool,
    pub reviewed: bool,
    pub secret_token: Option<String>,
    pub points: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = submissions)]
pub struct NewSubmission {
    pub user_id: i64,
    pub course_id: i64,
    pub exercise_name: String,
    pub requests_review: bool,
    pub secret_token: Option<String>,
    // processed, all_tests_passed, reviewed and the timestamps have DB defaults
}

impl NewSubmission {
    /// Submissions reference exercises by name within a course, so an
    /// exercise rename does not orphan its history.
    pub fn new(user_id: i64, course_id: i64, exercise_name: impl Into<String>) -> Self {
        NewSubmission {
            user_id,
            course_id,
            exercise_name: exercise_name.into(),
            requests_review: false,
            secret_token: Some(Uuid::new_v4().to_string()),
        }
    }
}

/// Result of one sandbox run, recorded when grading completes.
#[derive(Debug, Clone)]
pub struct GradingOutcome {
    pub all_tests_passed: bool,
    pub pretest_error: Option<String>,
}
