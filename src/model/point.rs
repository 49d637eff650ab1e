use crate::schema::{available_points, awarded_points};
use diesel::prelude::*;
use serde::Serialize;

/// A named achievement an exercise can award. Created at exercise import
/// time, immutable thereafter.
#[derive(Queryable, Serialize, Debug, Clone)]
pub struct AvailablePoint {
    pub id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub requires_review: bool,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = available_points)]
pub struct NewAvailablePoint {
    pub exercise_id: i64,
    pub name: String,
    pub requires_review: bool,
}

/// Record that a user has earned a named point. Never updated; the unique
/// indexes on (course_id, user_id, name) and (user_id, submission_id, name)
/// make awarding idempotent.
#[derive(Queryable, Serialize, Debug, Clone)]
pub struct AwardedPoint {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub submission_id: Option<i64>,
    pub name: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = awarded_points)]
pub struct NewAwardedPoint {
    pub course_id: i64,
    pub user_id: i64,
    pub submission_id: Option<i64>,
    pub name: String,
}
