use crate::schema::{feedback_answers, feedback_questions};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct FeedbackQuestion {
    pub id: i64,
    pub course_id: i64,
    pub question: String,
    pub kind: String,
    pub position: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = feedback_questions)]
pub struct NewFeedbackQuestion {
    pub course_id: i64,
    pub question: String,
    pub kind: String,
    pub position: i32,
}

/// Answers survive the deletion of the submission they were given for;
/// like awarded points, only the submission reference is dropped.
#[derive(Queryable, Serialize, Debug, Clone)]
pub struct FeedbackAnswer {
    pub id: i64,
    pub feedback_question_id: i64,
    pub course_id: i64,
    pub exercise_name: String,
    pub submission_id: Option<i64>,
    pub answer: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = feedback_answers)]
pub struct NewFeedbackAnswer {
    pub feedback_question_id: i64,
    pub course_id: i64,
    pub exercise_name: String,
    pub submission_id: Option<i64>,
    pub answer: String,
}
