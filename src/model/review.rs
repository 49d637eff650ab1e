use crate::schema::reviews;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub submission_id: i64,
    pub reviewer_id: Option<i64>,
    pub review_body: String,
    pub points: Option<String>,
    pub marked_as_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub submission_id: i64,
    pub reviewer_id: Option<i64>,
    pub review_body: String,
    pub points: Option<String>,
    // marked_as_read and the timestamps have DB defaults
}
