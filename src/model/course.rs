use crate::schema::courses;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub hidden: bool,
    pub spreadsheet_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = courses)]
pub struct NewCourse {
    pub name: String,
    pub hidden: bool,
    pub spreadsheet_key: Option<String>,
    // created_at, updated_at have DB defaults
}
