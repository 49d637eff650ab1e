use crate::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub administrator: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub administrator: bool,
    // created_at, updated_at have DB defaults
}

/// Identity asking a gating question. Guests carry no user record.
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
    Guest,
    User(&'a User),
}

impl Actor<'_> {
    pub fn is_administrator(&self) -> bool {
        matches!(self, Actor::User(user) if user.administrator)
    }
}
