use crate::errors::StoreError;
use crate::model::deadline::DeadlineSpec;
use crate::model::user::{Actor, User};
use crate::schema::exercises;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Sheet names reserved by the spreadsheet export.
pub const RESERVED_GDOCS_SHEETS: &[&str] = &["MASTER", "PUBLIC"];

#[derive(Queryable, Debug, Clone)]
pub struct Exercise {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub gdocs_sheet: Option<String>,
    pub hidden: bool,
    pub publish_time: Option<DateTime<Utc>>,
    pub returnable_forced: Option<bool>,
    pub deadline_spec: Option<String>,
    pub has_tests: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = exercises)]
pub struct NewExercise {
    pub course_id: i64,
    pub name: String,
    pub gdocs_sheet: Option<String>,
    pub hidden: bool,
    pub publish_time: Option<DateTime<Utc>>,
    pub returnable_forced: Option<bool>,
    pub deadline_spec: Option<String>,
    pub has_tests: bool,
    // created_at, updated_at have DB defaults
}

/// Per-exercise overrides delivered by course configuration at import time.
///
/// Replaces the original free-form options hash; unknown keys are rejected
/// during deserialization instead of being silently dropped.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ExerciseConfig {
    pub hidden: Option<bool>,
    pub points_visible: Option<bool>,
    pub returnable: Option<bool>,
    pub gdocs_sheet: Option<String>,
    pub deadline: Option<JsonValue>,
}

/// Hierarchical grouping derived from hyphen-segmented exercise names:
/// `k1-n1-ex` belongs to group `k1-n1`, whose parent is `k1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub course_id: i64,
    pub name: String,
}

impl ExerciseGroup {
    pub fn parent(&self) -> Option<ExerciseGroup> {
        self.name.rsplit_once('-').map(|(prefix, _)| ExerciseGroup {
            course_id: self.course_id,
            name: prefix.to_string(),
        })
    }
}

impl Exercise {
    /// Applies course-configuration overrides, recomputing the persisted
    /// gating columns the way the course import does. A malformed deadline
    /// is rejected here, before anything is stored.
    pub fn apply_config(&mut self, config: &ExerciseConfig) -> Result<(), StoreError> {
        if let Some(hidden) = config.hidden {
            self.hidden = hidden;
        }
        self.returnable_forced = config.returnable.or(self.returnable_forced);
        self.gdocs_sheet = self.configured_gdocs_sheet(config);

        if let Some(deadline) = &config.deadline {
            let encoded = serde_json::to_string(deadline).map_err(|err| {
                StoreError::DeadlineFormat(format!("Unencodable deadline value: {}", err))
            })?;
            DeadlineSpec::parse(Some(&encoded))?;
            self.deadline_spec = Some(encoded);
        }

        self.validate()
    }

    /// The configured sheet wins; otherwise the sheet is deduced from the
    /// exercise name. Exercises with points hidden export to no sheet at all.
    fn configured_gdocs_sheet(&self, config: &ExerciseConfig) -> Option<String> {
        if config.points_visible == Some(false) {
            return None;
        }
        match &config.gdocs_sheet {
            Some(sheet) if !sheet.is_empty() => Some(sheet.clone()),
            _ => Some(self.default_gdocs_sheet()),
        }
    }

    /// All but the last `-`-separated segment of the name; single-segment
    /// names fall back to the literal sheet `"root"`.
    pub fn default_gdocs_sheet(&self) -> String {
        match self.name.rsplit_once('-') {
            Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
            _ => "root".to_string(),
        }
    }

    /// Certain sheet names collide with the spreadsheet export's own tabs.
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(sheet) = &self.gdocs_sheet {
            if RESERVED_GDOCS_SHEETS.contains(&sheet.as_str()) {
                return Err(StoreError::Validation(format!(
                    "gdocs_sheet may not be named {:?}",
                    sheet
                )));
            }
        }
        Ok(())
    }

    /// Unlike the sheet default, a single-segment exercise has no group.
    pub fn exercise_group_name(&self) -> Option<String> {
        self.name
            .rsplit_once('-')
            .map(|(prefix, _)| prefix.to_string())
    }

    pub fn exercise_group(&self) -> Option<ExerciseGroup> {
        self.exercise_group_name().map(|name| ExerciseGroup {
            course_id: self.course_id,
            name,
        })
    }

    /// True iff `group` is this exercise's own group or an ancestor of it,
    /// within the same course.
    pub fn belongs_to_exercise_group(&self, group: &ExerciseGroup) -> bool {
        if group.course_id != self.course_id {
            return false;
        }
        match self.exercise_group_name() {
            Some(name) => {
                name == group.name
                    || name
                        .strip_prefix(group.name.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            None => false,
        }
    }

    pub fn deadline(&self) -> Result<DeadlineSpec, StoreError> {
        DeadlineSpec::parse(self.deadline_spec.as_deref())
    }

    /// The deadline gating this user's submissions, if any. Kept per-user so
    /// extension policies can hook in without changing every call site.
    pub fn deadline_for(&self, _user: &User) -> Result<Option<NaiveDateTime>, StoreError> {
        Ok(self.deadline()?.effective())
    }

    pub fn returnable(&self) -> bool {
        self.returnable_forced.unwrap_or(true)
    }

    pub fn published(&self) -> bool {
        match self.publish_time {
            Some(at) => at <= Utc::now(),
            None => true,
        }
    }

    /// Administrators may submit any returnable exercise; guests never may;
    /// everyone else is gated on visibility and the deadline.
    pub fn submittable_by(&self, actor: Actor<'_>) -> Result<bool, StoreError> {
        match actor {
            Actor::Guest => Ok(false),
            Actor::User(user) if user.administrator => Ok(self.returnable()),
            Actor::User(user) => {
                if self.hidden || !self.published() {
                    return Ok(false);
                }
                match self.deadline_for(user)? {
                    Some(deadline) => Ok(Local::now().naive_local() <= deadline),
                    None => Ok(true),
                }
            }
        }
    }

    pub fn visible_to(&self, actor: Actor<'_>) -> bool {
        if actor.is_administrator() {
            return true;
        }
        !self.hidden && self.published()
    }
}
