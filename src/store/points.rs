use crate::errors::StoreError;
use crate::model::point::NewAwardedPoint;
use crate::schema::awarded_points::dsl as awp_dsl;
use crate::store::run_query;
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{info, instrument, warn};

/// Awards a named point to a user. Returns `true` if a new row was written
/// and `false` if the point was already awarded.
///
/// The unique indexes on awarded_points serialize concurrent grading
/// workers: the losing INSERT surfaces as a unique violation and is treated
/// as a benign duplicate, so exactly one row survives.
#[instrument(skip(pool, point))]
pub async fn award_point(pool: &Pool, point: NewAwardedPoint) -> Result<bool, StoreError> {
    let name = point.name.clone();
    let course_id = point.course_id;
    let user_id = point.user_id;

    let insert_result = run_query(pool, move |conn| {
        diesel::insert_into(awp_dsl::awarded_points)
            .values(&point)
            .execute(conn)
    })
    .await;

    match insert_result {
        Ok(_) => {
            info!(
                "Awarded point {:?} to user {} in course {}",
                name, user_id, course_id
            );
            Ok(true)
        }
        Err(StoreError::Database(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            info,
        ))) => {
            warn!(
                "Point {:?} already awarded to user {} in course {}. Details: {}",
                name,
                user_id,
                course_id,
                info.message()
            );
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Awards every named point against the same submission, skipping the ones
/// the user already holds.
#[instrument(skip(pool, names))]
pub async fn award_points(
    pool: &Pool,
    course_id: i64,
    user_id: i64,
    submission_id: Option<i64>,
    names: &[String],
) -> Result<usize, StoreError> {
    let mut awarded = 0;
    for name in names {
        let point = NewAwardedPoint {
            course_id,
            user_id,
            submission_id,
            name: name.clone(),
        };
        if award_point(pool, point).await? {
            awarded += 1;
        }
    }
    Ok(awarded)
}

/// Names of every point the user holds in the course.
#[instrument(skip(pool))]
pub async fn awarded_point_names(
    pool: &Pool,
    course_id: i64,
    user_id: i64,
) -> Result<Vec<String>, StoreError> {
    run_query(pool, move |conn| {
        awp_dsl::awarded_points
            .filter(awp_dsl::course_id.eq(course_id))
            .filter(awp_dsl::user_id.eq(user_id))
            .order(awp_dsl::id.asc())
            .select(awp_dsl::name)
            .load::<String>(conn)
    })
    .await
}
