use crate::errors::StoreError;
use crate::model::exercise::Exercise;
use crate::model::submission::Submission;
use crate::model::user::User;
use crate::schema::{
    available_points::dsl as ap_dsl, exercises::dsl as ex_dsl, reviews::dsl as rev_dsl,
    submissions::dsl as sub_dsl,
};
use crate::store::points;
use crate::store::run_query;
use deadpool_diesel::postgres::Pool;
use diesel::dsl::exists;
use diesel::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

#[instrument(skip(pool))]
pub async fn find_exercise(pool: &Pool, exercise_id: i64) -> Result<Exercise, StoreError> {
    run_query(pool, move |conn| {
        ex_dsl::exercises.find(exercise_id).first::<Exercise>(conn)
    })
    .await
    .map_err(|err| match err {
        StoreError::NotFound(_) => {
            StoreError::NotFound(format!("Exercise with ID {} not found", exercise_id))
        }
        other => other,
    })
}

/// All exercises of a course exporting to the given gdocs sheet.
#[instrument(skip(pool))]
pub async fn course_gdocs_sheet_exercises(
    pool: &Pool,
    course_id: i64,
    sheet: &str,
) -> Result<Vec<Exercise>, StoreError> {
    let sheet = sheet.to_string();
    run_query(pool, move |conn| {
        ex_dsl::exercises
            .filter(ex_dsl::course_id.eq(course_id))
            .filter(ex_dsl::gdocs_sheet.eq(sheet))
            .order(ex_dsl::id.asc())
            .load::<Exercise>(conn)
    })
    .await
}

/// The exercise's submission history, newest first. Association is by
/// course and exercise name, not by exercise ID.
#[instrument(skip(pool, exercise))]
pub async fn submissions_for(
    pool: &Pool,
    exercise: &Exercise,
) -> Result<Vec<Submission>, StoreError> {
    let course_id = exercise.course_id;
    let exercise_name = exercise.name.clone();
    run_query(pool, move |conn| {
        sub_dsl::submissions
            .filter(sub_dsl::course_id.eq(course_id))
            .filter(sub_dsl::exercise_name.eq(exercise_name))
            .order(sub_dsl::created_at.desc())
            .load::<Submission>(conn)
    })
    .await
}

/// Whether the user has any graded submission for this exercise, passing
/// or not.
#[instrument(skip(pool, exercise, user))]
pub async fn attempted_by(
    pool: &Pool,
    exercise: &Exercise,
    user: &User,
) -> Result<bool, StoreError> {
    let course_id = exercise.course_id;
    let exercise_name = exercise.name.clone();
    let user_id = user.id;
    run_query(pool, move |conn| {
        diesel::select(exists(
            sub_dsl::submissions
                .filter(sub_dsl::user_id.eq(user_id))
                .filter(sub_dsl::course_id.eq(course_id))
                .filter(sub_dsl::exercise_name.eq(exercise_name))
                .filter(sub_dsl::processed.eq(true)),
        ))
        .get_result::<bool>(conn)
    })
    .await
}

/// Whether the user has a submission that passed every test. A submission
/// with a pretest error never counts, even if its pass flag was set
/// inconsistently upstream.
#[instrument(skip(pool, exercise, user))]
pub async fn completed_by(
    pool: &Pool,
    exercise: &Exercise,
    user: &User,
) -> Result<bool, StoreError> {
    let course_id = exercise.course_id;
    let exercise_name = exercise.name.clone();
    let user_id = user.id;
    run_query(pool, move |conn| {
        diesel::select(exists(
            sub_dsl::submissions
                .filter(sub_dsl::user_id.eq(user_id))
                .filter(sub_dsl::course_id.eq(course_id))
                .filter(sub_dsl::exercise_name.eq(exercise_name))
                .filter(sub_dsl::all_tests_passed.eq(true))
                .filter(
                    sub_dsl::pretest_error
                        .is_null()
                        .or(sub_dsl::pretest_error.eq("")),
                ),
        ))
        .get_result::<bool>(conn)
    })
    .await
}

/// Whether a reviewer has gone through one of the user's submissions. The
/// reviewed flag alone is not trusted; an actual review row must exist.
#[instrument(skip(pool, exercise, user))]
pub async fn reviewed_for(
    pool: &Pool,
    exercise: &Exercise,
    user: &User,
) -> Result<bool, StoreError> {
    let course_id = exercise.course_id;
    let exercise_name = exercise.name.clone();
    let user_id = user.id;
    run_query(pool, move |conn| {
        diesel::select(exists(
            sub_dsl::submissions
                .inner_join(rev_dsl::reviews)
                .filter(sub_dsl::user_id.eq(user_id))
                .filter(sub_dsl::course_id.eq(course_id))
                .filter(sub_dsl::exercise_name.eq(exercise_name))
                .filter(sub_dsl::reviewed.eq(true)),
        ))
        .get_result::<bool>(conn)
    })
    .await
}

/// Names of this exercise's points that can only be given by a code
/// review, in the order they were imported.
#[instrument(skip(pool, exercise))]
pub async fn available_review_points(
    pool: &Pool,
    exercise: &Exercise,
) -> Result<Vec<String>, StoreError> {
    let exercise_id = exercise.id;
    run_query(pool, move |conn| {
        ap_dsl::available_points
            .filter(ap_dsl::exercise_id.eq(exercise_id))
            .filter(ap_dsl::requires_review.eq(true))
            .order(ap_dsl::id.asc())
            .select(ap_dsl::name)
            .load::<String>(conn)
    })
    .await
}

/// Review points the user has not been awarded yet, in import order.
#[instrument(skip(pool, exercise, user))]
pub async fn missing_review_points_for(
    pool: &Pool,
    exercise: &Exercise,
    user: &User,
) -> Result<Vec<String>, StoreError> {
    let available = available_review_points(pool, exercise).await?;
    if available.is_empty() {
        return Ok(Vec::new());
    }

    let awarded: HashSet<String> = points::awarded_point_names(pool, exercise.course_id, user.id)
        .await?
        .into_iter()
        .collect();
    debug!(
        "User {} holds {} awarded points in course {}",
        user.id,
        awarded.len(),
        exercise.course_id
    );

    Ok(available
        .into_iter()
        .filter(|name| !awarded.contains(name))
        .collect())
}

#[instrument(skip(pool, exercise, user))]
pub async fn all_review_points_given_for(
    pool: &Pool,
    exercise: &Exercise,
    user: &User,
) -> Result<bool, StoreError> {
    Ok(missing_review_points_for(pool, exercise, user)
        .await?
        .is_empty())
}
