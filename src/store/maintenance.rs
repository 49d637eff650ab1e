use crate::errors::StoreError;
use crate::schema::{
    available_points::dsl as ap_dsl, awarded_points::dsl as awp_dsl, courses::dsl as courses_dsl,
    exercises::dsl as ex_dsl, feedback_answers::dsl as fa_dsl, feedback_questions::dsl as fq_dsl,
    reviews::dsl as rev_dsl, submissions::dsl as sub_dsl, users::dsl as users_dsl,
};
use crate::store::run_query;
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use tracing::{info, instrument};

/// Removes a course and everything hanging off it: exercises and their
/// available points, submissions and their reviews, feedback and awarded
/// points. One transaction, so a failure leaves the course intact.
#[instrument(skip(pool))]
pub async fn delete_course(pool: &Pool, course_id: i64) -> Result<(), StoreError> {
    let rows_affected = run_query(pool, move |conn| {
        conn.transaction::<_, DieselError, _>(|tx| {
            diesel::delete(awp_dsl::awarded_points.filter(awp_dsl::course_id.eq(course_id)))
                .execute(tx)?;
            diesel::delete(fa_dsl::feedback_answers.filter(fa_dsl::course_id.eq(course_id)))
                .execute(tx)?;
            diesel::delete(fq_dsl::feedback_questions.filter(fq_dsl::course_id.eq(course_id)))
                .execute(tx)?;

            let course_submissions = sub_dsl::submissions
                .filter(sub_dsl::course_id.eq(course_id))
                .select(sub_dsl::id);
            diesel::delete(rev_dsl::reviews.filter(rev_dsl::submission_id.eq_any(course_submissions)))
                .execute(tx)?;
            diesel::delete(sub_dsl::submissions.filter(sub_dsl::course_id.eq(course_id)))
                .execute(tx)?;

            let course_exercises = ex_dsl::exercises
                .filter(ex_dsl::course_id.eq(course_id))
                .select(ex_dsl::id);
            diesel::delete(ap_dsl::available_points.filter(ap_dsl::exercise_id.eq_any(course_exercises)))
                .execute(tx)?;
            diesel::delete(ex_dsl::exercises.filter(ex_dsl::course_id.eq(course_id))).execute(tx)?;

            diesel::delete(courses_dsl::courses.filter(courses_dsl::id.eq(course_id))).execute(tx)
        })
    })
    .await?;

    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!(
            "Course with ID {} not found",
            course_id
        )));
    }
    info!("Deleted course {} and its dependents", course_id);
    Ok(())
}

/// Removes a submission. Awarded points and feedback answers earned through
/// it stay, with their submission reference dropped; its reviews go.
#[instrument(skip(pool))]
pub async fn delete_submission(pool: &Pool, submission_id: i64) -> Result<(), StoreError> {
    let rows_affected = run_query(pool, move |conn| {
        conn.transaction::<_, DieselError, _>(|tx| {
            diesel::update(
                awp_dsl::awarded_points.filter(awp_dsl::submission_id.eq(submission_id)),
            )
            .set(awp_dsl::submission_id.eq(None::<i64>))
            .execute(tx)?;

            diesel::update(
                fa_dsl::feedback_answers.filter(fa_dsl::submission_id.eq(submission_id)),
            )
            .set(fa_dsl::submission_id.eq(None::<i64>))
            .execute(tx)?;

            diesel::delete(rev_dsl::reviews.filter(rev_dsl::submission_id.eq(submission_id)))
                .execute(tx)?;

            diesel::delete(sub_dsl::submissions.filter(sub_dsl::id.eq(submission_id))).execute(tx)
        })
    })
    .await?;

    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!(
            "Submission with ID {} not found",
            submission_id
        )));
    }
    info!("Deleted submission {}", submission_id);
    Ok(())
}

/// Removes a user together with their submissions, reviews and points.
/// Reviews the user wrote for others only lose their reviewer reference.
#[instrument(skip(pool))]
pub async fn delete_user(pool: &Pool, user_id: i64) -> Result<(), StoreError> {
    let rows_affected = run_query(pool, move |conn| {
        conn.transaction::<_, DieselError, _>(|tx| {
            diesel::delete(awp_dsl::awarded_points.filter(awp_dsl::user_id.eq(user_id)))
                .execute(tx)?;

            diesel::update(rev_dsl::reviews.filter(rev_dsl::reviewer_id.eq(user_id)))
                .set(rev_dsl::reviewer_id.eq(None::<i64>))
                .execute(tx)?;

            let user_submissions = sub_dsl::submissions
                .filter(sub_dsl::user_id.eq(user_id))
                .select(sub_dsl::id);
            diesel::delete(rev_dsl::reviews.filter(rev_dsl::submission_id.eq_any(user_submissions)))
                .execute(tx)?;

            let user_submissions = sub_dsl::submissions
                .filter(sub_dsl::user_id.eq(user_id))
                .select(sub_dsl::id.nullable());
            diesel::update(
                fa_dsl::feedback_answers.filter(fa_dsl::submission_id.eq_any(user_submissions)),
            )
            .set(fa_dsl::submission_id.eq(None::<i64>))
            .execute(tx)?;

            diesel::delete(sub_dsl::submissions.filter(sub_dsl::user_id.eq(user_id))).execute(tx)?;

            diesel::delete(users_dsl::users.filter(users_dsl::id.eq(user_id))).execute(tx)
        })
    })
    .await?;

    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!(
            "User with ID {} not found",
            user_id
        )));
    }
    info!("Deleted user {} and their dependents", user_id);
    Ok(())
}
