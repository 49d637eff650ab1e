use crate::errors::StoreError;
use crate::model::submission::{GradingOutcome, NewSubmission, Submission};
use crate::schema::submissions::dsl as sub_dsl;
use crate::store::run_query;
use deadpool_diesel::postgres::Pool;
use diesel::dsl::now;
use diesel::prelude::*;
use tracing::{error, info, instrument};

/// Records a new submission attempt and returns its ID. Grading happens
/// asynchronously; the row starts out unprocessed.
#[instrument(skip(pool, new_submission))]
pub async fn create_submission(
    pool: &Pool,
    new_submission: NewSubmission,
) -> Result<i64, StoreError> {
    let user_id = new_submission.user_id;
    let exercise_name = new_submission.exercise_name.clone();

    let new_id = run_query(pool, move |conn| {
        diesel::insert_into(sub_dsl::submissions)
            .values(&new_submission)
            .returning(sub_dsl::id)
            .get_result::<i64>(conn)
    })
    .await?;

    info!(
        "Recorded submission {} for exercise {:?} by user {}",
        new_id, exercise_name, user_id
    );
    Ok(new_id)
}

#[instrument(skip(pool))]
pub async fn find_submission(pool: &Pool, submission_id: i64) -> Result<Submission, StoreError> {
    run_query(pool, move |conn| {
        sub_dsl::submissions
            .find(submission_id)
            .first::<Submission>(conn)
    })
    .await
    .map_err(|err| match err {
        StoreError::NotFound(_) => {
            StoreError::NotFound(format!("Submission with ID {} not found", submission_id))
        }
        other => other,
    })
}

/// Stores the grading outcome once the sandbox run finishes.
#[instrument(skip(pool, outcome))]
pub async fn mark_processed(
    pool: &Pool,
    submission_id: i64,
    outcome: GradingOutcome,
) -> Result<(), StoreError> {
    let rows_affected = run_query(pool, move |conn| {
        diesel::update(sub_dsl::submissions.find(submission_id))
            .set((
                sub_dsl::processed.eq(true),
                sub_dsl::all_tests_passed.eq(outcome.all_tests_passed),
                sub_dsl::pretest_error.eq(outcome.pretest_error),
                sub_dsl::updated_at.eq(now),
            ))
            .execute(conn)
    })
    .await?;

    match rows_affected {
        0 => {
            error!(
                "Not found, grading outcome not stored for submission_id: {}",
                submission_id
            );
            Err(StoreError::NotFound(format!(
                "Submission with ID {} not found",
                submission_id
            )))
        }
        _ => {
            info!("Stored grading outcome for submission {}", submission_id);
            Ok(())
        }
    }
}

/// Flags a submission as reviewed. The review rows themselves are written
/// by the review subsystem.
#[instrument(skip(pool))]
pub async fn mark_reviewed(pool: &Pool, submission_id: i64) -> Result<(), StoreError> {
    let rows_affected = run_query(pool, move |conn| {
        diesel::update(sub_dsl::submissions.find(submission_id))
            .set((sub_dsl::reviewed.eq(true), sub_dsl::updated_at.eq(now)))
            .execute(conn)
    })
    .await?;

    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!(
            "Submission with ID {} not found",
            submission_id
        )));
    }
    Ok(())
}
