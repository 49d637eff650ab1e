use diesel::prelude::*;
use exercise_store::errors::StoreError;
use exercise_store::model::point::NewAwardedPoint;
use exercise_store::schema;
use exercise_store::store::{maintenance, points};
use serial_test::serial;

mod helpers;
use helpers::{
    count_awarded_points, create_test_available_point, create_test_awarded_point,
    create_test_course, create_test_exercise, create_test_feedback_answer,
    create_test_feedback_question, create_test_review, create_test_submission, create_test_user,
    run_test_query, setup_test_environment,
};

fn point(course_id: i64, user_id: i64, submission_id: Option<i64>, name: &str) -> NewAwardedPoint {
    NewAwardedPoint {
        course_id,
        user_id,
        submission_id,
        name: name.to_string(),
    }
}

// award_point

#[tokio::test]
#[serial]
async fn awarding_the_same_point_twice_is_a_benign_duplicate() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let course = create_test_course(&pool, "course1").await;

    let first = points::award_point(&pool, point(course.id, user.id, None, "point1"))
        .await
        .unwrap();
    let second = points::award_point(&pool, point(course.id, user.id, None, "point1"))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(count_awarded_points(&pool, course.id, user.id, "point1").await, 1);
}

#[tokio::test]
#[serial]
async fn concurrent_awards_of_the_same_point_leave_exactly_one_row() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let course = create_test_course(&pool, "course1").await;

    let task_a = tokio::spawn({
        let pool = pool.clone();
        let point = point(course.id, user.id, None, "contested");
        async move { points::award_point(&pool, point).await }
    });
    let task_b = tokio::spawn({
        let pool = pool.clone();
        let point = point(course.id, user.id, None, "contested");
        async move { points::award_point(&pool, point).await }
    });

    let won_a = task_a.await.unwrap().unwrap();
    let won_b = task_b.await.unwrap().unwrap();

    assert!(won_a ^ won_b, "exactly one writer should insert the row");
    assert_eq!(
        count_awarded_points(&pool, course.id, user.id, "contested").await,
        1
    );
}

#[tokio::test]
#[serial]
async fn award_points_skips_names_the_user_already_holds() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let course = create_test_course(&pool, "course1").await;
    create_test_awarded_point(&pool, course.id, user.id, None, "point1").await;

    let names = vec!["point1".to_string(), "point2".to_string()];
    let newly_awarded = points::award_points(&pool, course.id, user.id, None, &names)
        .await
        .unwrap();

    assert_eq!(newly_awarded, 1);
    assert_eq!(
        points::awarded_point_names(&pool, course.id, user.id)
            .await
            .unwrap(),
        vec!["point1", "point2"]
    );
}

// referential integrity

#[tokio::test]
#[serial]
async fn deleting_a_submission_detaches_points_and_feedback_but_drops_reviews() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let reviewer = create_test_user(&pool, "reviewer1", true).await;
    let course = create_test_course(&pool, "course1").await;
    create_test_exercise(&pool, course.id, "ex").await;

    let submission_id =
        create_test_submission(&pool, user.id, course.id, "ex", true, true, None, true).await;
    let point_id =
        create_test_awarded_point(&pool, course.id, user.id, Some(submission_id), "point1").await;
    let question_id = create_test_feedback_question(&pool, course.id).await;
    let answer_id =
        create_test_feedback_answer(&pool, question_id, course.id, "ex", Some(submission_id)).await;
    create_test_review(&pool, submission_id, Some(reviewer.id)).await;

    maintenance::delete_submission(&pool, submission_id).await.unwrap();

    let point_submission = run_test_query(&pool, move |conn| {
        schema::awarded_points::table
            .find(point_id)
            .select(schema::awarded_points::submission_id)
            .get_result::<Option<i64>>(conn)
    })
    .await;
    let answer_submission = run_test_query(&pool, move |conn| {
        schema::feedback_answers::table
            .find(answer_id)
            .select(schema::feedback_answers::submission_id)
            .get_result::<Option<i64>>(conn)
    })
    .await;
    let (reviews, submissions) = run_test_query(&pool, |conn| {
        let reviews = schema::reviews::table.count().get_result::<i64>(conn)?;
        let submissions = schema::submissions::table.count().get_result::<i64>(conn)?;
        Ok((reviews, submissions))
    })
    .await;

    assert_eq!(point_submission, None);
    assert_eq!(answer_submission, None);
    assert_eq!(reviews, 0);
    assert_eq!(submissions, 0);
    assert_eq!(count_awarded_points(&pool, course.id, user.id, "point1").await, 1);
}

#[tokio::test]
#[serial]
async fn deleting_a_course_removes_all_dependents() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let course = create_test_course(&pool, "course1").await;
    let exercise = create_test_exercise(&pool, course.id, "ex").await;
    create_test_available_point(&pool, exercise.id, "point1", true).await;

    let submission_id =
        create_test_submission(&pool, user.id, course.id, "ex", true, true, None, true).await;
    create_test_awarded_point(&pool, course.id, user.id, Some(submission_id), "point1").await;
    let question_id = create_test_feedback_question(&pool, course.id).await;
    create_test_feedback_answer(&pool, question_id, course.id, "ex", Some(submission_id)).await;
    create_test_review(&pool, submission_id, None).await;

    maintenance::delete_course(&pool, course.id).await.unwrap();

    let remaining = run_test_query(&pool, |conn| {
        Ok((
            schema::courses::table.count().get_result::<i64>(conn)?,
            schema::exercises::table.count().get_result::<i64>(conn)?,
            schema::available_points::table.count().get_result::<i64>(conn)?,
            schema::submissions::table.count().get_result::<i64>(conn)?,
            schema::reviews::table.count().get_result::<i64>(conn)?,
            schema::awarded_points::table.count().get_result::<i64>(conn)?,
            schema::feedback_answers::table.count().get_result::<i64>(conn)?,
            schema::feedback_questions::table.count().get_result::<i64>(conn)?,
            schema::users::table.count().get_result::<i64>(conn)?,
        ))
    })
    .await;

    // the user is not course-scoped and survives
    assert_eq!(remaining, (0, 0, 0, 0, 0, 0, 0, 0, 1));
}

#[tokio::test]
#[serial]
async fn deleting_a_user_keeps_reviews_they_wrote_for_others() {
    let pool = setup_test_environment().await;
    let user = create_test_user(&pool, "user1", false).await;
    let reviewer = create_test_user(&pool, "reviewer1", true).await;
    let course = create_test_course(&pool, "course1").await;
    create_test_exercise(&pool, course.id, "ex").await;

    let submission_id =
        create_test_submission(&pool, user.id, course.id, "ex", true, true, None, true).await;
    create_test_awarded_point(&pool, course.id, user.id, Some(submission_id), "point1").await;
    let review_id = create_test_review(&pool, submission_id, Some(reviewer.id)).await;

    // the reviewer's own submission, reviewed by user1
    let reviewer_submission =
        create_test_submission(&pool, reviewer.id, course.id, "ex", true, false, None, true).await;
    let kept_review_id = create_test_review(&pool, reviewer_submission, Some(user.id)).await;

    maintenance::delete_user(&pool, user.id).await.unwrap();

    let (dropped, kept_reviewer, awarded, users) = run_test_query(&pool, move |conn| {
        let dropped = schema::reviews::table
            .find(review_id)
            .count()
            .get_result::<i64>(conn)?;
        let kept_reviewer = schema::reviews::table
            .find(kept_review_id)
            .select(schema::reviews::reviewer_id)
            .get_result::<Option<i64>>(conn)?;
        let awarded = schema::awarded_points::table.count().get_result::<i64>(conn)?;
        let users = schema::users::table.count().get_result::<i64>(conn)?;
        Ok((dropped, kept_reviewer, awarded, users))
    })
    .await;

    assert_eq!(dropped, 0, "reviews of the user's submissions go with them");
    assert_eq!(kept_reviewer, None, "authored reviews lose their reviewer");
    assert_eq!(awarded, 0);
    assert_eq!(users, 1);
}

#[tokio::test]
#[serial]
async fn deleting_an_unknown_course_is_not_found() {
    let pool = setup_test_environment().await;
    let result = maintenance::delete_course(&pool, 123456).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
