// src/services/quiz.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        attempt::{AnswerRecord, Attempt},
        question::Question,
    },
    scoring::Recommender,
    store::Store,
};

pub async fn list_questions(store: &dyn Store) -> Result<Vec<Question>, AppError> {
    Ok(store.list_questions().await?)
}

/// Scores `answers`, records the attempt for `user_id` and returns it.
///
/// Answers are not checked against the question set. Nothing is stored if the
/// recommendation or the write fails.
pub async fn submit_quiz(
    store: &dyn Store,
    recommender: &dyn Recommender,
    user_id: &str,
    answers: Vec<AnswerRecord>,
) -> Result<Attempt, AppError> {
    let result = recommender.recommend(&answers).await?;

    let attempt = Attempt {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        answers,
        result,
        completed_at: Utc::now(),
    };

    store.insert_attempt(attempt.clone()).await?;
    tracing::info!(
        user_id,
        attempt_id = %attempt.id,
        career_path = %attempt.result.career_path,
        "quiz submitted"
    );

    Ok(attempt)
}
