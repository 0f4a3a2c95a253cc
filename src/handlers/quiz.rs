// src/handlers/quiz.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::attempt::{SubmitQuizRequest, SubmitQuizResponse},
    scoring::SharedRecommender,
    services,
    store::SharedStore,
    utils::{extract::ValidatedJson, jwt::Claims},
};

/// Returns the full question set in stored order.
pub async fn list_questions(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let questions = services::quiz::list_questions(store.as_ref()).await?;
    Ok(Json(questions))
}

/// Scores the submitted answers and records the attempt for the caller.
pub async fn submit_quiz(
    State(store): State<SharedStore>,
    State(recommender): State<SharedRecommender>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Presence is enforced by the extractor.
    let answers = req.answers.unwrap_or_default();

    let attempt =
        services::quiz::submit_quiz(store.as_ref(), recommender.as_ref(), &claims.sub, answers)
            .await?;

    Ok(Json(SubmitQuizResponse {
        success: true,
        result: attempt.result,
        attempt_id: attempt.id,
    }))
}
