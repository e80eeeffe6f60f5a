// src/handlers/quiz.rs

use axum::{Extension, Json, extract::State};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    extract::AppJson,
    models::{
        question::{QuestionAnswerRow, QuestionWithAnswers, group_answers},
        user_answer::{AnswerTally, ResultsResponse, SubmitAnswerRequest, SubmitAnswerResponse},
    },
    utils::jwt::Claims,
};

/// Lists every question with its answer options, ordered by id.
#[utoipa::path(
    get,
    path = "/api/questions",
    tag = "quiz",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Questions with answers", body = [QuestionWithAnswers]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_questions(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<QuestionWithAnswers>>, AppError> {
    let rows = sqlx::query_as::<_, QuestionAnswerRow>(
        r#"
        SELECT
            q.id,
            q.question_text,
            q.correct_answer,
            q.created_by,
            q.created_at,
            a.id AS answer_id,
            a.label,
            a.answer_text
        FROM questions q
        LEFT JOIN answers a ON a.question_id = q.id
        ORDER BY q.id, a.id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(group_answers(rows)))
}

/// Records one answer for the caller and reports whether it was right.
///
/// Correctness is fixed at write time by exact, case-sensitive label match.
#[utoipa::path(
    post,
    path = "/api/answers",
    tag = "quiz",
    security(("bearer_auth" = [])),
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = SubmitAnswerResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Question not found"),
    )
)]
pub async fn submit_answer(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let user_id = claims.user_id()?;

    let correct_answer: String =
        sqlx::query_scalar("SELECT correct_answer FROM questions WHERE id = ?")
            .bind(req.question_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let is_correct = req.chosen_answer == correct_answer;

    sqlx::query(
        r#"
        INSERT INTO user_answers (user_id, question_id, chosen_answer, is_correct)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(req.question_id)
    .bind(&req.chosen_answer)
    .bind(is_correct)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record answer: {:?}", e);
        AppError::from(e)
    })?;

    tracing::debug!(user_id, question_id = req.question_id, is_correct, "Answer recorded");

    Ok(Json(SubmitAnswerResponse { is_correct }))
}

/// Aggregates every answer the caller has ever submitted.
#[utoipa::path(
    get,
    path = "/api/results",
    tag = "quiz",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller statistics", body = ResultsResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn get_results(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ResultsResponse>, AppError> {
    let user_id = claims.user_id()?;

    let tally = sqlx::query_as::<_, AnswerTally>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(CASE WHEN is_correct THEN 1 END) AS correct,
            COUNT(CASE WHEN NOT is_correct THEN 1 END) AS wrong
        FROM user_answers
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to aggregate results: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(ResultsResponse::from(tally)))
}
