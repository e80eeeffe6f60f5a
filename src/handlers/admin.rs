// src/handlers/admin.rs
//
// Every route here sits behind `admin_middleware`; handlers assume an admin caller.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use validator::Validate;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    models::question::{AnswerInput, Question, QuestionPayload},
    utils::jwt::Claims,
};

/// Inserts the answer set for a question in one statement.
async fn insert_answers(
    conn: &mut SqliteConnection,
    question_id: i64,
    answers: &[AnswerInput],
) -> Result<(), sqlx::Error> {
    if answers.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO answers (question_id, label, answer_text) ");
    builder.push_values(answers, |mut row, answer| {
        row.push_bind(question_id)
            .push_bind(answer.label.clone())
            .push_bind(answer.text.clone());
    });

    builder.build().execute(conn).await?;
    Ok(())
}

/// Lists raw question rows, without answers.
#[utoipa::path(
    get,
    path = "/api/admin/questions",
    operation_id = "admin_list_questions",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All question rows", body = [Question]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required"),
    )
)]
pub async fn list_questions(State(pool): State<SqlitePool>) -> Result<Json<Vec<Question>>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question_text, correct_answer, created_by, created_at
        FROM questions
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(questions))
}

/// Creates a question and its answers in one transaction.
/// The caller is recorded as the creator.
#[utoipa::path(
    post,
    path = "/api/admin/questions",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = QuestionPayload,
    responses(
        (status = 201, description = "Question created"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required"),
    )
)]
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<QuestionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let creator = claims.user_id()?;

    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO questions (question_text, correct_answer, created_by)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&payload.question_text)
    .bind(&payload.correct_answer)
    .bind(creator)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;

    insert_answers(&mut *tx, id, &payload.answers).await?;
    tx.commit().await?;

    tracing::info!(question_id = id, answers = payload.answers.len(), "Question created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "Question created successfully" })),
    ))
}

/// Replaces a question's text, correct answer and full answer set atomically.
///
/// An unknown id is a silent no-op.
#[utoipa::path(
    put,
    path = "/api/admin/questions/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Question id")),
    request_body = QuestionPayload,
    responses(
        (status = 200, description = "Question updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required"),
    )
)]
pub async fn update_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<QuestionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE questions SET question_text = ?, correct_answer = ? WHERE id = ?",
    )
    .bind(&payload.question_text)
    .bind(&payload.correct_answer)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update question: {:?}", e);
        AppError::from(e)
    })?
    .rows_affected();

    if updated == 0 {
        tracing::debug!(question_id = id, "Update targeted a missing question");
    } else {
        sqlx::query("DELETE FROM answers WHERE question_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_answers(&mut *tx, id, &payload.answers).await?;
    }

    tx.commit().await?;

    Ok(Json(json!({ "message": "Question updated successfully" })))
}

/// Deletes a question and its answers. Deleting an unknown id is a no-op.
#[utoipa::path(
    delete,
    path = "/api/admin/questions/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required"),
    )
)]
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM answers WHERE question_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::from(e)
        })?
        .rows_affected();

    tx.commit().await?;

    if deleted > 0 {
        tracing::info!(question_id = id, "Question deleted");
    }

    Ok(Json(json!({ "message": "Question deleted successfully" })))
}
