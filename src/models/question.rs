// src/models/question.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Represents the 'questions' table in the database.
/// Serialized with its column names for the admin listing.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    /// Label of the correct [`Answer`].
    pub correct_answer: String,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Represents the 'answers' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub label: String,
    #[serde(rename = "text")]
    #[sqlx(rename = "answer_text")]
    pub text: String,
}

/// A question with its answer options, as served to players.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithAnswers {
    pub id: i64,
    pub text: String,
    pub correct_answer: String,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub answers: Vec<Answer>,
}

/// One row of `questions LEFT JOIN answers`.
#[derive(Debug, FromRow)]
pub struct QuestionAnswerRow {
    pub id: i64,
    pub question_text: String,
    pub correct_answer: String,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub answer_id: Option<i64>,
    pub label: Option<String>,
    pub answer_text: Option<String>,
}

/// Folds joined rows (ordered by question id) into one entry per question.
pub fn group_answers(rows: Vec<QuestionAnswerRow>) -> Vec<QuestionWithAnswers> {
    let mut questions: Vec<QuestionWithAnswers> = Vec::new();

    for row in rows {
        if questions.last().is_none_or(|q| q.id != row.id) {
            questions.push(QuestionWithAnswers {
                id: row.id,
                text: row.question_text,
                correct_answer: row.correct_answer,
                created_by: row.created_by,
                created_at: row.created_at,
                answers: Vec::new(),
            });
        }

        if let (Some(answer_id), Some(label), Some(text), Some(question)) =
            (row.answer_id, row.label, row.answer_text, questions.last_mut())
        {
            question.answers.push(Answer {
                id: answer_id,
                question_id: row.id,
                label,
                text,
            });
        }
    }

    questions
}

/// One answer option in a create/update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 10))]
    pub label: String,
    #[validate(length(min = 1, max = 500))]
    pub text: String,
}

/// DTO for creating or replacing a question together with its answers.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_answer_key))]
pub struct QuestionPayload {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 10))]
    pub correct_answer: String,
    #[validate(length(min = 1), nested)]
    pub answers: Vec<AnswerInput>,
}

/// Labels must be unique and the correct answer must name one of them.
fn validate_answer_key(payload: &QuestionPayload) -> Result<(), ValidationError> {
    let mut labels = HashSet::new();
    for answer in &payload.answers {
        if !labels.insert(answer.label.as_str()) {
            return Err(ValidationError::new("duplicate_answer_label")
                .with_message(format!("answer label '{}' appears more than once", answer.label).into()));
        }
    }

    if !labels.contains(payload.correct_answer.as_str()) {
        return Err(ValidationError::new("unknown_correct_answer")
            .with_message("correctAnswer must match one of the answer labels".into()));
    }

    Ok(())
}
