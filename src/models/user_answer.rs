// src/models/user_answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// DTO for submitting one answer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    /// Label of the chosen option, compared case-sensitively.
    pub chosen_answer: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    pub is_correct: bool,
}

/// Raw aggregate over a user's `user_answers` rows.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct AnswerTally {
    pub total: i64,
    pub correct: i64,
    pub wrong: i64,
}

/// Per-user scoring statistics.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    /// correct / total * 100, two decimals; 0 when nothing was answered.
    pub percentage: f64,
}

impl From<AnswerTally> for ResultsResponse {
    fn from(tally: AnswerTally) -> Self {
        Self {
            total_questions: tally.total,
            correct_answers: tally.correct,
            wrong_answers: tally.wrong,
            percentage: percentage(tally.correct, tally.total),
        }
    }
}

fn percentage(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_of_four_is_seventy_five() {
        let results = ResultsResponse::from(AnswerTally { total: 4, correct: 3, wrong: 1 });
        assert_eq!(
            results,
            ResultsResponse {
                total_questions: 4,
                correct_answers: 3,
                wrong_answers: 1,
                percentage: 75.0,
            }
        );
    }

    #[test]
    fn nothing_answered_is_zero() {
        assert_eq!(ResultsResponse::from(AnswerTally::default()).percentage, 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 8), 12.5);
    }
}
