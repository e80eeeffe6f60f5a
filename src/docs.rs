// src/docs.rs

use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    handlers::{admin, auth, quiz},
    models::{
        question::{Answer, AnswerInput, Question, QuestionPayload, QuestionWithAnswers},
        user::{LoginRequest, LoginResponse, Role, UserInfo},
        user_answer::{ResultsResponse, SubmitAnswerRequest, SubmitAnswerResponse},
    },
};

/// OpenAPI description of the whole HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(title = "Quiz API", description = "Login, questions, answers, results and admin question management."),
    paths(
        auth::login,
        quiz::list_questions,
        quiz::submit_answer,
        quiz::get_results,
        admin::list_questions,
        admin::create_question,
        admin::update_question,
        admin::delete_question,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        UserInfo,
        Role,
        Question,
        QuestionWithAnswers,
        Answer,
        AnswerInput,
        QuestionPayload,
        SubmitAnswerRequest,
        SubmitAnswerResponse,
        ResultsResponse,
    )),
    modifiers(&BearerAuth),
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serves the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
