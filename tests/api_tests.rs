// tests/api_tests.rs

mod common;

use common::{TEST_SECRET, spawn_app};
use quiz_backend::{models::user::Role, utils::jwt::verify_jwt};
use serde_json::Value;

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn login_returns_token_matching_stored_user() {
    let app = spawn_app().await;

    for (username, password, role) in [("admin", "admin123", Role::Admin), ("user", "user123", Role::User)] {
        let response = app.login_response(username, password).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();

        let (stored_id, stored_role): (i64, String) =
            sqlx::query_as("SELECT id, role FROM users WHERE username = ?")
                .bind(username)
                .fetch_one(&app.pool)
                .await
                .unwrap();

        let claims = verify_jwt(body["token"].as_str().unwrap(), TEST_SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), stored_id);
        assert_eq!(claims.username, username);
        assert_eq!(claims.role, role);
        assert_eq!(claims.role.as_str(), stored_role);

        assert_eq!(body["user"]["id"], stored_id);
        assert_eq!(body["user"]["username"], username);
        assert_eq!(body["user"]["role"], stored_role);
        assert!(body["user"]["fullName"].is_string());
        assert!(body["user"].get("password").is_none());
    }
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = spawn_app().await;

    for (username, password) in [("admin", "wrong"), ("admin", "ADMIN123"), ("nobody", "admin123"), ("", "")] {
        let response = app.login_response(username, password).await;
        assert_eq!(response.status().as_u16(), 401, "{username}/{password}");
        let body: Value = response.json().await.unwrap();
        assert!(body.get("token").is_none());
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn protected_routes_require_valid_token() {
    let app = spawn_app().await;

    for path in ["/api/questions", "/api/results"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 401);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Access token required");

        let response = app.get(path, "not-a-token").await;
        assert_eq!(response.status().as_u16(), 401);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid token");
    }

    let response = app
        .client
        .post(app.url("/api/answers"))
        .json(&serde_json::json!({ "questionId": 1, "chosenAnswer": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Nothing was written by the rejected submission
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_answers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let app = spawn_app().await;
    let forged = quiz_backend::utils::jwt::sign_jwt(1, "admin", Role::Admin, "other_secret", 600).unwrap();

    let response = app.get("/api/questions", &forged).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn questions_are_listed_with_answers_in_id_order() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let questions = app.list_questions(&token).await;
    assert_eq!(questions.len(), 3);

    let ids: Vec<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    let second = &questions[1];
    assert_eq!(second["text"], "2 + 2 = ?");
    assert_eq!(second["correctAnswer"], "B");
    assert!(second["createdBy"].is_i64());
    assert!(second["createdAt"].is_string());

    let answers = second["answers"].as_array().unwrap();
    let labels: Vec<&str> = answers.iter().map(|a| a["label"].as_str().unwrap()).collect();
    assert_eq!(labels, ["A", "B", "C", "D"]);
    assert_eq!(answers[1]["text"], "4");
    assert_eq!(answers[1]["questionId"], second["id"]);
}

#[tokio::test]
async fn submission_correctness_is_exact_match() {
    let app = spawn_app().await;
    let token = app.user_token().await;
    let questions = app.list_questions(&token).await;
    let q = &questions[0];
    let id = q["id"].as_i64().unwrap();
    let correct = q["correctAnswer"].as_str().unwrap().to_string();

    let cases = [
        (correct.clone(), true),
        (correct.to_lowercase(), false),
        (format!("{correct} "), false),
        ("D".to_string(), false),
    ];

    for (chosen, expected) in cases {
        let response = app.submit(&token, id, &chosen).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["isCorrect"], expected, "chosen {chosen:?}");
    }

    // Append-only: repeated submissions for one question all count
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_answers WHERE question_id = ?")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 4);
}

#[tokio::test]
async fn submitting_for_missing_question_is_404() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let response = app.submit(&token, 9999, "A").await;
    assert_eq!(response.status().as_u16(), 404);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_answers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn results_with_no_answers_are_zero() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    let body: Value = app.get("/api/results", &token).await.json().await.unwrap();
    assert_eq!(body["totalQuestions"], 0);
    assert_eq!(body["correctAnswers"], 0);
    assert_eq!(body["wrongAnswers"], 0);
    assert_eq!(body["percentage"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn results_aggregate_only_the_callers_answers() {
    let app = spawn_app().await;
    let user = app.user_token().await;
    let admin = app.admin_token().await;

    // Seeded keys: q1 -> A, q2 -> B, q3 -> C
    for (id, chosen) in [(1, "A"), (2, "B"), (3, "C"), (1, "B")] {
        app.submit(&user, id, chosen).await;
    }
    app.submit(&admin, 2, "D").await;

    let body: Value = app.get("/api/results", &user).await.json().await.unwrap();
    assert_eq!(body["totalQuestions"], 4);
    assert_eq!(body["correctAnswers"], 3);
    assert_eq!(body["wrongAnswers"], 1);
    assert_eq!(body["percentage"].as_f64(), Some(75.0));

    let body: Value = app.get("/api/results", &admin).await.json().await.unwrap();
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["percentage"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn results_percentage_rounds_to_two_decimals() {
    let app = spawn_app().await;
    let token = app.user_token().await;

    for (id, chosen) in [(1, "A"), (2, "A"), (3, "A")] {
        app.submit(&token, id, chosen).await;
    }

    let body: Value = app.get("/api/results", &token).await.json().await.unwrap();
    let percentage = body["percentage"].as_f64().unwrap();
    assert!((percentage - 33.33).abs() < 1e-9, "got {percentage}");
}

#[tokio::test]
async fn openapi_document_is_public() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/api/openapi.json")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let doc: Value = response.json().await.unwrap();
    for path in ["/api/login", "/api/questions", "/api/answers", "/api/results", "/api/admin/questions/{id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(doc["components"]["securitySchemes"].get("bearer_auth").is_some());
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/login"))
        .json(&serde_json::json!({ "username": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("password"));
    assert!(body.get("token").is_none());

    let token = app.user_token().await;
    let response = app
        .client
        .post(app.url("/api/answers"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
