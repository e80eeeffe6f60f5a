// tests/common/mod.rs

#![allow(dead_code)]

use quiz_backend::{config::Config, db, routes, seed, state::AppState};
use serde_json::Value;
use sqlx::SqlitePool;

pub const TEST_SECRET: &str = "test_secret_for_integration_tests";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port over a fresh, seeded in-memory database.
pub async fn spawn_app() -> TestApp {
    // 1. Single-connection pool: every connection to :memory: is its own database
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");

    // 2. Schema and default data
    db::migrate(&pool).await.expect("Failed to migrate database");
    seed::run(&pool).await.expect("Failed to seed database");

    // 3. Test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        db_max_connections: 1,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        pool,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login_response(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Logs in and returns the bearer token.
    pub async fn token(&self, username: &str, password: &str) -> String {
        let body: Value = self
            .login_response(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse login json");
        body["token"].as_str().expect("Token not found").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token("admin", "admin123").await
    }

    pub async fn user_token(&self) -> String {
        self.token("user", "user123").await
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_questions(&self, token: &str) -> Vec<Value> {
        let response = self.get("/api/questions", token).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Failed to parse questions")
    }

    pub async fn submit(&self, token: &str, question_id: i64, chosen: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/answers"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "questionId": question_id, "chosenAnswer": chosen }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_question(&self, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/admin/questions"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
