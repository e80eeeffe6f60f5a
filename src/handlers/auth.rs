// src/handlers/auth.rs

use axum::{Json, extract::State};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    extract::AppJson,
    models::user::{LoginRequest, LoginResponse, Role, User, UserInfo},
    utils::{hash::verify_password, jwt::sign_jwt},
};

fn invalid_credentials() -> AppError {
    AppError::AuthError("Invalid credentials".to_string())
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, full_name, role, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let user = user.ok_or_else(invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::info!(username = %user.username, "Rejected login: wrong password");
        return Err(invalid_credentials());
    }

    let role: Role = user
        .role
        .parse()
        .map_err(AppError::InternalServerError)?;

    let token = sign_jwt(
        user.id,
        &user.username,
        role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role,
        },
    }))
}
