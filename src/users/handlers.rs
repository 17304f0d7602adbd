use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    dto::MessageResponse,
    error::AppError,
    state::AppState,
    users::{
        dto::{LoginRequest, LoginResponse, RegisterRequest},
        password::{hash_password, verify_password},
        repo_types::NewUser,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid Credentials";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;

    let existing = state
        .store
        .find_user_by_email(&payload.email)
        .await
        .context("find user by email")?;
    if existing.is_some() {
        warn!(email = %payload.email, "email already in use");
        return Err(AppError::validation("Email already in use"));
    }

    let password_hash = hash_password(&payload.password, state.config.bcrypt_cost)?;

    let user = state
        .store
        .create_user(NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
        })
        .await
        .context("create user")?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Unknown email and wrong password answer with the same message.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;

    let user = match state
        .store
        .find_user_by_email(&payload.email)
        .await
        .context("find user by email")?
    {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::validation(INVALID_CREDENTIALS));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::validation(INVALID_CREDENTIALS));
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login Successful",
        username: user.username,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::app::test_client::{app, post};

    fn ana() -> serde_json::Value {
        json!({ "username": "ana", "email": "ana@example.com", "password": "s3cret!" })
    }

    #[tokio::test]
    async fn register_then_duplicate_email() {
        let app = app();

        let (status, body) = post(&app, "/register", ana()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "message": "User registered successfully" }));

        let again = json!({ "username": "other", "email": "ana@example.com", "password": "x" });
        let (status, body) = post(&app, "/register", again).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Email already in use" }));
    }

    #[tokio::test]
    async fn register_rejects_malformed_body() {
        let app = app();
        let (status, body) = post(&app, "/register", json!({ "email": "a@b.c" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid request body" }));
    }

    #[tokio::test]
    async fn login_success_returns_username() {
        let app = app();
        post(&app, "/register", ana()).await;

        let (status, body) = post(
            &app,
            "/login",
            json!({ "email": "ana@example.com", "password": "s3cret!" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Login Successful", "username": "ana" }));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let app = app();
        post(&app, "/register", ana()).await;

        let (wrong_pw_status, wrong_pw) = post(
            &app,
            "/login",
            json!({ "email": "ana@example.com", "password": "nope" }),
        )
        .await;
        let (unknown_status, unknown) = post(
            &app,
            "/login",
            json!({ "email": "nobody@example.com", "password": "s3cret!" }),
        )
        .await;

        assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_pw, json!({ "message": "Invalid Credentials" }));
        assert_eq!(wrong_pw, unknown);
    }
}
