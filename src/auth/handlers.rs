use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, WithdrawResponse},
        extract::ValidJson,
        jwt::AuthUser,
    },
    error::AuthResult,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/auth/withdraw", delete(withdraw))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let access_token = state.auth.register(payload).await?;
    Ok(Json(AuthResponse { access_token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let access_token = state.auth.login(payload).await?;
    Ok(Json(AuthResponse { access_token }))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AuthResult<Json<PublicUser>> {
    Ok(Json(state.auth.profile(user_id).await?))
}

#[instrument(skip(state))]
pub async fn withdraw(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AuthResult<Json<WithdrawResponse>> {
    state.auth.delete_account(user_id).await?;
    Ok(Json(WithdrawResponse {
        message: "Account deleted".into(),
    }))
}
