use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, MeResponse, MessageResponse, SignupRequest, TokenResponse},
    error::AuthError,
    jwt::AuthUser,
    services,
};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup/", post(signup))
        .route("/login/", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    services::register(&state, &payload.email, &payload.password, &payload.profile()).await?;
    Ok(Json(MessageResponse {
        message: "User created successfully",
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let issued = services::authenticate(&state, &payload.email, &payload.password).await?;
    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        token_type: issued.token_type,
    }))
}

#[instrument(skip(state, email))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<MeResponse>, AuthError> {
    let (account, profile) = services::current_account(&state, &email).await?;
    Ok(Json(MeResponse {
        id: account.id,
        email: account.email,
        created_at: account.created_at,
        profile,
    }))
}
