use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
            ResetPasswordRequest, ResetRequest, UpdateAccountRequest,
        },
        extractors::AuthUser,
        password::{hash_password, verify_password},
        repo::User,
        token::TokenKeys,
        validate::is_valid_email,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/reset_password", post(reset_request))
        .route("/auth/reset_password/:token", post(reset_password))
}

pub fn account_routes() -> Router<AppState> {
    Router::new().route("/account", get(get_account).put(update_account))
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("invalid email"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("password too short"));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    payload.email = payload.email.trim().to_lowercase();
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("username required"));
    }

    let hash = hash_password(&payload.password)?;

    // No pre-check: a duplicate username/email fails on the unique
    // constraint and comes back as 409.
    let user = User::create(&state.db, payload.username.trim(), &payload.email, &hash).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    // One generic failure for unknown email and wrong password alike.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign_session(user.id, payload.remember)?;
    let redirect_to = payload.next.unwrap_or_else(|| "/".to_string());

    info!(user_id = %user.id, remember = payload.remember, "user logged in");
    Ok(Json(LoginResponse {
        token,
        redirect_to,
        user: user.into(),
    }))
}

/// Session tokens are stateless, so logout is the client discarding its
/// token; the endpoint exists to gate the action behind a valid session
/// and record it.
#[instrument(skip_all)]
pub async fn logout(AuthUser(user_id): AuthUser) -> StatusCode {
    info!(user_id = %user_id, "user logged out");
    StatusCode::NO_CONTENT
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::Unauthorized("user not found"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(mut payload): Json<UpdateAccountRequest>,
) -> Result<Json<PublicUser>, AppError> {
    payload.email = payload.email.trim().to_lowercase();
    validate_email(&payload.email)?;
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("username required"));
    }

    let user =
        User::update_profile(&state.db, user_id, payload.username.trim(), &payload.email).await?;

    info!(user_id = %user.id, "account updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn reset_request(
    State(state): State<AppState>,
    Json(mut payload): Json<ResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    // Parity with the original flow: an unknown email is reported as such.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(AppError::NotFound("account"))?;

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign_reset(user.id)?;
    let reset_url = format!(
        "{}/auth/reset_password/{}",
        state.config.public_base_url, token
    );

    // Fire-and-forget: a delivery failure does not undo token issuance.
    if let Err(e) = state.mailer.send_password_reset(&user.email, &reset_url).await {
        warn!(error = %e, user_id = %user.id, "reset mail delivery failed");
    }

    info!(user_id = %user.id, "password reset requested");
    Ok(Json(MessageResponse {
        message: "An email has been sent with instructions to reset your password".into(),
    }))
}

#[instrument(skip(state, payload, token))]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let keys = TokenKeys::from_ref(&state);
    let user_id = keys
        .verify_reset(&token)
        .ok_or(AppError::InvalidOrExpiredToken)?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::InvalidOrExpiredToken)?;

    validate_password(&payload.password)?;
    let hash = hash_password(&payload.password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password reset");
    Ok(Json(MessageResponse {
        message: "Your password has been reset, you are now able to log in".into(),
    }))
}
