//! Account handlers: register, login, logout.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use bloghub_core::domain::{User, UserProfile};
use bloghub_core::ports::{PasswordService, TokenService};
use bloghub_shared::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Register a new account.
///
/// Creates the user together with an empty profile. Registration does not
/// issue a token; clients log in afterwards.
pub async fn register(
    state: web::Data<AppState>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    User::validate_registration(&body.username, &body.email, &body.password)?;
    let username = body.username.trim().to_string();

    if state.users.find_by_email(&body.email).await?.is_some() {
        return Err(AppError::Conflict(
            "This email is already registered.".to_string(),
        ));
    }
    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict(
            "This username is already taken.".to_string(),
        ));
    }

    let hash = passwords
        .hash(&body.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state.users.insert(User::new(username, body.email, hash)).await?;
    state.profiles.insert(UserProfile::new(user.id)).await?;

    tracing::info!(user_id = %user.id, "New account registered");

    Ok(HttpResponse::Created().json(ApiResponse::ok(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    })))
}

/// Login with username (or email) and password, returning a session token.
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    // The login field accepts either a username or an email address.
    let user = match state.users.find_by_username(&body.username).await? {
        Some(user) => Some(user),
        None if body.username.contains('@') => state.users.find_by_email(&body.username).await?,
        None => None,
    };

    let Some(user) = user else {
        return Err(AppError::Unauthorized);
    };

    let valid = passwords
        .verify(&body.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let mut roles = vec!["user".to_string()];
    if user.is_staff {
        roles.push("staff".to_string());
    }

    let token = tokens
        .generate_token(user.id, &user.username, &user.email, roles)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds() as u64,
    })))
}

/// Logout acknowledgement.
///
/// Tokens are stateless, so there is nothing to revoke server-side; clients
/// discard the token.
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::debug!(user_id = %identity.user_id, "User logged out");
    HttpResponse::Ok().json(ApiResponse::message("You have been logged out."))
}
