use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::extractors::CurrentUser;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ApiError, ApiResponse};
use crate::state::AppState;
use crate::users::dto::{LoginRequest, SignupRequest, UpdateProfileRequest};
use crate::users::repo::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .route("/user/logout", post(logout))
        .route("/user/profile", get(profile))
        .route("/user/:id", put(update_profile).delete(delete_account))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::Validation(
            "Please fill all required fields".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    // A duplicate email comes back as a unique violation and maps to 400.
    let user = User::create(
        &state.db,
        payload.first_name.trim(),
        payload.last_name.trim(),
        &payload.email,
        &hash,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user)),
    ))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<User>>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Please fill required fields".into()));
    }

    // Unknown email and wrong password answer identically; no cookie is set
    // on either path.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::Unauthorized("Invalid credentials".into())
        })?;

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;
    let jar = jar.add(session_cookie(token, keys.ttl, state.config.cookie_secure));

    info!(user_id = %user.id, "user logged in");
    Ok((jar, Json(ApiResponse::ok("Login successful", user))))
}

#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    info!(user_id = %user.id, "user logged out");
    (
        jar.add(clear_session_cookie(state.config.cookie_secure)),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

#[instrument(skip_all)]
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok("Profile fetched successfully", user))
}

/// The path id is accepted for route shape, but the session subject is the
/// account that gets updated.
#[instrument(skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(_id): Path<Uuid>,
    Json(mut payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    if payload.first_name.is_none() && payload.last_name.is_none() && payload.email.is_none() {
        return Err(ApiError::Validation(
            "Provide at least one field to update".into(),
        ));
    }
    if let Some(email) = payload.email.as_mut() {
        *email = email.trim().to_lowercase();
        if !is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
    }

    let updated = User::update(&state.db, user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(user_id = %updated.id, "profile updated");
    Ok(Json(ApiResponse::ok("Profile updated successfully", updated)))
}

#[instrument(skip_all)]
pub async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(_id): Path<Uuid>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    let deleted = User::delete(&state.db, user.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = %user.id, "user account deleted");
    Ok((
        jar.add(clear_session_cookie(state.config.cookie_secure)),
        Json(ApiResponse::message("User account deleted successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email(""));
    }
}
