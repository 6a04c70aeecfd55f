use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Authenticated caller, resolved from the session cookie.
///
/// Rejects with 401 when the cookie is absent, the token fails verification,
/// or the subject account no longer exists (a still-valid token for a
/// deleted account must not reach handlers).
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::Unauthorized("Unauthorized".into())
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "session subject no longer exists");
                ApiError::Unauthorized("Unauthorized".into())
            })?;

        Ok(CurrentUser(user))
    }
}
