//! Session cookie handling and authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, warn};

use crate::{
    error::{AuthError, AuthResult},
    models::User,
    repositories::UserStore,
    state::AppState,
};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_id";

/// Build the cookie that carries a freshly issued session token
pub fn session_cookie<U>(state: &AppState<U>, token: String) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.sessions.ttl().num_seconds());

    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Cookie matching the session cookie's path, for removal
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Resolve the session cookie to the user it belongs to
///
/// Missing, unknown and expired sessions all yield `None`. A session whose
/// user no longer exists is revoked.
pub async fn current_user<U: UserStore>(
    state: &AppState<U>,
    jar: &CookieJar,
) -> AuthResult<Option<User>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let Some(user_id) = state.sessions.resolve(cookie.value()).await else {
        debug!("Request carried no valid session");
        return Ok(None);
    };

    let user = state.user_store.find_by_id(user_id).await?;
    if user.is_none() {
        warn!("Session refers to missing user {}", user_id);
        state.sessions.revoke(cookie.value()).await;
    }

    Ok(user)
}

/// Reject requests without a valid session; otherwise expose the [`User`]
/// through request extensions
pub async fn require_session<U: UserStore>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = current_user(&state, &jar)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
