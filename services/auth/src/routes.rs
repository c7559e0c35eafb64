//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::{
    error::{AuthError, AuthResult},
    middleware::{SESSION_COOKIE, removal_cookie, require_session, session_cookie},
    models::{LoginCredentials, NewUser, User, UserResponse},
    repositories::UserStore,
    state::AppState,
    validation::validate_registration,
};

/// Create the router for the authentication service
pub fn create_router<U: UserStore>(state: AppState<U>) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<U>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register::<U>))
        .route("/auth/login", post(login::<U>))
        .route("/auth/logout", post(logout::<U>))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User registration endpoint
pub async fn register<U: UserStore>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    Json(payload): Json<NewUser>,
) -> AuthResult<impl IntoResponse> {
    info!("Registration attempt for user: {}", payload.username);

    validate_registration(&payload.username, &payload.email, &payload.password)
        .map_err(AuthError::Validation)?;

    let user = state
        .credentials
        .register(
            &state.user_store,
            &payload.username,
            &payload.email,
            &payload.password,
        )
        .await?;

    let token = state.sessions.create(user.id).await;
    let jar = jar.add(session_cookie(&state, token));

    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
}

/// User login endpoint
pub async fn login<U: UserStore>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    Json(payload): Json<LoginCredentials>,
) -> AuthResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .credentials
        .authenticate(&state.user_store, &payload.username, &payload.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let token = state.sessions.create(user.id).await;
    let jar = jar.add(session_cookie(&state, token));

    Ok((StatusCode::OK, jar, Json(UserResponse::from(&user))))
}

/// Logout endpoint
///
/// The token is taken from the session cookie only, so a request cannot end
/// somebody else's session by naming their token.
pub async fn logout<U: UserStore>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
) -> impl IntoResponse {
    info!("Logout request");

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await;
    }

    (
        StatusCode::OK,
        jar.remove(removal_cookie()),
        Json(serde_json::json!({"message": "Logged out successfully"})),
    )
}

/// Current user endpoint
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
