use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::{AppError, AppResult},
    middleware::{
        auth::{clear_session_cookie, session_cookie},
        flash::{self, Flash},
    },
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

#[utoipa::path(get, path = "/register", tag = "Auth")]
pub async fn register_form() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        "Register",
        serde_json::json!({ "fields": ["name", "email", "password"] }),
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 303, description = "Registered and logged in; redirects home. Duplicate email redirects to /login with a flash message."),
        (status = 400, description = "Invalid registration input"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Response> {
    match auth_service::register_user(&state, payload).await {
        Ok((_user, token)) => Ok((
            AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
            Redirect::to("/"),
        )
            .into_response()),
        Err(AppError::DuplicateIdentity) => {
            Ok(flash::redirect_with_flash("/login", Flash::AlreadyRegistered))
        }
        Err(err) => Err(err),
    }
}

#[utoipa::path(get, path = "/login", tag = "Auth")]
pub async fn login_form(headers: HeaderMap) -> Response {
    let pending = flash::pending(&headers);
    let body = Json(ApiResponse::success(
        "Login",
        serde_json::json!({
            "fields": ["email", "password"],
            "flash": pending.map(Flash::message),
        }),
        Some(Meta::empty()),
    ));

    if pending.is_some() {
        (
            AppendHeaders([(header::SET_COOKIE, flash::clear_cookie())]),
            body,
        )
            .into_response()
    } else {
        body.into_response()
    }
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 303, description = "Logged in; redirects home"),
        (status = 401, description = "Unknown email or incorrect password"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let (_user, token) = auth_service::login_user(&state, payload).await?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response())
}

#[utoipa::path(get, path = "/logout", tag = "Auth")]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
}
