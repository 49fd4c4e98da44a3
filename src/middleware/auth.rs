use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{dto::auth::Claims, error::AppError};

pub const SESSION_COOKIE: &str = "session";

/// Requesting identity, resolved per-request from the signed session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: String,
}

/// Authenticated tier: extraction failure sends the caller to the login
/// page rather than producing an error status.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        session_user(&parts.headers).ok_or(AuthRedirect)
    }
}

/// Anonymous-or-authenticated: never rejects. Routes with bespoke failure
/// behavior (cart-add's flash, the privileged gate's bare 403) start here.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_user(&parts.headers)))
    }
}

#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

pub fn ensure_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, "admin")
}

/// Privileged tier: anonymous and non-admin callers both get Forbidden.
pub fn require_admin(maybe: &MaybeUser) -> Result<&AuthUser, AppError> {
    let user = maybe.0.as_ref().ok_or(AppError::Forbidden)?;
    ensure_admin(user)?;
    Ok(user)
}

/// Resolve the session token from the Authorization header (API clients)
/// or the session cookie (browser flow), then verify its signature.
fn session_user(headers: &HeaderMap) -> Option<AuthUser> {
    let token = bearer_token(headers)
        .or_else(|| cookie_value(headers, SESSION_COOKIE))?
        .to_string();

    let secret = match std::env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            tracing::warn!("JWT_SECRET is not set; treating request as anonymous");
            return None;
        }
    };

    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    let user_id = decoded.claims.sub.parse::<i64>().ok()?;
    Some(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').map(str::trim).find_map(|pair| {
        let rest = pair.strip_prefix(name)?;
        rest.strip_prefix('=')
    })
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("flash=login-required; session=abc.def.ghi"),
        );
        assert_eq!(cookie_value(&headers, "session"), Some("abc.def.ghi"));
        assert_eq!(cookie_value(&headers, "flash"), Some("login-required"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc"),
        );
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn non_admin_is_forbidden() {
        let user = AuthUser {
            user_id: 2,
            role: "user".into(),
        };
        assert!(matches!(ensure_admin(&user), Err(AppError::Forbidden)));
        assert!(matches!(
            require_admin(&MaybeUser(None)),
            Err(AppError::Forbidden)
        ));
    }
}
