//! One-shot flash messages carried on a short-lived cookie and consumed by
//! the next visit to the login page.

use axum::{
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use super::auth::cookie_value;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AlreadyRegistered,
    LoginRequired,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::AlreadyRegistered => "already-registered",
            Flash::LoginRequired => "login-required",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "already-registered" => Some(Flash::AlreadyRegistered),
            "login-required" => Some(Flash::LoginRequired),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::AlreadyRegistered => {
                "You've already signed up with that email, log in instead!"
            }
            Flash::LoginRequired => {
                "You need to login or register to add items to the cart."
            }
        }
    }
}

/// Redirect while leaving a flash message for the target page.
pub fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    let cookie = format!("{FLASH_COOKIE}={}; Path=/; Max-Age=60", flash.code());
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(location),
    )
        .into_response()
}

/// Read the pending flash message, if any.
pub fn pending(headers: &HeaderMap) -> Option<Flash> {
    cookie_value(headers, FLASH_COOKIE).and_then(Flash::from_code)
}

pub fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn flash_codes_round_trip() {
        for flash in [Flash::AlreadyRegistered, Flash::LoginRequired] {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("nonsense"), None);
    }

    #[test]
    fn pending_reads_the_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("flash=login-required"),
        );
        assert_eq!(pending(&headers), Some(Flash::LoginRequired));
    }

    #[test]
    fn redirect_carries_cookie_and_location() {
        let response = redirect_with_flash("/login", Flash::AlreadyRegistered);
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("flash=already-registered"));
    }
}
