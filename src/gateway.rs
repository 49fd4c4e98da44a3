//! Client for the external hosted-checkout payment gateway.
//!
//! One session is created per checkout attempt; nothing about it is
//! persisted locally. The caller is redirected to the session's hosted URL
//! and returns on one of the two redirect targets supplied here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Parameters for a single-item, one-shot payment session.
#[derive(Debug)]
pub struct CheckoutSessionParams<'a> {
    pub name: &'a str,
    pub image_url: &'a str,
    /// Charge amount in minor units (cents).
    pub unit_amount: i64,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted checkout page the client is redirected to.
    pub url: String,
}

#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.payment_api_key);
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| GatewayError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.payment_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.payment_api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Create a hosted checkout session. Network failures, timeouts, and
    /// non-2xx responses all surface as `GatewayError`; the caller reports
    /// them to the user without touching ledger state.
    pub async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams<'_>,
    ) -> Result<CheckoutSession, GatewayError> {
        let url = format!("{}/v1/checkout/sessions", self.base_url);
        let form = session_form(&params);

        let response = self.client.post(&url).form(&form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

/// Wire format: one line item, quantity fixed at 1, one-shot payment mode.
fn session_form(params: &CheckoutSessionParams<'_>) -> Vec<(String, String)> {
    vec![
        (
            "line_items[0][price_data][currency]".into(),
            "usd".into(),
        ),
        (
            "line_items[0][price_data][product_data][name]".into(),
            params.name.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][images][0]".into(),
            params.image_url.to_string(),
        ),
        (
            "line_items[0][price_data][unit_amount]".into(),
            params.unit_amount.to_string(),
        ),
        ("line_items[0][quantity]".into(), "1".into()),
        ("mode".into(), "payment".into()),
        ("success_url".into(), params.success_url.clone()),
        ("cancel_url".into(), params.cancel_url.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CheckoutSessionParams<'static> {
        CheckoutSessionParams {
            name: "Chess",
            image_url: "https://img.example/chess.png",
            unit_amount: 2000,
            success_url: "http://127.0.0.1:3000/success/7".into(),
            cancel_url: "http://127.0.0.1:3000/cancel".into(),
        }
    }

    #[test]
    fn session_form_carries_snapshot_and_amount() {
        let form = session_form(&params());
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap_or_else(|| panic!("missing form key {key}"))
        };

        assert_eq!(get("line_items[0][price_data][product_data][name]"), "Chess");
        assert_eq!(get("line_items[0][price_data][unit_amount]"), "2000");
        assert_eq!(get("line_items[0][quantity]"), "1");
        assert_eq!(get("mode"), "payment");
        assert_eq!(get("success_url"), "http://127.0.0.1:3000/success/7");
        assert_eq!(get("cancel_url"), "http://127.0.0.1:3000/cancel");
    }
}
