use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Origin used to build the gateway's success/cancel redirect targets.
    pub public_base_url: String,
    pub payment_api_key: String,
    pub payment_api_base: String,
    pub payment_timeout_secs: u64,
    /// Source behavior lists the whole ledger on `/cart`; this opts into
    /// filtering the listing by the requesting user instead.
    pub cart_scope_to_user: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let payment_api_key = env::var("PAYMENT_API_KEY")?;
        let payment_api_base = env::var("PAYMENT_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let payment_timeout_secs = env::var("PAYMENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        let cart_scope_to_user = env::var("CART_SCOPE_TO_USER")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self {
            database_url,
            host,
            port,
            public_base_url,
            payment_api_key,
            payment_api_base,
            payment_timeout_secs,
            cart_scope_to_user,
        })
    }
}
