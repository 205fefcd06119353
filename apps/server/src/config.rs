use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub quote_base_url: Option<String>,
    pub quote_api_token: String,
    pub quote_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid TF_LISTEN_ADDR");
        let db_path = std::env::var("TF_DB_PATH").unwrap_or_else(|_| "./db/ledger.db".into());
        let quote_base_url = std::env::var("TF_QUOTE_BASE_URL").ok();
        let quote_api_token =
            std::env::var("TF_QUOTE_API_TOKEN").expect("TF_QUOTE_API_TOKEN not set");
        let quote_timeout_ms: u64 = std::env::var("TF_QUOTE_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .unwrap_or(10000);
        let jwt_secret = std::env::var("TF_JWT_SECRET")
            .expect("TF_JWT_SECRET not set")
            .into_bytes();
        let token_ttl_secs: u64 = std::env::var("TF_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86_400);
        let timeout_ms: u64 = std::env::var("TF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            db_path,
            quote_base_url,
            quote_api_token,
            quote_timeout: Duration::from_millis(quote_timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
