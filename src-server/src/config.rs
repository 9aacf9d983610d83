use std::{net::SocketAddr, time::Duration};

use crate::auth::{decode_secret_key, AuthConfig};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub auth: Option<AuthConfig>,
    pub ai: AiConfig,
}

/// Settings for the text-generation collaborator.
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FIN_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid FIN_LISTEN_ADDR");
        let db_path = std::env::var("FIN_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("FIN_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("FIN_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = std::env::var("FIN_STATIC_DIR").unwrap_or_else(|_| "dist".into());

        // Auth is enabled when a JWT secret is configured; the password hash
        // is optional on top of that (one-time codes still work without it).
        let auth = std::env::var("FIN_SECRET_KEY").ok().map(|raw| AuthConfig {
            password_hash: std::env::var("FIN_AUTH_PASSWORD_HASH").ok(),
            jwt_secret: decode_secret_key(&raw).expect("Invalid FIN_SECRET_KEY"),
            access_token_ttl: Duration::from_secs(60 * 60 * 12),
        });

        let ai = AiConfig {
            api_key: std::env::var("FIN_AI_API_KEY").ok(),
            base_url: std::env::var("FIN_AI_BASE_URL").ok(),
            model: std::env::var("FIN_AI_MODEL").ok(),
        };

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            auth,
            ai,
        }
    }
}
