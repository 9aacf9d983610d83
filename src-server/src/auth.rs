use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordVerifier},
    Argon2,
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use base64::{
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD as BASE64_URL},
    Engine as _,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::main_lib::AppState;

/// How long an issued one-time code stays exchangeable.
const ONE_TIME_CODE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Clone)]
pub struct AuthConfig {
    pub password_hash: Option<String>,
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

pub struct AuthManager {
    password_hash: Option<String>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    pending_codes: Mutex<HashMap<String, PendingCode>>,
}

struct PendingCode {
    subject: String,
    expires_at: SystemTime,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    MissingIdentifier,
    NotConfigured,
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub requires_password: bool,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        if let Some(hash) = &config.password_hash {
            PasswordHash::new(hash)?;
        }
        let encoding_key = EncodingKey::from_secret(&config.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Ok(Self {
            password_hash: config.password_hash.clone(),
            encoding_key,
            decoding_key,
            validation,
            token_ttl: config.access_token_ttl,
            pending_codes: Mutex::new(HashMap::new()),
        })
    }

    pub fn verify_password(&self, candidate: &str) -> Result<(), AuthError> {
        let Some(stored) = &self.password_hash else {
            return Err(AuthError::NotConfigured);
        };
        let parsed = PasswordHash::new(stored).map_err(|e| {
            AuthError::Internal(format!("Invalid password hash configuration: {e}"))
        })?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, subject: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<(), AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|_| ())
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    /// Issues a single-use code for the given identifier (email or phone).
    /// Delivering it is someone else's job.
    pub fn begin_otp(&self, subject: &str) -> String {
        let mut bytes = [0u8; 24];
        OsRng.fill_bytes(&mut bytes);
        let code = BASE64_URL.encode(bytes);

        self.pending_codes.lock().unwrap().insert(
            code.clone(),
            PendingCode {
                subject: subject.to_string(),
                expires_at: SystemTime::now() + ONE_TIME_CODE_TTL,
            },
        );
        code
    }

    /// Exchanges a one-time code for a session token. Codes are single-use
    /// and expire after [`ONE_TIME_CODE_TTL`].
    pub fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let pending = self
            .pending_codes
            .lock()
            .unwrap()
            .remove(code)
            .ok_or(AuthError::InvalidCredentials)?;
        if pending.expires_at < SystemTime::now() {
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_token(&pending.subject)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthError::MissingIdentifier => (
                StatusCode::BAD_REQUEST,
                "Email or phone is required".to_string(),
            ),
            AuthError::NotConfigured => (
                StatusCode::NOT_FOUND,
                "Authentication is not configured for this server".to_string(),
            ),
            AuthError::Upstream(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let auth = state.auth.as_ref().ok_or(AuthError::NotConfigured)?.clone();
    auth.verify_password(&payload.password)?;
    let token = auth.issue_token("finitive-web")?;
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: auth.expires_in().as_secs(),
    }))
}

pub async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        requires_password: state
            .auth
            .as_ref()
            .is_some_and(|auth| auth.password_hash.is_some()),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mode: Option<String>,
    pub redirect_to: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    pub data: OtpReceipt,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpReceipt {
    pub delivered_to: String,
    pub mode: String,
}

/// POST /auth/callback: issue a one-time code / magic link for an email or
/// phone identifier. Delivery mechanics live outside this server; the link
/// is written to the log.
pub async fn begin_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpRequest>,
) -> Result<Json<OtpResponse>, AuthError> {
    let auth = state.auth.as_ref().ok_or_else(|| {
        AuthError::Upstream("Authentication is not configured for this server".to_string())
    })?;

    let subject = payload
        .email
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(payload.phone.as_deref().filter(|s| !s.is_empty()))
        .ok_or(AuthError::MissingIdentifier)?;

    let code = auth.begin_otp(subject);
    let redirect_to = payload
        .redirect_to
        .unwrap_or_else(|| "/auth/callback".to_string());
    tracing::info!(
        "One-time code issued for {}: {}?code={}",
        subject,
        redirect_to,
        code
    );

    Ok(Json(OtpResponse {
        data: OtpReceipt {
            delivered_to: subject.to_string(),
            mode: payload.mode.unwrap_or_else(|| "otp".to_string()),
        },
    }))
}

#[derive(Deserialize)]
pub struct ExchangeQuery {
    pub code: Option<String>,
}

/// GET /auth/callback?code=... exchanges an authorization code for a
/// session, then redirect to the site root. A missing or invalid code still
/// lands on the root, just without a session.
pub async fn exchange_code(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExchangeQuery>,
) -> Redirect {
    let Some(auth) = state.auth.clone() else {
        return Redirect::to("/");
    };

    match query.code.as_deref().map(|code| auth.exchange_code(code)) {
        Some(Ok(token)) => Redirect::to(&format!("/?accessToken={}", token)),
        _ => Redirect::to("/"),
    }
}

pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    request.extensions_mut().insert(state.clone());

    let Some(auth) = state.auth.clone() else {
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }

    auth.validate_token(token)?;
    Ok(next.run(request).await)
}
