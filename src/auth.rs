//! # Admin authentication
//!
//! There is a single admin account with configured credentials. A successful
//! login yields an HS256 JSON Web Token that is valid for seven days and is
//! sent back as a `Bearer` token.
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// How long an issued token stays valid
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// The payload of an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// The admin credentials and the token signing key
pub struct Auth {
    username: String,
    password: String,
    secret: Vec<u8>,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Auth {
    pub fn new<U, P, S>(username: U, password: P, secret: S) -> Self
    where
        U: Into<String>,
        P: Into<String>,
        S: Into<Vec<u8>>,
    {
        Self {
            username: username.into(),
            password: password.into(),
            secret: secret.into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    /// Compare against the configured account; without a password nobody can log in
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        !self.password.is_empty() && username == self.username && password == self.password
    }

    /// Sign a fresh admin token for `username`
    pub fn issue(&self, username: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_owned(),
            is_admin: true,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", signing_input, signature)
    }

    /// The claims of a token with a valid signature that has not expired
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut parts = token.rsplitn(2, '.');
        let signature = parts.next()?;
        let signing_input = parts.next()?;
        let (header, payload) = signing_input.split_once('.')?;

        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Rejected token with a bad signature");
            return None;
        }

        let header: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header).ok()?).ok()?;
        if header.get("alg").and_then(Value::as_str) != Some("HS256") {
            return None;
        }
        let claims: Claims = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
        if claims.exp <= Utc::now().timestamp() {
            debug!("Rejected expired token for {}", claims.username);
            return None;
        }
        Some(claims)
    }
}

/// An authenticated admin, taken from the `Authorization: Bearer` header
#[derive(Debug, Clone)]
pub struct AdminToken(pub Claims);

/// The token carried by a request, if any
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": "Unauthorized" })),
    )
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
    Arc<Auth>: FromRef<S>,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<Auth>::from_ref(state);
        match bearer_token(parts).and_then(|token| auth.verify(token)) {
            Some(claims) if claims.is_admin => Ok(AdminToken(claims)),
            _ => {
                warn!("Unauthorized request to {}", parts.uri.path());
                Err(unauthorized())
            }
        }
    }
}

/// Like [`AdminToken`], but a missing or invalid token is not an error
#[derive(Debug, Clone)]
pub struct MaybeAdmin(pub Option<Claims>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
    Arc<Auth>: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<Auth>::from_ref(state);
        let claims = bearer_token(parts)
            .and_then(|token| auth.verify(token))
            .filter(|claims| claims.is_admin);
        Ok(MaybeAdmin(claims))
    }
}
