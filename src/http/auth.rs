//! Bearer JWT authentication and the admin role check.

use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, header, request::Parts},
    routing::get,
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{AppError, AuthError};

use super::state::AppState;

/// Principals whose `sub` ends with this suffix are administrators.
pub const ADMIN_SUFFIX: &str = ":admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// HS256 signing and verification keys derived from the shared secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `sub` valid for `expires_in_secs` (negative gives an
    /// already expired token).
    pub fn issue(&self, sub: &str, expires_in_secs: i64) -> Result<String, AppError> {
        let now = i64::try_from(get_current_timestamp()).unwrap_or(i64::MAX);
        let exp = now.saturating_add(expires_in_secs).max(0) as u64;
        let claims = Claims {
            sub: sub.to_string(),
            exp,
            extra: Map::new(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid,
            })
    }
}

/// `Authorization: Bearer <token>`, scheme matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Any request carrying a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::Missing)?;
        let claims = state.jwt.verify(token)?;

        Ok(AuthUser(claims))
    }
}

/// An [`AuthUser`] whose subject carries the admin suffix.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if !claims.sub.ends_with(ADMIN_SUFFIX) {
            tracing::warn!(sub = %claims.sub, "🔐 ⚠️ Non admin tried to reach an admin route");
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(claims))
    }
}

async fn protected_resource(AuthUser(claims): AuthUser) -> Json<Value> {
    Json(json!({ "msg": "ok", "user": claims }))
}

async fn admin_stats(State(state): State<AppState>, _admin: AdminUser) -> Json<Value> {
    Json(json!({ "stats": state.riot.metrics().snapshot() }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/protected/resource", get(protected_resource))
        .route("/admin/stats", get(admin_stats))
}
