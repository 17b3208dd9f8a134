use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::ApiError;

/// Lifetime of an access token.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Identity submitted to `POST /jwt`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct IdentityRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdentityClaims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64, // issued at
    pub exp: i64, // expiration
}

/// Signs and verifies HS256 identity tokens.
///
/// Without a configured secret, issuing fails with a signing error and every
/// token is rejected.
pub struct TokenService {
    keys: Option<(EncodingKey, DecodingKey)>,
}

impl TokenService {
    pub fn new(secret: Option<&str>) -> Self {
        let keys = secret.filter(|s| !s.is_empty()).map(|s| {
            (
                EncodingKey::from_secret(s.as_bytes()),
                DecodingKey::from_secret(s.as_bytes()),
            )
        });
        Self { keys }
    }

    pub fn issue(&self, identity: &IdentityRequest) -> Result<String, ApiError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &IdentityRequest,
        issued_at: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        if identity.email.trim().is_empty() {
            return Err(ApiError::BadRequest("email is required".to_string()));
        }

        let (encoding_key, _) = self
            .keys
            .as_ref()
            .ok_or_else(|| ApiError::Signing("signing key is not configured".to_string()))?;

        let claims = IdentityClaims {
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, encoding_key)
            .map_err(|e| ApiError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<IdentityClaims, ApiError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(ApiError::Unauthorized)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<IdentityClaims>(token, decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                ApiError::Unauthorized
            })
    }
}
