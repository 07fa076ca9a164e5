use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

const TOKEN_VALIDITY: Duration = Duration::hours(24);

/// The role a token grants. Buyers place orders and see their own; sellers see every order and
/// drive fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The authenticated user id.
    pub sub: String,
    pub roles: Vec<Role>,
    pub exp: i64,
}

impl JwtClaims {
    pub fn require_role(&self, role: Role) -> Result<(), ServerError> {
        if self.roles.contains(&role) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions(format!("{role:?} role required")).into())
        }
    }
}

/// Extracts and validates the `Authorization: Bearer` token on every request that asks for
/// [`JwtClaims`] in its signature.
impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .app_data::<web::Data<TokenVerifier>>()
            .ok_or_else(|| ServerError::InitializeError("No token verifier configured".to_string()))
            .and_then(|verifier| {
                let token = bearer_token(req)?;
                verifier.validate(&token)
            });
        ready(result)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, ServerError> {
    let header = req.headers().get("Authorization").ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::ValidationError(e.to_string()))?;
    let token = value.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;
    Ok(token.to_string())
}

/// Issues HS256 access tokens for authenticated users.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { encoding_key }
    }

    pub fn issue_token(&self, sub: String, roles: Vec<Role>) -> Result<String, ServerError> {
        let exp = (Utc::now() + TOKEN_VALIDITY).timestamp();
        let claims = JwtClaims { sub, roles, exp };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Unspecified(format!("Could not sign access token. {e}")))
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { decoding_key }
    }

    pub fn validate(&self, token: &str) -> Result<JwtClaims, ServerError> {
        let data =
            decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256)).map_err(|e| {
                debug!("💻️ Token validation failed. {e}");
                AuthError::ValidationError(e.to_string())
            })?;
        Ok(data.claims)
    }
}
