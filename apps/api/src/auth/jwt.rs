use anyhow::Result;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // User id
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// Verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    issuer: String,
    #[cfg(test)]
    encoding_key: jsonwebtoken::EncodingKey,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            #[cfg(test)]
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Verify and decode a token. Fails on bad signature, wrong issuer or expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }

    /// Token valid for `ttl`, as the identity provider would issue it.
    #[cfg(test)]
    pub fn create_token(&self, user_id: Uuid, ttl: chrono::Duration) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id,
            email: None,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map_err(Into::into)
    }
}
