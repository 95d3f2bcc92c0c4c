use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, roles: Vec<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            roles,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Proof of authentication for the current request.
///
/// Passed explicitly into every service operation; handlers obtain it from
/// the request extensions populated by [`crate::middleware::session_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub roles: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            roles: claims.roles,
            expires_at: Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// HS256 key pair derived from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Session, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims.into())
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtKeys(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_into_session() {
        let keys = JwtKeys::from_secret("test-secret").unwrap();
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, vec!["ADMIN".to_string()], Duration::hours(1));

        let token = keys.issue(&claims).unwrap();
        let session = keys.verify(&token).unwrap();

        assert_eq!(session.user_id, user_id);
        assert!(session.has_role("admin"));
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::from_secret("test-secret").unwrap();
        let claims = Claims::new(Uuid::new_v4(), vec![], Duration::hours(-2));
        let token = keys.issue(&claims).unwrap();

        assert!(matches!(keys.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtKeys::from_secret("one").unwrap();
        let verifier = JwtKeys::from_secret("two").unwrap();
        let token = issuer
            .issue(&Claims::new(Uuid::new_v4(), vec![], Duration::hours(1)))
            .unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(JwtKeys::from_secret(""), Err(JwtError::InvalidSecret)));
    }
}
