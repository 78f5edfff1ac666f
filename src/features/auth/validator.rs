use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

use super::model::{Actor, ActorRole};
use crate::core::error::AppError;

/// Validates HS256 bearer tokens issued by the marketplace auth service.
///
/// Token issuance lives in a separate service; this side only needs the
/// shared secret.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    role: ActorRole,
    #[serde(rename = "exp")]
    _exp: u64,
    #[serde(rename = "iat", default)]
    _iat: Option<u64>,
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Actor, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        Ok(Actor {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        role: ActorRole,
        exp: u64,
        iat: u64,
    }

    fn issue(secret: &str, sub: &str, role: ActorRole, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = TestClaims {
            sub: sub.to_string(),
            role,
            exp: (now + exp_offset_secs).max(0) as u64,
            iat: now as u64,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let validator = JwtValidator::new("test-secret", Duration::from_secs(0));
        let token = issue("test-secret", "vendor-1", ActorRole::Vendor, 3600);

        let actor = validator.validate_token(&token).unwrap();
        assert_eq!(actor.id, "vendor-1");
        assert_eq!(actor.role, ActorRole::Vendor);
    }

    #[test]
    fn rejects_wrong_secret() {
        let validator = JwtValidator::new("test-secret", Duration::from_secs(0));
        let token = issue("other-secret", "vendor-1", ActorRole::Vendor, 3600);

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let validator = JwtValidator::new("test-secret", Duration::from_secs(0));
        let token = issue("test-secret", "admin-1", ActorRole::Admin, -3600);

        assert!(validator.validate_token(&token).is_err());
    }
}
