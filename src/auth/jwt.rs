//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, AuthResult};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            issuer: "hm-auth".to_string(),
        }
    }
}

impl JwtConfig {
    /// Create JwtConfig from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// JWT Claims
///
/// The subject is the username. Validity is determined purely by the
/// signature and the expiry; there is no server-side token state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a subject
    pub fn new(username: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Create a signed JWT token carrying the given username as subject
pub fn create_token(username: &str, config: &JwtConfig) -> AuthResult<String> {
    let claims = Claims::new(username, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenIssuance(e.to_string()))
}

/// Verify a JWT token and return its claims
///
/// Expired tokens map to `ExpiredToken`; any signature or format
/// problem maps to `InvalidSignature`.
pub fn verify_token(token: &str, config: &JwtConfig) -> AuthResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    // No clock leeway: a token is invalid the second it expires.
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidSignature,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiration_hours: 24,
            issuer: "hm-auth".to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = test_config();
        let token = create_token("testuser", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.iss, "hm-auth");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "testuser".to_string(),
            exp: now - 10,
            iat: now - 3610,
            iss: config.issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[test]
    fn test_tampered_signature() {
        let config = test_config();
        let token = create_token("testuser", &config).unwrap();

        // Flip the first character of the signature segment; all six of
        // its bits are significant, so the signature bytes change.
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", payload, replacement, &signature[1..]);

        let err = verify_token(&tampered, &config).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret() {
        let config = test_config();
        let token = create_token("testuser", &config).unwrap();

        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            ..test_config()
        };
        let err = verify_token(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token() {
        let config = test_config();
        let err = verify_token("not-a-jwt", &config).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }
}
