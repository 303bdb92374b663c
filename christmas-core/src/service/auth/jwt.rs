use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{config::AuthConfig, Error, Result};

/// JWT token type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued for
    pub sub: String,
    /// Token type (access or refresh)
    pub typ: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn is_access_token(&self) -> bool {
        self.typ == TokenType::Access.as_str()
    }

    pub fn is_refresh_token(&self) -> bool {
        self.typ == TokenType::Refresh.as_str()
    }
}

/// JWT service for signing and verifying tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with RS256 keys and default token lifetimes
    ///
    /// # Arguments
    /// * `private_key_pem` - RSA private key in PEM format
    /// * `public_key_pem` - RSA public key in PEM format
    pub fn new(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| Error::Authentication(format!("Failed to load private key: {e}")))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| Error::Authentication(format!("Failed to load public key: {e}")))?;

        let defaults = AuthConfig::default();
        Ok(Self {
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            algorithm: Algorithm::RS256,
            access_ttl: hours(defaults.access_token_duration_hours),
            refresh_ttl: days(defaults.refresh_token_duration_days),
        })
    }

    /// Override token lifetimes from auth configuration
    #[must_use]
    pub fn with_lifetimes(mut self, config: &AuthConfig) -> Self {
        self.access_ttl = hours(config.access_token_duration_hours);
        self.refresh_ttl = days(config.refresh_token_duration_days);
        self
    }

    /// Sign a token for `subject`
    pub fn sign_token(&self, subject: &str, token_type: TokenType) -> Result<String> {
        if subject.is_empty() {
            return Err(Error::InvalidInput("Token subject must not be empty".to_string()));
        }

        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: subject.to_string(),
            typ: token_type.as_str().to_string(),
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(ttl)
                .ok_or_else(|| Error::InvalidInput("Token lifetime out of range".to_string()))?
                .timestamp(),
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and extract claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 60; // clock skew

        let token_data: TokenData<Claims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Error::Authentication("Token expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    Error::Authentication("Invalid token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    Error::Authentication("Invalid token signature".to_string())
                }
                _ => Error::Authentication(format!("Token verification failed: {e}")),
            })?;

        Ok(token_data.claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        if !claims.is_access_token() {
            return Err(Error::Authentication("Not an access token".to_string()));
        }
        Ok(claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        if !claims.is_refresh_token() {
            return Err(Error::Authentication("Not a refresh token".to_string()));
        }
        Ok(claims)
    }
}

fn hours(n: u64) -> Duration {
    i64::try_from(n)
        .ok()
        .and_then(Duration::try_hours)
        .unwrap_or(Duration::MAX)
}

fn days(n: u64) -> Duration {
    i64::try_from(n)
        .ok()
        .and_then(Duration::try_days)
        .unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_PEM: &[u8] = include_bytes!("../../../tests/fixtures/jwt_private.pem");
    const PUBLIC_PEM: &[u8] = include_bytes!("../../../tests/fixtures/jwt_public.pem");
    const OTHER_PUBLIC_PEM: &[u8] = include_bytes!("../../../tests/fixtures/other_public.pem");

    fn create_jwt_service() -> JwtService {
        JwtService::new(PRIVATE_PEM, PUBLIC_PEM).unwrap()
    }

    #[test]
    fn test_sign_and_verify_access_token() {
        let jwt = create_jwt_service();

        let token = jwt.sign_token("alice", TokenType::Access).unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.is_access_token());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_sign_and_verify_refresh_token() {
        let jwt = create_jwt_service();

        let token = jwt.sign_token("bob", TokenType::Refresh).unwrap();
        let claims = jwt.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, "bob");
        assert!(claims.is_refresh_token());
        assert_eq!(claims.exp - claims.iat, 30 * 86400);
    }

    #[test]
    fn test_configured_lifetimes() {
        let config = AuthConfig {
            access_token_duration_hours: 2,
            refresh_token_duration_days: 7,
            ..AuthConfig::default()
        };
        let jwt = create_jwt_service().with_lifetimes(&config);

        let access = jwt.verify_token(&jwt.sign_token("carol", TokenType::Access).unwrap()).unwrap();
        let refresh = jwt.verify_token(&jwt.sign_token("carol", TokenType::Refresh).unwrap()).unwrap();

        assert_eq!(access.exp - access.iat, 2 * 3600);
        assert_eq!(refresh.exp - refresh.iat, 7 * 86400);
    }

    #[test]
    fn test_verify_wrong_token_type() {
        let jwt = create_jwt_service();

        let access_token = jwt.sign_token("dave", TokenType::Access).unwrap();
        assert!(matches!(
            jwt.verify_refresh_token(&access_token),
            Err(Error::Authentication(_))
        ));

        let refresh_token = jwt.sign_token("dave", TokenType::Refresh).unwrap();
        assert!(matches!(
            jwt.verify_access_token(&refresh_token),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let jwt = create_jwt_service();
        assert!(matches!(
            jwt.verify_token("invalid.token.here"),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_tampered_token() {
        let jwt = create_jwt_service();

        let token = jwt.sign_token("erin", TokenType::Access).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = "tampered_payload";
        let tampered_token = parts.join(".");

        assert!(jwt.verify_token(&tampered_token).is_err());
    }

    #[test]
    fn test_foreign_key_rejected() {
        let signer = create_jwt_service();
        let verifier = JwtService::new(PRIVATE_PEM, OTHER_PUBLIC_PEM).unwrap();

        let token = signer.sign_token("frank", TokenType::Access).unwrap();
        assert!(matches!(
            verifier.verify_token(&token),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let jwt = create_jwt_service();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "grace".to_string(),
            typ: "access".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::RS256), &claims, &jwt.encoding_key).unwrap();

        let err = jwt.verify_token(&token).unwrap_err();
        assert_eq!(err.to_string(), "Authentication error: Token expired");
    }

    #[test]
    fn test_empty_subject_rejected() {
        let jwt = create_jwt_service();
        assert!(matches!(
            jwt.sign_token("", TokenType::Access),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_garbage_key_rejected() {
        assert!(matches!(
            JwtService::new(b"not a pem", PUBLIC_PEM),
            Err(Error::Authentication(_))
        ));
    }
}
