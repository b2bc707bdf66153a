//! Token service for Talkboard.
//!
//! Issues and validates the signed bearer tokens used by the REST API.
//! The wire contract matches previously issued tokens: HS256, base64-encoded
//! shared secret, claims `sub` (nickname), `memberId`, optional `memberRole`,
//! and `exp`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;
use crate::{Result, TalkboardError};

/// Token claims.
///
/// Strongly typed; a token whose payload doesn't match this shape fails at
/// parse time rather than at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the member's nickname.
    pub sub: String,
    /// Member id.
    #[serde(rename = "memberId")]
    pub member_id: i64,
    /// Member role, when present.
    #[serde(rename = "memberRole", default, skip_serializing_if = "Option::is_none")]
    pub member_role: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Token validation failures, each reported as a distinct reason so the API
/// layer can produce a matching message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No token was supplied where one is required.
    #[error("no token supplied")]
    Missing,

    /// Signature verification failed.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Token or claims structure is malformed.
    #[error("token is malformed")]
    Malformed,

    /// Token has expired.
    #[error("token has expired; please log in again")]
    Expired,

    /// Token uses an unsupported algorithm.
    #[error("token is not supported")]
    Unsupported,
}

/// Issues and parses bearer tokens.
///
/// Constructed once at startup from [`JwtConfig`] and immutable thereafter.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: u64,
}

impl TokenService {
    /// Build a token service from configuration.
    ///
    /// The configured secret is base64 decoded before use; fails when it
    /// isn't valid base64.
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let secret = BASE64
            .decode(&config.secret)
            .map_err(|e| TalkboardError::Config(format!("jwt secret is not valid base64: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            expiry_secs: config.expiry_secs,
        })
    }

    /// Token time-to-live in seconds.
    pub fn expiry_secs(&self) -> u64 {
        self.expiry_secs
    }

    /// Issue a signed token for the given identity.
    pub fn issue(
        &self,
        nickname: &str,
        member_id: i64,
        member_role: Option<&str>,
    ) -> Result<String> {
        let claims = Claims {
            sub: nickname.to_string(),
            member_id,
            member_role: member_role.map(|r| r.to_string()),
            exp: Utc::now().timestamp() + self.expiry_secs as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TalkboardError::Auth(format!("failed to sign token: {e}")))
    }

    /// Parse and validate a token, returning its claims.
    pub fn parse(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::Unsupported
                }
                _ => TokenError::Malformed,
            })
    }

    /// Resolve identity from an Authorization header value.
    ///
    /// An absent header means anonymous access (`Ok(None)`); a header that is
    /// present but not a valid bearer token is an error.
    pub fn resolve_bearer(
        &self,
        header: Option<&str>,
    ) -> std::result::Result<Option<Claims>, TokenError> {
        let Some(value) = header else {
            return Ok(None);
        };

        let token = value.strip_prefix("Bearer ").ok_or(TokenError::Malformed)?;
        self.parse(token).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(expiry_secs: u64) -> TokenService {
        let config = JwtConfig {
            secret: BASE64.encode("test-secret-key-for-tests-only"),
            expiry_secs,
        };
        TokenService::new(&config).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let svc = test_service(3600);
        let token = svc.issue("alice", 7, Some("NORMAL")).unwrap();

        let claims = svc.parse(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.member_id, 7);
        assert_eq!(claims.member_role.as_deref(), Some("NORMAL"));
    }

    #[test]
    fn test_role_is_optional() {
        let svc = test_service(3600);
        let token = svc.issue("bob", 2, None).unwrap();
        let claims = svc.parse(&token).unwrap();
        assert!(claims.member_role.is_none());
    }

    #[test]
    fn test_expired_token() {
        let svc = test_service(3600);
        let claims = Claims {
            sub: "alice".to_string(),
            member_id: 1,
            member_role: None,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-tests-only"),
        )
        .unwrap();

        assert_eq!(svc.parse(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_invalid_signature() {
        let svc = test_service(3600);
        let other = TokenService::new(&JwtConfig {
            secret: BASE64.encode("a-completely-different-secret"),
            expiry_secs: 3600,
        })
        .unwrap();

        let token = other.issue("alice", 1, None).unwrap();
        assert_eq!(svc.parse(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token() {
        let svc = test_service(3600);
        assert_eq!(svc.parse("not.a.token"), Err(TokenError::Malformed));
        assert_eq!(svc.parse(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_missing_claim_fails_at_parse() {
        let svc = test_service(3600);

        // Token without memberId
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "alice".to_string(),
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(b"test-secret-key-for-tests-only"),
        )
        .unwrap();

        assert_eq!(svc.parse(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_resolve_absent_header_is_anonymous() {
        let svc = test_service(3600);
        assert!(svc.resolve_bearer(None).unwrap().is_none());
    }

    #[test]
    fn test_resolve_non_bearer_header_is_error() {
        let svc = test_service(3600);
        assert_eq!(
            svc.resolve_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_resolve_valid_bearer() {
        let svc = test_service(3600);
        let token = svc.issue("alice", 3, None).unwrap();
        let claims = svc
            .resolve_bearer(Some(&format!("Bearer {token}")))
            .unwrap()
            .unwrap();
        assert_eq!(claims.member_id, 3);
    }

    #[test]
    fn test_invalid_base64_secret() {
        let result = TokenService::new(&JwtConfig {
            secret: "!!not base64!!".to_string(),
            expiry_secs: 3600,
        });
        assert!(result.is_err());
    }
}
