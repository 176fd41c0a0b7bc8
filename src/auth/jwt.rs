//! JWT Token Codec
//!
//! Issues and validates HS512-signed bearer tokens. Every validation failure
//! (malformed text, wrong algorithm, bad signature, expiry) surfaces as the
//! same `AuthError::InvalidToken`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{
    error::AuthError,
    models::{Claims, Principal},
};

/// The only algorithm tokens are signed with or accepted under
pub const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// JWT codec bound to a single signing secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);

        // Expiry is checked against the caller's clock in `decode`, so the
        // library's wall-clock check is turned off here.
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Build and sign claims valid from `now` until `now + ttl`.
    pub fn issue(
        &self,
        principal: &Principal,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expiration = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::IssuanceFailure)?;

        let claims = Claims {
            principal: principal.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        debug!(
            "Issuing JWT for user {}, expires at {}",
            claims.principal.user, claims.exp
        );

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            AuthError::IssuanceFailure
        })
    }

    /// Verify algorithm and signature, then reject anything with `exp <= now`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("JWT validation failed: {:?}", e.kind());
            AuthError::InvalidToken
        })?;

        if now.timestamp() >= data.claims.exp {
            debug!("JWT for user {} expired", data.claims.principal.user);
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    fn codec() -> JwtCodec {
        JwtCodec::new(b"test-secret-key-12345")
    }

    #[test]
    fn test_jwt_roundtrip() {
        let codec = codec();
        let now = Utc::now();
        let principal = Principal::new("alice");

        let token = codec.issue(&principal, TTL, now).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.decode(&token, now).unwrap();
        assert_eq!(claims.principal, principal);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 5);
    }

    #[test]
    fn test_header_declares_hs512() {
        let token = codec().issue(&Principal::new("alice"), TTL, Utc::now()).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
    }

    #[test]
    fn test_expiry_is_exclusive() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue(&Principal::new("alice"), TTL, now).unwrap();

        let just_before = now + chrono::Duration::seconds(4);
        assert!(codec.decode(&token, just_before).is_ok());

        let at_expiry = now + chrono::Duration::seconds(5);
        assert_eq!(codec.decode(&token, at_expiry).unwrap_err(), AuthError::InvalidToken);

        let after = now + chrono::Duration::seconds(6);
        assert_eq!(codec.decode(&token, after).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_different_secrets_reject() {
        let now = Utc::now();
        let token = JwtCodec::new(b"secret1")
            .issue(&Principal::new("alice"), TTL, now)
            .unwrap();

        let result = JwtCodec::new(b"secret2").decode(&token, now);
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_other_algorithm_rejected_with_same_secret() {
        let secret = b"test-secret-key-12345";
        let now = Utc::now();
        let claims = Claims {
            principal: Principal::new("alice"),
            iat: now.timestamp(),
            exp: now.timestamp() + 60,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let result = JwtCodec::new(secret).decode(&token, now);
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue(&Principal::new("alice"), TTL, now).unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        for i in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(
                codec.decode(&tampered, now).unwrap_err(),
                AuthError::InvalidToken,
                "byte {} flipped",
                i
            );
        }
    }

    #[test]
    fn test_malformed_token_rejected() {
        let codec = codec();
        let now = Utc::now();
        for text in ["", "invalid.token.here", "no-dots", "a.b"] {
            assert_eq!(codec.decode(text, now).unwrap_err(), AuthError::InvalidToken);
        }
    }

    #[test]
    fn test_each_issue_produces_distinct_token() {
        let codec = codec();
        let now = Utc::now();
        let principal = Principal::new("alice");
        let first = codec.issue(&principal, TTL, now).unwrap();
        let second = codec.issue(&principal, TTL, now).unwrap();
        assert_ne!(first, second);
    }
}
