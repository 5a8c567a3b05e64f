//! JWT validation and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate a bearer token and return its claims
pub(crate) fn validate_jwt_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            issuer: None,
            audience: None,
        }
    }

    fn mint_token(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let header = HeaderValue::from_static("Bearer abc123");
        let result = extract_bearer_token(&header);
        assert_eq!(result.unwrap(), "abc123");
    }

    #[test]
    fn test_extract_bearer_token_missing_prefix() {
        let header = HeaderValue::from_static("abc123");
        assert!(matches!(
            extract_bearer_token(&header),
            Err(AuthError::InvalidAuthorizationFormat)
        ));
    }

    #[test]
    fn test_validate_jwt_token_roundtrip() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "6f1b6e1e-1d2a-4b6a-9f0e-1a2b3c4d5e6f".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = mint_token(&claims, "test-secret");

        let decoded = validate_jwt_token(&token, &test_config()).unwrap();
        assert_eq!(decoded.sub, claims.sub);
    }

    #[test]
    fn test_validate_jwt_token_wrong_secret_rejected() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "user".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = mint_token(&claims, "other-secret");

        assert!(matches!(
            validate_jwt_token(&token, &test_config()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_validate_jwt_token_expired_rejected() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "user".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = mint_token(&claims, "test-secret");

        assert!(matches!(
            validate_jwt_token(&token, &test_config()),
            Err(AuthError::InvalidToken)
        ));
    }
}
