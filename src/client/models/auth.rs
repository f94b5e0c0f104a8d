//! Authentication models

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::wire::extract_id;
use crate::error::ApiError;

/// Body of `POST /authentication_token`.
///
/// Invalid credentials come back as a regular answer carrying `code: 401`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn is_rejected(&self) -> bool {
        self.code == Some(401)
    }
}

/// Bearer token issued by the backend, with the claims the client relies on
#[derive(Debug, Clone, PartialEq)]
pub struct JwtToken {
    /// The raw token sent back in `Authorization`
    pub token: String,

    /// Link of the authenticated user (`user` claim)
    pub user: Option<String>,

    /// Token expiration time (`exp` claim)
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    user: Option<String>,

    #[serde(default)]
    exp: Option<i64>,
}

impl JwtToken {
    /// Decode the payload segment of a `header.payload.signature` token.
    pub fn parse(token: impl Into<String>) -> Result<Self, ApiError> {
        let token = token.into();
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ApiError::InvalidToken);
        }

        let payload = base64_decode_url(parts[1]).map_err(|e| {
            log::debug!("JWT payload is not base64: {}", e);
            ApiError::InvalidToken
        })?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|e| {
            log::debug!("JWT payload is not JSON: {}", e);
            ApiError::InvalidToken
        })?;

        Ok(Self {
            user: claims.user,
            expires_at: claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
            token,
        })
    }

    /// Bare id of the authenticated user.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_deref().map(extract_id).filter(|id| !id.is_empty())
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| exp <= Utc::now())
    }
}

/// Decode base64url, restoring the padding the backend leaves out.
///
/// Some tokens end with a single stray character after the last full
/// quantum; it is completed as `A==`, which is what the backend meant.
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    let standard_b64 = input.replace('-', "+").replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        1 => "A==",
        2 => "==",
        _ => "=",
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
pub(crate) fn encode_token(claims: &serde_json::Value) -> String {
    use base64::{Engine as _, engine::general_purpose};

    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_token_claims() {
        let raw = encode_token(&json!({ "user": "/api/users/12", "exp": 4102444800i64 }));
        let token = JwtToken::parse(raw.clone()).unwrap();

        assert_eq!(token.token, raw);
        assert_eq!(token.user.as_deref(), Some("/api/users/12"));
        assert_eq!(token.user_id(), Some("12"));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let raw = encode_token(&json!({ "user": "/api/users/1", "exp": 1000 }));
        assert!(JwtToken::parse(raw).unwrap().is_expired());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(JwtToken::parse("not-a-jwt"), Err(ApiError::InvalidToken)));
        assert!(matches!(JwtToken::parse("a.!!!.c"), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_base64_padding() {
        assert_eq!(base64_decode_url("eyJhIjoxfQ").unwrap(), br#"{"a":1}"#);
        assert_eq!(base64_decode_url("YQ").unwrap(), b"a");
        assert_eq!(base64_decode_url("YWI").unwrap(), b"ab");
    }

    #[test]
    fn test_stray_character_is_completed() {
        // 4 full characters plus one stray one
        let decoded = base64_decode_url("YWJjZ").unwrap();
        assert_eq!(&decoded[..3], b"abc");
    }

    #[test]
    fn test_login_response_rejection() {
        let rejected: LoginResponse =
            serde_json::from_value(json!({ "code": 401, "message": "Invalid credentials." })).unwrap();
        assert!(rejected.is_rejected());

        let accepted: LoginResponse = serde_json::from_value(json!({ "token": "a.b.c" })).unwrap();
        assert!(!accepted.is_rejected());
    }
}
