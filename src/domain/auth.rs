use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{BearerToken, Email, TypeConstraintError, UserId, UserName};

const CLAIM_NAME_IDENTIFIER: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
const CLAIM_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const CLAIM_EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Account as listed by the admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub role: Option<String>,
}

/// Identity claims read from the bearer token for display purposes.
///
/// The signature is not verified; the server remains the authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserInfo {
    /// Decodes the payload segment of a JWT.
    pub fn from_token(token: &BearerToken) -> Result<Self, TypeConstraintError> {
        let payload = token
            .as_str()
            .split('.')
            .nth(1)
            .ok_or_else(|| TypeConstraintError::InvalidValue("token is not a JWT".to_string()))?;
        let bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| TypeConstraintError::InvalidValue(format!("token payload: {e}")))?;
        let claims: Value = serde_json::from_slice(&bytes)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("token claims: {e}")))?;

        let claim = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| claims.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        };

        Ok(Self {
            id: claim(&[CLAIM_NAME_IDENTIFIER, "sub"]),
            name: claim(&[CLAIM_NAME, "name"]),
            email: claim(&[CLAIM_EMAIL, "email"]),
            expires_at: claims
                .get("exp")
                .and_then(Value::as_i64)
                .and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }

    /// True when the token carries an expiry that lies before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: Value) -> BearerToken {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
        BearerToken::new(format!("{header}.{body}.signature")).unwrap()
    }

    #[test]
    fn reads_soap_style_claims() {
        let token = jwt(serde_json::json!({
            (CLAIM_NAME_IDENTIFIER): "42",
            (CLAIM_NAME): "Ann",
            (CLAIM_EMAIL): "ann@example.com",
            "exp": 1_700_000_000,
        }));

        let info = UserInfo::from_token(&token).unwrap();
        assert_eq!(info.id.as_deref(), Some("42"));
        assert_eq!(info.name.as_deref(), Some("Ann"));
        assert_eq!(info.email.as_deref(), Some("ann@example.com"));
        assert_eq!(
            info.expires_at,
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn falls_back_to_registered_claims() {
        let token = jwt(serde_json::json!({ "sub": "7", "email": "bob@example.com" }));
        let info = UserInfo::from_token(&token).unwrap();
        assert_eq!(info.id.as_deref(), Some("7"));
        assert_eq!(info.email.as_deref(), Some("bob@example.com"));
        assert!(info.expires_at.is_none());
        assert!(!info.is_expired_at(Utc::now()));
    }

    #[test]
    fn detects_expiry() {
        let token = jwt(serde_json::json!({ "exp": 10 }));
        let info = UserInfo::from_token(&token).unwrap();
        assert!(info.is_expired_at(Utc::now()));
    }

    #[test]
    fn rejects_opaque_tokens() {
        let token = BearerToken::new("opaque").unwrap();
        assert!(UserInfo::from_token(&token).is_err());
    }
}
