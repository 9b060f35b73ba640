//! Authentication claims.
//!
//! Token issuance (login/session handling) is an external collaborator; this
//! service only validates tokens and reads the actor identity and role from
//! the claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Role name as issued (e.g. "admin", "pm", "procurement", "viewer").
    pub role: String,
    /// Display name of the user, if the issuer includes it.
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let claims = Claims {
            sub: Uuid::nil(),
            role: "pm".to_string(),
            name: Some("Somchai".to_string()),
            exp: 2_000_000_000,
            iat: 1_000_000_000,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.role, "pm");
    }

    #[test]
    fn test_name_is_optional() {
        let json = r#"{"sub":"00000000-0000-0000-0000-000000000000","role":"viewer","exp":2000000000,"iat":1}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert!(claims.name.is_none());
    }
}
