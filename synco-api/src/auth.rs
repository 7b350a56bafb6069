use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session token issued by `api-token-auth/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for a blank token; a blank token is the same as no token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn as_auth_header(&self) -> String {
        format!("Token {}", self.0)
    }
}

// Never print the token itself.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \n").is_none());
    }

    #[test]
    fn header_uses_token_scheme() {
        let credential = Credential::new(" abc123 ").unwrap();
        assert_eq!(credential.as_str(), "abc123");
        assert_eq!(credential.as_auth_header(), "Token abc123");
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new("secret").unwrap();
        assert!(!format!("{:?}", credential).contains("secret"));
    }
}
