//! Map access credential required before anything is rendered.

use std::fmt;

/// Errors raised while validating startup credentials.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    /// No usable access token was supplied.
    #[error("missing map access token: set {expected_in} to a valid token")]
    Missing { expected_in: String },
}

/// A non-empty access token for the map style service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validate a token read from configuration.
    ///
    /// `source` names where the token was expected so the error tells the user what to set.
    pub fn new(value: Option<String>, source: &str) -> Result<Self, CredentialError> {
        match value.map(|v| v.trim().to_owned()) {
            Some(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(CredentialError::Missing {
                expected_in: source.to_owned(),
            }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Token with everything but the first few characters masked.
    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        format!("{visible}…")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.masked()).finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_error() {
        let err = AccessToken::new(None, "MapboxAccessToken").unwrap_err();
        assert_eq!(
            err,
            CredentialError::Missing {
                expected_in: "MapboxAccessToken".into()
            }
        );
        assert!(err.to_string().contains("MapboxAccessToken"));
    }

    #[test]
    fn test_blank_token_is_error() {
        assert!(AccessToken::new(Some("   ".into()), "token").is_err());
    }

    #[test]
    fn test_token_is_trimmed_and_masked() {
        let token = AccessToken::new(Some(" pk.abcdef123 ".into()), "token").unwrap();
        assert_eq!(token.expose(), "pk.abcdef123");
        assert_eq!(token.to_string(), "pk.a…");
        assert!(!format!("{token:?}").contains("abcdef"));
    }
}
