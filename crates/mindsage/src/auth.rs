use http::HeaderValue;
use std::fmt;

use crate::error::{Error, TransportError};

/// Bearer token handed to the client by whoever performed the login.
///
/// The client never refreshes or stores it, every operation that needs it takes it as a parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub(crate) fn header_value(&self) -> Result<HeaderValue, TransportError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0.trim()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

/// A token that is missing or blank counts as not logged in.
pub(crate) fn require_token(token: Option<&AuthToken>) -> Result<&AuthToken, Error> {
    token.filter(|token| !token.is_empty()).ok_or(Error::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_token() {
        assert_eq!(format!("{:?}", AuthToken::new("secret")), "AuthToken(***)");
    }

    #[test]
    fn header_value_is_bearer_and_sensitive() {
        let value = AuthToken::new(" abc.def ").header_value().unwrap();
        assert_eq!(value, "Bearer abc.def");
        assert!(value.is_sensitive());
    }

    #[test]
    fn blank_token_is_unauthenticated() {
        let blank = AuthToken::new("  ");
        assert_eq!(require_token(None), Err(Error::Unauthenticated));
        assert_eq!(require_token(Some(&blank)), Err(Error::Unauthenticated));
        let token = AuthToken::new("abc");
        assert_eq!(require_token(Some(&token)), Ok(&token));
    }
}
