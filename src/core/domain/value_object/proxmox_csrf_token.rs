use crate::core::domain::{
    error::{ProxmoxResult, ValidationError},
    value_object::validate_header_safe,
};

/// Header carrying the anti-forgery token on ticket-authenticated calls.
pub const CSRF_HEADER: &str = "CSRFPreventionToken";

/// A Proxmox CSRF protection token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxCSRFToken(String);

impl ProxmoxCSRFToken {
    /// Creates a validated CSRF token.
    pub fn new(value: String) -> ProxmoxResult<Self> {
        validate_csrf_token(&value)?;
        Ok(Self(value))
    }

    /// Creates a new CSRF token without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a CSRF token string.
pub(crate) fn validate_csrf_token(token: &str) -> Result<(), ValidationError> {
    validate_header_safe("csrf_token", token)
}
