use crate::core::domain::{
    error::{ProxmoxResult, ValidationError},
    value_object::validate_header_safe,
};

/// A pre-issued Proxmox API token in `user@realm!tokenid=secret` form.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxApiToken(String);

impl ProxmoxApiToken {
    /// Creates a validated API token.
    pub fn new(value: String) -> ProxmoxResult<Self> {
        validate_api_token(&value)?;
        Ok(Self(value))
    }

    /// Creates a new token without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the token as an `Authorization` header value.
    #[must_use]
    pub fn as_authorization_header(&self) -> String {
        format!("PVEAPIToken={}", self.0)
    }
}

// The secret half must never end up in logs.
impl std::fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = self.0.split('=').next().unwrap_or_default();
        f.debug_tuple("ProxmoxApiToken")
            .field(&format!("{}=***", id))
            .finish()
    }
}

/// Validates the `user@realm!tokenid=secret` layout.
pub(crate) fn validate_api_token(token: &str) -> Result<(), ValidationError> {
    validate_header_safe("api_token", token)?;
    let (id, secret) = token.split_once('=').ok_or_else(|| {
        ValidationError::Format("API token must be in format user@realm!tokenid=secret".to_string())
    })?;
    let (user, token_id) = id.split_once('!').ok_or_else(|| {
        ValidationError::Format("API token id must be in format user@realm!tokenid".to_string())
    })?;
    if !user.contains('@') || user.starts_with('@') || user.ends_with('@') {
        return Err(ValidationError::Format(
            "API token user must include a realm (user@realm)".to_string(),
        ));
    }
    if token_id.is_empty() || secret.is_empty() {
        return Err(ValidationError::ConstraintViolation(
            "API token id and secret cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_token_valid() {
        assert!(validate_api_token("root@pam!ci=aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee").is_ok());
        assert!(validate_api_token("svc@pve!n8n=secret").is_ok());
    }

    #[test]
    fn test_validate_api_token_invalid() {
        assert!(validate_api_token("").is_err());
        assert!(validate_api_token("root@pam").is_err());
        assert!(validate_api_token("root@pam=secret").is_err());
        assert!(validate_api_token("root!ci=secret").is_err());
        assert!(validate_api_token("root@pam!=secret").is_err());
        assert!(validate_api_token("root@pam!ci=").is_err());
        assert!(validate_api_token("root@pam!ci=sec ret").is_err());
    }

    #[test]
    fn test_authorization_header() {
        let token = ProxmoxApiToken::new("root@pam!ci=s3cr3t".to_string()).unwrap();
        assert_eq!(token.as_authorization_header(), "PVEAPIToken=root@pam!ci=s3cr3t");
    }

    #[test]
    fn test_debug_hides_secret() {
        let token = ProxmoxApiToken::new("root@pam!ci=s3cr3t".to_string()).unwrap();
        let debug = format!("{:?}", token);
        assert!(debug.contains("root@pam!ci"));
        assert!(!debug.contains("s3cr3t"));
    }
}
