//! Credentials supplied once per batch by the host's credential store.

use crate::core::domain::{
    error::ProxmoxResult,
    value_object::{ProxmoxApiToken, ProxmoxPassword, ProxmoxUrl, ProxmoxUsername},
};
use async_trait::async_trait;

/// The authentication scheme and its secrets.
///
/// Modeling the scheme as an enum makes "exactly one of token or
/// username/password" hold by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Pre-issued API token, sent on every request.
    Token(ProxmoxApiToken),
    /// Username/password exchanged for a session ticket and CSRF token.
    UserPass {
        username: ProxmoxUsername,
        password: ProxmoxPassword,
    },
}

/// Everything needed to reach and authenticate against one Proxmox server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    server_url: ProxmoxUrl,
    auth_method: AuthMethod,
    ignore_tls_errors: bool,
}

impl Credentials {
    pub fn new(server_url: ProxmoxUrl, auth_method: AuthMethod, ignore_tls_errors: bool) -> Self {
        Self {
            server_url,
            auth_method,
            ignore_tls_errors,
        }
    }

    /// Validates raw token credentials.
    pub fn token(
        server_url: &str,
        token: impl Into<String>,
        ignore_tls_errors: bool,
    ) -> ProxmoxResult<Self> {
        Ok(Self::new(
            ProxmoxUrl::new(server_url)?,
            AuthMethod::Token(ProxmoxApiToken::new(token.into())?),
            ignore_tls_errors,
        ))
    }

    /// Validates raw username/password credentials.
    pub fn user_pass(
        server_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        ignore_tls_errors: bool,
    ) -> ProxmoxResult<Self> {
        Ok(Self::new(
            ProxmoxUrl::new(server_url)?,
            AuthMethod::UserPass {
                username: ProxmoxUsername::new(username.into())?,
                password: ProxmoxPassword::new(password.into(), None)?,
            },
            ignore_tls_errors,
        ))
    }

    pub fn server_url(&self) -> &ProxmoxUrl {
        &self.server_url
    }

    pub fn auth_method(&self) -> &AuthMethod {
        &self.auth_method
    }

    /// Whether certificate validation is skipped (self-signed servers).
    pub fn ignore_tls_errors(&self) -> bool {
        self.ignore_tls_errors
    }
}

/// Where a batch gets its credentials from.
///
/// Resolved exactly once per batch, before any request is made.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn get_credentials(&self) -> ProxmoxResult<Credentials>;
}

#[async_trait]
impl CredentialSource for Credentials {
    async fn get_credentials(&self) -> ProxmoxResult<Credentials> {
        Ok(self.clone())
    }
}
