use crate::{
    auth::application::service::login_service::{LoginService, header_value},
    core::{
        domain::{
            error::ProxmoxResult,
            model::{
                auth_session::AuthSession,
                credentials::{AuthMethod, Credentials},
            },
        },
        infrastructure::api_client::ApiClient,
    },
};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use tracing::info;

/// Turns [`Credentials`] into the headers every call of a batch carries.
///
/// The token scheme is pure header construction. The username/password scheme
/// costs exactly one ticket request per [`obtain_session`](Self::obtain_session).
pub struct AuthenticationProvider {
    login_service: LoginService,
}

impl AuthenticationProvider {
    pub fn new() -> Self {
        Self {
            login_service: LoginService::new(),
        }
    }

    /// Produces a session for `credentials`.
    ///
    /// `client` must have been built with the credentials' TLS policy; it is
    /// only used by the ticket scheme.
    pub async fn obtain_session(
        &self,
        client: &ApiClient,
        credentials: &Credentials,
    ) -> ProxmoxResult<AuthSession> {
        match credentials.auth_method() {
            AuthMethod::Token(token) => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    AUTHORIZATION,
                    header_value(&token.as_authorization_header())?,
                );
                info!(
                    server = credentials.server_url().as_str(),
                    "using API token session"
                );
                Ok(AuthSession::new(headers))
            }
            AuthMethod::UserPass { username, password } => {
                self.login_service
                    .execute(client, username, password)
                    .await
            }
        }
    }
}

impl Default for AuthenticationProvider {
    fn default() -> Self {
        Self::new()
    }
}
