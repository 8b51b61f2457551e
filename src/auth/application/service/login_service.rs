use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::{
                auth_session::AuthSession, operation::HttpMethod, path_template::RenderedPath,
            },
            value_object::{
                CSRF_HEADER, ProxmoxCSRFToken, ProxmoxPassword, ProxmoxTicket, ProxmoxUsername,
            },
        },
        infrastructure::api_client::{ApiClient, Payload},
    },
};
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use tracing::info;

/// Exchanges username/password for a ticket session.
pub struct LoginService {
    ticket_path: RenderedPath,
}

impl LoginService {
    pub fn new() -> Self {
        Self {
            ticket_path: RenderedPath {
                segments: vec!["access".to_string(), "ticket".to_string()],
                query: Vec::new(),
            },
        }
    }

    /// Performs exactly one `POST /access/ticket` round trip.
    ///
    /// Every failure, whether transport, rejection or a malformed body, is
    /// reported as [`ProxmoxError::Authentication`].
    pub async fn execute(
        &self,
        client: &ApiClient,
        username: &ProxmoxUsername,
        password: &ProxmoxPassword,
    ) -> ProxmoxResult<AuthSession> {
        let request = LoginRequest { username, password };
        let fields = request.form_fields();
        let response = client
            .send(
                HttpMethod::Post,
                &self.ticket_path,
                &HeaderMap::new(),
                Payload::Form(&fields),
            )
            .await
            .map_err(|e| match e {
                ProxmoxError::RemoteApi { status: 401, .. } => {
                    ProxmoxError::Authentication("Invalid credentials provided".to_string())
                }
                ProxmoxError::RemoteApi { status, .. } => ProxmoxError::Authentication(format!(
                    "Ticket request rejected with status {}",
                    status
                )),
                ProxmoxError::Transport(message) => {
                    ProxmoxError::Authentication(format!("Ticket request failed: {}", message))
                }
                other => ProxmoxError::Authentication(other.to_string()),
            })?;

        let login_response =
            serde_json::from_value::<LoginResponse>(response.raw().clone()).map_err(|e| {
                ProxmoxError::Authentication(format!("Failed to parse login response: {}", e))
            })?;

        let ticket = ProxmoxTicket::new(login_response.data.ticket)
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid ticket: {}", e)))?;
        let csrf_token = ProxmoxCSRFToken::new(login_response.data.csrf_token)
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid CSRF token: {}", e)))?;

        info!(
            username = username.as_str(),
            authenticated_as = login_response.data.username.as_deref().unwrap_or(username.as_str()),
            "obtained Proxmox ticket session"
        );
        build_ticket_session(&ticket, &csrf_token)
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}

/// A cookie header carrying the ticket plus the CSRF header.
pub(crate) fn build_ticket_session(
    ticket: &ProxmoxTicket,
    csrf_token: &ProxmoxCSRFToken,
) -> ProxmoxResult<AuthSession> {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, header_value(&ticket.as_cookie_header())?);
    headers.insert(
        HeaderName::from_static("csrfpreventiontoken"),
        header_value(csrf_token.as_str())?,
    );
    Ok(AuthSession::new(headers))
}

pub(crate) fn header_value(value: &str) -> ProxmoxResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ProxmoxError::Authentication(format!("Invalid header value: {}", e)))
}
