//! HTTP executor for the Proxmox API.

use crate::core::domain::{
    config::{ClientConfig, RateLimitConfig},
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::{
        api_response::ApiResponse,
        auth_session::AuthSession,
        credentials::Credentials,
        operation::{HttpMethod, PreparedRequest},
        path_template::RenderedPath,
        request_body::RequestBody,
    },
    value_object::ProxmoxUrl,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, header::HeaderMap};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// How the body of a request is encoded.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Empty,
    Json(&'a RequestBody),
    Form(&'a [(&'a str, &'a str)]),
}

/// Issues requests against `<server>/api2/json` under one TLS policy.
///
/// The client adds no authentication of its own: every call carries the
/// headers handed to it (an [`AuthSession`] for operation calls, none for the
/// ticket request). No retries are made; a non-2xx answer becomes
/// [`ProxmoxError::RemoteApi`] and a connection failure becomes
/// [`ProxmoxError::Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    server_url: ProxmoxUrl,
    accept_invalid_certs: bool,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Transport` if the HTTP client cannot be built and
    /// `ProxmoxError::Validation` for a zero rate limit.
    pub fn new(
        server_url: ProxmoxUrl,
        ignore_tls_errors: bool,
        rate_limit: Option<RateLimitConfig>,
    ) -> ProxmoxResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(ignore_tls_errors)
            .build()
            .map_err(|e| ProxmoxError::Transport(e.to_string()))?;

        let rate_limiter = rate_limit
            .map(|rl| -> ProxmoxResult<_> {
                let per_second = non_zero("requests_per_second", rl.requests_per_second)?;
                let burst = non_zero("burst_size", rl.burst_size)?;
                let quota = Quota::per_second(per_second).allow_burst(burst);
                Ok(Arc::new(DefaultDirectRateLimiter::direct(quota)))
            })
            .transpose()?;

        Ok(Self {
            http_client,
            server_url,
            accept_invalid_certs: ignore_tls_errors,
            rate_limiter,
        })
    }

    /// Builds a client for the server and TLS policy of `credentials`.
    pub fn for_credentials(credentials: &Credentials, config: &ClientConfig) -> ProxmoxResult<Self> {
        Self::new(
            credentials.server_url().clone(),
            credentials.ignore_tls_errors(),
            config.rate_limit,
        )
    }

    /// Whether certificate and hostname checks are skipped on every call.
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns the server this client talks to.
    pub fn server_url(&self) -> &ProxmoxUrl {
        &self.server_url
    }

    /// Executes a prepared operation call under `session`.
    pub async fn execute(
        &self,
        request: &PreparedRequest,
        session: &AuthSession,
    ) -> ProxmoxResult<ApiResponse> {
        let payload = match &request.body {
            Some(body) => Payload::Json(body),
            None => Payload::Empty,
        };
        self.send(request.method, &request.path, session.headers(), payload)
            .await
    }

    /// Sends one request and decodes the JSON response.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &RenderedPath,
        headers: &HeaderMap,
        payload: Payload<'_>,
    ) -> ProxmoxResult<ApiResponse> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.server_url.endpoint(&path.segments, &path.query)?;
        debug!(%method, path = %path, "sending Proxmox API request");

        let mut req_builder = self
            .http_client
            .request(method.into(), url)
            .headers(headers.clone());
        req_builder = match payload {
            Payload::Empty => req_builder,
            Payload::Json(body) => req_builder.json(body),
            Payload::Form(fields) => req_builder.form(fields),
        };

        let response = req_builder
            .send()
            .await
            .map_err(|e| ProxmoxError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProxmoxError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), path = %path, "Proxmox API returned an error");
            return Err(ProxmoxError::RemoteApi {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(ApiResponse::from(serde_json::json!({ "data": null })));
        }
        serde_json::from_str::<ApiResponse>(&text)
            .map_err(|e| ProxmoxError::Transport(format!("Failed to parse response: {}", e)))
    }
}

fn non_zero(field: &str, value: u32) -> ProxmoxResult<NonZeroU32> {
    NonZeroU32::new(value).ok_or_else(|| {
        ValidationError::Field {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into()
    })
}
