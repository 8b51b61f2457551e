//! Declarative, batch-oriented dispatcher for the Proxmox VE API.
//!
//! A work item names a resource, an operation and the operation's parameters.
//! The [`OperationRegistry`] turns it into an HTTP call, the
//! [`BatchProcessor`] runs items one after another under a single session and
//! normalizes every response into flat [`OutputRecord`]s.

pub mod auth;
pub mod core;
pub mod dispatch;

#[cfg(test)]
mod tests;

pub use crate::{
    auth::application::service::session_provider::AuthenticationProvider,
    core::{
        domain::{
            config::{ClientConfig, RateLimitConfig},
            error::{ProxmoxError, ProxmoxResult, ValidationError},
            model::{
                api_response::{ApiResponse, ResponseData},
                auth_session::AuthSession,
                credentials::{AuthMethod, CredentialSource, Credentials},
                execution_result::{ExecutionResult, ItemState, OutputRecord},
                node_list_item::{NodeListItem, NodeOption},
                operation::{HttpMethod, OperationDescriptor, RegistryVersion, Resource},
                work_item::{ParameterSource, WorkItem},
            },
            value_object::{
                ProxmoxApiToken, ProxmoxCSRFToken, ProxmoxPassword, ProxmoxTicket, ProxmoxUrl,
                ProxmoxUsername,
            },
        },
        infrastructure::api_client::ApiClient,
    },
    dispatch::{
        application::service::{batch_processor::BatchProcessor, node_lister::NodeLister},
        registry::OperationRegistry,
    },
};
use serde_json::Value;

/// A client bound to one server and one set of credentials.
///
/// # Examples
///
/// ```no_run
/// use proxmox_dispatch::{ProxmoxClient, ProxmoxResult, WorkItem};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let client = ProxmoxClient::builder()
///         .server_url("https://proxmox.example.com:8006")
///         .api_token("root@pam!automation=00000000-0000-0000-0000-000000000000")
///         .ignore_tls_errors(true)
///         .continue_on_fail(true)
///         .build()?;
///
///     let items = vec![
///         WorkItem::new("vm", "startVm").param("node", "pve1").param("vmid", 100),
///         WorkItem::new("vm", "getVmStatus").param("node", "pve1").param("vmid", 100),
///     ];
///     for record in client.run_batch(&items).await? {
///         println!("{}: {}", record.item_index, record.json);
///     }
///     Ok(())
/// }
/// ```
pub struct ProxmoxClient {
    credentials: Credentials,
    processor: BatchProcessor,
    node_lister: NodeLister,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug, Default)]
pub struct ProxmoxClientBuilder {
    server_url: Option<String>,
    api_token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    ignore_tls_errors: bool,
    config: ClientConfig,
}

impl ProxmoxClientBuilder {
    /// Base URL of the server, e.g. `https://pve.example.com:8006`.
    pub fn server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    /// Selects the API token scheme (`user@realm!tokenid=secret`).
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Selects the username/password ticket scheme.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn ignore_tls_errors(mut self, ignore: bool) -> Self {
        self.ignore_tls_errors = ignore;
        self
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.config.continue_on_fail = enabled;
        self
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.config.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    pub fn registry_version(mut self, version: RegistryVersion) -> Self {
        self.config.registry_version = version;
        self
    }

    /// Requires ticket-login passwords to reach this zxcvbn score.
    pub fn password_min_score(mut self, score: zxcvbn::Score) -> Self {
        self.config.password_min_score = Some(score);
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates everything and builds the client. No request is made.
    ///
    /// # Errors
    /// `Validation` for a missing or malformed URL, token, username or
    /// password; `Authentication` when no scheme (or both) was chosen.
    pub fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let server_url = ProxmoxUrl::new(&self.server_url.ok_or_else(|| {
            ProxmoxError::from(ValidationError::Field {
                field: "server_url".to_string(),
                message: "Server URL is required".to_string(),
            })
        })?)?;

        let auth_method = match (self.api_token, self.username, self.password) {
            (Some(token), None, None) => AuthMethod::Token(ProxmoxApiToken::new(token)?),
            (None, Some(username), Some(password)) => AuthMethod::UserPass {
                username: ProxmoxUsername::new(username)?,
                password: ProxmoxPassword::new(password, self.config.password_min_score)?,
            },
            (None, None, None) => {
                return Err(ProxmoxError::Authentication(
                    "Either an API token or a username and password is required".to_string(),
                ));
            }
            _ => {
                return Err(ProxmoxError::Authentication(
                    "API token and username/password are mutually exclusive".to_string(),
                ));
            }
        };

        if let Some(rate_limit) = self.config.rate_limit {
            if rate_limit.requests_per_second == 0 || rate_limit.burst_size == 0 {
                return Err(ValidationError::Field {
                    field: "rate_limit".to_string(),
                    message: "must be greater than zero".to_string(),
                }
                .into());
            }
        }

        Ok(ProxmoxClient {
            credentials: Credentials::new(server_url, auth_method, self.ignore_tls_errors),
            processor: BatchProcessor::new(self.config),
            node_lister: NodeLister::new(),
        })
    }
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        self.processor.config()
    }

    pub fn registry(&self) -> &OperationRegistry {
        self.processor.registry()
    }

    /// Runs every item of `source` under one fresh session.
    ///
    /// Records come back in item order; an item whose response is a list
    /// contributes one record per element.
    pub async fn run_batch(
        &self,
        source: &(impl ParameterSource + ?Sized),
    ) -> ProxmoxResult<Vec<OutputRecord>> {
        self.processor.run(&self.credentials, source).await
    }

    /// Executes a single item and returns its normalized payloads.
    ///
    /// Failures are returned as-is, regardless of `continue_on_fail`.
    pub async fn execute(&self, item: &WorkItem) -> ProxmoxResult<Vec<Value>> {
        let (client, session) = self.processor.open_session(&self.credentials).await?;
        let result = self
            .processor
            .execute_item(&client, &session, item, 0)
            .await?;
        Ok(result
            .into_records()
            .into_iter()
            .map(|record| record.json)
            .collect())
    }

    /// Lists the cluster's nodes as `{displayName, id}` options.
    pub async fn list_nodes(&self) -> ProxmoxResult<Vec<NodeOption>> {
        let client = ApiClient::for_credentials(&self.credentials, self.processor.config())?;
        self.node_lister
            .list_nodes(&client, &self.credentials)
            .await
    }
}
