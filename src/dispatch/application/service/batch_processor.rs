use crate::{
    auth::application::service::session_provider::AuthenticationProvider,
    core::{
        domain::{
            config::ClientConfig,
            error::{ProxmoxError, ProxmoxResult},
            model::{
                auth_session::AuthSession,
                credentials::CredentialSource,
                execution_result::{ExecutionResult, ItemState, OutputRecord},
                work_item::{OPERATION_PARAM, ParameterSource, RESOURCE_PARAM, ResolvedParams},
            },
        },
        infrastructure::api_client::ApiClient,
    },
    dispatch::registry::OperationRegistry,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Runs work items one after another against a single session.
///
/// With `continue_on_fail` every item failure becomes a failure record and the
/// batch goes on. Without it the first failure ends the batch with
/// [`ProxmoxError::BatchAborted`], which carries the records emitted so far.
pub struct BatchProcessor {
    registry: OperationRegistry,
    authenticator: AuthenticationProvider,
    config: ClientConfig,
}

impl BatchProcessor {
    /// A processor over the registry version named in `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_registry(OperationRegistry::new(config.registry_version), config)
    }

    pub fn with_registry(registry: OperationRegistry, config: ClientConfig) -> Self {
        Self {
            registry,
            authenticator: AuthenticationProvider::new(),
            config,
        }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves credentials once, authenticates once and builds the client
    /// every item of the batch shares.
    pub async fn open_session(
        &self,
        credentials: &(impl CredentialSource + ?Sized),
    ) -> ProxmoxResult<(ApiClient, AuthSession)> {
        let credentials = credentials.get_credentials().await?;
        let client = ApiClient::for_credentials(&credentials, &self.config)?;
        let session = self
            .authenticator
            .obtain_session(&client, &credentials)
            .await?;
        Ok((client, session))
    }

    /// Processes every item of `source` in order.
    ///
    /// # Errors
    /// Only without `continue_on_fail`: [`ProxmoxError::BatchAborted`] with
    /// `item_index: None` when no session could be opened, or the index of the
    /// first failing item otherwise.
    pub async fn run(
        &self,
        credentials: &(impl CredentialSource + ?Sized),
        source: &(impl ParameterSource + ?Sized),
    ) -> ProxmoxResult<Vec<OutputRecord>> {
        let item_count = source.item_count();
        info!(
            items = item_count,
            continue_on_fail = self.config.continue_on_fail,
            registry = ?self.registry.version(),
            "starting batch"
        );

        let (client, session) = match self.open_session(credentials).await {
            Ok(opened) => opened,
            Err(e) if self.config.continue_on_fail => {
                warn!(error = %e, "no session for batch; failing every item");
                let message = e.to_string();
                return Ok((0..item_count)
                    .map(|item_index| OutputRecord::failure(item_index, message.clone()))
                    .collect());
            }
            Err(e) => {
                error!(error = %e, "batch aborted before the first item");
                return Err(ProxmoxError::BatchAborted {
                    item_index: None,
                    source: Box::new(e),
                    emitted: Vec::new(),
                });
            }
        };

        let mut records = Vec::with_capacity(item_count);
        for item_index in 0..item_count {
            let result = match self
                .execute_item(&client, &session, source, item_index)
                .await
            {
                Ok(result) => result,
                Err(e) if self.config.continue_on_fail => {
                    warn!(item_index, error = %e, "item failed, continuing");
                    ExecutionResult::Failure {
                        item_index,
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    error!(item_index, error = %e, "batch aborted");
                    return Err(ProxmoxError::BatchAborted {
                        item_index: Some(item_index),
                        source: Box::new(e),
                        emitted: records,
                    });
                }
            };
            records.extend(result.into_records());
        }

        info!(items = item_count, records = records.len(), "batch finished");
        Ok(records)
    }

    /// Resolves, dispatches and normalizes one item.
    ///
    /// Returns the failure itself rather than a failure record; isolation is
    /// decided by the caller.
    pub async fn execute_item(
        &self,
        client: &ApiClient,
        session: &AuthSession,
        source: &(impl ParameterSource + ?Sized),
        item_index: usize,
    ) -> ProxmoxResult<ExecutionResult> {
        debug!(item_index, state = ?ItemState::Pending, "resolving item");
        let outcome = self.dispatch(client, session, source, item_index).await;
        match &outcome {
            Ok(_) => transition(item_index, ItemState::Dispatched, ItemState::Succeeded),
            Err(_) => debug!(item_index, state = ?ItemState::Failed, "item failed"),
        }
        outcome.map(|payloads| ExecutionResult::Success {
            item_index,
            payloads,
        })
    }

    async fn dispatch(
        &self,
        client: &ApiClient,
        session: &AuthSession,
        source: &(impl ParameterSource + ?Sized),
        item_index: usize,
    ) -> ProxmoxResult<Vec<Value>> {
        let resource = name_param(source, RESOURCE_PARAM, item_index)?;
        let operation = name_param(source, OPERATION_PARAM, item_index)?;
        let descriptor = self
            .registry
            .resolve_named(&resource, &operation)
            .inspect_err(|e| error!(item_index, error = %e, "operation is not registered"))?;

        let params = ResolvedParams::resolve(source, item_index, descriptor.required_params())?;
        let request = descriptor.prepare(&params)?;

        transition(item_index, ItemState::Pending, ItemState::Dispatched);
        let response = client.execute(&request, session).await?;
        Ok(response.normalize())
    }
}

fn transition(item_index: usize, from: ItemState, to: ItemState) {
    debug_assert!(from.can_transition_to(to));
    debug!(item_index, from = ?from, to = ?to, "item state changed");
}

fn name_param(
    source: &(impl ParameterSource + ?Sized),
    name: &str,
    item_index: usize,
) -> ProxmoxResult<String> {
    match source.get_parameter(name, item_index)? {
        Value::String(value) if !value.is_empty() => Ok(value),
        other => Err(ProxmoxError::parameter(
            item_index,
            name,
            format!("expected a non-empty string, got {}", other),
        )),
    }
}
