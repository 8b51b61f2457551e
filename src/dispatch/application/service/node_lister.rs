use crate::{
    auth::application::service::session_provider::AuthenticationProvider,
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::{
                credentials::Credentials,
                node_list_item::{NodeListItem, NodeOption},
                operation::HttpMethod,
                path_template::RenderedPath,
            },
        },
        infrastructure::api_client::{ApiClient, Payload},
    },
};
use serde_json::Value;
use tracing::debug;

/// Reads the cluster's node names for a selection control.
///
/// Every call authenticates and lists once; nothing is cached.
pub struct NodeLister {
    authenticator: AuthenticationProvider,
    nodes_path: RenderedPath,
}

impl NodeLister {
    pub fn new() -> Self {
        Self {
            authenticator: AuthenticationProvider::new(),
            nodes_path: RenderedPath {
                segments: vec!["nodes".to_string()],
                query: Vec::new(),
            },
        }
    }

    /// Lists nodes in server order as `{displayName, id}` pairs.
    pub async fn list_nodes(
        &self,
        client: &ApiClient,
        credentials: &Credentials,
    ) -> ProxmoxResult<Vec<NodeOption>> {
        let session = self.authenticator.obtain_session(client, credentials).await?;
        let response = client
            .send(
                HttpMethod::Get,
                &self.nodes_path,
                session.headers(),
                Payload::Empty,
            )
            .await?;

        let data = response.raw().get("data").cloned().unwrap_or(Value::Null);
        let nodes: Vec<NodeListItem> = serde_json::from_value(data)
            .map_err(|e| ProxmoxError::Transport(format!("Failed to parse node list: {}", e)))?;
        debug!(count = nodes.len(), "listed cluster nodes");

        Ok(nodes.into_iter().map(NodeOption::from).collect())
    }
}

impl Default for NodeLister {
    fn default() -> Self {
        Self::new()
    }
}
