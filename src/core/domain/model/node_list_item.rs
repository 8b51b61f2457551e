//! Node listing: the `/nodes` entries and the selection options built from them.

use serde::{Deserialize, Serialize};

/// A node in the Proxmox cluster as returned by `/api2/json/nodes`.
///
/// Only `node` is needed to build selection options; the rest is kept when
/// the server sends it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeListItem {
    /// The node name (e.g., "pve1").
    pub node: String,
    /// Current node status (e.g., "online", "offline", "unknown").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// CPU usage percentage (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    /// Maximum CPU count (number of cores/threads).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxcpu: Option<u32>,
    /// Memory usage in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem: Option<u64>,
    /// Maximum memory in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxmem: Option<u64>,
    /// System uptime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}

/// One entry of a node selection control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOption {
    pub display_name: String,
    pub id: String,
}

impl From<NodeListItem> for NodeOption {
    fn from(item: NodeListItem) -> Self {
        Self {
            display_name: item.node.clone(),
            id: item.node,
        }
    }
}
