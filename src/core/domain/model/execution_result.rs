//! Per-item outcomes and the flat output records a batch produces.

use serde::Serialize;
use serde_json::{Value, json};

/// Lifecycle of one work item: `Pending → Dispatched → {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Dispatched,
    Succeeded,
    Failed,
}

impl ItemState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Succeeded | ItemState::Failed)
    }

    /// Whether `next` is a legal successor of this state.
    #[must_use]
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (ItemState::Pending, ItemState::Dispatched)
                | (ItemState::Pending, ItemState::Failed)
                | (ItemState::Dispatched, ItemState::Succeeded)
                | (ItemState::Dispatched, ItemState::Failed)
        )
    }
}

/// The outcome of one work item. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Success {
        item_index: usize,
        payloads: Vec<Value>,
    },
    Failure {
        item_index: usize,
        message: String,
    },
}

impl ExecutionResult {
    pub fn item_index(&self) -> usize {
        match self {
            ExecutionResult::Success { item_index, .. }
            | ExecutionResult::Failure { item_index, .. } => *item_index,
        }
    }

    pub fn state(&self) -> ItemState {
        match self {
            ExecutionResult::Success { .. } => ItemState::Succeeded,
            ExecutionResult::Failure { .. } => ItemState::Failed,
        }
    }

    /// Expands into output records, contiguous and in payload order.
    pub fn into_records(self) -> Vec<OutputRecord> {
        match self {
            ExecutionResult::Success {
                item_index,
                payloads,
            } => payloads
                .into_iter()
                .map(|json| OutputRecord::success(item_index, json))
                .collect(),
            ExecutionResult::Failure {
                item_index,
                message,
            } => vec![OutputRecord::failure(item_index, message)],
        }
    }
}

/// One element of a batch's output sequence.
///
/// Failure records have the same shape as success records; `json` is
/// `{"error": message}` and `error` carries the message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub json: Value,
    pub item_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OutputRecord {
    pub fn success(item_index: usize, json: Value) -> Self {
        Self {
            json,
            item_index,
            error: None,
        }
    }

    pub fn failure(item_index: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            json: json!({ "error": message }),
            item_index,
            error: Some(message),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
