//! Work items and the parameter-source seam the batch reads them through.

use crate::core::domain::error::{ProxmoxError, ProxmoxResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Parameter naming the resource of an item.
pub const RESOURCE_PARAM: &str = "resource";
/// Parameter naming the operation of an item.
pub const OPERATION_PARAM: &str = "operation";

/// Placeholders that only ever hold a guest id.
const NUMERIC_SEGMENTS: &[&str] = &["vmid"];

/// The host's per-item parameter lookup.
///
/// `get_parameter` fails with [`ProxmoxError::Parameter`] when `name` is not
/// declared for the item at `item_index`.
#[cfg_attr(test, mockall::automock)]
pub trait ParameterSource: Send + Sync {
    /// Number of items in the batch.
    fn item_count(&self) -> usize;

    fn get_parameter(&self, name: &str, item_index: usize) -> ProxmoxResult<Value>;
}

/// One unit of input: a resource, an operation and the values for its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    resource: String,
    operation: String,
    params: Map<String, Value>,
}

impl WorkItem {
    pub fn new(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            operation: operation.into(),
            params: Map::new(),
        }
    }

    /// Adds (or replaces) one parameter value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    fn lookup(&self, name: &str, item_index: usize) -> ProxmoxResult<Value> {
        match name {
            RESOURCE_PARAM => Ok(Value::String(self.resource.clone())),
            OPERATION_PARAM => Ok(Value::String(self.operation.clone())),
            _ => self.params.get(name).cloned().ok_or_else(|| {
                ProxmoxError::parameter(item_index, name, "parameter is not set for this item")
            }),
        }
    }
}

impl ParameterSource for [WorkItem] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn get_parameter(&self, name: &str, item_index: usize) -> ProxmoxResult<Value> {
        self.get(item_index)
            .ok_or_else(|| ProxmoxError::parameter(item_index, name, "no such item"))?
            .lookup(name, item_index)
    }
}

impl ParameterSource for Vec<WorkItem> {
    fn item_count(&self) -> usize {
        self.as_slice().item_count()
    }

    fn get_parameter(&self, name: &str, item_index: usize) -> ProxmoxResult<Value> {
        self.as_slice().get_parameter(name, item_index)
    }
}

impl ParameterSource for WorkItem {
    fn item_count(&self) -> usize {
        1
    }

    fn get_parameter(&self, name: &str, item_index: usize) -> ProxmoxResult<Value> {
        self.lookup(name, item_index)
    }
}

/// The values of an operation's required parameters for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    item_index: usize,
    values: BTreeMap<&'static str, Value>,
}

impl ResolvedParams {
    pub fn new(item_index: usize) -> Self {
        Self {
            item_index,
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn from_pairs(
        item_index: usize,
        pairs: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> Self {
        Self {
            item_index,
            values: pairs.into_iter().collect(),
        }
    }

    /// Pulls each name from `source`; the first missing one fails the item.
    pub fn resolve<'a>(
        source: &(impl ParameterSource + ?Sized),
        item_index: usize,
        names: impl IntoIterator<Item = &'a &'static str>,
    ) -> ProxmoxResult<Self> {
        let mut params = Self::new(item_index);
        for name in names {
            params
                .values
                .insert(*name, source.get_parameter(name, item_index)?);
        }
        Ok(params)
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    fn error(&self, name: &str, message: impl Into<String>) -> ProxmoxError {
        ProxmoxError::parameter(self.item_index, name, message)
    }

    pub fn get(&self, name: &str) -> ProxmoxResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| self.error(name, "required parameter is missing"))
    }

    /// A string value; numbers are accepted and rendered in decimal.
    pub fn string(&self, name: &str) -> ProxmoxResult<String> {
        match self.get(name)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(self.error(name, format!("expected a string, got {}", other))),
        }
    }

    /// A non-negative integer; numeric strings are accepted.
    pub fn u64(&self, name: &str) -> ProxmoxResult<u64> {
        let value = self.get(name)?;
        match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.error(name, format!("expected a non-negative integer, got {}", value)))
    }

    /// A structured object, passed through as a request body.
    pub fn object(&self, name: &str) -> ProxmoxResult<Map<String, Value>> {
        match self.get(name)? {
            Value::Object(map) => Ok(map.clone()),
            other => Err(self.error(name, format!("expected an object, got {}", other))),
        }
    }

    /// A value usable as one path segment.
    ///
    /// Guest ids must be integers. Dot segments are refused, since they would
    /// move the request to another endpoint once the URL is normalized.
    pub fn segment(&self, name: &str) -> ProxmoxResult<String> {
        if NUMERIC_SEGMENTS.contains(&name) {
            return self.u64(name).map(|id| id.to_string());
        }
        let value = self.string(name)?;
        match value.as_str() {
            "" => Err(self.error(name, "cannot be empty")),
            "." | ".." => Err(self.error(name, format!("'{}' is not a valid path segment", value))),
            _ => Ok(value),
        }
    }
}
