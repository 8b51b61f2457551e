//! Response envelope and normalization into output records.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The `data` member of a Proxmox response, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// An ordered sequence; each element becomes its own record.
    List(Vec<Value>),
    /// A single structured object.
    Object(Map<String, Value>),
    /// A scalar (e.g. a task UPID string).
    Scalar(Value),
    /// `data` was absent or `null`.
    Empty,
}

/// A decoded response: `{"data": ...}` plus whatever else the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ApiResponse {
    data: ResponseData,
    raw: Value,
}

impl From<Value> for ApiResponse {
    fn from(raw: Value) -> Self {
        let data = match raw.get("data") {
            Some(Value::Array(items)) => ResponseData::List(items.clone()),
            Some(Value::Object(map)) => ResponseData::Object(map.clone()),
            None | Some(Value::Null) => ResponseData::Empty,
            Some(scalar) => ResponseData::Scalar(scalar.clone()),
        };
        Self { data, raw }
    }
}

impl ApiResponse {
    pub fn data(&self) -> &ResponseData {
        &self.data
    }

    /// The full decoded body.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Flattens the response into output payloads.
    ///
    /// A list yields one payload per element in server order; an object yields
    /// itself; anything else yields the whole decoded body.
    pub fn normalize(self) -> Vec<Value> {
        match self.data {
            ResponseData::List(items) => items,
            ResponseData::Object(map) => vec![Value::Object(map)],
            ResponseData::Scalar(_) | ResponseData::Empty => vec![self.raw],
        }
    }
}
