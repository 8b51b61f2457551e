use crate::core::domain::model::execution_result::OutputRecord;
use thiserror::Error;

/// The main error type for Proxmox dispatch operations.
///
/// Every failure the dispatcher can produce is one of these kinds. When a batch
/// runs with failure isolation enabled, each of them is converted into a
/// failure record at the item boundary instead of being returned.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Credential or ticket-issuance failure
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// No descriptor is registered for the requested pair
    ///
    /// # Fields
    /// * `resource` - The resource name as requested
    /// * `operation` - The operation identifier as requested
    #[error("Unknown operation '{operation}' for resource '{resource}'")]
    UnknownOperation { resource: String, operation: String },

    /// A required parameter is missing or has the wrong shape
    ///
    /// # Fields
    /// * `item_index` - Index of the work item being resolved
    /// * `name` - The parameter name
    /// * `message` - Why the parameter was rejected
    #[error("Parameter '{name}' (item {item_index}): {message}")]
    Parameter {
        item_index: usize,
        name: String,
        message: String,
    },

    /// Network-level failure (connect, TLS, timeout, unreadable body)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong on the wire
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-2xx status
    ///
    /// # Fields
    /// * `status` - HTTP status code
    /// * `body` - Raw response body, kept for diagnostics
    #[error("API error ({status}): {body}")]
    RemoteApi { status: u16, body: String },

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `source` - The underlying validation error
    #[error("Validation error: {source}")]
    Validation { source: ValidationError },

    /// A batch without failure isolation stopped at `item_index`
    ///
    /// # Fields
    /// * `item_index` - The item whose failure stopped the batch, if any item was reached
    /// * `source` - The failure itself
    /// * `emitted` - Records produced before the failure
    #[error("Batch aborted at item {item_index:?}: {source}")]
    BatchAborted {
        item_index: Option<usize>,
        source: Box<ProxmoxError>,
        emitted: Vec<OutputRecord>,
    },
}

impl ProxmoxError {
    pub(crate) fn parameter(
        item_index: usize,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ProxmoxError::Parameter {
            item_index,
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ProxmoxError {
    fn from(error: ValidationError) -> Self {
        ProxmoxError::Validation { source: error }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
