//! Client-side configuration shared by the executor, the authentication
//! provider and the batch processor.

use crate::core::domain::model::operation::RegistryVersion;

/// Client-side request pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second (must be non-zero).
    pub requests_per_second: u32,
    /// Requests allowed in a burst before pacing kicks in (must be non-zero).
    pub burst_size: u32,
}

/// Configuration for a [`crate::ProxmoxClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Failure isolation: convert per-item failures into failure records
    /// instead of aborting the batch.
    pub continue_on_fail: bool,
    /// Optional outbound rate limit. `None` disables pacing.
    pub rate_limit: Option<RateLimitConfig>,
    /// Which operation table the registry is built from.
    pub registry_version: RegistryVersion,
    /// Minimum zxcvbn score required of a ticket-login password, if any.
    pub password_min_score: Option<zxcvbn::Score>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            rate_limit: None,
            registry_version: RegistryVersion::LATEST,
            password_min_score: None,
        }
    }
}
