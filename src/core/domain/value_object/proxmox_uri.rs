use crate::core::domain::error::{ProxmoxResult, ValidationError};
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];
const MAX_URL_LENGTH: usize = 2083;
const API_PREFIX: [&str; 2] = ["api2", "json"];

/// A validated Proxmox server URL (`https://pve.example.com:8006`).
///
/// Both `https` and `http` are accepted; self-signed setups are handled by the
/// TLS policy on the credentials, not by the scheme. A path on the server URL
/// (reverse-proxy prefix) is kept in front of the API prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(Url);

impl ProxmoxUrl {
    /// Parses and validates a server URL.
    pub fn new(value: &str) -> ProxmoxResult<Self> {
        Ok(Self(validate_url(value)?))
    }

    /// Returns the server URL as given (normalized by the URL parser).
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `<server>/api2/json`.
    pub fn api_base(&self) -> ProxmoxResult<Url> {
        self.endpoint::<&str>(&[], &[])
    }

    /// Builds `<server>/api2/json/<segments...>?<query>`.
    ///
    /// Every segment is percent-encoded on its own, so values such as volume ids
    /// (`local:backup/vzdump-...`) stay within one path segment.
    pub fn endpoint<S: AsRef<str>>(
        &self,
        segments: &[S],
        query: &[(&str, &str)],
    ) -> ProxmoxResult<Url> {
        if let Some(dot) = segments
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|s| matches!(*s, "." | ".."))
        {
            return Err(ValidationError::Format(format!(
                "'{}' is not a valid path segment",
                dot
            ))
            .into());
        }
        let mut url = self.0.clone();
        url.set_query(None);
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ValidationError::Format(format!("URL cannot be a base: {}", self.0))
            })?;
            path.pop_if_empty();
            path.extend(API_PREFIX);
            path.extend(segments.iter().map(AsRef::as_ref));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Validates a server URL and returns it parsed.
pub(crate) fn validate_url(value: &str) -> Result<Url, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Field {
            field: "server_url".to_string(),
            message: "Server URL cannot be empty".to_string(),
        });
    }
    if value.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }
    let url =
        Url::parse(value).map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Field {
            field: "server_url".to_string(),
            message: "Server URL must include a host".to_string(),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::ConstraintViolation(
            "Server URL cannot carry a query or fragment".to_string(),
        ));
    }
    Ok(url)
}
