mod proxmox_api_token;
mod proxmox_csrf_token;
mod proxmox_password;
mod proxmox_ticket;
mod proxmox_uri;
mod proxmox_username;

pub use proxmox_api_token::ProxmoxApiToken;
pub use proxmox_csrf_token::{CSRF_HEADER, ProxmoxCSRFToken};
pub use proxmox_password::ProxmoxPassword;
pub use proxmox_ticket::ProxmoxTicket;
pub use proxmox_uri::ProxmoxUrl;
pub use proxmox_username::ProxmoxUsername;

use crate::core::domain::error::ValidationError;

/// Rejects values that cannot travel in an HTTP header.
pub(crate) fn validate_header_safe(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Field {
            field: field.to_string(),
            message: format!("{} cannot be empty", field),
        });
    }
    if value.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(ValidationError::Format(format!(
            "{} contains whitespace or control characters",
            field
        )));
    }
    Ok(())
}
