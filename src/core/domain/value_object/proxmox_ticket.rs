use crate::core::domain::{
    error::{ProxmoxResult, ValidationError},
    value_object::validate_header_safe,
};

/// A Proxmox authentication ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxTicket(String);

impl ProxmoxTicket {
    /// Creates a validated ticket.
    pub fn new(value: String) -> ProxmoxResult<Self> {
        validate_ticket(&value)?;
        Ok(Self(value))
    }

    /// Creates a new ticket without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the ticket value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the ticket as a cookie header value.
    #[must_use]
    pub fn as_cookie_header(&self) -> String {
        format!("PVEAuthCookie={}", self.0)
    }
}

/// Validates a ticket string.
///
/// The ticket is opaque to the client; it only has to survive the trip into a
/// `Cookie` header.
pub(crate) fn validate_ticket(ticket: &str) -> Result<(), ValidationError> {
    validate_header_safe("ticket", ticket)?;
    if ticket.contains(';') {
        return Err(ValidationError::Format(
            "Ticket cannot contain ';'".to_string(),
        ));
    }
    Ok(())
}
