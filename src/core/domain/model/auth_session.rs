use reqwest::header::HeaderMap;

/// Request headers produced by one authentication, reused read-only for every
/// call of a batch.
///
/// Expiry of a ticket-based session is not tracked; it surfaces as a
/// `RemoteApi` error (401) on the affected call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    headers: HeaderMap,
}

impl AuthSession {
    pub(crate) fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
