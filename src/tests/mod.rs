mod resources;

use crate::{ProxmoxClient, RegistryVersion};

/// A token-authenticated client against a mock server.
pub(crate) fn token_client(server_url: &str, continue_on_fail: bool) -> ProxmoxClient {
    ProxmoxClient::builder()
        .server_url(server_url)
        .api_token("root@pam!ci=secret")
        .continue_on_fail(continue_on_fail)
        .registry_version(RegistryVersion::LATEST)
        .build()
        .unwrap()
}
