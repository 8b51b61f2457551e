use serde::Deserialize;

/// Body of a successful `POST /access/ticket`.
#[derive(Deserialize)]
pub struct LoginResponse {
    pub data: LoginResponseData,
}

#[derive(Deserialize)]
pub struct LoginResponseData {
    pub ticket: String,
    #[serde(rename = "CSRFPreventionToken")]
    pub csrf_token: String,
    /// The canonical `user@realm` the server authenticated.
    #[serde(default)]
    pub username: Option<String>,
}
