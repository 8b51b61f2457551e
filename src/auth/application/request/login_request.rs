use crate::core::domain::value_object::{ProxmoxPassword, ProxmoxUsername};

/// Form fields of `POST /access/ticket`.
pub struct LoginRequest<'a> {
    pub username: &'a ProxmoxUsername,
    pub password: &'a ProxmoxPassword,
}

impl<'a> LoginRequest<'a> {
    pub fn form_fields(&self) -> [(&'a str, &'a str); 2] {
        [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}
