pub mod login_service;
pub mod session_provider;
