pub mod application;
pub mod registry;
