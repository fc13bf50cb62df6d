pub mod auth_service;
pub mod client_service;
pub mod user_service;
