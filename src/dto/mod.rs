pub mod auth_dto;
pub mod client_dto;
pub mod user_dto;
