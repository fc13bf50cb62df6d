pub mod auth;
pub mod clients;
pub mod health;
pub mod options;
pub mod users;
