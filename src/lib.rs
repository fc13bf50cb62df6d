pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    auth_service::AuthService, client_service::ClientService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub client_service: ClientService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let client_service = ClientService::new(pool.clone());

        Self {
            pool,
            auth_service,
            user_service,
            client_service,
        }
    }
}
