use axum::{
    routing::{get, post},
    Router,
};
use client_registry_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool.clone());

    // The registry must never come up without an administrator.
    app_state.user_service.ensure_default_admin().await?;

    let public_api = Router::new().route("/api/auth/login", post(routes::auth::login));

    let protected_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/:id",
            axum::routing::put(routes::users::update_user).delete(routes::users::delete_user),
        )
        .route(
            "/api/clients",
            get(routes::clients::list_clients).post(routes::clients::create_client),
        )
        .route(
            "/api/clients/former",
            get(routes::clients::list_former_clients),
        )
        .route(
            "/api/clients/:id",
            get(routes::clients::get_client)
                .put(routes::clients::update_client)
                .delete(routes::clients::delete_client),
        )
        .route(
            "/api/options/tax-regimes",
            get(routes::options::list_tax_regimes),
        )
        .route(
            "/api/options/legal-natures",
            get(routes::options::list_legal_natures),
        )
        .route(
            "/api/options/company-sizes",
            get(routes::options::list_company_sizes),
        )
        .route("/api/options/statuses", get(routes::options::list_statuses))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_bearer_auth,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(protected_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Symmetrical to startup: release the store connection before exiting.
    pool.close().await;
    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, starting graceful shutdown"),
        _ = terminate => info!("SIGTERM received, starting graceful shutdown"),
    }
}
