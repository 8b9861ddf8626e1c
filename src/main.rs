use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod logic;
mod middleware;
mod models;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod business_logic_tests;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rukun Backend...");

    let record_store = store::init_store();
    if let Err(e) = store::ensure_seed_admin(record_store.as_ref()).await {
        tracing::error!("Failed to seed admin account: {}", e);
    }

    let app_state = AppState::new(record_store);

    // Response wrapper sits outside auth so rejected requests still get the
    // standard envelope.
    let app = Router::new()
        .route("/", get(root))
        .merge(routes::create_router())
        .layer(axum::middleware::from_fn(
            middleware::auth::auth_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::response::wrap_response_middleware,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr_str = format!("0.0.0.0:{}", port);
    let addr = match addr_str.parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid listen address {}: {}", addr_str, e);
            return;
        }
    };

    tracing::info!("listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server exited with error: {}", e);
    }
}

async fn root() -> &'static str {
    "Rukun backend is running"
}
