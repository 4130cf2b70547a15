//! REST surface over the store clients.

pub mod auth;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;


use axum::Router;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::app_system::SystemError;
use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", routes::health::routes())
        .nest("/api/products", routes::products::routes(&state))
        .nest("/api/cart", routes::cart::routes(&state))
        .nest("/api/orders", routes::orders::routes(&state))
        .nest("/api/payment", routes::payment::routes(&state))
        .nest("/api/wishlist", routes::wishlist::routes(&state))
        .nest("/api/reviews", routes::reviews::routes(&state))
        .nest("/api/users", routes::users::routes(&state))
        .nest("/api/admin", routes::admin::routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<(), SystemError> {
    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
