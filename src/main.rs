mod actor_framework;
mod app_system;
mod catalog;
mod clients;
mod config;
mod domain;
mod http;
mod payment;

mod cart_actor;
mod order_actor;
mod product_actor;
mod review_actor;
mod user_actor;
mod wishlist_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info};

use crate::app_system::{setup_tracing, StoreSystem, SystemError};
use crate::config::Config;
use crate::http::state::AppState;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // A missing .env file is normal outside development.
    let _ = dotenv::dotenv();
    setup_tracing();

    let config = Config::load().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    info!(port = config.port, "Starting storefront");
    let system = StoreSystem::new(&config);
    let admin = system.bootstrap(&config).await?;

    let state = AppState::new(&system, &config);
    if let Some(admin) = admin {
        match state.jwt.issue(&admin) {
            Ok(token) => info!(email = %admin.email, %token, "Admin bearer token"),
            Err(e) => error!(error = %e, "Could not issue admin token"),
        }
    }
    let served = http::serve(state, config.port).await;
    if let Err(e) = &served {
        error!(error = %e, "Server failed");
    }

    system.shutdown().await?;
    served
}
