include!("../../lib.rs");
use std::time::Duration;
use axum::{
    routing::post,
    Router,
};
use lambda_http::{run, Error};
use tracing::{info, warn};
use crate::booking::controller::{cancel_booking, confirm_booking, direct_booking, finalize_booking};
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::hold::controller::{create_hold, extend_hold, release_hold};
use crate::hold::domain::HoldService;
use crate::utils::ddb::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB).await
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB).await
    };

    // expired holds are already invisible to conflict checks; the sweep only
    // keeps the working set from growing without bound
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(
            Duration::from_secs(sweeper.config.sweep_interval_secs));
        loop {
            ticker.tick().await;
            match sweeper.registry.holds.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => info!("expiry sweep evicted {} holds", purged),
                Err(err) => warn!("expiry sweep failed: {}", err),
            }
        }
    });

    let app = Router::new()
        .route("/bookings/hold", post(create_hold))
        .route("/bookings/hold/extend", post(extend_hold))
        .route("/bookings/hold/release", post(release_hold))
        .route("/bookings/finalize", post(finalize_booking))
        .route("/bookings/direct", post(direct_booking))
        .route("/bookings/confirm", post(confirm_booking))
        .route("/bookings/cancel", post(cancel_booking))
        .with_state(state);

    run(app).await
}
