include!("../../lib.rs");
use axum::{
    routing::get,
    Router,
};
use lambda_http::{run, Error};
use crate::availability::controller::{available_dates, available_slots, batch_availability};
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
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

    let app = Router::new()
        .route("/availability/slots", get(available_slots))
        .route("/availability/batch", get(batch_availability))
        .route("/availability/dates", get(available_dates))
        .with_state(state);

    run(app).await
}
