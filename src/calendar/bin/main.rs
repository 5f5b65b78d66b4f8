include!("../../lib.rs");
use axum::{
    routing::post,
    Router,
};
use lambda_http::{run, Error};
use crate::calendar::controller::{add_time_off, put_holiday, put_working_hours, remove_holiday, remove_time_off, remove_working_hours};
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
        .route("/calendar/working-hours", post(put_working_hours))
        .route("/calendar/working-hours/remove", post(remove_working_hours))
        .route("/calendar/time-off", post(add_time_off))
        .route("/calendar/time-off/remove", post(remove_time_off))
        .route("/calendar/holidays", post(put_holiday))
        .route("/calendar/holidays/remove", post(remove_holiday))
        .with_state(state);

    run(app).await
}
