use axum::{
    extract::{Query, State},
    response::Json,
};
use crate::availability::command::get_available_dates_cmd::{GetAvailableDatesCommand, GetAvailableDatesCommandRequest, GetAvailableDatesCommandResponse};
use crate::availability::command::get_available_slots_cmd::{GetAvailableSlotsCommand, GetAvailableSlotsCommandRequest, GetAvailableSlotsCommandResponse};
use crate::availability::command::get_batch_availability_cmd::{GetBatchAvailabilityCommand, GetBatchAvailabilityCommandRequest, GetBatchAvailabilityCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};

pub(crate) async fn available_slots(
    State(state): State<AppState>,
    Query(req): Query<GetAvailableSlotsCommandRequest>) -> Result<Json<GetAvailableSlotsCommandResponse>, ServerError> {
    let res = GetAvailableSlotsCommand::new(state.registry.availability.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn batch_availability(
    State(state): State<AppState>,
    Query(req): Query<GetBatchAvailabilityCommandRequest>) -> Result<Json<GetBatchAvailabilityCommandResponse>, ServerError> {
    let res = GetBatchAvailabilityCommand::new(state.registry.availability.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn available_dates(
    State(state): State<AppState>,
    Query(req): Query<GetAvailableDatesCommandRequest>) -> Result<Json<GetAvailableDatesCommandResponse>, ServerError> {
    let res = GetAvailableDatesCommand::new(state.registry.availability.clone()).execute(req).await?;
    Ok(Json(res))
}
