use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::booking::command::cancel_booking_cmd::{CancelBookingCommand, CancelBookingCommandRequest, CancelBookingCommandResponse};
use crate::booking::command::confirm_booking_cmd::{ConfirmBookingCommand, ConfirmBookingCommandRequest, ConfirmBookingCommandResponse};
use crate::booking::command::direct_booking_cmd::{DirectBookingCommand, DirectBookingCommandRequest, DirectBookingCommandResponse};
use crate::booking::command::finalize_booking_cmd::{FinalizeBookingCommand, FinalizeBookingCommandRequest, FinalizeBookingCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn finalize_booking(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<FinalizeBookingCommandResponse>, ServerError> {
    let req: FinalizeBookingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = FinalizeBookingCommand::new(state.registry.booking.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn direct_booking(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<DirectBookingCommandResponse>, ServerError> {
    let req: DirectBookingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = DirectBookingCommand::new(state.registry.booking.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn confirm_booking(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ConfirmBookingCommandResponse>, ServerError> {
    let req: ConfirmBookingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ConfirmBookingCommand::new(state.registry.booking.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn cancel_booking(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CancelBookingCommandResponse>, ServerError> {
    let req: CancelBookingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = CancelBookingCommand::new(state.registry.booking.clone()).execute(req).await?;
    Ok(Json(res))
}
