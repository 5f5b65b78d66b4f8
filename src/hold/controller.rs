use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest, CreateHoldCommandResponse};
use crate::hold::command::extend_hold_cmd::{ExtendHoldCommand, ExtendHoldCommandRequest, ExtendHoldCommandResponse};
use crate::hold::command::release_hold_cmd::{ReleaseHoldCommand, ReleaseHoldCommandRequest, ReleaseHoldCommandResponse};

pub(crate) async fn create_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CreateHoldCommandResponse>, ServerError> {
    let req: CreateHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = CreateHoldCommand::new(state.registry.holds.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn extend_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ExtendHoldCommandResponse>, ServerError> {
    let req: ExtendHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ExtendHoldCommand::new(state.registry.holds.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn release_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReleaseHoldCommandResponse>, ServerError> {
    let req: ReleaseHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ReleaseHoldCommand::new(state.registry.holds.clone()).execute(req).await?;
    Ok(Json(res))
}
