use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::calendar::command::add_time_off_cmd::{AddTimeOffCommand, AddTimeOffCommandRequest, AddTimeOffCommandResponse};
use crate::calendar::command::put_holiday_cmd::{PutHolidayCommand, PutHolidayCommandRequest, PutHolidayCommandResponse};
use crate::calendar::command::put_working_hours_cmd::{PutWorkingHoursCommand, PutWorkingHoursCommandRequest, PutWorkingHoursCommandResponse};
use crate::calendar::command::remove_holiday_cmd::{RemoveHolidayCommand, RemoveHolidayCommandRequest, RemoveHolidayCommandResponse};
use crate::calendar::command::remove_time_off_cmd::{RemoveTimeOffCommand, RemoveTimeOffCommandRequest, RemoveTimeOffCommandResponse};
use crate::calendar::command::remove_working_hours_cmd::{RemoveWorkingHoursCommand, RemoveWorkingHoursCommandRequest, RemoveWorkingHoursCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn put_working_hours(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<PutWorkingHoursCommandResponse>, ServerError> {
    let req: PutWorkingHoursCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = PutWorkingHoursCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_working_hours(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RemoveWorkingHoursCommandResponse>, ServerError> {
    let req: RemoveWorkingHoursCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = RemoveWorkingHoursCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_time_off(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddTimeOffCommandResponse>, ServerError> {
    let req: AddTimeOffCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddTimeOffCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_time_off(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RemoveTimeOffCommandResponse>, ServerError> {
    let req: RemoveTimeOffCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = RemoveTimeOffCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn put_holiday(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<PutHolidayCommandResponse>, ServerError> {
    let req: PutHolidayCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = PutHolidayCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_holiday(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RemoveHolidayCommandResponse>, ServerError> {
    let req: RemoveHolidayCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = RemoveHolidayCommand::new(state.registry.calendar.clone()).execute(req).await?;
    Ok(Json(res))
}
