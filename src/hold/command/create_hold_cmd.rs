use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::dto::HoldDto;
use crate::utils::date::parse_time;

pub(crate) struct CreateHoldCommand {
    hold_service: Arc<dyn HoldService>,
}

impl CreateHoldCommand {
    pub(crate) fn new(hold_service: Arc<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateHoldCommandRequest {
    pub master_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub client_id: String,
}

// a lost race is an expected answer for this endpoint, not a failure: the
// booking flow reads `success` and re-fetches availability on "conflict"
#[derive(Debug, Serialize)]
pub(crate) struct CreateHoldCommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<HoldDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateHoldCommandResponse {
    pub fn won(hold: HoldDto) -> Self {
        Self {
            success: true,
            hold: Some(hold),
            error: None,
        }
    }

    pub fn lost() -> Self {
        Self {
            success: false,
            hold: None,
            error: Some("conflict".to_string()),
        }
    }
}

#[async_trait]
impl Command<CreateHoldCommandRequest, CreateHoldCommandResponse> for CreateHoldCommand {
    async fn execute(&self, req: CreateHoldCommandRequest) -> Result<CreateHoldCommandResponse, CommandError> {
        let start_time = parse_time(req.time.as_str()).map_err(CommandError::from)?;
        match self.hold_service.create_hold(req.master_id.as_str(), req.service_id.as_str(),
                                            req.date, start_time, req.client_id.as_str()).await {
            Ok(hold) => Ok(CreateHoldCommandResponse::won(hold)),
            Err(err) if err.is_conflict() => Ok(CreateHoldCommandResponse::lost()),
            Err(err) => Err(CommandError::from(err)),
        }
    }
}
