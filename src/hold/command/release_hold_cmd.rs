use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::dto::HoldDto;

pub(crate) struct ReleaseHoldCommand {
    hold_service: Arc<dyn HoldService>,
}

impl ReleaseHoldCommand {
    pub(crate) fn new(hold_service: Arc<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseHoldCommandRequest {
    pub hold_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReleaseHoldCommandResponse {
    pub success: bool,
    pub hold: HoldDto,
}

impl ReleaseHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            success: true,
            hold,
        }
    }
}

#[async_trait]
impl Command<ReleaseHoldCommandRequest, ReleaseHoldCommandResponse> for ReleaseHoldCommand {
    async fn execute(&self, req: ReleaseHoldCommandRequest) -> Result<ReleaseHoldCommandResponse, CommandError> {
        self.hold_service.release_hold(req.hold_id.as_str())
            .await.map_err(CommandError::from).map(ReleaseHoldCommandResponse::new)
    }
}
