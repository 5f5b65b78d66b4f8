use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::dto::HoldDto;

pub(crate) struct ExtendHoldCommand {
    hold_service: Arc<dyn HoldService>,
}

impl ExtendHoldCommand {
    pub(crate) fn new(hold_service: Arc<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtendHoldCommandRequest {
    pub hold_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtendHoldCommandResponse {
    pub success: bool,
    pub hold: HoldDto,
}

impl ExtendHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            success: true,
            hold,
        }
    }
}

#[async_trait]
impl Command<ExtendHoldCommandRequest, ExtendHoldCommandResponse> for ExtendHoldCommand {
    async fn execute(&self, req: ExtendHoldCommandRequest) -> Result<ExtendHoldCommandResponse, CommandError> {
        self.hold_service.extend_hold(req.hold_id.as_str())
            .await.map_err(CommandError::from).map(ExtendHoldCommandResponse::new)
    }
}
