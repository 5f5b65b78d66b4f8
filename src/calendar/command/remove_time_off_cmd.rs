use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveTimeOffCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl RemoveTimeOffCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveTimeOffCommandRequest {
    pub time_off_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveTimeOffCommandResponse {
    pub success: bool,
}

#[async_trait]
impl Command<RemoveTimeOffCommandRequest, RemoveTimeOffCommandResponse> for RemoveTimeOffCommand {
    async fn execute(&self, req: RemoveTimeOffCommandRequest) -> Result<RemoveTimeOffCommandResponse, CommandError> {
        self.calendar_service.remove_time_off(req.time_off_id.as_str())
            .await.map_err(CommandError::from)
            .map(|_| RemoveTimeOffCommandResponse { success: true })
    }
}
