use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveWorkingHoursCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl RemoveWorkingHoursCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveWorkingHoursCommandRequest {
    pub master_id: String,
    pub day_of_week: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveWorkingHoursCommandResponse {
    pub success: bool,
}

#[async_trait]
impl Command<RemoveWorkingHoursCommandRequest, RemoveWorkingHoursCommandResponse> for RemoveWorkingHoursCommand {
    async fn execute(&self, req: RemoveWorkingHoursCommandRequest) -> Result<RemoveWorkingHoursCommandResponse, CommandError> {
        self.calendar_service.remove_working_hours(req.master_id.as_str(), req.day_of_week)
            .await.map_err(CommandError::from)
            .map(|_| RemoveWorkingHoursCommandResponse { success: true })
    }
}
