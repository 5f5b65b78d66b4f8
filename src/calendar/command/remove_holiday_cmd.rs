use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveHolidayCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl RemoveHolidayCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveHolidayCommandRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveHolidayCommandResponse {
    pub success: bool,
}

#[async_trait]
impl Command<RemoveHolidayCommandRequest, RemoveHolidayCommandResponse> for RemoveHolidayCommand {
    async fn execute(&self, req: RemoveHolidayCommandRequest) -> Result<RemoveHolidayCommandResponse, CommandError> {
        self.calendar_service.remove_holiday(req.date)
            .await.map_err(CommandError::from)
            .map(|_| RemoveHolidayCommandResponse { success: true })
    }
}
