use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::calendar::dto::WorkingHoursDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::parse_time;

pub(crate) struct PutWorkingHoursCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl PutWorkingHoursCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutWorkingHoursCommandRequest {
    pub master_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PutWorkingHoursCommandResponse {
    pub hours: WorkingHoursDto,
}

impl PutWorkingHoursCommandResponse {
    pub fn new(hours: WorkingHoursDto) -> Self {
        Self {
            hours,
        }
    }
}

#[async_trait]
impl Command<PutWorkingHoursCommandRequest, PutWorkingHoursCommandResponse> for PutWorkingHoursCommand {
    async fn execute(&self, req: PutWorkingHoursCommandRequest) -> Result<PutWorkingHoursCommandResponse, CommandError> {
        let start_time = parse_time(req.start_time.as_str()).map_err(CommandError::from)?;
        let end_time = parse_time(req.end_time.as_str()).map_err(CommandError::from)?;
        let dto = WorkingHoursDto::new(req.master_id.as_str(), req.day_of_week, start_time, end_time);
        self.calendar_service.put_working_hours(&dto)
            .await.map_err(CommandError::from).map(PutWorkingHoursCommandResponse::new)
    }
}
