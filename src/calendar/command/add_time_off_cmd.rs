use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::calendar::dto::TimeOffDto;
use crate::core::command::{Command, CommandError};
use crate::core::library::{SalonError, TimeOffKind};
use crate::utils::date::DATE_FMT;

pub(crate) struct AddTimeOffCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl AddTimeOffCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddTimeOffCommandRequest {
    pub master_id: String,
    pub start_at: String,
    pub end_at: String,
    pub kind: Option<String>,
    pub reason: Option<String>,
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, CommandError> {
    NaiveDateTime::parse_from_str(value, DATE_FMT).map_err(|err| {
        CommandError::from(SalonError::validation(
            format!("invalid datetime {} {:?}", value, err).as_str(), Some("400".to_string())))
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct AddTimeOffCommandResponse {
    pub time_off: TimeOffDto,
}

impl AddTimeOffCommandResponse {
    pub fn new(time_off: TimeOffDto) -> Self {
        Self {
            time_off,
        }
    }
}

#[async_trait]
impl Command<AddTimeOffCommandRequest, AddTimeOffCommandResponse> for AddTimeOffCommand {
    async fn execute(&self, req: AddTimeOffCommandRequest) -> Result<AddTimeOffCommandResponse, CommandError> {
        let dto = TimeOffDto {
            time_off_id: "".to_string(),
            version: 0,
            master_id: req.master_id.to_string(),
            start_at: parse_datetime(req.start_at.as_str())?,
            end_at: parse_datetime(req.end_at.as_str())?,
            kind: TimeOffKind::from(req.kind.unwrap_or_default()),
            reason: req.reason.unwrap_or_default(),
        };
        self.calendar_service.add_time_off(&dto)
            .await.map_err(CommandError::from).map(AddTimeOffCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::calendar::command::add_time_off_cmd::{AddTimeOffCommand, AddTimeOffCommandRequest};
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::TimeOffKind;
    use crate::core::registry::Registry;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_add_time_off() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let cmd = AddTimeOffCommand::new(registry.calendar.clone());
        let res = cmd.execute(AddTimeOffCommandRequest {
            master_id: "m1".to_string(),
            start_at: "2027-06-01T12:00:00".to_string(),
            end_at: "2027-06-01T13:00:00".to_string(),
            kind: Some("Vacation".to_string()),
            reason: None,
        }).await.expect("should execute");
        assert_eq!(TimeOffKind::Vacation, res.time_off.kind);
        assert!(!res.time_off.time_off_id.is_empty());

        // reversed interval rejected at the boundary
        assert!(cmd.execute(AddTimeOffCommandRequest {
            master_id: "m1".to_string(),
            start_at: "2027-06-01T14:00:00".to_string(),
            end_at: "2027-06-01T13:00:00".to_string(),
            kind: None,
            reason: None,
        }).await.is_err());

        assert!(cmd.execute(AddTimeOffCommandRequest {
            master_id: "m1".to_string(),
            start_at: "yesterday".to_string(),
            end_at: "2027-06-01T13:00:00".to_string(),
            kind: None,
            reason: None,
        }).await.is_err());
    }
}
