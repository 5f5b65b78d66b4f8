use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::CalendarService;
use crate::calendar::dto::HolidayDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct PutHolidayCommand {
    calendar_service: Arc<dyn CalendarService>,
}

impl PutHolidayCommand {
    pub(crate) fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutHolidayCommandRequest {
    pub date: NaiveDate,
    pub name: String,
    pub closed: bool,
    pub master_exceptions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PutHolidayCommandResponse {
    pub holiday: HolidayDto,
}

impl PutHolidayCommandResponse {
    pub fn new(holiday: HolidayDto) -> Self {
        Self {
            holiday,
        }
    }
}

#[async_trait]
impl Command<PutHolidayCommandRequest, PutHolidayCommandResponse> for PutHolidayCommand {
    async fn execute(&self, req: PutHolidayCommandRequest) -> Result<PutHolidayCommandResponse, CommandError> {
        let mut dto = HolidayDto::new(req.date, req.name.as_str(), req.closed);
        dto.master_exceptions = req.master_exceptions.unwrap_or_default();
        self.calendar_service.put_holiday(&dto)
            .await.map_err(CommandError::from).map(PutHolidayCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::calendar::command::put_holiday_cmd::{PutHolidayCommand, PutHolidayCommandRequest};
    use crate::calendar::command::remove_holiday_cmd::{RemoveHolidayCommand, RemoveHolidayCommandRequest};
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::registry::Registry;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_put_and_remove_holiday() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let date = NaiveDate::from_ymd_opt(2027, 1, 1).expect("valid date");
        let cmd = PutHolidayCommand::new(registry.calendar.clone());
        let res = cmd.execute(PutHolidayCommandRequest {
            date,
            name: "New Year".to_string(),
            closed: true,
            master_exceptions: Some(vec!["m2".to_string()]),
        }).await.expect("should execute");
        assert!(res.holiday.closed);
        assert_eq!(vec!["m2".to_string()], res.holiday.master_exceptions);

        let remove = RemoveHolidayCommand::new(registry.calendar.clone());
        let removed = remove.execute(RemoveHolidayCommandRequest { date }).await.expect("should remove");
        assert!(removed.success);
        assert!(remove.execute(RemoveHolidayCommandRequest { date }).await.is_err());
    }
}
