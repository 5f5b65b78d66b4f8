use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::availability::domain::AvailabilityService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetAvailableDatesCommand {
    availability_service: Arc<dyn AvailabilityService>,
}

impl GetAvailableDatesCommand {
    pub(crate) fn new(availability_service: Arc<dyn AvailabilityService>) -> Self {
        Self {
            availability_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetAvailableDatesCommandRequest {
    pub master_id: String,
    pub year: i32,
    pub month: u32,
    pub duration_minutes: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetAvailableDatesCommandResponse {
    pub dates: Vec<String>,
}

impl GetAvailableDatesCommandResponse {
    pub fn new(dates: Vec<String>) -> Self {
        Self {
            dates,
        }
    }
}

#[async_trait]
impl Command<GetAvailableDatesCommandRequest, GetAvailableDatesCommandResponse> for GetAvailableDatesCommand {
    async fn execute(&self, req: GetAvailableDatesCommandRequest) -> Result<GetAvailableDatesCommandResponse, CommandError> {
        self.availability_service
            .available_dates(req.master_id.as_str(), req.year, req.month, req.duration_minutes)
            .await.map_err(CommandError::from)
            .map(|dates| GetAvailableDatesCommandResponse::new(
                dates.iter().map(|d| format!("{}", d.format("%Y-%m-%d"))).collect()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use crate::availability::command::get_available_dates_cmd::{GetAvailableDatesCommand, GetAvailableDatesCommandRequest};
    use crate::calendar::domain::CalendarService;
    use crate::calendar::dto::WorkingHoursDto;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::registry::Registry;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::masters::domain::model::MasterEntity;

    #[tokio::test]
    async fn test_should_run_available_dates() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let master = MasterEntity::new("test", "Anna", "lashes");
        let _ = registry.masters.create(&master).await.expect("should create master");
        // Mondays only
        let _ = registry.calendar.put_working_hours(&WorkingHoursDto::new(
            master.master_id.as_str(), 0,
            NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(17, 0, 0).expect("valid time")))
            .await.expect("should put hours");

        let cmd = GetAvailableDatesCommand::new(registry.availability.clone());
        let res = cmd.execute(GetAvailableDatesCommandRequest {
            master_id: master.master_id.to_string(),
            year: 2027,
            month: 6,
            duration_minutes: 60,
        }).await.expect("should execute");
        // June 2027 Mondays: 7, 14, 21, 28
        assert_eq!(vec!["2027-06-07".to_string(), "2027-06-14".to_string(),
                        "2027-06-21".to_string(), "2027-06-28".to_string()],
                   res.dates);

        let err = cmd.execute(GetAvailableDatesCommandRequest {
            master_id: master.master_id.to_string(),
            year: 2027,
            month: 13,
            duration_minutes: 60,
        }).await.expect_err("should reject month");
        assert!(!err.is_conflict());
    }
}
