use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::availability::domain::AvailabilityService;
use crate::availability::dto::SlotDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetAvailableSlotsCommand {
    availability_service: Arc<dyn AvailabilityService>,
}

impl GetAvailableSlotsCommand {
    pub(crate) fn new(availability_service: Arc<dyn AvailabilityService>) -> Self {
        Self {
            availability_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetAvailableSlotsCommandRequest {
    pub master_id: String,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub step_minutes: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetAvailableSlotsCommandResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotDto>,
}

impl GetAvailableSlotsCommandResponse {
    pub fn new(date: NaiveDate, slots: Vec<SlotDto>) -> Self {
        Self {
            date,
            slots,
        }
    }
}

#[async_trait]
impl Command<GetAvailableSlotsCommandRequest, GetAvailableSlotsCommandResponse> for GetAvailableSlotsCommand {
    async fn execute(&self, req: GetAvailableSlotsCommandRequest) -> Result<GetAvailableSlotsCommandResponse, CommandError> {
        self.availability_service
            .compute_slots(req.master_id.as_str(), req.date, req.duration_minutes, req.step_minutes)
            .await.map_err(CommandError::from)
            .map(|slots| GetAvailableSlotsCommandResponse::new(
                req.date, slots.iter().map(SlotDto::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::availability::command::get_available_slots_cmd::{GetAvailableSlotsCommand, GetAvailableSlotsCommandRequest};
    use crate::calendar::domain::CalendarService;
    use crate::calendar::dto::WorkingHoursDto;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::registry::Registry;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::masters::domain::model::MasterEntity;

    #[tokio::test]
    async fn test_should_run_get_available_slots() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let master = MasterEntity::new("test", "Anna", "lashes");
        let _ = registry.masters.create(&master).await.expect("should create master");
        let date = NaiveDate::from_ymd_opt(2027, 6, 7).expect("valid date");
        for weekday in 0..7 {
            let _ = registry.calendar.put_working_hours(&WorkingHoursDto::new(
                master.master_id.as_str(), weekday,
                NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
                NaiveTime::from_hms_opt(12, 0, 0).expect("valid time")))
                .await.expect("should put hours");
        }

        let cmd = GetAvailableSlotsCommand::new(registry.availability.clone());
        let res = cmd.execute(GetAvailableSlotsCommandRequest {
            master_id: master.master_id.to_string(),
            date,
            duration_minutes: 60,
            step_minutes: None,
        }).await.expect("should execute");
        assert_eq!(date, res.date);
        assert_eq!(9, res.slots.len());
        assert_eq!("09:00", res.slots[0].time.as_str());

        let err = cmd.execute(GetAvailableSlotsCommandRequest {
            master_id: master.master_id.to_string(),
            date,
            duration_minutes: 0,
            step_minutes: None,
        }).await.expect_err("should reject");
        assert!(!err.is_conflict());
    }
}
