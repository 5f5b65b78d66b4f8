use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::availability::domain::AvailabilityService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBatchAvailabilityCommand {
    availability_service: Arc<dyn AvailabilityService>,
}

impl GetBatchAvailabilityCommand {
    pub(crate) fn new(availability_service: Arc<dyn AvailabilityService>) -> Self {
        Self {
            availability_service,
        }
    }
}

// service_ids and master_ids arrive as comma-separated query values
#[derive(Debug, Deserialize)]
pub(crate) struct GetBatchAvailabilityCommandRequest {
    pub date: NaiveDate,
    pub service_ids: Option<String>,
    pub duration_minutes: Option<i64>,
    pub master_ids: Option<String>,
}

fn split_ids(value: &Option<String>) -> Vec<String> {
    value.as_deref().unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBatchAvailabilityCommandResponse {
    pub date: NaiveDate,
    pub availability: BTreeMap<String, Vec<String>>,
}

impl GetBatchAvailabilityCommandResponse {
    pub fn new(date: NaiveDate, availability: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            date,
            availability,
        }
    }
}

#[async_trait]
impl Command<GetBatchAvailabilityCommandRequest, GetBatchAvailabilityCommandResponse> for GetBatchAvailabilityCommand {
    async fn execute(&self, req: GetBatchAvailabilityCommandRequest) -> Result<GetBatchAvailabilityCommandResponse, CommandError> {
        let service_ids = split_ids(&req.service_ids);
        let master_ids = split_ids(&req.master_ids);
        self.availability_service
            .compute_batch(req.date, &service_ids, req.duration_minutes, &master_ids)
            .await.map_err(CommandError::from)
            .map(|availability| GetBatchAvailabilityCommandResponse::new(req.date, availability))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::availability::command::get_batch_availability_cmd::{GetBatchAvailabilityCommand, GetBatchAvailabilityCommandRequest};
    use crate::calendar::domain::CalendarService;
    use crate::calendar::dto::WorkingHoursDto;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::registry::Registry;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::masters::domain::model::MasterEntity;
    use crate::services::domain::model::ServiceEntity;

    #[tokio::test]
    async fn test_should_run_batch_availability() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let master = MasterEntity::new("test", "Anna", "lashes");
        let _ = registry.masters.create(&master).await.expect("should create master");
        let short = ServiceEntity::new("test", "brow shape", 30, 2000);
        let long = ServiceEntity::new("test", "volume set", 120, 9000);
        let _ = registry.services.create(&short).await.expect("should create service");
        let _ = registry.services.create(&long).await.expect("should create service");
        for weekday in 0..7 {
            let _ = registry.calendar.put_working_hours(&WorkingHoursDto::new(
                master.master_id.as_str(), weekday,
                NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
                NaiveTime::from_hms_opt(13, 0, 0).expect("valid time")))
                .await.expect("should put hours");
        }

        let cmd = GetBatchAvailabilityCommand::new(registry.availability.clone());
        let res = cmd.execute(GetBatchAvailabilityCommandRequest {
            date: NaiveDate::from_ymd_opt(2027, 6, 7).expect("valid date"),
            service_ids: Some(format!("{},{}", short.service_id, long.service_id)),
            duration_minutes: None,
            master_ids: None,
        }).await.expect("should execute");

        let times = res.availability.get(master.master_id.as_str())
            .expect("master should be present");
        // the 120-minute bundle member wins: 09:00-13:00 fits starts through 11:00
        assert_eq!("09:00", times[0].as_str());
        assert!(times.contains(&"11:00".to_string()));
        assert!(!times.contains(&"11:15".to_string()));

        // no services and no duration is a validation failure
        let err = cmd.execute(GetBatchAvailabilityCommandRequest {
            date: NaiveDate::from_ymd_opt(2027, 6, 7).expect("valid date"),
            service_ids: None,
            duration_minutes: None,
            master_ids: None,
        }).await.expect_err("should reject");
        assert!(!err.is_conflict());
    }
}
