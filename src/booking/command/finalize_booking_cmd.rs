use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::booking::domain::BookingService;
use crate::booking::dto::BookingDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct FinalizeBookingCommand {
    booking_service: Arc<dyn BookingService>,
}

impl FinalizeBookingCommand {
    pub(crate) fn new(booking_service: Arc<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FinalizeBookingCommandRequest {
    pub hold_id: String,
    // true when payment/confirmation already happened in the same flow
    pub confirm: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FinalizeBookingCommandResponse {
    pub booking: BookingDto,
}

impl FinalizeBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<FinalizeBookingCommandRequest, FinalizeBookingCommandResponse> for FinalizeBookingCommand {
    async fn execute(&self, req: FinalizeBookingCommandRequest) -> Result<FinalizeBookingCommandResponse, CommandError> {
        self.booking_service.finalize_hold(req.hold_id.as_str(), req.confirm.unwrap_or(false))
            .await.map_err(CommandError::from).map(FinalizeBookingCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::booking::command::finalize_booking_cmd::{FinalizeBookingCommand, FinalizeBookingCommandRequest};
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BookingStatus;
    use crate::core::registry::Registry;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::hold::domain::HoldService;
    use crate::masters::domain::model::MasterEntity;
    use crate::services::domain::model::ServiceEntity;

    #[tokio::test]
    async fn test_should_finalize_hold() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let master = MasterEntity::new("test", "Anna", "lashes");
        let service = ServiceEntity::new("test", "classic set", 60, 6500);
        let _ = registry.masters.create(&master).await.expect("should create master");
        let _ = registry.services.create(&service).await.expect("should create service");

        let hold = registry.holds.create_hold(
            master.master_id.as_str(), service.service_id.as_str(),
            NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            NaiveTime::from_hms_opt(14, 0, 0).expect("valid time"),
            "client-1").await.expect("should hold");

        let cmd = FinalizeBookingCommand::new(registry.booking.clone());
        let res = cmd.execute(FinalizeBookingCommandRequest {
            hold_id: hold.hold_id.to_string(),
            confirm: Some(true),
        }).await.expect("should execute");
        assert_eq!(BookingStatus::Confirmed, res.booking.booking_status);
        assert_eq!("client-1", res.booking.client_id.as_str());

        // the hold is spent
        let err = cmd.execute(FinalizeBookingCommandRequest {
            hold_id: hold.hold_id,
            confirm: None,
        }).await.expect_err("should fail on spent hold");
        assert!(!err.is_conflict());
    }
}
