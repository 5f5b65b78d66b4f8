use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::booking::domain::BookingService;
use crate::booking::dto::BookingDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct CancelBookingCommand {
    booking_service: Arc<dyn BookingService>,
}

impl CancelBookingCommand {
    pub(crate) fn new(booking_service: Arc<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CancelBookingCommandRequest {
    pub booking_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CancelBookingCommandResponse {
    pub booking: BookingDto,
}

impl CancelBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<CancelBookingCommandRequest, CancelBookingCommandResponse> for CancelBookingCommand {
    async fn execute(&self, req: CancelBookingCommandRequest) -> Result<CancelBookingCommandResponse, CommandError> {
        self.booking_service.cancel(req.booking_id.as_str())
            .await.map_err(CommandError::from).map(CancelBookingCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::booking::command::cancel_booking_cmd::{CancelBookingCommand, CancelBookingCommandRequest};
    use crate::booking::command::confirm_booking_cmd::{ConfirmBookingCommand, ConfirmBookingCommandRequest};
    use crate::booking::domain::BookingService;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BookingStatus;
    use crate::core::registry::Registry;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::masters::domain::model::MasterEntity;
    use crate::services::domain::model::ServiceEntity;
    use crate::utils::date::parse_time;

    #[tokio::test]
    async fn test_should_confirm_then_cancel() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let master = MasterEntity::new("test", "Anna", "lashes");
        let service = ServiceEntity::new("test", "classic set", 60, 6500);
        let _ = registry.masters.create(&master).await.expect("should create master");
        let _ = registry.services.create(&service).await.expect("should create service");

        let booking = registry.booking.book_direct(
            master.master_id.as_str(), service.service_id.as_str(),
            NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            parse_time("14:00").expect("valid time"),
            "client-1", false).await.expect("should book");

        let confirm_cmd = ConfirmBookingCommand::new(registry.booking.clone());
        let confirmed = confirm_cmd.execute(ConfirmBookingCommandRequest {
            booking_id: booking.booking_id.to_string(),
        }).await.expect("should confirm");
        assert_eq!(BookingStatus::Confirmed, confirmed.booking.booking_status);
        let loaded = registry.booking.get(booking.booking_id.as_str()).await.expect("should load");
        assert_eq!(BookingStatus::Confirmed, loaded.booking_status);

        let cancel_cmd = CancelBookingCommand::new(registry.booking.clone());
        let cancelled = cancel_cmd.execute(CancelBookingCommandRequest {
            booking_id: booking.booking_id.to_string(),
        }).await.expect("should cancel");
        assert_eq!(BookingStatus::Cancelled, cancelled.booking.booking_status);

        // already cancelled: not a valid transition anymore
        assert!(cancel_cmd.execute(CancelBookingCommandRequest {
            booking_id: booking.booking_id,
        }).await.is_err());
    }
}
