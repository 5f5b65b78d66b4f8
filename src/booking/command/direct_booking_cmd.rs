use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::booking::domain::BookingService;
use crate::booking::dto::BookingDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::parse_time;

// booking without a prior hold; used by the admin back office where the
// operator books on behalf of a walk-in client
pub(crate) struct DirectBookingCommand {
    booking_service: Arc<dyn BookingService>,
}

impl DirectBookingCommand {
    pub(crate) fn new(booking_service: Arc<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectBookingCommandRequest {
    pub master_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub client_id: String,
    pub confirm: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DirectBookingCommandResponse {
    pub booking: BookingDto,
}

impl DirectBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<DirectBookingCommandRequest, DirectBookingCommandResponse> for DirectBookingCommand {
    async fn execute(&self, req: DirectBookingCommandRequest) -> Result<DirectBookingCommandResponse, CommandError> {
        let start_time = parse_time(req.time.as_str()).map_err(CommandError::from)?;
        self.booking_service.book_direct(req.master_id.as_str(), req.service_id.as_str(),
                                         req.date, start_time, req.client_id.as_str(),
                                         req.confirm.unwrap_or(false))
            .await.map_err(CommandError::from).map(DirectBookingCommandResponse::new)
    }
}
