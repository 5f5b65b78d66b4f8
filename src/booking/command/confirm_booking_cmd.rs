use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::booking::domain::BookingService;
use crate::booking::dto::BookingDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ConfirmBookingCommand {
    booking_service: Arc<dyn BookingService>,
}

impl ConfirmBookingCommand {
    pub(crate) fn new(booking_service: Arc<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmBookingCommandRequest {
    pub booking_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConfirmBookingCommandResponse {
    pub booking: BookingDto,
}

impl ConfirmBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<ConfirmBookingCommandRequest, ConfirmBookingCommandResponse> for ConfirmBookingCommand {
    async fn execute(&self, req: ConfirmBookingCommandRequest) -> Result<ConfirmBookingCommandResponse, CommandError> {
        self.booking_service.confirm(req.booking_id.as_str())
            .await.map_err(CommandError::from).map(ConfirmBookingCommandResponse::new)
    }
}
