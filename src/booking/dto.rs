use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::core::library::BookingStatus;
use crate::utils::date::time_serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookingDto {
    pub booking_id: String,
    pub version: i64,
    pub master_id: String,
    pub service_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    #[serde(with = "time_serializer")]
    pub start_time: NaiveTime,
    #[serde(with = "time_serializer")]
    pub end_time: NaiveTime,
    pub booking_status: BookingStatus,
}
