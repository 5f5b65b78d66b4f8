use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::core::library::HoldStatus;
use crate::utils::date::{serializer, time_serializer};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct HoldDto {
    pub hold_id: String,
    pub master_id: String,
    pub service_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    #[serde(with = "time_serializer")]
    pub time: NaiveTime,
    pub duration_minutes: i64,
    pub hold_status: HoldStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub expires_at: NaiveDateTime,
}
