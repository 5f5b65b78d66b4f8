use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::core::library::TimeOffKind;
use crate::utils::date::{serializer, time_serializer};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct WorkingHoursDto {
    pub master_id: String,
    pub day_of_week: u8,
    #[serde(with = "time_serializer")]
    pub start_time: NaiveTime,
    #[serde(with = "time_serializer")]
    pub end_time: NaiveTime,
}

impl WorkingHoursDto {
    pub fn new(master_id: &str, day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            master_id: master_id.to_string(),
            day_of_week,
            start_time,
            end_time,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct TimeOffDto {
    pub time_off_id: String,
    pub version: i64,
    pub master_id: String,
    #[serde(with = "serializer")]
    pub start_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub end_at: NaiveDateTime,
    pub kind: TimeOffKind,
    pub reason: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct HolidayDto {
    pub date: NaiveDate,
    pub name: String,
    pub closed: bool,
    pub master_exceptions: Vec<String>,
}

impl HolidayDto {
    pub fn new(date: NaiveDate, name: &str, closed: bool) -> Self {
        Self {
            date,
            name: name.to_string(),
            closed,
            master_exceptions: vec![],
        }
    }
}
