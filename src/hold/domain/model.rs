use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::HoldStatus;
use crate::utils::date::{serializer, time_serializer};

// HoldEntity is a provisional claim on one slot. It never reaches a
// repository: the Hold Manager's working set is its only home, and the
// expires_at stamp is what lets a crashed or abandoned client release the
// slot without any cleanup call.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct HoldEntity {
    pub hold_id: String,
    pub master_id: String,
    pub service_id: String,
    pub client_id: String,
    pub booking_date: NaiveDate,
    #[serde(with = "time_serializer")]
    pub start_time: NaiveTime,
    #[serde(with = "time_serializer")]
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub hold_status: HoldStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub expires_at: NaiveDateTime,
}

impl HoldEntity {
    pub fn new(master_id: &str, service_id: &str, client_id: &str,
               booking_date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime,
               duration_minutes: i64, ttl_minutes: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            hold_id: Uuid::new_v4().to_string(),
            master_id: master_id.to_string(),
            service_id: service_id.to_string(),
            client_id: client_id.to_string(),
            booking_date,
            start_time,
            end_time,
            duration_minutes,
            hold_status: HoldStatus::Active,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at <= now
    }

    // client is still filling the form; restart the TTL from now
    pub fn extend(&mut self, now: NaiveDateTime, ttl_minutes: i64) {
        self.expires_at = now + Duration::minutes(ttl_minutes);
    }

    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}
