use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::BookingStatus;
use crate::utils::date::{serializer, time_serializer};

// BookingEntity is one row of the ledger, the authoritative record of who
// occupies a slot. Rows are never deleted: cancellation is a status
// transition, which keeps the audit/trash-restore behavior of the back
// office intact.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookingEntity {
    pub booking_id: String,
    pub version: i64,
    pub salon_id: String,
    pub master_id: String,
    pub service_id: String,
    pub client_id: String,
    pub booking_date: NaiveDate,
    #[serde(with = "time_serializer")]
    pub start_time: NaiveTime,
    #[serde(with = "time_serializer")]
    pub end_time: NaiveTime,
    pub booking_status: BookingStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookingEntity {
    pub fn new(salon_id: &str, master_id: &str, service_id: &str, client_id: &str,
               booking_date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime,
               booking_status: BookingStatus) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            version: 0,
            salon_id: salon_id.to_string(),
            master_id: master_id.to_string(),
            service_id: service_id.to_string(),
            client_id: client_id.to_string(),
            booking_date,
            start_time,
            end_time,
            booking_status,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}

impl Identifiable for BookingEntity {
    fn id(&self) -> String {
        self.booking_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::booking::domain::model::BookingEntity;
    use crate::core::library::BookingStatus;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[tokio::test]
    async fn test_should_build_booking() {
        let booking = BookingEntity::new(
            "salon1", "m1", "s1", "c1",
            NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            time(14, 0), time(15, 0), BookingStatus::Held);
        assert_eq!("m1", booking.master_id.as_str());
        assert_eq!(BookingStatus::Held, booking.booking_status);
        assert_eq!(0, booking.version);
    }

    #[tokio::test]
    async fn test_should_detect_overlap() {
        let booking = BookingEntity::new(
            "salon1", "m1", "s1", "c1",
            NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            time(14, 0), time(15, 0), BookingStatus::Confirmed);
        assert!(booking.overlaps(time(14, 30), time(15, 30)));
        assert!(booking.overlaps(time(13, 30), time(14, 15)));
        // touching intervals are free
        assert!(!booking.overlaps(time(15, 0), time(16, 0)));
        assert!(!booking.overlaps(time(13, 0), time(14, 0)));
    }
}
