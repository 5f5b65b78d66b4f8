use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::TimeOffKind;
use crate::utils::date::{serializer, time_serializer};

// WorkingHoursEntity is the recurring weekly window for one master on one
// weekday (0 = Monday). The rule key is derived, so a repeated put for the
// same (master, weekday) replaces the previous window.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct WorkingHoursEntity {
    pub rule_id: String,
    pub version: i64,
    pub master_id: String,
    pub day_of_week: u8,
    #[serde(with = "time_serializer")]
    pub start_time: NaiveTime,
    #[serde(with = "time_serializer")]
    pub end_time: NaiveTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl WorkingHoursEntity {
    pub fn new(master_id: &str, day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            rule_id: Self::rule_key(master_id, day_of_week),
            version: 0,
            master_id: master_id.to_string(),
            day_of_week,
            start_time,
            end_time,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn rule_key(master_id: &str, day_of_week: u8) -> String {
        format!("{}#{}", master_id, day_of_week)
    }
}

impl Identifiable for WorkingHoursEntity {
    fn id(&self) -> String {
        self.rule_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// TimeOffEntity blocks a datetime interval for one master. Entries may
// overlap each other and the working window; the master is unavailable
// wherever any entry covers.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct TimeOffEntity {
    pub time_off_id: String,
    pub version: i64,
    pub master_id: String,
    #[serde(with = "serializer")]
    pub start_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub end_at: NaiveDateTime,
    pub kind: TimeOffKind,
    pub reason: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl TimeOffEntity {
    pub fn new(master_id: &str, start_at: NaiveDateTime, end_at: NaiveDateTime,
               kind: TimeOffKind, reason: &str) -> Self {
        Self {
            time_off_id: Uuid::new_v4().to_string(),
            version: 0,
            master_id: master_id.to_string(),
            start_at,
            end_at,
            kind,
            reason: reason.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn intersects(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.start_at < to && self.end_at > from
    }
}

impl Identifiable for TimeOffEntity {
    fn id(&self) -> String {
        self.time_off_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// HolidayEntity closes the whole salon for one date unless a master is
// listed in the exceptions set.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct HolidayEntity {
    pub holiday_date: NaiveDate,
    pub version: i64,
    pub salon_id: String,
    pub holiday_name: String,
    pub closed: bool,
    pub master_exceptions: Vec<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl HolidayEntity {
    pub fn new(salon_id: &str, holiday_date: NaiveDate, holiday_name: &str, closed: bool) -> Self {
        Self {
            holiday_date,
            version: 0,
            salon_id: salon_id.to_string(),
            holiday_name: holiday_name.to_string(),
            closed,
            master_exceptions: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // closed for this master unless the master is excepted
    pub fn closes_for(&self, master_id: &str) -> bool {
        self.closed && !self.master_exceptions.iter().any(|m| m == master_id)
    }
}
