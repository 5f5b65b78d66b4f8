use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::utils::date::time_serializer;

// Slot is a candidate appointment start. Computed on demand, never persisted.
// Occupied candidates are still returned with available=false so the UI can
// render them disabled instead of hiding the calendar.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct Slot {
    #[serde(with = "time_serializer")]
    pub time: NaiveTime,
    pub available: bool,
    pub is_optimal: bool,
}

impl Slot {
    pub fn new(time: NaiveTime, available: bool, is_optimal: bool) -> Self {
        Self { time, available, is_optimal }
    }
}

// Everything the pure calculator needs for one master on one date, fetched
// up front so the computation itself touches no repository.
#[derive(Debug, Default, Clone)]
pub(crate) struct DayContext {
    // resolved weekly window for the date's weekday; None means a day off
    pub window: Option<(NaiveTime, NaiveTime)>,
    // a closing holiday without an exception for this master
    pub closed: bool,
    // raw time-off intervals; may overlap, may extend past the date
    pub time_off: Vec<(NaiveDateTime, NaiveDateTime)>,
    // held/confirmed bookings for the date
    pub bookings: Vec<(NaiveTime, NaiveTime)>,
}
