use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use crate::calendar::dto::{HolidayDto, TimeOffDto, WorkingHoursDto};
use crate::core::library::SalonResult;

pub mod model;
pub mod service;

// CalendarService is the rule-store surface: staff edit working hours, time
// off and salon holidays through it, and the availability calculator reads
// them back. All writes validate at this boundary; the engine below trusts
// the shapes.
#[async_trait]
pub(crate) trait CalendarService: Sync + Send {
    // one contiguous window per master per weekday; a second put for the same
    // (master, weekday) replaces the first
    async fn put_working_hours(&self, hours: &WorkingHoursDto) -> SalonResult<WorkingHoursDto>;
    async fn remove_working_hours(&self, master_id: &str, day_of_week: u8) -> SalonResult<()>;
    async fn working_hours_for(&self, master_id: &str) -> SalonResult<Vec<WorkingHoursDto>>;
    async fn working_hours_on(&self, master_id: &str, day_of_week: u8) -> SalonResult<Option<WorkingHoursDto>>;

    async fn add_time_off(&self, time_off: &TimeOffDto) -> SalonResult<TimeOffDto>;
    async fn remove_time_off(&self, time_off_id: &str) -> SalonResult<()>;
    async fn time_off_between(&self, master_id: &str,
                              from: NaiveDateTime, to: NaiveDateTime) -> SalonResult<Vec<TimeOffDto>>;

    async fn put_holiday(&self, holiday: &HolidayDto) -> SalonResult<HolidayDto>;
    async fn remove_holiday(&self, date: NaiveDate) -> SalonResult<()>;
    async fn holiday_on(&self, date: NaiveDate) -> SalonResult<Option<HolidayDto>>;
    async fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<HolidayDto>>;
}
