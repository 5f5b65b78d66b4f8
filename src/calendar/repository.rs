pub(crate) mod ddb_working_hours_repository;
pub(crate) mod ddb_time_off_repository;
pub(crate) mod ddb_holiday_repository;
pub(crate) mod memory_calendar_repository;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use crate::calendar::domain::model::{HolidayEntity, TimeOffEntity, WorkingHoursEntity};
use crate::core::library::SalonResult;
use crate::core::repository::Repository;

// keyed by (master, weekday); put replaces any previous window for the key
#[async_trait]
pub(crate) trait WorkingHoursRepository: Sync + Send {
    async fn put(&self, entity: &WorkingHoursEntity) -> SalonResult<usize>;
    async fn get(&self, master_id: &str, day_of_week: u8) -> SalonResult<WorkingHoursEntity>;
    async fn find_by_master(&self, master_id: &str) -> SalonResult<Vec<WorkingHoursEntity>>;
    async fn delete(&self, master_id: &str, day_of_week: u8) -> SalonResult<usize>;
}

#[async_trait]
pub(crate) trait TimeOffRepository: Repository<TimeOffEntity> {
    // entries intersecting [from, to), ordered by start
    async fn find_by_master_between(&self, master_id: &str,
                                    from: NaiveDateTime, to: NaiveDateTime) -> SalonResult<Vec<TimeOffEntity>>;
}

#[async_trait]
pub(crate) trait HolidayRepository: Sync + Send {
    async fn put(&self, entity: &HolidayEntity) -> SalonResult<usize>;
    async fn get(&self, date: NaiveDate) -> SalonResult<HolidayEntity>;
    async fn find_between(&self, salon_id: &str,
                          from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<HolidayEntity>>;
    async fn delete(&self, date: NaiveDate) -> SalonResult<usize>;
}
