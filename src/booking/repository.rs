pub(crate) mod ddb_booking_repository;
pub(crate) mod memory_booking_repository;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::booking::domain::model::BookingEntity;
use crate::core::library::{BookingStatus, SalonResult};
use crate::core::repository::Repository;

// BookingRepository is the narrow ledger interface. The engine reads active
// rows to exclude occupied slots and writes exactly one row per finalized
// reservation.
#[async_trait]
pub(crate) trait BookingRepository: Repository<BookingEntity> {
    // conditional insert: fails with Conflict when an occupying row already
    // overlaps the entity's interval; the commit point of finalization
    async fn create_if_free(&self, entity: &BookingEntity) -> SalonResult<usize>;

    // held/confirmed rows for one master and date
    async fn find_active_by_master_date(&self, master_id: &str,
                                        date: NaiveDate) -> SalonResult<Vec<BookingEntity>>;

    // held/confirmed rows for one master across an inclusive date range
    async fn find_active_by_master_between(&self, master_id: &str,
                                           from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<BookingEntity>>;

    // optimistic status transition; fails with Conflict on a stale version
    async fn update_status(&self, booking_id: &str, expected_version: i64,
                           status: BookingStatus) -> SalonResult<BookingEntity>;
}
