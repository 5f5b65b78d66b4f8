use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use crate::booking::dto::BookingDto;
use crate::core::library::SalonResult;

pub mod model;
pub mod service;

// BookingService is the finalizer: the only writer of ledger rows. Every
// write re-validates at commit time — a presented hold narrows the race
// window but never removes the need for the conditional insert.
#[async_trait]
pub(crate) trait BookingService: Sync + Send {
    // converts a still-active hold into a ledger row; Conflict when the hold
    // expired or the ledger write collided
    async fn finalize_hold(&self, hold_id: &str, confirm: bool) -> SalonResult<BookingDto>;

    // books without a prior hold; validated against ledger and active holds
    // inside the same per-(master, date) critical section
    async fn book_direct(&self, master_id: &str, service_id: &str, date: NaiveDate,
                         start_time: NaiveTime, client_id: &str, confirm: bool) -> SalonResult<BookingDto>;

    // payment/confirmation arrived: Held -> Confirmed
    async fn confirm(&self, booking_id: &str) -> SalonResult<BookingDto>;

    // soft cancellation: the row stays, the slot frees up
    async fn cancel(&self, booking_id: &str) -> SalonResult<BookingDto>;

    async fn get(&self, booking_id: &str) -> SalonResult<BookingDto>;

    async fn find_by_master_date(&self, master_id: &str, date: NaiveDate) -> SalonResult<Vec<BookingDto>>;
}
