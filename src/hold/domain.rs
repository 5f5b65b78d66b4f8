use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use crate::core::library::SalonResult;
use crate::hold::dto::HoldDto;

pub mod model;
pub mod service;

// HoldService is the reservation layer between "the UI showed a free slot"
// and "the ledger has a booking". A hold is a short-lived claim; exactly one
// active hold may cover a (master, date, time range) at any instant. Holds
// live only in this process's working set and evaporate on expiry.
#[async_trait]
pub(crate) trait HoldService: Sync + Send {
    // atomic check-and-claim; Conflict when the ledger or another active
    // hold already covers the window
    async fn create_hold(&self, master_id: &str, service_id: &str, date: NaiveDate,
                         start_time: NaiveTime, client_id: &str) -> SalonResult<HoldDto>;

    // client abandoned the flow; frees the slot without waiting for expiry
    async fn release_hold(&self, hold_id: &str) -> SalonResult<HoldDto>;

    // restarts the TTL of a still-active hold; expired holds answer Conflict
    async fn extend_hold(&self, hold_id: &str) -> SalonResult<HoldDto>;

    async fn get_hold(&self, hold_id: &str) -> SalonResult<HoldDto>;

    // unexpired active holds for one (master, date); the finalizer consults
    // this for direct bookings that never took a hold
    async fn active_for(&self, master_id: &str, date: NaiveDate) -> SalonResult<Vec<HoldDto>>;

    // commit-time re-validation: the hold must still be active and unexpired.
    // Expired or released holds answer Conflict; the caller restarts the flow.
    async fn begin_finalize(&self, hold_id: &str) -> SalonResult<HoldDto>;

    // drops the hold once the ledger write committed
    async fn complete(&self, hold_id: &str) -> SalonResult<()>;

    // evicts expired entries; correctness never depends on this running,
    // it only bounds the working set
    async fn purge_expired(&self) -> SalonResult<usize>;
}
