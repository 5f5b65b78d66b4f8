use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use crate::availability::domain::model::Slot;
use crate::core::library::SalonResult;

pub mod calculator;
pub mod model;
pub mod service;

// AvailabilityService answers "when can this master take this service".
// Read-only and side-effect-free: it never writes and never raises Conflict,
// so request workers call it freely in parallel.
#[async_trait]
pub(crate) trait AvailabilityService: Sync + Send {
    // full slot detail for the booking-flow UI; past dates yield an empty
    // list, a weekday without a rule yields an empty list
    async fn compute_slots(&self, master_id: &str, date: NaiveDate,
                           duration_minutes: i64, step_minutes: Option<i64>) -> SalonResult<Vec<Slot>>;

    // one date across many masters; only free times, ascending, duration
    // resolved as the longest service in the bundle
    async fn compute_batch(&self, date: NaiveDate, service_ids: &[String],
                           duration_minutes: Option<i64>,
                           master_ids: &[String]) -> SalonResult<BTreeMap<String, Vec<String>>>;

    // dates in (year, month) with at least one open slot, today or later
    async fn available_dates(&self, master_id: &str, year: i32, month: u32,
                             duration_minutes: i64) -> SalonResult<Vec<NaiveDate>>;
}
