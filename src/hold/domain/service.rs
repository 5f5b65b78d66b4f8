use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::Mutex;

use crate::booking::repository::BookingRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{HoldStatus, SalonError, SalonResult};
use crate::core::locks::KeyedLocks;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::model::HoldEntity;
use crate::hold::dto::HoldDto;
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;
use crate::utils::date::{minutes_of, time_from_minutes};

pub(crate) type SlotKey = (String, NaiveDate);

// HoldManagerImpl owns the working set of active holds. Two layers of
// synchronization, never held together across an await of the other kind:
//
//   - `locks` serializes whole check-then-claim sequences per (master, date),
//     including the ledger read. This is the critical section that makes two
//     concurrent claims for one slot impossible.
//   - `working_set` is a plain data mutex with short, await-free sections.
//
// Expiry is lazy: every read path treats an expired entry as absent, so the
// invariant holds even if the sweep task never runs.
pub(crate) struct HoldManagerImpl {
    hold_ttl_minutes: i64,
    ledger_timeout_millis: u64,
    master_repository: Arc<dyn MasterRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    events_publisher: Arc<dyn EventPublisher>,
    locks: Arc<KeyedLocks<SlotKey>>,
    working_set: Mutex<HashMap<SlotKey, Vec<HoldEntity>>>,
}

impl HoldManagerImpl {
    pub(crate) fn new(config: &Configuration,
                      master_repository: Arc<dyn MasterRepository>,
                      service_repository: Arc<dyn ServiceRepository>,
                      booking_repository: Arc<dyn BookingRepository>,
                      events_publisher: Arc<dyn EventPublisher>,
                      locks: Arc<KeyedLocks<SlotKey>>) -> Self {
        Self {
            hold_ttl_minutes: config.hold_ttl_minutes,
            ledger_timeout_millis: config.ledger_timeout_millis,
            master_repository,
            service_repository,
            booking_repository,
            events_publisher,
            locks,
            working_set: Mutex::new(HashMap::new()),
        }
    }

    // a slow ledger fails the claim closed; a hold is never granted blind
    async fn read_ledger(&self, master_id: &str, date: NaiveDate) -> SalonResult<Vec<(NaiveTime, NaiveTime)>> {
        let read = self.booking_repository.find_active_by_master_date(master_id, date);
        match tokio::time::timeout(Duration::from_millis(self.ledger_timeout_millis), read).await {
            Ok(Ok(bookings)) => Ok(bookings.iter().map(|b| (b.start_time, b.end_time)).collect()),
            Ok(Err(err)) => Err(err),
            Err(_elapsed) => Err(SalonError::unavailable(
                format!("ledger read timed out for {} {}", master_id, date).as_str(),
                Some("TimeoutError".to_string()), true)),
        }
    }

    async fn find_hold(&self, hold_id: &str) -> Option<(SlotKey, HoldEntity)> {
        let working_set = self.working_set.lock().await;
        for (key, holds) in working_set.iter() {
            if let Some(hold) = holds.iter().find(|h| h.hold_id == hold_id) {
                return Some((key.clone(), hold.clone()));
            }
        }
        None
    }

    async fn remove_hold(&self, key: &SlotKey, hold_id: &str) {
        let mut working_set = self.working_set.lock().await;
        if let Some(holds) = working_set.get_mut(key) {
            holds.retain(|h| h.hold_id != hold_id);
            if holds.is_empty() {
                working_set.remove(key);
            }
        }
    }
}

#[async_trait]
impl HoldService for HoldManagerImpl {
    async fn create_hold(&self, master_id: &str, service_id: &str, date: NaiveDate,
                         start_time: NaiveTime, client_id: &str) -> SalonResult<HoldDto> {
        if client_id.trim().is_empty() {
            return Err(SalonError::validation("client_id is required", Some("400".to_string())));
        }
        let master = self.master_repository.get(master_id).await?;
        let service = self.service_repository.get(service_id).await?;
        if service.duration_minutes <= 0 {
            return Err(SalonError::validation(
                format!("service {} has no usable duration", service_id).as_str(), Some("400".to_string())));
        }
        let now = Utc::now().naive_utc();
        if date < now.date() {
            return Err(SalonError::validation(
                format!("cannot hold a past date {}", date).as_str(), Some("400".to_string())));
        }
        let start_minutes = minutes_of(start_time);
        if start_minutes + service.duration_minutes > 24 * 60 {
            return Err(SalonError::validation(
                format!("slot {} + {}m does not fit the day", start_time, service.duration_minutes).as_str(),
                Some("400".to_string())));
        }
        let end_time = time_from_minutes(start_minutes + service.duration_minutes)?;

        let key: SlotKey = (master.master_id.to_string(), date);
        let _guard = self.locks.acquire(&key).await;

        // ledger first: a held/confirmed booking always wins
        let bookings = self.read_ledger(master.master_id.as_str(), date).await?;
        if bookings.iter().any(|(bs, be)| *bs < end_time && *be > start_time) {
            return Err(SalonError::conflict(
                format!("slot {} {} already booked for master {}", date, start_time, master_id).as_str()));
        }

        let hold = {
            let mut working_set = self.working_set.lock().await;
            let holds = working_set.entry(key.clone()).or_insert_with(Vec::new);
            // lazy expiry: stale claims stop counting the moment they are seen
            holds.retain(|h| !h.is_expired(now));
            if holds.iter().any(|h| h.overlaps(start_time, end_time)) {
                return Err(SalonError::conflict(
                    format!("slot {} {} already held for master {}", date, start_time, master_id).as_str()));
            }
            let hold = HoldEntity::new(master.master_id.as_str(), service_id, client_id,
                                       date, start_time, end_time,
                                       service.duration_minutes, self.hold_ttl_minutes);
            holds.push(hold.clone());
            hold
        };

        let dto = HoldDto::from(&hold);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "hold_created", "hold", dto.hold_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn release_hold(&self, hold_id: &str) -> SalonResult<HoldDto> {
        match self.find_hold(hold_id).await {
            Some((key, mut hold)) => {
                self.remove_hold(&key, hold_id).await;
                hold.hold_status = HoldStatus::Released;
                let dto = HoldDto::from(&hold);
                let _ = self.events_publisher.publish(&DomainEvent::deleted(
                    "hold_released", "hold", hold_id, &HashMap::new(), &dto.clone())?).await?;
                Ok(dto)
            }
            None => Err(SalonError::not_found(
                format!("hold not found for {}", hold_id).as_str())),
        }
    }

    async fn extend_hold(&self, hold_id: &str) -> SalonResult<HoldDto> {
        let now = Utc::now().naive_utc();
        let mut working_set = self.working_set.lock().await;
        for holds in working_set.values_mut() {
            if let Some(hold) = holds.iter_mut().find(|h| h.hold_id == hold_id) {
                if hold.is_expired(now) {
                    return Err(SalonError::conflict(
                        format!("hold {} already expired", hold_id).as_str()));
                }
                hold.extend(now, self.hold_ttl_minutes);
                return Ok(HoldDto::from(&*hold));
            }
        }
        Err(SalonError::not_found(
            format!("hold not found for {}", hold_id).as_str()))
    }

    async fn get_hold(&self, hold_id: &str) -> SalonResult<HoldDto> {
        match self.find_hold(hold_id).await {
            Some((_key, mut hold)) => {
                if hold.is_expired(Utc::now().naive_utc()) {
                    hold.hold_status = HoldStatus::Expired;
                }
                Ok(HoldDto::from(&hold))
            }
            None => Err(SalonError::not_found(
                format!("hold not found for {}", hold_id).as_str())),
        }
    }

    async fn active_for(&self, master_id: &str, date: NaiveDate) -> SalonResult<Vec<HoldDto>> {
        let now = Utc::now().naive_utc();
        let working_set = self.working_set.lock().await;
        let key: SlotKey = (master_id.to_string(), date);
        Ok(working_set.get(&key).map_or(vec![], |holds| {
            holds.iter()
                .filter(|h| !h.is_expired(now))
                .map(HoldDto::from)
                .collect()
        }))
    }

    async fn begin_finalize(&self, hold_id: &str) -> SalonResult<HoldDto> {
        match self.find_hold(hold_id).await {
            Some((key, hold)) => {
                if hold.is_expired(Utc::now().naive_utc()) {
                    // the safety net fired; the slot already belongs to whoever
                    // claims it next
                    self.remove_hold(&key, hold_id).await;
                    return Err(SalonError::conflict(
                        format!("hold {} expired before finalization", hold_id).as_str()));
                }
                Ok(HoldDto::from(&hold))
            }
            None => Err(SalonError::not_found(
                format!("hold not found for {}", hold_id).as_str())),
        }
    }

    async fn complete(&self, hold_id: &str) -> SalonResult<()> {
        if let Some((key, _hold)) = self.find_hold(hold_id).await {
            self.remove_hold(&key, hold_id).await;
        }
        Ok(())
    }

    async fn purge_expired(&self) -> SalonResult<usize> {
        let now = Utc::now().naive_utc();
        let mut purged = 0;
        {
            let mut working_set = self.working_set.lock().await;
            for holds in working_set.values_mut() {
                let before = holds.len();
                holds.retain(|h| !h.is_expired(now));
                purged += before - holds.len();
            }
            working_set.retain(|_, holds| !holds.is_empty());
        }
        let _ = self.locks.prune().await;
        Ok(purged)
    }
}

impl From<&HoldEntity> for HoldDto {
    fn from(other: &HoldEntity) -> HoldDto {
        HoldDto {
            hold_id: other.hold_id.to_string(),
            master_id: other.master_id.to_string(),
            service_id: other.service_id.to_string(),
            client_id: other.client_id.to_string(),
            date: other.booking_date,
            time: other.start_time,
            duration_minutes: other.duration_minutes,
            hold_status: other.hold_status,
            created_at: other.created_at,
            expires_at: other.expires_at,
        }
    }
}
