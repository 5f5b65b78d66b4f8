use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use rand::Rng;

use crate::booking::domain::BookingService;
use crate::booking::domain::model::BookingEntity;
use crate::booking::dto::BookingDto;
use crate::booking::repository::BookingRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BookingStatus, SalonError, SalonResult};
use crate::core::locks::KeyedLocks;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::SlotKey;
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;
use crate::utils::date::{minutes_of, time_from_minutes};

const STATUS_UPDATE_ATTEMPTS: usize = 3;

pub(crate) struct BookingServiceImpl {
    salon_id: String,
    ledger_timeout_millis: u64,
    booking_repository: Arc<dyn BookingRepository>,
    hold_service: Arc<dyn HoldService>,
    master_repository: Arc<dyn MasterRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    events_publisher: Arc<dyn EventPublisher>,
    // shared with the hold manager: finalization and hold creation for one
    // (master, date) never interleave
    locks: Arc<KeyedLocks<SlotKey>>,
}

impl BookingServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      booking_repository: Arc<dyn BookingRepository>,
                      hold_service: Arc<dyn HoldService>,
                      master_repository: Arc<dyn MasterRepository>,
                      service_repository: Arc<dyn ServiceRepository>,
                      events_publisher: Arc<dyn EventPublisher>,
                      locks: Arc<KeyedLocks<SlotKey>>) -> Self {
        Self {
            salon_id: config.salon_id.to_string(),
            ledger_timeout_millis: config.ledger_timeout_millis,
            booking_repository,
            hold_service,
            master_repository,
            service_repository,
            events_publisher,
            locks,
        }
    }

    // all-or-nothing commit point; a slow ledger fails closed
    async fn write_ledger(&self, entity: &BookingEntity) -> SalonResult<()> {
        let write = self.booking_repository.create_if_free(entity);
        match tokio::time::timeout(Duration::from_millis(self.ledger_timeout_millis), write).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(err),
            Err(_elapsed) => Err(SalonError::unavailable(
                format!("ledger write timed out for {}", entity.booking_id).as_str(),
                Some("TimeoutError".to_string()), true)),
        }
    }

    async fn publish_status(&self, name: &str, dto: &BookingDto) -> SalonResult<()> {
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            name, "booking", dto.booking_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(())
    }

    // optimistic status transition with bounded jittered retry; a concurrent
    // writer bumps the version and we re-read before trying again
    async fn transition(&self, booking_id: &str, target: BookingStatus,
                        allowed_from: &[BookingStatus]) -> SalonResult<BookingDto> {
        for attempt in 0..STATUS_UPDATE_ATTEMPTS {
            let existing = self.booking_repository.get(booking_id).await?;
            if !allowed_from.contains(&existing.booking_status) {
                return Err(SalonError::validation(
                    format!("booking {} cannot move {} -> {}",
                            booking_id, existing.booking_status, target).as_str(),
                    Some("400".to_string())));
            }
            match self.booking_repository.update_status(booking_id, existing.version, target).await {
                Ok(updated) => return Ok(BookingDto::from(&updated)),
                Err(err) if err.is_conflict() && attempt + 1 < STATUS_UPDATE_ATTEMPTS => {
                    let jitter = rand::thread_rng().gen_range(10..50);
                    tokio::time::sleep(Duration::from_millis(jitter)).await;
                }
                Err(err) => return Err(err),
            }
        }
        Err(SalonError::conflict(
            format!("booking {} kept changing under us", booking_id).as_str()))
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    async fn finalize_hold(&self, hold_id: &str, confirm: bool) -> SalonResult<BookingDto> {
        // locate the slot key first, then re-validate under its lock
        let hold = self.hold_service.get_hold(hold_id).await?;
        let key: SlotKey = (hold.master_id.to_string(), hold.date);
        let _guard = self.locks.acquire(&key).await;

        let hold = self.hold_service.begin_finalize(hold_id).await?;
        let end_time = time_from_minutes(minutes_of(hold.time) + hold.duration_minutes)?;
        let status = if confirm { BookingStatus::Confirmed } else { BookingStatus::Held };
        let entity = BookingEntity::new(
            self.salon_id.as_str(), hold.master_id.as_str(), hold.service_id.as_str(),
            hold.client_id.as_str(), hold.date, hold.time, end_time, status);

        if let Err(err) = self.write_ledger(&entity).await {
            if err.is_conflict() {
                // the slot is gone either way; drop the hold so it stops
                // shadowing a row that now owns the window
                let _ = self.hold_service.complete(hold_id).await;
            }
            return Err(err);
        }
        let _ = self.hold_service.complete(hold_id).await;

        let dto = BookingDto::from(&entity);
        let name = if confirm { "booking_confirmed" } else { "booking_held" };
        self.publish_status(name, &dto).await?;
        Ok(dto)
    }

    async fn book_direct(&self, master_id: &str, service_id: &str, date: NaiveDate,
                         start_time: NaiveTime, client_id: &str, confirm: bool) -> SalonResult<BookingDto> {
        if client_id.trim().is_empty() {
            return Err(SalonError::validation("client_id is required", Some("400".to_string())));
        }
        let master = self.master_repository.get(master_id).await?;
        let service = self.service_repository.get(service_id).await?;
        let now = Utc::now().naive_utc();
        if date < now.date() {
            return Err(SalonError::validation(
                format!("cannot book a past date {}", date).as_str(), Some("400".to_string())));
        }
        let start_minutes = minutes_of(start_time);
        if service.duration_minutes <= 0 || start_minutes + service.duration_minutes > 24 * 60 {
            return Err(SalonError::validation(
                format!("slot {} + {}m does not fit the day", start_time, service.duration_minutes).as_str(),
                Some("400".to_string())));
        }
        let end_time = time_from_minutes(start_minutes + service.duration_minutes)?;

        let key: SlotKey = (master.master_id.to_string(), date);
        let _guard = self.locks.acquire(&key).await;

        // a direct booking competes with holds it never took
        let holds = self.hold_service.active_for(master.master_id.as_str(), date).await?;
        if holds.iter().any(|h| {
            h.time < end_time && time_from_minutes(minutes_of(h.time) + h.duration_minutes)
                .map_or(false, |hold_end| hold_end > start_time)
        }) {
            return Err(SalonError::conflict(
                format!("slot {} {} is held by another client", date, start_time).as_str()));
        }

        let status = if confirm { BookingStatus::Confirmed } else { BookingStatus::Held };
        let entity = BookingEntity::new(
            self.salon_id.as_str(), master.master_id.as_str(), service_id,
            client_id, date, start_time, end_time, status);
        self.write_ledger(&entity).await?;

        let dto = BookingDto::from(&entity);
        let name = if confirm { "booking_confirmed" } else { "booking_held" };
        self.publish_status(name, &dto).await?;
        Ok(dto)
    }

    async fn confirm(&self, booking_id: &str) -> SalonResult<BookingDto> {
        let dto = self.transition(booking_id, BookingStatus::Confirmed,
                                  &[BookingStatus::Held]).await?;
        self.publish_status("booking_confirmed", &dto).await?;
        Ok(dto)
    }

    async fn cancel(&self, booking_id: &str) -> SalonResult<BookingDto> {
        let dto = self.transition(booking_id, BookingStatus::Cancelled,
                                  &[BookingStatus::Held, BookingStatus::Confirmed]).await?;
        self.publish_status("booking_cancelled", &dto).await?;
        Ok(dto)
    }

    async fn get(&self, booking_id: &str) -> SalonResult<BookingDto> {
        let entity = self.booking_repository.get(booking_id).await?;
        Ok(BookingDto::from(&entity))
    }

    async fn find_by_master_date(&self, master_id: &str, date: NaiveDate) -> SalonResult<Vec<BookingDto>> {
        let predicate = HashMap::from([
            ("master_id".to_string(), master_id.to_string()),
            ("booking_date".to_string(), format!("{}", date.format("%Y-%m-%d"))),
        ]);
        let res = self.booking_repository.query(&predicate, None, 100).await?;
        Ok(res.records.iter().map(BookingDto::from).collect())
    }
}

impl From<&BookingEntity> for BookingDto {
    fn from(other: &BookingEntity) -> BookingDto {
        BookingDto {
            booking_id: other.booking_id.to_string(),
            version: other.version,
            master_id: other.master_id.to_string(),
            service_id: other.service_id.to_string(),
            client_id: other.client_id.to_string(),
            date: other.booking_date,
            start_time: other.start_time,
            end_time: other.end_time,
            booking_status: other.booking_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{NaiveDate, NaiveTime};

    use crate::booking::domain::BookingService;
    use crate::booking::domain::model::BookingEntity;
    use crate::booking::domain::service::BookingServiceImpl;
    use crate::booking::repository::BookingRepository;
    use crate::booking::repository::memory_booking_repository::MemoryBookingRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::{BookingStatus, SalonError};
    use crate::core::locks::KeyedLocks;
    use crate::core::repository::Repository;
    use crate::gateway::logs::publisher::LogPublisher;
    use crate::hold::domain::HoldService;
    use crate::hold::domain::service::HoldManagerImpl;
    use crate::masters::domain::model::MasterEntity;
    use crate::masters::repository::memory_master_repository::MemoryMasterRepository;
    use crate::services::domain::model::ServiceEntity;
    use crate::services::repository::memory_service_repository::MemoryServiceRepository;

    struct Fixture {
        holds: Arc<HoldManagerImpl>,
        svc: BookingServiceImpl,
        bookings: Arc<MemoryBookingRepository>,
        master_id: String,
        service_id: String,
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date")
    }

    async fn build_fixture(ttl_minutes: i64) -> Fixture {
        let mut config = Configuration::new("test");
        config.hold_ttl_minutes = ttl_minutes;
        let masters = Arc::new(MemoryMasterRepository::new());
        let services = Arc::new(MemoryServiceRepository::new());
        let bookings = Arc::new(MemoryBookingRepository::new());
        let publisher = Arc::new(LogPublisher::new());
        let locks = Arc::new(KeyedLocks::new());

        let master = MasterEntity::new("test", "Anna", "lashes");
        let service = ServiceEntity::new("test", "classic set", 60, 6500);
        let _ = masters.create(&master).await.expect("should create master");
        let _ = services.create(&service).await.expect("should create service");

        let holds = Arc::new(HoldManagerImpl::new(
            &config, masters.clone(), services.clone(), bookings.clone(),
            publisher.clone(), locks.clone()));
        let svc = BookingServiceImpl::new(
            &config, bookings.clone(), holds.clone(), masters, services, publisher, locks);
        Fixture {
            holds,
            svc,
            bookings,
            master_id: master.master_id,
            service_id: service.service_id,
        }
    }

    #[tokio::test]
    async fn test_should_finalize_hold_into_booking() {
        let fixture = build_fixture(10).await;
        let hold = fixture.holds.create_hold(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(14, 0), "client-1").await.expect("should hold");

        let booking = fixture.svc.finalize_hold(hold.hold_id.as_str(), false)
            .await.expect("should finalize");
        assert_eq!(BookingStatus::Held, booking.booking_status);
        assert_eq!(time(15, 0), booking.end_time);

        // the hold left the working set, the ledger owns the slot now
        assert!(matches!(fixture.holds.get_hold(hold.hold_id.as_str()).await,
                         Err(SalonError::NotFound { .. })));
        let ledger = fixture.bookings.find_active_by_master_date(fixture.master_id.as_str(), day())
            .await.expect("should read ledger");
        assert_eq!(1, ledger.len());

        // and finalizing the same hold again cannot double-book
        assert!(fixture.svc.finalize_hold(hold.hold_id.as_str(), false).await.is_err());
    }

    #[tokio::test]
    async fn test_should_not_finalize_expired_hold() {
        let fixture = build_fixture(0).await;
        let hold = fixture.holds.create_hold(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(14, 0), "client-1").await.expect("should hold");

        let err = fixture.svc.finalize_hold(hold.hold_id.as_str(), false)
            .await.expect_err("expired hold must not finalize");
        assert!(err.is_conflict());
        let ledger = fixture.bookings.find_active_by_master_date(fixture.master_id.as_str(), day())
            .await.expect("should read ledger");
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_should_conflict_when_ledger_already_owns_slot() {
        let fixture = build_fixture(10).await;
        let hold = fixture.holds.create_hold(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(14, 0), "client-1").await.expect("should hold");
        // a booking lands behind the hold's back (e.g. written by another node)
        let interloper = BookingEntity::new(
            "test", fixture.master_id.as_str(), fixture.service_id.as_str(), "client-9",
            day(), time(14, 0), time(15, 0), BookingStatus::Confirmed);
        let _ = fixture.bookings.create(&interloper).await.expect("should seed");

        let err = fixture.svc.finalize_hold(hold.hold_id.as_str(), false)
            .await.expect_err("commit-time check must catch it");
        assert!(err.is_conflict());
        // the dead hold was dropped with the conflict
        assert!(fixture.holds.get_hold(hold.hold_id.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_should_book_direct_and_respect_holds() {
        let fixture = build_fixture(10).await;
        let _ = fixture.holds.create_hold(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(10, 0), "client-1").await.expect("should hold");

        // direct request for the held window loses
        let err = fixture.svc.book_direct(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(10, 30), "client-2", false).await.expect_err("should conflict");
        assert!(err.is_conflict());

        // a free window books fine
        let booking = fixture.svc.book_direct(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(12, 0), "client-2", true).await.expect("should book");
        assert_eq!(BookingStatus::Confirmed, booking.booking_status);
    }

    #[tokio::test]
    async fn test_should_confirm_and_cancel_with_version_checks() {
        let fixture = build_fixture(10).await;
        let booking = fixture.svc.book_direct(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(9, 0), "client-1", false).await.expect("should book");

        let confirmed = fixture.svc.confirm(booking.booking_id.as_str()).await.expect("should confirm");
        assert_eq!(BookingStatus::Confirmed, confirmed.booking_status);

        // a second confirm is not a valid transition
        assert!(matches!(fixture.svc.confirm(booking.booking_id.as_str()).await,
                         Err(SalonError::Validation { .. })));

        let cancelled = fixture.svc.cancel(booking.booking_id.as_str()).await.expect("should cancel");
        assert_eq!(BookingStatus::Cancelled, cancelled.booking_status);

        // cancellation frees the window for new claims
        let again = fixture.holds.create_hold(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(9, 0), "client-2").await.expect("should hold after cancel");
        assert_eq!("client-2", again.client_id.as_str());

        // the cancelled row is still visible for the back office
        let all = fixture.svc.find_by_master_date(fixture.master_id.as_str(), day())
            .await.expect("should query");
        assert_eq!(1, all.len());
        assert_eq!(BookingStatus::Cancelled, all[0].booking_status);
    }

    #[tokio::test]
    async fn test_should_validate_direct_requests() {
        let fixture = build_fixture(10).await;
        assert!(matches!(fixture.svc.book_direct(
            "missing", fixture.service_id.as_str(), day(), time(9, 0), "c1", false).await,
            Err(SalonError::NotFound { .. })));
        assert!(matches!(fixture.svc.book_direct(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"), time(9, 0), "c1", false).await,
            Err(SalonError::Validation { .. })));
        assert!(matches!(fixture.svc.book_direct(
            fixture.master_id.as_str(), fixture.service_id.as_str(),
            day(), time(9, 0), "", false).await,
            Err(SalonError::Validation { .. })));
    }
}
