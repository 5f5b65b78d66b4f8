use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::booking::domain::model::BookingEntity;
use crate::booking::repository::BookingRepository;
use crate::core::library::{BookingStatus, SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;

// In-memory ledger for tests and single-node development. The write lock
// spans the overlap check and the insert, so create_if_free is atomic the
// way a conditional ledger write must be.
#[derive(Debug, Default)]
pub(crate) struct MemoryBookingRepository {
    records: RwLock<HashMap<String, BookingEntity>>,
}

impl MemoryBookingRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Repository<BookingEntity> for MemoryBookingRepository {
    async fn create(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.booking_id.as_str()) {
            return Err(SalonError::conflict(
                format!("booking already exists {}", entity.booking_id).as_str()));
        }
        records.insert(entity.booking_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        match records.get(entity.booking_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(SalonError::conflict(
                        format!("booking version mismatch for {}", entity.booking_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                records.insert(entity.booking_id.to_string(), updated);
                Ok(1)
            }
            None => Err(SalonError::not_found(
                format!("booking not found for {}", entity.booking_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SalonResult<BookingEntity> {
        let records = self.records.read().await;
        records.get(id).cloned().ok_or_else(|| {
            SalonError::not_found(format!("booking not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.remove(id).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("booking not found for {}", id).as_str())
        })
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<BookingEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<BookingEntity> = records.values()
            .filter(|b| predicate.get("master_id").map_or(true, |v| &b.master_id == v))
            .filter(|b| predicate.get("client_id").map_or(true, |v| &b.client_id == v))
            .filter(|b| predicate.get("booking_date").map_or(true, |v| {
                format!("{}", b.booking_date.format("%Y-%m-%d")).as_str() == v.as_str()
            }))
            .filter(|b| predicate.get("booking_status").map_or(true, |v| &b.booking_status.to_string() == v))
            .cloned()
            .collect();
        matched.sort_by_key(|b| (b.booking_date, b.start_time));
        matched.truncate(page_size);
        Ok(PaginatedResult::new(page, page_size, None, matched))
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create_if_free(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.booking_id.as_str()) {
            return Err(SalonError::conflict(
                format!("booking already exists {}", entity.booking_id).as_str()));
        }
        let collision = records.values().any(|b| {
            b.master_id == entity.master_id
                && b.booking_date == entity.booking_date
                && b.booking_status.occupies_slot()
                && b.overlaps(entity.start_time, entity.end_time)
        });
        if collision {
            return Err(SalonError::conflict(
                format!("slot {} {} already taken for master {}",
                        entity.booking_date, entity.start_time, entity.master_id).as_str()));
        }
        records.insert(entity.booking_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn find_active_by_master_date(&self, master_id: &str,
                                        date: NaiveDate) -> SalonResult<Vec<BookingEntity>> {
        self.find_active_by_master_between(master_id, date, date).await
    }

    async fn find_active_by_master_between(&self, master_id: &str,
                                           from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<BookingEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<BookingEntity> = records.values()
            .filter(|b| b.master_id == master_id
                && b.booking_date >= from && b.booking_date <= to
                && b.booking_status.occupies_slot())
            .cloned()
            .collect();
        matched.sort_by_key(|b| (b.booking_date, b.start_time));
        Ok(matched)
    }

    async fn update_status(&self, booking_id: &str, expected_version: i64,
                           status: BookingStatus) -> SalonResult<BookingEntity> {
        let mut records = self.records.write().await;
        match records.get(booking_id) {
            Some(existing) => {
                if existing.version != expected_version {
                    return Err(SalonError::conflict(
                        format!("booking version mismatch for {}", booking_id).as_str()));
                }
                let mut updated = existing.clone();
                updated.booking_status = status;
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                records.insert(booking_id.to_string(), updated.clone());
                Ok(updated)
            }
            None => Err(SalonError::not_found(
                format!("booking not found for {}", booking_id).as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::booking::domain::model::BookingEntity;
    use crate::booking::repository::BookingRepository;
    use crate::booking::repository::memory_booking_repository::MemoryBookingRepository;
    use crate::core::library::BookingStatus;
    use crate::core::repository::Repository;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn booking(start_h: u32, end_h: u32, status: BookingStatus) -> BookingEntity {
        BookingEntity::new("salon1", "m1", "s1", "c1",
                           NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
                           time(start_h, 0), time(end_h, 0), status)
    }

    #[tokio::test]
    async fn test_should_reject_overlapping_insert() {
        let repo = MemoryBookingRepository::new();
        let first = booking(10, 11, BookingStatus::Confirmed);
        assert_eq!(1, repo.create_if_free(&first).await.expect("should insert"));

        let overlapping = booking(10, 11, BookingStatus::Held);
        let err = repo.create_if_free(&overlapping).await.expect_err("should collide");
        assert!(err.is_conflict());

        // a cancelled row stops occupying the slot
        let _ = repo.update_status(first.booking_id.as_str(), 0, BookingStatus::Cancelled)
            .await.expect("should cancel");
        assert_eq!(1, repo.create_if_free(&overlapping).await.expect("should insert after cancel"));
    }

    #[tokio::test]
    async fn test_should_find_active_by_date() {
        let repo = MemoryBookingRepository::new();
        let _ = repo.create(&booking(9, 10, BookingStatus::Held)).await.expect("should create");
        let _ = repo.create(&booking(12, 13, BookingStatus::Cancelled)).await.expect("should create");
        let date = NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date");

        let active = repo.find_active_by_master_date("m1", date).await.expect("should find");
        assert_eq!(1, active.len());
        assert_eq!(time(9, 0), active[0].start_time);

        let range = repo.find_active_by_master_between(
            "m1",
            NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2027, 6, 30).expect("valid date")).await.expect("should find");
        assert_eq!(1, range.len());
    }

    #[tokio::test]
    async fn test_should_require_expected_version_on_status_update() {
        let repo = MemoryBookingRepository::new();
        let row = booking(9, 10, BookingStatus::Held);
        let _ = repo.create(&row).await.expect("should create");

        let confirmed = repo.update_status(row.booking_id.as_str(), 0, BookingStatus::Confirmed)
            .await.expect("should confirm");
        assert_eq!(BookingStatus::Confirmed, confirmed.booking_status);
        assert_eq!(1, confirmed.version);

        // stale writer loses
        let err = repo.update_status(row.booking_id.as_str(), 0, BookingStatus::Cancelled)
            .await.expect_err("should conflict");
        assert!(err.is_conflict());
    }
}
