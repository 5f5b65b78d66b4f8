use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use tokio::sync::RwLock;

use crate::calendar::domain::model::{HolidayEntity, TimeOffEntity, WorkingHoursEntity};
use crate::calendar::repository::{HolidayRepository, TimeOffRepository, WorkingHoursRepository};
use crate::core::library::{SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;

#[derive(Debug, Default)]
pub(crate) struct MemoryWorkingHoursRepository {
    records: RwLock<HashMap<String, WorkingHoursEntity>>,
}

impl MemoryWorkingHoursRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl WorkingHoursRepository for MemoryWorkingHoursRepository {
    async fn put(&self, entity: &WorkingHoursEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.insert(entity.rule_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn get(&self, master_id: &str, day_of_week: u8) -> SalonResult<WorkingHoursEntity> {
        let records = self.records.read().await;
        let rule_id = WorkingHoursEntity::rule_key(master_id, day_of_week);
        records.get(rule_id.as_str()).cloned().ok_or_else(|| {
            SalonError::not_found(format!("working hours not found for {}", rule_id).as_str())
        })
    }

    async fn find_by_master(&self, master_id: &str) -> SalonResult<Vec<WorkingHoursEntity>> {
        let records = self.records.read().await;
        let mut rules: Vec<WorkingHoursEntity> = records.values()
            .filter(|r| r.master_id == master_id)
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.day_of_week);
        Ok(rules)
    }

    async fn delete(&self, master_id: &str, day_of_week: u8) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        let rule_id = WorkingHoursEntity::rule_key(master_id, day_of_week);
        records.remove(rule_id.as_str()).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("working hours not found for {}", rule_id).as_str())
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryTimeOffRepository {
    records: RwLock<HashMap<String, TimeOffEntity>>,
}

impl MemoryTimeOffRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Repository<TimeOffEntity> for MemoryTimeOffRepository {
    async fn create(&self, entity: &TimeOffEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.time_off_id.as_str()) {
            return Err(SalonError::conflict(
                format!("time off already exists {}", entity.time_off_id).as_str()));
        }
        records.insert(entity.time_off_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &TimeOffEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        match records.get(entity.time_off_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(SalonError::conflict(
                        format!("time off version mismatch for {}", entity.time_off_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                records.insert(entity.time_off_id.to_string(), updated);
                Ok(1)
            }
            None => Err(SalonError::not_found(
                format!("time off not found for {}", entity.time_off_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SalonResult<TimeOffEntity> {
        let records = self.records.read().await;
        records.get(id).cloned().ok_or_else(|| {
            SalonError::not_found(format!("time off not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.remove(id).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("time off not found for {}", id).as_str())
        })
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<TimeOffEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<TimeOffEntity> = records.values()
            .filter(|t| predicate.get("master_id").map_or(true, |v| &t.master_id == v))
            .cloned()
            .collect();
        matched.sort_by_key(|t| t.start_at);
        matched.truncate(page_size);
        Ok(PaginatedResult::new(page, page_size, None, matched))
    }
}

#[async_trait]
impl TimeOffRepository for MemoryTimeOffRepository {
    async fn find_by_master_between(&self, master_id: &str,
                                    from: NaiveDateTime, to: NaiveDateTime) -> SalonResult<Vec<TimeOffEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<TimeOffEntity> = records.values()
            .filter(|t| t.master_id == master_id && t.intersects(from, to))
            .cloned()
            .collect();
        matched.sort_by_key(|t| t.start_at);
        Ok(matched)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryHolidayRepository {
    records: RwLock<HashMap<NaiveDate, HolidayEntity>>,
}

impl MemoryHolidayRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl HolidayRepository for MemoryHolidayRepository {
    async fn put(&self, entity: &HolidayEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.insert(entity.holiday_date, entity.clone());
        Ok(1)
    }

    async fn get(&self, date: NaiveDate) -> SalonResult<HolidayEntity> {
        let records = self.records.read().await;
        records.get(&date).cloned().ok_or_else(|| {
            SalonError::not_found(format!("holiday not found for {}", date).as_str())
        })
    }

    async fn find_between(&self, salon_id: &str,
                          from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<HolidayEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<HolidayEntity> = records.values()
            .filter(|h| h.salon_id == salon_id && h.holiday_date >= from && h.holiday_date <= to)
            .cloned()
            .collect();
        matched.sort_by_key(|h| h.holiday_date);
        Ok(matched)
    }

    async fn delete(&self, date: NaiveDate) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.remove(&date).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("holiday not found for {}", date).as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::calendar::domain::model::{HolidayEntity, TimeOffEntity, WorkingHoursEntity};
    use crate::calendar::repository::{HolidayRepository, TimeOffRepository, WorkingHoursRepository};
    use crate::calendar::repository::memory_calendar_repository::{MemoryHolidayRepository, MemoryTimeOffRepository, MemoryWorkingHoursRepository};
    use crate::core::library::TimeOffKind;
    use crate::core::repository::Repository;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[tokio::test]
    async fn test_should_replace_working_hours_on_put() {
        let repo = MemoryWorkingHoursRepository::new();
        let _ = repo.put(&WorkingHoursEntity::new("m1", 0, time(9, 0), time(17, 0))).await.expect("should put");
        let _ = repo.put(&WorkingHoursEntity::new("m1", 0, time(10, 0), time(18, 0))).await.expect("should put");
        let _ = repo.put(&WorkingHoursEntity::new("m1", 1, time(9, 0), time(13, 0))).await.expect("should put");

        let rules = repo.find_by_master("m1").await.expect("should find");
        assert_eq!(2, rules.len());
        assert_eq!(time(10, 0), rules[0].start_time);

        let _ = repo.delete("m1", 0).await.expect("should delete");
        assert!(repo.get("m1", 0).await.is_err());
    }

    #[tokio::test]
    async fn test_should_find_intersecting_time_off() {
        let repo = MemoryTimeOffRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let morning = TimeOffEntity::new(
            "m1",
            date.and_hms_opt(9, 0, 0).expect("dt"),
            date.and_hms_opt(11, 0, 0).expect("dt"),
            TimeOffKind::Training, "course");
        let other_master = TimeOffEntity::new(
            "m2",
            date.and_hms_opt(9, 0, 0).expect("dt"),
            date.and_hms_opt(11, 0, 0).expect("dt"),
            TimeOffKind::Vacation, "");
        let _ = repo.create(&morning).await.expect("should create");
        let _ = repo.create(&other_master).await.expect("should create");

        let found = repo.find_by_master_between(
            "m1",
            date.and_hms_opt(10, 0, 0).expect("dt"),
            date.and_hms_opt(12, 0, 0).expect("dt")).await.expect("should find");
        assert_eq!(1, found.len());

        let none = repo.find_by_master_between(
            "m1",
            date.and_hms_opt(11, 0, 0).expect("dt"),
            date.and_hms_opt(12, 0, 0).expect("dt")).await.expect("should find");
        assert_eq!(0, none.len());
    }

    #[tokio::test]
    async fn test_should_put_get_holidays_between() {
        let repo = MemoryHolidayRepository::new();
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        let mar8 = NaiveDate::from_ymd_opt(2025, 3, 8).expect("valid date");
        let _ = repo.put(&HolidayEntity::new("salon1", jan1, "New Year", true)).await.expect("should put");
        let _ = repo.put(&HolidayEntity::new("salon1", mar8, "Women's Day", true)).await.expect("should put");

        let found = repo.find_between(
            "salon1",
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date")).await.expect("should find");
        assert_eq!(1, found.len());
        assert_eq!("New Year", found[0].holiday_name.as_str());

        let _ = repo.delete(jan1).await.expect("should delete");
        assert!(repo.get(jan1).await.is_err());
    }
}
