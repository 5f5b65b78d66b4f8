use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::calendar::domain::CalendarService;
use crate::calendar::domain::model::{HolidayEntity, TimeOffEntity, WorkingHoursEntity};
use crate::calendar::dto::{HolidayDto, TimeOffDto, WorkingHoursDto};
use crate::calendar::repository::{HolidayRepository, TimeOffRepository, WorkingHoursRepository};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{SalonError, SalonResult};
use crate::gateway::events::EventPublisher;

pub(crate) struct CalendarServiceImpl {
    salon_id: String,
    working_hours_repository: Arc<dyn WorkingHoursRepository>,
    time_off_repository: Arc<dyn TimeOffRepository>,
    holiday_repository: Arc<dyn HolidayRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CalendarServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      working_hours_repository: Arc<dyn WorkingHoursRepository>,
                      time_off_repository: Arc<dyn TimeOffRepository>,
                      holiday_repository: Arc<dyn HolidayRepository>,
                      events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            salon_id: config.salon_id.to_string(),
            working_hours_repository,
            time_off_repository,
            holiday_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CalendarService for CalendarServiceImpl {
    async fn put_working_hours(&self, hours: &WorkingHoursDto) -> SalonResult<WorkingHoursDto> {
        if hours.day_of_week > 6 {
            return Err(SalonError::validation(format!("day_of_week {} out of range 0-6",
                                                      hours.day_of_week).as_str(), Some("400".to_string())));
        }
        if hours.start_time >= hours.end_time {
            return Err(SalonError::validation(format!("working window must not be empty {} {}",
                                                      hours.start_time, hours.end_time).as_str(), Some("400".to_string())));
        }
        let entity = WorkingHoursEntity::from(hours);
        self.working_hours_repository.put(&entity).await?;
        let dto = WorkingHoursDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "working_hours_put", "calendar", entity.rule_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn remove_working_hours(&self, master_id: &str, day_of_week: u8) -> SalonResult<()> {
        self.working_hours_repository.delete(master_id, day_of_week).await?;
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "working_hours_removed", "calendar",
            WorkingHoursEntity::rule_key(master_id, day_of_week).as_str(),
            &HashMap::new(), &master_id)?).await?;
        Ok(())
    }

    async fn working_hours_for(&self, master_id: &str) -> SalonResult<Vec<WorkingHoursDto>> {
        let rules = self.working_hours_repository.find_by_master(master_id).await?;
        Ok(rules.iter().map(WorkingHoursDto::from).collect())
    }

    async fn working_hours_on(&self, master_id: &str, day_of_week: u8) -> SalonResult<Option<WorkingHoursDto>> {
        match self.working_hours_repository.get(master_id, day_of_week).await {
            Ok(rule) => Ok(Some(WorkingHoursDto::from(&rule))),
            // a missing rule is a day off, not an error
            Err(SalonError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn add_time_off(&self, time_off: &TimeOffDto) -> SalonResult<TimeOffDto> {
        if time_off.start_at >= time_off.end_at {
            return Err(SalonError::validation(format!("time off interval must not be empty {} {}",
                                                      time_off.start_at, time_off.end_at).as_str(), Some("400".to_string())));
        }
        let mut entity = TimeOffEntity::from(time_off);
        if entity.time_off_id.is_empty() {
            entity.time_off_id = Uuid::new_v4().to_string();
        }
        self.time_off_repository.create(&entity).await?;
        let dto = TimeOffDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "time_off_added", "calendar", entity.time_off_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn remove_time_off(&self, time_off_id: &str) -> SalonResult<()> {
        let existing = self.time_off_repository.get(time_off_id).await?;
        self.time_off_repository.delete(existing.time_off_id.as_str()).await?;
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "time_off_removed", "calendar", time_off_id, &HashMap::new(), &time_off_id)?).await?;
        Ok(())
    }

    async fn time_off_between(&self, master_id: &str,
                              from: NaiveDateTime, to: NaiveDateTime) -> SalonResult<Vec<TimeOffDto>> {
        let entries = self.time_off_repository.find_by_master_between(master_id, from, to).await?;
        Ok(entries.iter().map(TimeOffDto::from).collect())
    }

    async fn put_holiday(&self, holiday: &HolidayDto) -> SalonResult<HolidayDto> {
        let mut entity = HolidayEntity::from(holiday);
        entity.salon_id = self.salon_id.to_string();
        self.holiday_repository.put(&entity).await?;
        let dto = HolidayDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "holiday_put", "calendar", format!("{}", entity.holiday_date).as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn remove_holiday(&self, date: NaiveDate) -> SalonResult<()> {
        self.holiday_repository.delete(date).await?;
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "holiday_removed", "calendar", format!("{}", date).as_str(), &HashMap::new(), &format!("{}", date))?).await?;
        Ok(())
    }

    async fn holiday_on(&self, date: NaiveDate) -> SalonResult<Option<HolidayDto>> {
        match self.holiday_repository.get(date).await {
            Ok(holiday) => Ok(Some(HolidayDto::from(&holiday))),
            Err(SalonError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<HolidayDto>> {
        let holidays = self.holiday_repository.find_between(self.salon_id.as_str(), from, to).await?;
        Ok(holidays.iter().map(HolidayDto::from).collect())
    }
}

impl From<&WorkingHoursDto> for WorkingHoursEntity {
    fn from(other: &WorkingHoursDto) -> WorkingHoursEntity {
        WorkingHoursEntity::new(other.master_id.as_str(), other.day_of_week,
                                other.start_time, other.end_time)
    }
}

impl From<&WorkingHoursEntity> for WorkingHoursDto {
    fn from(other: &WorkingHoursEntity) -> WorkingHoursDto {
        WorkingHoursDto {
            master_id: other.master_id.to_string(),
            day_of_week: other.day_of_week,
            start_time: other.start_time,
            end_time: other.end_time,
        }
    }
}

impl From<&TimeOffDto> for TimeOffEntity {
    fn from(other: &TimeOffDto) -> TimeOffEntity {
        TimeOffEntity {
            time_off_id: other.time_off_id.to_string(),
            version: other.version,
            master_id: other.master_id.to_string(),
            start_at: other.start_at,
            end_at: other.end_at,
            kind: other.kind,
            reason: other.reason.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<&TimeOffEntity> for TimeOffDto {
    fn from(other: &TimeOffEntity) -> TimeOffDto {
        TimeOffDto {
            time_off_id: other.time_off_id.to_string(),
            version: other.version,
            master_id: other.master_id.to_string(),
            start_at: other.start_at,
            end_at: other.end_at,
            kind: other.kind,
            reason: other.reason.to_string(),
        }
    }
}

impl From<&HolidayDto> for HolidayEntity {
    fn from(other: &HolidayDto) -> HolidayEntity {
        let mut entity = HolidayEntity::new("", other.date, other.name.as_str(), other.closed);
        entity.master_exceptions = other.master_exceptions.clone();
        entity
    }
}

impl From<&HolidayEntity> for HolidayDto {
    fn from(other: &HolidayEntity) -> HolidayDto {
        HolidayDto {
            date: other.holiday_date,
            name: other.holiday_name.to_string(),
            closed: other.closed,
            master_exceptions: other.master_exceptions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{NaiveDate, NaiveTime};
    use crate::calendar::domain::CalendarService;
    use crate::calendar::domain::service::CalendarServiceImpl;
    use crate::calendar::dto::{HolidayDto, TimeOffDto, WorkingHoursDto};
    use crate::calendar::repository::memory_calendar_repository::{MemoryHolidayRepository, MemoryTimeOffRepository, MemoryWorkingHoursRepository};
    use crate::core::domain::Configuration;
    use crate::core::library::TimeOffKind;
    use crate::gateway::logs::publisher::LogPublisher;

    fn build_service() -> CalendarServiceImpl {
        CalendarServiceImpl::new(
            &Configuration::new("test"),
            Arc::new(MemoryWorkingHoursRepository::new()),
            Arc::new(MemoryTimeOffRepository::new()),
            Arc::new(MemoryHolidayRepository::new()),
            Arc::new(LogPublisher::new()))
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[tokio::test]
    async fn test_should_put_and_replace_working_hours() {
        let svc = build_service();
        let _ = svc.put_working_hours(&WorkingHoursDto::new("m1", 0, time(9, 0), time(17, 0)))
            .await.expect("should put");
        let _ = svc.put_working_hours(&WorkingHoursDto::new("m1", 0, time(10, 0), time(18, 0)))
            .await.expect("should put");

        let rules = svc.working_hours_for("m1").await.expect("should find");
        assert_eq!(1, rules.len());
        assert_eq!(time(10, 0), rules[0].start_time);

        let none = svc.working_hours_on("m1", 3).await.expect("should read");
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_should_reject_bad_working_hours() {
        let svc = build_service();
        assert!(svc.put_working_hours(&WorkingHoursDto::new("m1", 7, time(9, 0), time(17, 0))).await.is_err());
        assert!(svc.put_working_hours(&WorkingHoursDto::new("m1", 1, time(17, 0), time(9, 0))).await.is_err());
    }

    #[tokio::test]
    async fn test_should_add_and_remove_time_off() {
        let svc = build_service();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let dto = TimeOffDto {
            time_off_id: "".to_string(),
            version: 0,
            master_id: "m1".to_string(),
            start_at: date.and_hms_opt(12, 0, 0).expect("dt"),
            end_at: date.and_hms_opt(13, 0, 0).expect("dt"),
            kind: TimeOffKind::Other,
            reason: "lunch".to_string(),
        };
        let added = svc.add_time_off(&dto).await.expect("should add");
        assert!(!added.time_off_id.is_empty());

        let found = svc.time_off_between(
            "m1",
            date.and_hms_opt(0, 0, 0).expect("dt"),
            date.and_hms_opt(23, 59, 0).expect("dt")).await.expect("should find");
        assert_eq!(1, found.len());

        let _ = svc.remove_time_off(added.time_off_id.as_str()).await.expect("should remove");
        assert!(svc.remove_time_off(added.time_off_id.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_should_reject_empty_time_off_interval() {
        let svc = build_service();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let dto = TimeOffDto {
            time_off_id: "".to_string(),
            version: 0,
            master_id: "m1".to_string(),
            start_at: date.and_hms_opt(13, 0, 0).expect("dt"),
            end_at: date.and_hms_opt(13, 0, 0).expect("dt"),
            kind: TimeOffKind::Other,
            reason: "".to_string(),
        };
        assert!(svc.add_time_off(&dto).await.is_err());
    }

    #[tokio::test]
    async fn test_should_put_holiday_with_exceptions() {
        let svc = build_service();
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        let mut dto = HolidayDto::new(jan1, "New Year", true);
        dto.master_exceptions.push("m2".to_string());
        let _ = svc.put_holiday(&dto).await.expect("should put");

        let loaded = svc.holiday_on(jan1).await.expect("should read").expect("should exist");
        assert!(loaded.closed);
        assert_eq!(vec!["m2".to_string()], loaded.master_exceptions);

        let _ = svc.remove_holiday(jan1).await.expect("should remove");
        assert!(svc.holiday_on(jan1).await.expect("should read").is_none());
    }
}
