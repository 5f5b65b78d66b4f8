use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::availability::domain::AvailabilityService;
use crate::availability::domain::calculator;
use crate::availability::domain::model::{DayContext, Slot};
use crate::booking::repository::BookingRepository;
use crate::calendar::domain::CalendarService;
use crate::calendar::dto::HolidayDto;
use crate::core::domain::Configuration;
use crate::core::library::{SalonError, SalonResult};
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;
use crate::utils::date::fmt_time;

pub(crate) struct AvailabilityServiceImpl {
    salon_id: String,
    default_step_minutes: i64,
    master_repository: Arc<dyn MasterRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    calendar_service: Arc<dyn CalendarService>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl AvailabilityServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      master_repository: Arc<dyn MasterRepository>,
                      service_repository: Arc<dyn ServiceRepository>,
                      calendar_service: Arc<dyn CalendarService>,
                      booking_repository: Arc<dyn BookingRepository>) -> Self {
        Self {
            salon_id: config.salon_id.to_string(),
            default_step_minutes: config.slot_step_minutes,
            master_repository,
            service_repository,
            calendar_service,
            booking_repository,
        }
    }

    fn validate_grid(duration_minutes: i64, step_minutes: i64) -> SalonResult<()> {
        if duration_minutes <= 0 || duration_minutes > 24 * 60 {
            return Err(SalonError::validation(
                format!("duration_minutes {} out of range", duration_minutes).as_str(), Some("400".to_string())));
        }
        if step_minutes <= 0 || step_minutes > 24 * 60 {
            return Err(SalonError::validation(
                format!("step_minutes {} out of range", step_minutes).as_str(), Some("400".to_string())));
        }
        Ok(())
    }

    // the longest service wins for bundles: a short estimate would promise a
    // slot the combined appointment cannot fit
    async fn resolve_duration(&self, service_ids: &[String],
                              duration_minutes: Option<i64>) -> SalonResult<i64> {
        if let Some(duration) = duration_minutes {
            return Ok(duration);
        }
        if service_ids.is_empty() {
            return Err(SalonError::validation(
                "either service_ids or duration_minutes is required", Some("400".to_string())));
        }
        let mut max_duration = 0;
        for service_id in service_ids {
            let service = self.service_repository.get(service_id.as_str()).await?;
            max_duration = max_duration.max(service.duration_minutes);
        }
        Ok(max_duration)
    }

    // one repository read per source; the calculator itself stays pure.
    // A pre-fetched holiday (batch, month scan) short-circuits the lookup.
    async fn day_context(&self, master_id: &str, date: NaiveDate,
                         prefetched_holiday: Option<&Option<HolidayDto>>) -> SalonResult<DayContext> {
        let weekday = date.weekday().num_days_from_monday() as u8;
        let window = match self.calendar_service.working_hours_on(master_id, weekday).await? {
            Some(rule) => (rule.start_time, rule.end_time),
            // no rule for the weekday: the master simply does not work that
            // day, so there is nothing else worth fetching
            None => return Ok(DayContext::default()),
        };
        let holiday = match prefetched_holiday {
            Some(holiday) => holiday.clone(),
            None => self.calendar_service.holiday_on(date).await?,
        };
        let closed = holiday.map_or(false, |h| h.closed && !h.master_exceptions.iter().any(|m| m == master_id));
        if closed {
            return Ok(DayContext { window: Some(window), closed: true, ..DayContext::default() });
        }
        let day_start = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            SalonError::validation(format!("invalid date {}", date).as_str(), Some("400".to_string()))
        })?;
        let day_end = day_start + Duration::days(1);
        let time_off = self.calendar_service.time_off_between(master_id, day_start, day_end).await?;
        let bookings = self.booking_repository.find_active_by_master_date(master_id, date).await?;
        Ok(DayContext {
            window: Some(window),
            closed: false,
            time_off: time_off.iter().map(|t| (t.start_at, t.end_at)).collect(),
            bookings: bookings.iter().map(|b| (b.start_time, b.end_time)).collect(),
        })
    }
}

#[async_trait]
impl AvailabilityService for AvailabilityServiceImpl {
    async fn compute_slots(&self, master_id: &str, date: NaiveDate,
                           duration_minutes: i64, step_minutes: Option<i64>) -> SalonResult<Vec<Slot>> {
        let step = step_minutes.unwrap_or(self.default_step_minutes);
        Self::validate_grid(duration_minutes, step)?;
        let _ = self.master_repository.get(master_id).await?;
        // past dates are a normal empty outcome, never an error
        if date < Utc::now().naive_utc().date() {
            return Ok(vec![]);
        }
        let ctx = self.day_context(master_id, date, None).await?;
        Ok(calculator::compute_slots(&ctx, date, duration_minutes, step))
    }

    async fn compute_batch(&self, date: NaiveDate, service_ids: &[String],
                           duration_minutes: Option<i64>,
                           master_ids: &[String]) -> SalonResult<BTreeMap<String, Vec<String>>> {
        let duration = self.resolve_duration(service_ids, duration_minutes).await?;
        let step = self.default_step_minutes;
        Self::validate_grid(duration, step)?;

        let masters = if master_ids.is_empty() {
            self.master_repository.find_active(self.salon_id.as_str()).await?
                .into_iter().map(|m| m.master_id).collect::<Vec<String>>()
        } else {
            let mut resolved = vec![];
            for master_id in master_ids {
                resolved.push(self.master_repository.get(master_id.as_str()).await?.master_id);
            }
            resolved
        };

        let mut availability = BTreeMap::new();
        if date < Utc::now().naive_utc().date() {
            for master_id in masters {
                availability.insert(master_id, vec![]);
            }
            return Ok(availability);
        }

        // the holiday row is shared across the whole salon; fetch it once and
        // scan each master's ledger exactly once
        let holiday = self.calendar_service.holiday_on(date).await?;
        for master_id in masters {
            let ctx = self.day_context(master_id.as_str(), date, Some(&holiday)).await?;
            let times = calculator::compute_slots(&ctx, date, duration, step).iter()
                .filter(|slot| slot.available)
                .map(|slot| fmt_time(slot.time))
                .collect();
            availability.insert(master_id, times);
        }
        Ok(availability)
    }

    async fn available_dates(&self, master_id: &str, year: i32, month: u32,
                             duration_minutes: i64) -> SalonResult<Vec<NaiveDate>> {
        let step = self.default_step_minutes;
        Self::validate_grid(duration_minutes, step)?;
        let _ = self.master_repository.get(master_id).await?;

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            SalonError::validation(format!("invalid month {}-{}", year, month).as_str(), Some("400".to_string()))
        })?;
        let next_month_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }.ok_or_else(|| {
            SalonError::validation(format!("invalid month {}-{}", year, month).as_str(), Some("400".to_string()))
        })?;
        let last = next_month_first.pred_opt().unwrap_or(first);

        // month-wide reads up front, then the pure calculator per day
        let rules: HashMap<u8, _> = self.calendar_service.working_hours_for(master_id).await?
            .into_iter().map(|r| (r.day_of_week, (r.start_time, r.end_time))).collect();
        let holidays: HashMap<NaiveDate, HolidayDto> = self.calendar_service
            .holidays_between(first, last).await?
            .into_iter().map(|h| (h.date, h)).collect();
        let month_start = first.and_hms_opt(0, 0, 0).ok_or_else(|| {
            SalonError::validation(format!("invalid date {}", first).as_str(), Some("400".to_string()))
        })?;
        let time_off: Vec<_> = self.calendar_service
            .time_off_between(master_id, month_start, month_start + Duration::days(62)).await?
            .iter().map(|t| (t.start_at, t.end_at)).collect();
        let mut bookings_by_date: HashMap<NaiveDate, Vec<_>> = HashMap::new();
        for booking in self.booking_repository.find_active_by_master_between(master_id, first, last).await? {
            bookings_by_date.entry(booking.booking_date).or_insert_with(Vec::new)
                .push((booking.start_time, booking.end_time));
        }

        let today = Utc::now().naive_utc().date();
        let mut dates = vec![];
        let mut date = first;
        while date <= last {
            if date >= today {
                let weekday = date.weekday().num_days_from_monday() as u8;
                let closed = holidays.get(&date)
                    .map_or(false, |h| h.closed && !h.master_exceptions.iter().any(|m| m == master_id));
                let ctx = DayContext {
                    window: rules.get(&weekday).copied(),
                    closed,
                    time_off: time_off.clone(),
                    bookings: bookings_by_date.get(&date).cloned().unwrap_or_default(),
                };
                let slots = calculator::compute_slots(&ctx, date, duration_minutes, step);
                if slots.iter().any(|slot| slot.available) {
                    dates.push(date);
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(dates)
    }
}
