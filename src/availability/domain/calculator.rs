use chrono::{Duration, NaiveDate, NaiveDateTime};
use crate::availability::domain::model::{DayContext, Slot};
use crate::utils::date::{minutes_of, time_from_minutes};

// The calculator is a pure function over a pre-fetched DayContext: no
// repository reads, no clock, no side effects. Identical inputs produce
// identical output, which is what makes the aggregator free to run it once
// per master and the tests able to pin exact slot lists.
//
// Cost is linear in bookings plus generated candidates.
pub(crate) fn compute_slots(ctx: &DayContext, date: NaiveDate,
                            duration_minutes: i64, step_minutes: i64) -> Vec<Slot> {
    let (window_start, window_end) = match ctx.window {
        Some(window) if !ctx.closed => window,
        _ => return vec![],
    };
    if duration_minutes <= 0 || step_minutes <= 0 {
        return vec![];
    }
    let window = (minutes_of(window_start), minutes_of(window_end));
    if window.1 <= window.0 {
        return vec![];
    }

    let off = clip_time_off(&ctx.time_off, date, window);
    let free = subtract_intervals(window, &merge_intervals(off));

    let mut bookings: Vec<(i64, i64)> = ctx.bookings.iter()
        .map(|(s, e)| (minutes_of(*s), minutes_of(*e)))
        .filter(|(s, e)| e > s)
        .collect();
    bookings.sort_unstable();

    let mut slots = vec![];
    for (free_start, free_end) in free {
        let mut candidates = vec![];
        let mut start = free_start;
        while start + duration_minutes <= free_end {
            let end = start + duration_minutes;
            let available = !bookings.iter().any(|(bs, be)| *bs < end && *be > start);
            candidates.push((start, available));
            start += step_minutes;
        }
        // preferred starts leave no dead gap: the slot ends exactly where an
        // existing booking begins, or it is the last open candidate of the run
        let last_available = candidates.iter().rposition(|(_, available)| *available);
        for (idx, (start, available)) in candidates.iter().enumerate() {
            let end = start + duration_minutes;
            let is_optimal = *available
                && (bookings.iter().any(|(bs, _)| *bs == end) || Some(idx) == last_available);
            if let Ok(time) = time_from_minutes(*start) {
                slots.push(Slot::new(time, *available, is_optimal));
            }
        }
    }
    slots
}

// time-off entries may start before the date or end after it; clip each to
// the date and then to the working window, in minutes since midnight
fn clip_time_off(time_off: &[(NaiveDateTime, NaiveDateTime)], date: NaiveDate,
                 window: (i64, i64)) -> Vec<(i64, i64)> {
    let day_start = match date.and_hms_opt(0, 0, 0) {
        Some(start) => start,
        None => return vec![],
    };
    let day_end = day_start + Duration::days(1);
    let mut clipped = vec![];
    for (from, to) in time_off {
        if *to <= day_start || *from >= day_end || to <= from {
            continue;
        }
        let start = if *from <= day_start { 0 } else { minutes_of(from.time()) };
        let end = if *to >= day_end { 24 * 60 } else { minutes_of(to.time()) };
        let start = start.max(window.0);
        let end = end.min(window.1);
        if end > start {
            clipped.push((start, end));
        }
    }
    clipped
}

// union semantics: overlapping entries collapse into one blocked interval
pub(crate) fn merge_intervals(mut intervals: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    intervals.sort_unstable();
    let mut merged: Vec<(i64, i64)> = vec![];
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => {
                last.1 = last.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

// free sub-intervals of the window after removing merged blocked intervals
pub(crate) fn subtract_intervals(window: (i64, i64), blocked: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut free = vec![];
    let mut cursor = window.0;
    for (start, end) in blocked {
        if *start > cursor {
            free.push((cursor, (*start).min(window.1)));
        }
        cursor = cursor.max(*end);
        if cursor >= window.1 {
            return free;
        }
    }
    if cursor < window.1 {
        free.push((cursor, window.1));
    }
    free
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crate::availability::domain::calculator::{compute_slots, merge_intervals, subtract_intervals};
    use crate::availability::domain::model::{DayContext, Slot};
    use crate::utils::date::fmt_time;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date")
    }

    fn nine_to_five() -> DayContext {
        DayContext {
            window: Some((time(9, 0), time(17, 0))),
            ..DayContext::default()
        }
    }

    fn available_times(slots: &[Slot]) -> Vec<String> {
        slots.iter().filter(|s| s.available).map(|s| fmt_time(s.time)).collect()
    }

    #[tokio::test]
    async fn test_should_return_empty_without_working_hours() {
        let ctx = DayContext::default();
        assert!(compute_slots(&ctx, date(), 60, 15).is_empty());
    }

    #[tokio::test]
    async fn test_should_return_empty_on_closed_holiday() {
        let mut ctx = nine_to_five();
        ctx.closed = true;
        assert!(compute_slots(&ctx, date(), 60, 15).is_empty());
    }

    #[tokio::test]
    async fn test_should_compute_day_with_one_booking() {
        // 09:00-17:00 window, one 10:00-11:00 booking, 60-minute service
        let mut ctx = nine_to_five();
        ctx.bookings.push((time(10, 0), time(11, 0)));
        let slots = compute_slots(&ctx, date(), 60, 15);

        // candidates every 15 minutes from 09:00 through 16:00
        assert_eq!(29, slots.len());
        assert_eq!(time(9, 0), slots[0].time);
        assert_eq!(time(16, 0), slots[28].time);

        // 09:00 ends exactly at the booking, so it stays open and is preferred
        assert!(slots[0].available);
        assert!(slots[0].is_optimal);
        // 09:15 through 10:45 overlap the booking
        for slot in &slots[1..8] {
            assert!(!slot.available, "slot {} should overlap", slot.time);
        }
        // the calendar resumes at 11:00
        assert_eq!(time(11, 0), slots[8].time);
        assert!(slots[8].available);
        // last fitting start closes the day without idle tail
        assert!(slots[28].available);
        assert!(slots[28].is_optimal);
        // middle of an open run is not preferred
        assert!(!slots[10].is_optimal);
    }

    #[tokio::test]
    async fn test_should_not_escape_window_with_overlapping_time_off() {
        let mut ctx = nine_to_five();
        let day = date();
        ctx.time_off.push((day.and_hms_opt(10, 0, 0).expect("dt"), day.and_hms_opt(12, 0, 0).expect("dt")));
        ctx.time_off.push((day.and_hms_opt(11, 0, 0).expect("dt"), day.and_hms_opt(13, 0, 0).expect("dt")));
        let slots = compute_slots(&ctx, day, 60, 15);

        assert_eq!(vec!["09:00".to_string(), "13:00".to_string(), "13:15".to_string(),
                        "13:30".to_string(), "13:45".to_string(), "14:00".to_string(),
                        "14:15".to_string(), "14:30".to_string(), "14:45".to_string(),
                        "15:00".to_string(), "15:15".to_string(), "15:30".to_string(),
                        "15:45".to_string(), "16:00".to_string()],
                   available_times(&slots));
        // every candidate fits the window and avoids the blocked union
        for slot in &slots {
            let start = slot.time;
            assert!(start >= time(9, 0));
            assert!(start == time(9, 0) || start >= time(13, 0));
            assert!(start <= time(16, 0));
        }
    }

    #[tokio::test]
    async fn test_should_be_deterministic() {
        let mut ctx = nine_to_five();
        ctx.bookings.push((time(12, 0), time(13, 30)));
        ctx.time_off.push((date().and_hms_opt(9, 0, 0).expect("dt"), date().and_hms_opt(9, 30, 0).expect("dt")));
        let first = compute_slots(&ctx, date(), 45, 15);
        let second = compute_slots(&ctx, date(), 45, 15);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[tokio::test]
    async fn test_should_treat_touching_booking_as_free() {
        let mut ctx = nine_to_five();
        ctx.bookings.push((time(10, 0), time(11, 0)));
        let slots = compute_slots(&ctx, date(), 60, 15);
        // 11:00 starts exactly when the booking ends
        let eleven = slots.iter().find(|s| s.time == time(11, 0)).expect("slot should exist");
        assert!(eleven.available);
    }

    #[tokio::test]
    async fn test_should_return_empty_when_time_off_covers_day() {
        let mut ctx = nine_to_five();
        let day = date();
        // multi-day vacation spanning the whole date
        ctx.time_off.push((
            day.pred_opt().expect("valid date").and_hms_opt(0, 0, 0).expect("dt"),
            day.succ_opt().expect("valid date").and_hms_opt(0, 0, 0).expect("dt")));
        assert!(compute_slots(&ctx, day, 30, 15).is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_non_positive_inputs() {
        let ctx = nine_to_five();
        assert!(compute_slots(&ctx, date(), 0, 15).is_empty());
        assert!(compute_slots(&ctx, date(), 60, 0).is_empty());
    }

    #[tokio::test]
    async fn test_should_skip_durations_longer_than_window() {
        let mut ctx = nine_to_five();
        ctx.window = Some((time(9, 0), time(10, 0)));
        assert!(compute_slots(&ctx, date(), 90, 15).is_empty());
        let slots = compute_slots(&ctx, date(), 60, 15);
        assert_eq!(1, slots.len());
        assert!(slots[0].is_optimal);
    }

    #[tokio::test]
    async fn test_should_merge_intervals() {
        assert_eq!(vec![(540, 720), (780, 840)],
                   merge_intervals(vec![(600, 720), (540, 660), (780, 840)]));
        assert!(merge_intervals(vec![]).is_empty());
    }

    #[tokio::test]
    async fn test_should_subtract_intervals() {
        assert_eq!(vec![(540, 600), (720, 1020)],
                   subtract_intervals((540, 1020), &[(600, 720)]));
        assert_eq!(vec![(540, 1020)], subtract_intervals((540, 1020), &[]));
        assert!(subtract_intervals((540, 1020), &[(500, 1100)]).is_empty());
    }
}
