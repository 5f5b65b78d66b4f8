use chrono::{NaiveTime, Timelike};
use crate::core::library::{SalonError, SalonResult};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// wire format for slot times; the booking UI sends and renders "HH:MM"
pub const TIME_FMT: &str = "%H:%M";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    // symmetric on purpose: items written through serde must parse back with
    // the same format the repositories use for range conditions
    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        format!("{}", time.format(DATE_FMT)).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

pub mod time_serializer {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::TIME_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        format!("{}", time.format(TIME_FMT)).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveTime::parse_from_str(&str_time, TIME_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

pub(crate) fn parse_time(value: &str) -> SalonResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FMT).map_err(|err| {
        SalonError::validation(
            format!("invalid time {} expected HH:MM {:?}", value, err).as_str(), Some("400".to_string()))
    })
}

pub(crate) fn fmt_time(time: NaiveTime) -> String {
    format!("{}", time.format(TIME_FMT))
}

// slot arithmetic works on whole minutes since midnight
pub(crate) fn minutes_of(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) / 60
}

pub(crate) fn time_from_minutes(minutes: i64) -> SalonResult<NaiveTime> {
    if !(0..24 * 60).contains(&minutes) {
        return Err(SalonError::validation(
            format!("minutes {} out of day range", minutes).as_str(), Some("400".to_string())));
    }
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
        .ok_or_else(|| SalonError::validation(
            format!("minutes {} out of day range", minutes).as_str(), Some("400".to_string())))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use crate::utils::date::{fmt_time, minutes_of, parse_time, time_from_minutes};

    #[tokio::test]
    async fn test_should_parse_and_format_time() {
        let time = parse_time("09:30").expect("should parse");
        assert_eq!(NaiveTime::from_hms_opt(9, 30, 0), Some(time));
        assert_eq!("09:30", fmt_time(time));
        assert!(parse_time("9 am").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[tokio::test]
    async fn test_should_round_trip_datetime_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Stamp {
            #[serde(with = "crate::utils::date::serializer")]
            at: chrono::NaiveDateTime,
        }
        let stamp = Stamp {
            at: chrono::NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date")
                .and_hms_opt(14, 30, 5).expect("valid datetime"),
        };
        let json = serde_json::to_string(&stamp).expect("should serialize");
        let parsed: Stamp = serde_json::from_str(json.as_str()).expect("should parse back");
        assert_eq!(stamp.at, parsed.at);
    }

    #[tokio::test]
    async fn test_should_convert_minutes() {
        let time = parse_time("14:45").expect("should parse");
        assert_eq!(885, minutes_of(time));
        assert_eq!(time, time_from_minutes(885).expect("should convert"));
        assert!(time_from_minutes(-1).is_err());
        assert!(time_from_minutes(24 * 60).is_err());
    }
}
