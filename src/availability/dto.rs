use serde::{Deserialize, Serialize};
use crate::availability::domain::model::Slot;
use crate::utils::date::fmt_time;

// wire shape of one slot; the UI renders unavailable ones disabled
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct SlotDto {
    pub time: String,
    pub available: bool,
    pub is_optimal: bool,
}

impl From<&Slot> for SlotDto {
    fn from(other: &Slot) -> SlotDto {
        SlotDto {
            time: fmt_time(other.time),
            available: other.available,
            is_optimal: other.is_optimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use crate::availability::domain::model::Slot;
    use crate::availability::dto::SlotDto;

    #[tokio::test]
    async fn test_should_format_slot_dto() {
        let slot = Slot::new(NaiveTime::from_hms_opt(9, 15, 0).expect("valid time"), true, false);
        let dto = SlotDto::from(&slot);
        assert_eq!("09:15", dto.time.as_str());
        assert!(dto.available);
        assert!(!dto.is_optimal);
    }
}
