use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum SalonError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // The requested slot is no longer free: another hold or booking won the
    // race, or a conditional ledger write collided. Nothing was written; the
    // caller must re-fetch availability and pick another time.
    Conflict {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The backing ledger or rule store timed out or is throttling. The engine
    // fails closed on this error: a slot is never granted while the ledger
    // cannot be consulted.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl SalonError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> SalonError {
        SalonError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn conflict(message: &str) -> SalonError {
        SalonError::Conflict { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> SalonError {
        SalonError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> SalonError {
        SalonError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> SalonError {
        if retryable {
            SalonError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("ConditionalCheckFailed") || reason_val.as_str().contains("409") {
                SalonError::conflict(
                    format!("conditional write collided {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("404") {
                SalonError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                SalonError::validation(
                    format!("bad request error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                SalonError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            SalonError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> SalonError {
        SalonError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> SalonError {
        SalonError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> SalonError {
        SalonError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            SalonError::Database { retryable, .. } => { *retryable }
            SalonError::Conflict { .. } => { false }
            SalonError::NotFound { .. } => { false }
            SalonError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            SalonError::Validation { .. } => { false }
            SalonError::Serialization { .. } => { false }
            SalonError::Runtime { .. } => { false }
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SalonError::Conflict { .. })
    }
}

impl From<std::io::Error> for SalonError {
    fn from(err: std::io::Error) -> Self {
        SalonError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for SalonError {
    fn from(err: serde_json::Error) -> Self {
        SalonError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for SalonError {
    fn from(err: String) -> Self {
        SalonError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for SalonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SalonError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            SalonError::Conflict { message } => {
                write!(f, "{}", message)
            }
            SalonError::NotFound { message } => {
                write!(f, "{}", message)
            }
            SalonError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            SalonError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            SalonError::Serialization { message } => {
                write!(f, "{}", message)
            }
            SalonError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for the scheduling engine.
pub type SalonResult<T> = Result<T, SalonError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum BookingStatus {
    Held,
    Confirmed,
    Cancelled,
    Unknown,
}

impl BookingStatus {
    // held and confirmed bookings both occupy their slot
    pub fn occupies_slot(&self) -> bool {
        matches!(self, BookingStatus::Held | BookingStatus::Confirmed)
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Held" => BookingStatus::Held,
            "Confirmed" => BookingStatus::Confirmed,
            "Cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Unknown,
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookingStatus::Held => write!(f, "Held"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
            BookingStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum HoldStatus {
    Active,
    Released,
    Expired,
    Finalized,
}

impl From<String> for HoldStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => HoldStatus::Active,
            "Released" => HoldStatus::Released,
            "Expired" => HoldStatus::Expired,
            "Finalized" => HoldStatus::Finalized,
            _ => HoldStatus::Active,
        }
    }
}

impl Display for HoldStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HoldStatus::Active => write!(f, "Active"),
            HoldStatus::Released => write!(f, "Released"),
            HoldStatus::Expired => write!(f, "Expired"),
            HoldStatus::Finalized => write!(f, "Finalized"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum TimeOffKind {
    Vacation,
    SickLeave,
    Training,
    Other,
}

impl From<String> for TimeOffKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Vacation" => TimeOffKind::Vacation,
            "SickLeave" => TimeOffKind::SickLeave,
            "Training" => TimeOffKind::Training,
            _ => TimeOffKind::Other,
        }
    }
}

impl Display for TimeOffKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TimeOffKind::Vacation => write!(f, "Vacation"),
            TimeOffKind::SickLeave => write!(f, "SickLeave"),
            TimeOffKind::Training => write!(f, "Training"),
            TimeOffKind::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{BookingStatus, HoldStatus, SalonError, TimeOffKind};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(SalonError::database("test", None, false), SalonError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_conflict_error() {
        let err = SalonError::conflict("test");
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(SalonError::not_found("test"), SalonError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(SalonError::unavailable("test", None, false), SalonError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(SalonError::validation("test", None), SalonError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(SalonError::serialization("test"), SalonError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(SalonError::runtime("test", None), SalonError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(SalonError::database_or_unavailable("test", None, true), SalonError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(SalonError::database_or_unavailable("test", Some("ConditionalCheckFailedException".to_string()), false), SalonError::Conflict{ message: _ }));
        assert!(matches!(SalonError::database_or_unavailable("test", Some("404".to_string()), false), SalonError::NotFound{ message: _ }));
        assert!(matches!(SalonError::database_or_unavailable("test", Some("400".to_string()), false), SalonError::Validation{ message: _, reason_code: _ }));
        assert!(matches!(SalonError::database_or_unavailable("test", Some("500".to_string()), false), SalonError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(SalonError::database_or_unavailable("test", None, false), SalonError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, SalonError::database("test", None, false).retryable());
        assert_eq!(false, SalonError::conflict("test").retryable());
        assert_eq!(false, SalonError::not_found("test").retryable());
        assert_eq!(false, SalonError::unavailable("test", None, false).retryable());
        assert_eq!(true, SalonError::unavailable("test", None, true).retryable());
        assert_eq!(false, SalonError::validation("test", None).retryable());
        assert_eq!(false, SalonError::serialization("test").retryable());
        assert_eq!(false, SalonError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_booking_status() {
        let statuses = vec![
            BookingStatus::Held,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Unknown,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = BookingStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_mark_occupying_statuses() {
        assert!(BookingStatus::Held.occupies_slot());
        assert!(BookingStatus::Confirmed.occupies_slot());
        assert!(!BookingStatus::Cancelled.occupies_slot());
    }

    #[tokio::test]
    async fn test_should_format_hold_status() {
        let statuses = vec![
            HoldStatus::Active,
            HoldStatus::Released,
            HoldStatus::Expired,
            HoldStatus::Finalized,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = HoldStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_format_time_off_kind() {
        let kinds = vec![
            TimeOffKind::Vacation,
            TimeOffKind::SickLeave,
            TimeOffKind::Training,
            TimeOffKind::Other,
        ];
        for kind in kinds {
            let str = kind.to_string();
            let str_kind = TimeOffKind::from(str);
            assert_eq!(kind, str_kind);
        }
    }
}
