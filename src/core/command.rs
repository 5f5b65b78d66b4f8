use async_trait::async_trait;
use crate::core::library::SalonError;

#[derive(Debug)]
pub enum CommandError {
    Conflict {
        message: String,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    NotFound {
        message: String,
    },
    Unavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, CommandError::Conflict { .. })
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<SalonError> for CommandError {
    fn from(other: SalonError) -> Self {
        match other {
            SalonError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            SalonError::Conflict { message } => {
                CommandError::Conflict { message }
            }
            SalonError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            SalonError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Unavailable { message, reason_code, retryable }
            }
            SalonError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            SalonError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            SalonError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::SalonError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Conflict { message: "test".to_string() };
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Unavailable { message: "test".to_string(), reason_code: None, retryable: true };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Other { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_map_conflict_from_salon_error() {
        let err = CommandError::from(SalonError::conflict("slot taken"));
        assert!(err.is_conflict());
        let err = CommandError::from(SalonError::not_found("missing"));
        assert!(!err.is_conflict());
    }
}
