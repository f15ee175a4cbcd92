use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid JSON format in the stored object: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Stored object is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Airtable request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Airtable rejected the update (status {status}): {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Invalid trigger event: {message}")]
    TriggerError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，對應回應契約中的兩種邊界錯誤與其他內部錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MalformedInput,
    RemoteWriteFailure,
    Storage,
    Configuration,
    Processing,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::MalformedJson(_) | RelayError::InvalidUtf8(_) => {
                ErrorCategory::MalformedInput
            }
            RelayError::ApiError(_) | RelayError::RemoteRejected { .. } => {
                ErrorCategory::RemoteWriteFailure
            }
            RelayError::IoError(_)
            | RelayError::StorageError { .. }
            | RelayError::TriggerError { .. } => ErrorCategory::Storage,
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RelayError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn is_remote_write_failure(&self) -> bool {
        self.category() == ErrorCategory::RemoteWriteFailure
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::MalformedInput => "Check that the uploaded object is valid UTF-8 JSON",
            ErrorCategory::RemoteWriteFailure => {
                "Check the Airtable token, base/table ids and that the row exists"
            }
            ErrorCategory::Storage => "Check the bucket name, object key and read permissions",
            ErrorCategory::Configuration => "Check the environment variables or config file",
            ErrorCategory::Processing => "Check that the record carries a data object",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_are_malformed_input() {
        let err: RelayError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.category(), ErrorCategory::MalformedInput);
        assert!(!err.is_remote_write_failure());
    }

    #[test]
    fn test_rejected_update_is_remote_write_failure() {
        let err = RelayError::RemoteRejected {
            status: 422,
            body: "{\"error\":\"INVALID_VALUE\"}".to_string(),
        };
        assert!(err.is_remote_write_failure());
        assert!(err.to_string().contains("422"));
    }
}
