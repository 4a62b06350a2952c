use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::ApiError(_) | ImportError::UnexpectedResponse { .. } => {
                ErrorCategory::Network
            }
            ImportError::CsvError(_)
            | ImportError::SerializationError(_)
            | ImportError::MissingColumn { .. } => ErrorCategory::Data,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. }
            | ImportError::ValidationError { .. } => ErrorCategory::Configuration,
            ImportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 請求本身不合法（由呼叫端造成），伺服器以 400 回應
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ImportError::ValidationError { .. }
                | ImportError::MissingConfigError { .. }
                | ImportError::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::ApiError(_) => {
                "Check network connectivity and that the API key is valid for the selected environment"
            }
            ImportError::UnexpectedResponse { .. } => {
                "The billing API answered with an unexpected body; verify the API base URL"
            }
            ImportError::CsvError(_) => "Make sure the file is UTF-8 CSV with a header row",
            ImportError::MissingColumn { .. } => {
                "Add the missing column to the CSV header (use --template for a sample)"
            }
            ImportError::SerializationError(_) => "Check the values in the CSV for invalid data",
            ImportError::IoError(_) => "Check that the file exists and is readable",
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => {
                "Review the command line flags and configuration file"
            }
            ImportError::ValidationError { .. } => "Fix the request and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::ApiError(e) => format!("Could not reach the billing API: {}", e),
            ImportError::CsvError(e) => format!("The CSV file could not be read: {}", e),
            ImportError::IoError(e) => format!("File error: {}", e),
            ImportError::MissingConfigError { field } => {
                format!("'{}' is required but was not provided", field)
            }
            ImportError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_is_data_error() {
        let err = ImportError::MissingColumn {
            column: "customer_email".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "missing column 'customer_email'");
    }

    #[test]
    fn test_client_errors() {
        assert!(ImportError::ValidationError {
            message: "No CSV file provided".to_string()
        }
        .is_client_error());
        assert!(!ImportError::IoError(std::io::Error::other("disk")).is_client_error());
    }
}
