use crate::utils::error::{ImportError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ImportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 上傳檔名必須以 `.csv` 結尾（大小寫敏感，與瀏覽器端範本一致）
pub fn validate_csv_filename(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(ImportError::ValidationError {
            message: "No file selected".to_string(),
        });
    }

    if !file_name.ends_with(".csv") {
        return Err(ImportError::ValidationError {
            message: "File must be a CSV".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ImportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.production_url", "https://api.paddle.com").is_ok());
        assert!(validate_url("api.sandbox_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("api.production_url", "").is_err());
        assert!(validate_url("api.production_url", "invalid-url").is_err());
        assert!(validate_url("api.production_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_csv_filename() {
        assert!(validate_csv_filename("customers.csv").is_ok());
        assert!(validate_csv_filename("").is_err());
        assert!(validate_csv_filename("customers.xlsx").is_err());
        assert!(validate_csv_filename("customers.CSV").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key: Option<String> = None;
        let err = validate_required_field("api_key", &key).unwrap_err();
        assert!(matches!(err, ImportError::MissingConfigError { ref field } if field == "api_key"));

        let key = Some("pdl_live_123".to_string());
        assert_eq!(validate_required_field("api_key", &key).unwrap(), "pdl_live_123");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("api.timeout_seconds", 30, 1, 600).is_ok());
        assert!(validate_range("api.timeout_seconds", 0, 1, 600).is_err());
    }
}
