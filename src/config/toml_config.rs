use crate::config::ApiSettings;
use crate::domain::model::ApiEnvironment;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const PRODUCTION_API_URL: &str = "https://api.paddle.com";
pub const SANDBOX_API_URL: &str = "https://sandbox-api.paddle.com";
pub const DEFAULT_BIND: &str = "0.0.0.0:5001";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Optional file-based settings shared by the CLI and the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiSection,
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub production_url: String,
    pub sandbox_url: String,
    pub timeout_seconds: Option<u64>,
    pub api_key: Option<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            production_url: PRODUCTION_API_URL.to_string(),
            sandbox_url: SANDBOX_API_URL.to_string(),
            timeout_seconds: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    pub max_upload_bytes: usize,
    /// Directory for temporary upload files; the system temp dir when unset.
    pub upload_dir: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upload_dir: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PADDLE_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self, environment: ApiEnvironment) -> &str {
        match environment {
            ApiEnvironment::Production => &self.api.production_url,
            ApiEnvironment::Sandbox => &self.api.sandbox_url,
        }
    }

    /// API key from the file, ignoring empty values and unresolved placeholders.
    pub fn api_key(&self) -> Option<&str> {
        self.api
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| ImportError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: format!("{}", e),
            })
    }

    pub fn api_settings(&self, environment: ApiEnvironment, api_key: &str) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url(environment).to_string(),
            api_key: api_key.to_string(),
            environment,
            timeout: self.request_timeout(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api.production_url", &self.api.production_url)?;
        validate_url("api.sandbox_url", &self.api.sandbox_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }

        validate_range("server.max_upload_bytes", self.server.max_upload_bytes, 1, 1 << 30)?;
        self.bind_addr()?;

        if let Some(dir) = &self.server.upload_dir {
            validate_path("server.upload_dir", dir)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
