pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::ApiEnvironment;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::time::Duration;

pub use toml_config::TomlConfig;

/// Resolved settings for one import run against the billing API.
#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub environment: ApiEnvironment,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ConfigProvider for ApiSettings {
    fn api_base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api_base_url", &self.base_url)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::{ApiSettings, TomlConfig};
    use crate::domain::model::ApiEnvironment;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_required_field};
    use clap::Parser;

    #[derive(Clone, Parser)]
    #[command(name = "bulk-customer-import")]
    #[command(about = "Import customers, addresses and businesses from a CSV file into Paddle")]
    pub struct CliConfig {
        /// CSV file to import; prompted for when omitted
        pub csv_file: Option<String>,

        /// Paddle API key
        #[arg(long, env = "PADDLE_API_KEY", hide_env_values = true)]
        pub api_key: Option<String>,

        /// Use the sandbox API instead of production
        #[arg(long)]
        pub sandbox: bool,

        /// Optional TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Write the import summary as JSON to this file
        #[arg(long)]
        pub report: Option<String>,

        /// Write a CSV template to this file and exit
        #[arg(long)]
        pub template: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl std::fmt::Debug for CliConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CliConfig")
                .field("csv_file", &self.csv_file)
                .field("api_key", &self.api_key.as_ref().map(|_| "***"))
                .field("sandbox", &self.sandbox)
                .field("config", &self.config)
                .field("report", &self.report)
                .field("template", &self.template)
                .field("verbose", &self.verbose)
                .finish()
        }
    }

    impl CliConfig {
        pub fn environment(&self) -> ApiEnvironment {
            ApiEnvironment::from_sandbox_flag(self.sandbox)
        }

        pub fn load_file_config(&self) -> Result<TomlConfig> {
            match &self.config {
                Some(path) => {
                    validate_path("config", path)?;
                    TomlConfig::from_file(path)
                }
                None => Ok(TomlConfig::default()),
            }
        }

        /// Command line key wins over the configuration file.
        pub fn api_settings(&self, file: &TomlConfig) -> Result<ApiSettings> {
            let api_key = self
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .or_else(|| file.api_key().map(str::to_string));
            let api_key = validate_required_field("api_key", &api_key)?;

            Ok(file.api_settings(self.environment(), api_key))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::ports::ConfigProvider;

        #[test]
        fn test_parse_arguments() {
            let config = CliConfig::parse_from([
                "bulk-customer-import",
                "customers.csv",
                "--api-key",
                "pdl_cli_key",
                "--sandbox",
                "--report",
                "report.json",
            ]);

            assert_eq!(config.csv_file.as_deref(), Some("customers.csv"));
            assert_eq!(config.environment(), ApiEnvironment::Sandbox);

            let settings = config.api_settings(&TomlConfig::default()).unwrap();
            assert_eq!(settings.api_base_url(), "https://sandbox-api.paddle.com");
            assert_eq!(settings.api_key(), "pdl_cli_key");
        }

        #[test]
        fn test_api_key_falls_back_to_file() {
            let config = CliConfig::parse_from(["bulk-customer-import", "--api-key", " "]);
            let file = TomlConfig::from_toml_str("[api]\napi_key = \"pdl_file_key\"\n").unwrap();

            let settings = config.api_settings(&file).unwrap();
            assert_eq!(settings.api_key(), "pdl_file_key");
            assert_eq!(settings.api_base_url(), "https://api.paddle.com");
        }

        #[test]
        fn test_api_key_required() {
            let config = CliConfig::parse_from(["bulk-customer-import", "--api-key", ""]);
            assert!(config.api_settings(&TomlConfig::default()).is_err());
        }

        #[test]
        fn test_debug_hides_api_key() {
            let config = CliConfig::parse_from(["bulk-customer-import", "--api-key", "secret"]);
            assert!(!format!("{:?}", config).contains("secret"));
        }
    }
}
