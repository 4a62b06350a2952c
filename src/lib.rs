pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, PaddleClient};
pub use config::{ApiSettings, TomlConfig};
pub use crate::core::{batch::BatchRunner, engine::ImportEngine, processor::RowProcessor};
pub use domain::model::{ApiEnvironment, BatchSummary, Row, RowResult};
pub use utils::error::{ImportError, Result};
