pub mod batch;
pub mod csv_reader;
pub mod engine;
pub mod normalizer;
pub mod payload;
pub mod processor;

pub use crate::domain::model::{BatchSummary, Cell, Row, RowResult};
pub use crate::domain::ports::{BillingApi, ConfigProvider, Storage};
pub use crate::utils::error::Result;
