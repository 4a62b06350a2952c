use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始儲存格值，正規化前的狀態
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// One CSV data line. `index` is 1-based and counts data rows only.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: HashMap<String, Cell>,
}

impl Row {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: HashMap::new(),
        }
    }

    pub fn with(mut self, column: &str, cell: impl Into<Cell>) -> Self {
        self.cells.insert(column.to_string(), cell.into());
        self
    }

    /// Column absent from the row reads as `Cell::Missing`.
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Missing)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomData {
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessContact {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<BusinessContact>>,
}

/// 遠端 API 的回應：狀態碼與原始內容
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowResult {
    Success { customer_id: String },
    PartialSuccess { customer_id: String, errors: Vec<String> },
    Failure { error: String },
}

impl RowResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, RowResult::Failure { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    Production,
    Sandbox,
}

impl ApiEnvironment {
    pub fn from_sandbox_flag(is_sandbox: bool) -> Self {
        if is_sandbox {
            ApiEnvironment::Sandbox
        } else {
            ApiEnvironment::Production
        }
    }
}

impl std::fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiEnvironment::Production => write!(f, "Production"),
            ApiEnvironment::Sandbox => write!(f, "Sandbox"),
        }
    }
}

/// CLI `--report` 輸出的內容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub source: String,
    pub environment: ApiEnvironment,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: BatchSummary,
}
