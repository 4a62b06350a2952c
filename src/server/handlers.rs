//! HTTP handlers for the import service.
//!
//! - POST /api/import  : CSV upload, runs the import synchronously
//! - GET  /api/health  : liveness probe
//! - GET  /api/template: CSV template download

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::adapters::{LocalStorage, PaddleClient};
use crate::core::engine::ImportEngine;
use crate::core::payload::csv_template;
use crate::domain::model::{ApiEnvironment, BatchSummary};
use crate::server::error::ApiError;
use crate::server::router::AppState;
use crate::utils::validation::validate_csv_filename;

const TEMPLATE_FILENAME: &str = "customer_import_template.csv";

/// Multipart fields of an import request.
#[derive(Default)]
struct ImportForm {
    file_name: Option<String>,
    file_data: Option<Vec<u8>>,
    api_key: Option<String>,
    is_sandbox: bool,
}

async fn read_form(multipart: &mut Multipart) -> Result<ImportForm, ApiError> {
    let mut form = ImportForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "csv_file" => {
                form.file_name = Some(field.file_name().unwrap_or_default().to_string());
                form.file_data = Some(field.bytes().await?.to_vec());
            }
            "api_key" => {
                form.api_key = Some(field.text().await?);
            }
            "is_sandbox" => {
                form.is_sandbox = field.text().await?.trim().eq_ignore_ascii_case("true");
            }
            other => {
                tracing::debug!("Ignoring multipart field '{}'", other);
            }
        }
    }

    Ok(form)
}

/// Write the upload to a named temp file. The file is removed when the
/// returned handle drops, whatever path the handler takes.
fn save_upload(state: &AppState, data: &[u8]) -> Result<NamedTempFile, ApiError> {
    let builder = {
        let mut builder = tempfile::Builder::new();
        builder.prefix("import-").suffix(".csv");
        builder
    };

    let mut file = match &state.config.server.upload_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;

    file.write_all(data)
        .and_then(|_| file.flush())
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;

    Ok(file)
}

/// POST /api/import
pub async fn import_customers(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchSummary>, ApiError> {
    tracing::info!("📥 Received import request");

    let form = read_form(&mut multipart).await?;

    let (file_name, data) = match (form.file_name, form.file_data) {
        (Some(name), Some(data)) => (name, data),
        _ => return Err(ApiError::BadRequest("No CSV file provided".to_string())),
    };

    let api_key = form
        .api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No API key provided".to_string()))?;

    validate_csv_filename(&file_name)?;

    let environment = ApiEnvironment::from_sandbox_flag(form.is_sandbox);
    tracing::info!("📄 CSV file: {}", file_name);
    tracing::info!("🌐 Environment: {}", environment);

    let upload = save_upload(&state, &data)?;
    let path = upload
        .path()
        .to_str()
        .ok_or_else(|| ApiError::Internal("Temporary path is not valid UTF-8".to_string()))?
        .to_string();

    let settings = state.config.api_settings(environment, &api_key);
    let client = PaddleClient::new(&settings)?;
    let engine = ImportEngine::new(LocalStorage::default(), client, environment);

    let summary = engine.run(&path).await;

    drop(upload);
    tracing::debug!("🧹 Removed temporary upload {}", path);

    let summary = summary?;
    tracing::info!(
        "📊 Final results: total={}, successful={}, failed={}",
        summary.total_records,
        summary.successful,
        summary.failed
    );

    Ok(Json(summary))
}

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// GET /api/template
pub async fn download_template() -> Result<impl IntoResponse, ApiError> {
    let body = csv_template()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILENAME),
            ),
        ],
        body,
    ))
}
