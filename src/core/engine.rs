use crate::core::batch::BatchRunner;
use crate::core::csv_reader;
use crate::domain::model::{ApiEnvironment, BatchSummary, ImportReport};
use crate::domain::ports::{BillingApi, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Instant;

pub struct ImportEngine<S: Storage, A: BillingApi> {
    storage: S,
    runner: BatchRunner<A>,
    environment: ApiEnvironment,
}

impl<S: Storage, A: BillingApi> ImportEngine<S, A> {
    pub fn new(storage: S, api: A, environment: ApiEnvironment) -> Self {
        Self {
            storage,
            runner: BatchRunner::new(api),
            environment,
        }
    }

    /// Read, parse and import one CSV file. Row-level problems end up in the
    /// summary; only an unreadable or unparseable file is an `Err`.
    pub async fn run(&self, path: &str) -> Result<BatchSummary> {
        let started = Instant::now();
        tracing::info!("🌐 Using {} billing API", self.environment);

        tracing::info!("📊 Loading CSV data from {}", path);
        let data = self.storage.read_file(path).await?;
        let rows = csv_reader::parse_rows(&data)?;
        tracing::info!("📈 Loaded {} rows from CSV", rows.len());

        let summary = self.runner.run(&rows).await;
        tracing::info!("⏱️ Import of {} finished in {:?}", path, started.elapsed());

        Ok(summary)
    }

    /// Same as [`run`](Self::run), then writes an [`ImportReport`] as JSON.
    pub async fn run_with_report(&self, path: &str, report_path: &str) -> Result<BatchSummary> {
        let started_at = Utc::now();
        let summary = self.run(path).await?;

        let report = ImportReport {
            source: path.to_string(),
            environment: self.environment,
            started_at,
            finished_at: Utc::now(),
            summary,
        };

        let json = serde_json::to_vec_pretty(&report)?;
        self.storage.write_file(report_path, &json).await?;
        tracing::info!("📁 Report saved to: {}", report_path);

        Ok(report.summary)
    }
}
