use crate::core::processor::RowProcessor;
use crate::domain::model::{BatchSummary, Row, RowResult};
use crate::domain::ports::BillingApi;

pub struct BatchRunner<A: BillingApi> {
    processor: RowProcessor<A>,
}

impl<A: BillingApi> BatchRunner<A> {
    pub fn new(api: A) -> Self {
        Self {
            processor: RowProcessor::new(api),
        }
    }

    /// Process every row in order. A failing row is counted and recorded,
    /// then the next row runs.
    pub async fn run(&self, rows: &[Row]) -> BatchSummary {
        let mut summary = BatchSummary {
            total_records: rows.len(),
            ..Default::default()
        };

        tracing::info!("🔄 Starting to process {} records", rows.len());

        for row in rows {
            tracing::debug!("Row {}/{}", row.index, rows.len());
            record(&mut summary, self.processor.process(row).await);
        }

        tracing::info!(
            "🎉 Import completed! Success: {}, Failed: {}",
            summary.successful,
            summary.failed
        );

        summary
    }
}

fn record(summary: &mut BatchSummary, result: RowResult) {
    match result {
        RowResult::Success { .. } => summary.successful += 1,
        RowResult::PartialSuccess { errors, .. } => {
            summary.successful += 1;
            summary.errors.extend(errors);
        }
        RowResult::Failure { error } => {
            summary.failed += 1;
            summary.errors.push(error);
        }
    }
}
