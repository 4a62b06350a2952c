use bulk_customer_import::core::payload::csv_template;
use bulk_customer_import::core::Storage;
use bulk_customer_import::utils::error::{ErrorSeverity, ImportError};
use bulk_customer_import::utils::{logger, validation::Validate};
use bulk_customer_import::{BatchSummary, CliConfig, ImportEngine, LocalStorage, PaddleClient};
use clap::Parser;
use std::io::{BufRead, Write};

/// 與原本的互動式腳本相同：詢問檔名，沒有副檔名時補上 `.csv`
fn prompt_csv_path() -> std::io::Result<String> {
    print!("Enter your CSV file name: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn with_csv_extension(path: String) -> String {
    if path.ends_with(".csv") {
        path
    } else {
        format!("{}.csv", path)
    }
}

async fn run(config: &CliConfig) -> Result<Option<BatchSummary>, ImportError> {
    let storage = LocalStorage::default();

    if let Some(template_path) = &config.template {
        storage
            .write_file(template_path, csv_template()?.as_bytes())
            .await?;
        tracing::info!("📄 CSV template written to {}", template_path);
        println!("📄 CSV template written to {}", template_path);
        return Ok(None);
    }

    let file_config = config.load_file_config()?;
    file_config.validate()?;

    let settings = config.api_settings(&file_config)?;
    settings.validate()?;

    let csv_path = match &config.csv_file {
        Some(path) => path.clone(),
        None => prompt_csv_path()?,
    };
    let csv_path = with_csv_extension(csv_path);

    let client = PaddleClient::new(&settings)?;
    let engine = ImportEngine::new(storage, client, settings.environment);

    let summary = match &config.report {
        Some(report_path) => engine.run_with_report(&csv_path, report_path).await?,
        None => engine.run(&csv_path).await?,
    };

    Ok(Some(summary))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting bulk-customer-import CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(Some(summary)) => {
            println!("🎉 All records processed.");
            println!(
                "✅ Successful: {}  ❌ Failed: {}  (total {})",
                summary.successful, summary.failed, summary.total_records
            );
            for error in &summary.errors {
                println!("   - {}", error);
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
