use bulk_customer_import::server::{import_router, AppState};
use bulk_customer_import::utils::{logger, validation::Validate};
use bulk_customer_import::TomlConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "import-server")]
#[command(about = "HTTP service for CSV customer imports into Paddle")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Address to listen on (overrides server.bind)
    #[arg(long)]
    bind: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_server_logger(args.verbose, args.json_logs);

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e.into());
    }

    let addr = config.bind_addr()?;
    let app = import_router(AppState::new(config));

    tracing::info!("🚀 Starting import server");
    tracing::info!("📡 API will be available at: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
