use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_cli_logger(verbose: bool) {
    let default = if verbose {
        "bulk_customer_import=debug,info"
    } else {
        "bulk_customer_import=info"
    };

    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Server logger; `json` switches to one JSON object per line for log shippers.
pub fn init_server_logger(verbose: bool, json: bool) {
    // 伺服器執行檔的 target 是 import_server，請求紀錄來自 tower_http
    let default = if verbose {
        "bulk_customer_import=debug,import_server=debug,tower_http=debug,info"
    } else {
        "bulk_customer_import=info,import_server=info,tower_http=info"
    };
    let registry = tracing_subscriber::registry().with(env_filter(default));

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .compact(),
            )
            .init();
    }
}
