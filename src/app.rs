use std::sync::{Arc, Mutex};

use crate::application::StockReportUseCase;
use crate::domain::error::Result;
use crate::domain::inventory::COLUMN_MAPPING;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, LogBuffer};

pub async fn run() -> Result<()> {
    let config = AppConfig::load()?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log.filter.as_str())
        .try_init();

    COLUMN_MAPPING.validate()?;

    let logs: LogBuffer = Arc::new(Mutex::new(Vec::new()));
    let use_case = Arc::new(StockReportUseCase::new(config.charts.clone()));

    let server = start_server(&config, use_case, logs.clone())?;

    let (host, port) = config.bind_address();
    add_log(
        &logs,
        "INFO",
        "System",
        &format!("HTTP server started on {}:{}", host, port),
    );

    server.await?;
    Ok(())
}
