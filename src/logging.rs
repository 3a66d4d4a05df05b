// src/logging.rs

use crate::config::Config;
use crate::errors::{ChainwatchError, ChainwatchResult};
use crate::models::PollLog;
use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::Record;
use std::io::Write;

/// Starts the file logger. The terminal belongs to the UI, so nothing goes to stdout or stderr.
///
/// `RUST_LOG` wins over the configured level. Keep the returned handle alive for the lifetime
/// of the process.
pub fn init_logging(config: &Config) -> ChainwatchResult<LoggerHandle> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    Logger::try_with_env_or_str(&config.log_level)
        .map_err(|e| ChainwatchError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("chainwatch"))
        .format(line_format)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()
        .map_err(|e| ChainwatchError::config_error(format!("Failed to start logger: {}", e)))
}

fn line_format(w: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
    write!(
        w,
        "[{}] {:<5} {} - {}",
        now.format_rfc3339(),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Logs one poll of the ledger.
pub fn log_poll(log: &PollLog) {
    let status = log
        .response_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    log::debug!(
        target: "chainwatch::poll",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.summary,
        status,
        log.response_time_ms
    );
}
