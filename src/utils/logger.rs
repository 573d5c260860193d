use clap::ValueEnum;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "fabric-search.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// tracing has no level above error, so critical collapses into it.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

pub fn init_cli_logger(level: LogLevel, log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fabric_search={}", level.as_directive())));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let (file, file_error) = match open_log_file(log_dir) {
        Ok((file, path)) => (Some((file, path)), None),
        Err(e) => (None, Some(e)),
    };

    let file_path = file.as_ref().map(|(_, path)| path.clone());
    let file_layer = file.map(|(file, _)| {
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    match (file_path, file_error) {
        (Some(path), _) => tracing::debug!("Log file path: {}", path.display()),
        (None, Some(e)) => tracing::warn!("⚠️ File logging disabled: {}", e),
        (None, None) => {}
    }
}

/// Opens `<log_dir>/fabric-search.log` for appending, rotating it to `.1`
/// once it has grown past the size limit.
pub fn open_log_file(log_dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);

    if let Ok(meta) = fs::metadata(&path) {
        if meta.len() > MAX_LOG_BYTES {
            fs::rename(&path, log_dir.join(format!("{}.1", LOG_FILE_NAME)))?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}
