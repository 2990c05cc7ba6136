//! Tracing subscriber setup
//!
//! All Mahlzeit binaries log through `tracing`. This module builds the global
//! subscriber from a [`LogConfig`], writing to stdout and optionally to a daily
//! rotated file, in either human readable text or JSON.
//!
//! Use structured fields rather than formatted strings:
//!
//! ```rust,ignore
//! tracing::info!(recipe_id = id, servings, "Loaded recipe");
//! tracing::warn!(error = %err, step_id, "Step not found");
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mahlzeit_common::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env().unwrap();
//! let _guard = init_logging(&config).unwrap();
//! tracing::info!("ready");
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives applied when neither `RUST_LOG` nor `LOG_FILTER` is set.
pub const DEFAULT_FILTER: &str = "mahlzeit_server=info,tower_http=info,sqlx=warn";

const DEFAULT_FILE_PREFIX: &str = "mahlzeit";

/// Line format of emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Invalid log format: {}", other)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `mahlzeit_server=debug,sqlx=warn`
    pub filter: String,

    pub format: LogFormat,

    /// When set, events are also written to a daily rotated file in this directory
    pub log_dir: Option<PathBuf>,

    /// File name prefix for rotated log files
    pub file_prefix: String,

    /// Include source file and line in events
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Text,
            log_dir: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    ///
    /// - `RUST_LOG` or `LOG_FILTER`: filter directives (`RUST_LOG` wins)
    /// - `LOG_FORMAT`: `text` or `json`
    /// - `LOG_DIR`: enables file output into this directory
    /// - `LOG_FILE_PREFIX`: prefix of rotated files
    /// - `LOG_INCLUDE_LOCATION`: `true` to include file/line
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(filter) = std::env::var("RUST_LOG").or_else(|_| std::env::var("LOG_FILTER")) {
            if !filter.trim().is_empty() {
                config.filter = filter;
            }
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.format = format.parse()?;
        }

        if let Ok(dir) = std::env::var("LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if let Ok(prefix) = std::env::var("LOG_FILE_PREFIX") {
            config.file_prefix = prefix;
        }

        if let Ok(val) = std::env::var("LOG_INCLUDE_LOCATION") {
            config.include_location = val.parse().unwrap_or(false);
        }

        Ok(config)
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Install the global subscriber.
///
/// Returns the file writer guard when file output is enabled; keep it alive
/// until shutdown or buffered events are lost.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter: {}", config.filter))?;

    let (file_writer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        },
        None => (None, None),
    };

    let location = config.include_location;
    let registry = tracing_subscriber::registry().with(filter);

    // Each arm builds its own layers: a fmt layer is typed by the subscriber
    // stack beneath it.
    match config.format {
        LogFormat::Text => {
            let console = fmt::layer()
                .with_writer(std::io::stdout)
                .with_file(location)
                .with_line_number(location);
            let file = file_writer.map(|writer| {
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(location)
                    .with_line_number(location)
            });
            registry.with(console).with(file).try_init()?;
        },
        LogFormat::Json => {
            let console = fmt::layer()
                .json()
                .with_writer(std::io::stdout)
                .with_file(location)
                .with_line_number(location);
            let file = file_writer.map(|writer| {
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(location)
                    .with_line_number(location)
            });
            registry.with(console).with(file).try_init()?;
        },
    }

    Ok(guard)
}
