//! Tracing setup for the `wikivocab` binary.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `RUST_LOG` | env filter, default [`DEFAULT_FILTER`] |
//! | `LOG_FORMAT` | `text` (default) or `json` |
//! | `LOG_FILE` | write to this file, rotated daily, instead of stderr |
//! | `LOG_ANSI` | force colors on or off; off by default for files |
//!
//! Console output goes to stderr so stdout carries only the run summary.

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const DEFAULT_FILTER: &str =
    "wikivocab=info,wikivocab_cli=info,wikivocab_core=info,wikivocab_rdf=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging options read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub ansi: Option<bool>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match env("LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            format,
            file: env("LOG_FILE").filter(|p| !p.is_empty()).map(PathBuf::from),
            ansi: env("LOG_ANSI").map(|v| v == "true" || v == "1"),
        }
    }

    /// Colors default to on for the console and off for files.
    pub fn use_ansi(&self) -> bool {
        self.ansi.unwrap_or(self.file.is_none())
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, guard) = match &settings.file {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("wikivocab.log");
            let appender = tracing_appender::rolling::daily(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let layer = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_ansi(settings.use_ansi())
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .init();

    info!(
        log_format = ?settings.format,
        log_file = ?settings.file,
        "Logging initialized"
    );
    guard
}
