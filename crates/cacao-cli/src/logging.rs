//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Every crate of the workspace logs through `tracing`; this module installs
//! the subscriber for the `cacao` binary.
//!
//! # Log Levels
//!
//! - `error`: Structural failures that halt the pipeline
//! - `warn`: Skipped columns and other non-fatal issues
//! - `info`: Pipeline stage progress, snapshot paths
//! - `debug`: Per-pass counts and stage durations
//! - `trace`: Reserved for cell-level detail
//!
//! # Usage
//!
//! ```ignore
//! use cacao_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(1);
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Crates whose events follow the configured level; everything else stays at `warn`.
const WORKSPACE_TARGETS: [&str; 4] = ["cacao_cli", "cacao_ingest", "cacao_model", "cacao_transform"];

/// Subscriber settings for the `cacao` binary.
///
/// Terminal output carries no timestamps; a log file always does.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for the workspace crates.
    pub level: Level,
    /// Emit a close event with timing for every span (JSON only).
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Level from a `-v` count: warn, info, debug, then trace for 3 and up.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    fn timestamps(&self) -> bool {
        self.log_file.is_some()
    }

    /// ANSI escapes never go to a file, whatever the color choice.
    fn ansi(&self) -> bool {
        self.with_ansi && self.log_file.is_none()
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber, writing to stderr or appending to
/// `config.log_file`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Install the global subscriber over an arbitrary writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(fmt_layer(config, writer))
        .init();
}

fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.timestamps()) {
        (LogFormat::Json, _) => base.json().with_span_events(config.span_events()).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.ansi()).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .without_time()
            .with_ansi(config.ansi())
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.ansi()).boxed(),
        (LogFormat::Pretty, false) => base.without_time().with_ansi(config.ansi()).boxed(),
    }
}

/// Directive string for the workspace crates at `level`, external crates at `warn`.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

/// Build an `EnvFilter` from the given level; `RUST_LOG` takes precedence.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(7).level, Level::TRACE);
    }

    #[test]
    fn directives_cover_workspace_crates() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,cacao_cli=debug,cacao_ingest=debug,cacao_model=debug,cacao_transform=debug"
        );
    }

    #[test]
    fn log_file_gets_timestamps_without_ansi() {
        let terminal = LogConfig::default();
        assert!(!terminal.timestamps());
        assert!(terminal.ansi());

        let file = LogConfig::default().with_log_file(Some(PathBuf::from("cacao.log")));
        assert!(file.timestamps());
        assert!(!file.ansi());
    }

    #[test]
    fn span_close_events_follow_flag() {
        assert_eq!(LogConfig::default().span_events(), FmtSpan::CLOSE);
        let quiet = LogConfig {
            with_spans: false,
            ..LogConfig::default()
        };
        assert_eq!(quiet.span_events(), FmtSpan::NONE);
    }

    #[test]
    fn builders_chain() {
        let config = LogConfig::default()
            .with_level(Level::INFO)
            .with_format(LogFormat::Json)
            .with_ansi(false)
            .with_log_file(Some(PathBuf::from("cacao.log")));
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert_eq!(config.log_file, Some(PathBuf::from("cacao.log")));
    }
}
