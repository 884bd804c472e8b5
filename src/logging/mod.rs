//! Structured logging configuration for framesnap

use crate::Result;
use anyhow::{bail, Context};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, time::UtcTime, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration for framesnap
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: LogLevel,
    /// Log format (json, pretty, compact)
    pub format: LogFormat,
    /// Output destination (stdout, file, both)
    pub output: LogOutput,
    /// File path for file output
    pub file_path: Option<String>,
    /// Include source file and line numbers
    pub include_source: bool,
    pub include_thread_names: bool,
    /// Trace every resize request at the finest level
    pub performance_tracing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log output formats
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable format for development
    Pretty,
    Compact,
    /// JSON lines for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogOutput {
    /// Standard error, keeping stdout free for command output
    Stderr,
    File,
    Both,
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stderr" | "stdout" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            _ => Err(format!("Invalid log output: {}", s)),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            file_path: None,
            include_source: false,
            include_thread_names: false,
            performance_tracing: false,
        }
    }
}

impl LogConfig {
    /// Development-friendly configuration
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            file_path: None,
            include_source: true,
            include_thread_names: true,
            performance_tracing: true,
        }
    }

    /// Load configuration from `FRAMESNAP_LOG_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = env_parsed::<LogLevel>("FRAMESNAP_LOG_LEVEL") {
            config.level = level;
        }

        if let Some(format) = env_parsed::<LogFormat>("FRAMESNAP_LOG_FORMAT") {
            config.format = format;
        }

        if let Some(output) = env_parsed::<LogOutput>("FRAMESNAP_LOG_OUTPUT") {
            config.output = output;
        }

        if let Ok(file_path) = std::env::var("FRAMESNAP_LOG_FILE") {
            config.file_path = Some(file_path);
        }

        if let Ok(include_source) = std::env::var("FRAMESNAP_LOG_SOURCE") {
            config.include_source = include_source.eq_ignore_ascii_case("true");
        }

        if let Ok(performance) = std::env::var("FRAMESNAP_LOG_PERFORMANCE") {
            config.performance_tracing = performance.eq_ignore_ascii_case("true");
        }

        config
    }
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

/// Install the global tracing subscriber
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if matches!(config.output, LogOutput::Stderr | LogOutput::Both) {
        layers.push(fmt_layer(config, std::io::stderr, true));
    }

    if matches!(config.output, LogOutput::File | LogOutput::Both) {
        let Some(file_path) = &config.file_path else {
            bail!("FRAMESNAP_LOG_FILE is required for file output");
        };
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)
            .with_context(|| format!("failed to open log file {file_path}"))?;
        layers.push(fmt_layer(config, Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(create_filter(config))
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    info!("Logging initialized with config: {:?}", config);
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn create_filter(config: &LogConfig) -> EnvFilter {
    let mut directives = format!("framesnap={}", config.level.as_str());

    if config.performance_tracing {
        directives.push_str(",framesnap::services::resize_engine=trace");
        directives.push_str(",framesnap::services::window_history=trace");
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

fn fmt_layer<W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339())
        .with_thread_names(config.include_thread_names)
        .with_file(config.include_source)
        .with_line_number(config.include_source);

    match config.format {
        LogFormat::Pretty => Box::new(layer.pretty()),
        LogFormat::Compact => Box::new(layer.compact()),
        LogFormat::Json => Box::new(layer.json()),
    }
}

/// Time a block and log its duration
#[macro_export]
macro_rules! trace_performance {
    ($name:expr, $block:block) => {{
        let span = tracing::debug_span!("performance", operation = $name);
        let _enter = span.enter();
        let start = std::time::Instant::now();

        let result = $block;

        tracing::debug!(
            operation = $name,
            duration_us = start.elapsed().as_micros() as u64,
            "Performance trace"
        );

        result
    }};
}

#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let config = LogConfig {
            format: LogFormat::Compact,
            ..LogConfig::development()
        };

        if let Err(e) = init_logging(&config) {
            eprintln!("Failed to initialize test logging: {}", e);
        }
    });
}
