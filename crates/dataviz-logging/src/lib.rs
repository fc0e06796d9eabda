//! Logging configuration and utilities for dataviz.
//!
//! The data structure crates never log. Tools built on them (the `dataviz`
//! CLI) create a [`Logger`] from a [`LoggingConfig`] and write entries to
//! any [`io::Write`] sink, usually stderr.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::str::FromStr;

/// Log level for filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Check if this level should log messages at the given level
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= *self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn ansi_color(&self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Debug => "\x1b[34m",
            LogLevel::Trace => "\x1b[90m",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(anyhow::anyhow!("unknown log level: {}", other)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level to output
    #[serde(default)]
    pub level: LogLevel,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// Enable timestamps
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Enable colors (for terminal output)
    #[serde(default = "default_true")]
    pub colors: bool,
    /// Component-specific log levels
    #[serde(default)]
    pub component_levels: HashMap<String, LogLevel>,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Plain,
            timestamps: true,
            colors: true,
            component_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Set a component-specific log level
    pub fn with_component_level(mut self, component: impl Into<String>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Get the effective log level for a component
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|c| self.component_levels.get(c).copied())
            .unwrap_or(self.level)
    }

    /// Check if a message at the given level should be logged
    pub fn should_log(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.effective_level(component).should_log(level)
    }
}

/// A log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            component: None,
            message: message.into(),
        }
    }

    /// Create a log entry with a component
    pub fn with_component(
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// Renders the entry as a single line (no trailing newline).
    pub fn render(&self, config: &LoggingConfig) -> String {
        match config.format {
            LogFormat::Json => serde_json::to_string(self).unwrap_or_else(|_| self.message.clone()),
            LogFormat::Plain => {
                let mut line = String::new();
                if config.timestamps {
                    line.push_str(&self.timestamp);
                    line.push(' ');
                }
                let level = format!("{:>5}", self.level.as_str().to_ascii_uppercase());
                if config.colors {
                    line.push_str(&format!("{}{}\x1b[0m", self.level.ansi_color(), level));
                } else {
                    line.push_str(&level);
                }
                if let Some(component) = &self.component {
                    line.push_str(&format!(" [{component}]"));
                }
                line.push(' ');
                line.push_str(&self.message);
                line
            }
            LogFormat::Compact => {
                let initial = self.level.as_str().chars().next().unwrap_or('?').to_ascii_uppercase();
                match &self.component {
                    Some(component) => format!("{initial} {component}: {}", self.message),
                    None => format!("{initial} {}", self.message),
                }
            }
        }
    }
}

/// Log collector for capturing log entries
#[derive(Debug, Default)]
pub struct LogCollector {
    entries: Vec<LogEntry>,
}

impl LogCollector {
    /// Create a new log collector
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a log entry
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Get all collected entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Get entries matching a level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Number of entries at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Writes filtered entries to `sink` and keeps a copy of each one.
///
/// Write failures on the sink are ignored; logging never aborts the caller.
#[derive(Debug)]
pub struct Logger<W: io::Write> {
    config: LoggingConfig,
    sink: W,
    history: LogCollector,
}

impl Logger<io::Stderr> {
    pub fn stderr(config: LoggingConfig) -> Self {
        Self::new(config, io::stderr())
    }
}

impl<W: io::Write> Logger<W> {
    pub fn new(config: LoggingConfig, sink: W) -> Self {
        Self {
            config,
            sink,
            history: LogCollector::new(),
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Entries that passed the level filter so far.
    pub fn history(&self) -> &LogCollector {
        &self.history
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub fn enabled(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.config.should_log(level, component)
    }

    pub fn log(&mut self, entry: LogEntry) {
        if !self.enabled(entry.level, entry.component.as_deref()) {
            return;
        }
        let line = entry.render(&self.config);
        let _ = writeln!(self.sink, "{line}");
        self.history.push(entry);
    }

    pub fn error(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogEntry::with_component(LogLevel::Error, component, message));
    }

    pub fn warn(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogEntry::with_component(LogLevel::Warn, component, message));
    }

    pub fn info(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogEntry::with_component(LogLevel::Info, component, message));
    }

    pub fn debug(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogEntry::with_component(LogLevel::Debug, component, message));
    }

    pub fn trace(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogEntry::with_component(LogLevel::Trace, component, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed(level: LogLevel, component: Option<&str>, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2024-05-01T12:00:00+00:00".to_string(),
            level,
            component: component.map(str::to_string),
            message: message.to_string(),
        }
    }

    fn plain() -> LoggingConfig {
        LoggingConfig::new().with_timestamps(false).with_colors(false)
    }

    #[test]
    fn log_level_ordering() {
        assert!(LogLevel::Info.should_log(LogLevel::Info));
        assert!(LogLevel::Info.should_log(LogLevel::Warn));
        assert!(LogLevel::Info.should_log(LogLevel::Error));
        assert!(!LogLevel::Info.should_log(LogLevel::Debug));
        assert!(LogLevel::Trace.should_log(LogLevel::Debug));
    }

    #[test]
    fn log_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("loud"));
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Plain);
        assert!(config.timestamps);
    }

    #[test]
    fn logging_config_missing_fields_default() {
        let config: LoggingConfig = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Plain);
        assert!(config.colors);
    }

    #[test]
    fn logging_config_component_levels() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Warn)
            .with_component_level("tree", LogLevel::Debug);

        // Default level is Warn
        assert!(!config.should_log(LogLevel::Info, None));
        assert!(!config.should_log(LogLevel::Info, Some("render")));

        assert!(config.should_log(LogLevel::Debug, Some("tree")));
        assert_eq!(config.effective_level(Some("tree")), LogLevel::Debug);
    }

    #[test]
    fn log_entry_creation() {
        let entry = LogEntry::new(LogLevel::Info, "Test message");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "Test message");
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }

    #[test]
    fn log_entry_with_component() {
        let entry = LogEntry::with_component(LogLevel::Debug, "tree", "rebalanced");
        assert_eq!(entry.component, Some("tree".to_string()));
    }

    #[test]
    fn render_formats() {
        let entry = fixed(LogLevel::Warn, Some("tree"), "key 4 not found");
        assert_eq!(entry.render(&plain()), " WARN [tree] key 4 not found");
        assert_eq!(
            entry.render(&plain().with_timestamps(true)),
            "2024-05-01T12:00:00+00:00  WARN [tree] key 4 not found"
        );
        assert_eq!(
            entry.render(&plain().with_format(LogFormat::Compact)),
            "W tree: key 4 not found"
        );
        assert_eq!(
            entry.render(&plain().with_colors(true)),
            "\x1b[33m WARN\x1b[0m [tree] key 4 not found"
        );
    }

    #[test]
    fn render_json() {
        let entry = fixed(LogLevel::Info, None, "done");
        insta::assert_snapshot!(
            entry.render(&plain().with_format(LogFormat::Json)),
            @r#"{"timestamp":"2024-05-01T12:00:00+00:00","level":"info","message":"done"}"#
        );
    }

    #[test]
    fn log_collector() {
        let mut collector = LogCollector::new();

        collector.push(LogEntry::new(LogLevel::Info, "Info message"));
        collector.push(LogEntry::new(LogLevel::Error, "Error message"));
        collector.push(LogEntry::new(LogLevel::Debug, "Debug message"));

        assert_eq!(collector.entries().len(), 3);
        assert_eq!(collector.filter_by_level(LogLevel::Error).len(), 1);
        assert_eq!(collector.count(LogLevel::Warn), 0);

        collector.clear();
        assert!(collector.entries().is_empty());
    }

    #[test]
    fn logger_filters_and_records() {
        let config = plain()
            .with_format(LogFormat::Compact)
            .with_component_level("render", LogLevel::Error);
        let mut logger = Logger::new(config, Vec::new());

        logger.info("build", "inserted 3 keys");
        logger.debug("build", "hidden");
        logger.warn("render", "hidden too");
        logger.error("render", "graphviz failed");

        assert_eq!(logger.history().entries().len(), 2);
        assert_eq!(logger.history().count(LogLevel::Error), 1);
        let output = String::from_utf8(logger.into_sink()).unwrap();
        assert_eq!(output, "I build: inserted 3 keys\nE render: graphviz failed\n");
    }

    proptest! {
        #[test]
        fn prop_level_filter_is_monotonic(a in 0usize..5, b in 0usize..5) {
            let levels = [
                LogLevel::Error,
                LogLevel::Warn,
                LogLevel::Info,
                LogLevel::Debug,
                LogLevel::Trace,
            ];
            prop_assert_eq!(levels[a].should_log(levels[b]), b <= a);
        }
    }
}
