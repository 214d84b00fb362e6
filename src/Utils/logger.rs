//! Logging setup shared by the crate: `log` macros everywhere, `simplelog` as backend.
use std::fs::{self, File};
use std::io;
use std::path::Path;

use chrono::Local;
use log::{LevelFilter, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerSettings {
    pub level: LevelFilter,
    /// log to the terminal
    pub console: bool,
    /// log to this file as well
    pub log_file: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        LoggerSettings {
            level: LevelFilter::Info,
            console: true,
            log_file: None,
        }
    }
}

impl LoggerSettings {
    /// Set logging level (Off, Error, Warn, Info, Debug, Trace)
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable logging to a time-stamped file in the current directory
    pub fn with_default_log_file(mut self) -> Self {
        self.log_file = Some(default_log_file_name());
        self
    }

    pub fn with_log_file(mut self, filename: &str) -> Self {
        self.log_file = Some(filename.to_string());
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }
}

/// `log_YYYY-MM-DD_HH-MM-SS.txt`
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

pub fn level_from_str(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize the global logger. Returns false when no sink could be set up or a global
/// logger is already installed; the second case is reported through that logger. A log
/// file that cannot be created is reported once the console logger is up.
pub fn init_logger(settings: &LoggerSettings) -> bool {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if settings.console {
        loggers.push(TermLogger::new(
            settings.level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    let mut file_error = None;
    if let Some(ref filename) = settings.log_file {
        match File::create(filename) {
            Ok(file) => loggers.push(WriteLogger::new(settings.level, Config::default(), file)),
            Err(e) => file_error = Some(format!("cannot create log file {}: {}", filename, e)),
        }
    }

    if loggers.is_empty() {
        return false;
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            if let Some(message) = file_error {
                warn!("{}, logging to the console only", message);
            }
            true
        }
        Err(_) => {
            warn!("logger already initialized, settings {:?} ignored", settings);
            false
        }
    }
}

/// Deletes the `log_*.txt` files in `dir`, returns how many were removed.
pub fn delete_old_logs<P: AsRef<Path>>(dir: P) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("log_") && name.ends_with(".txt"))
            .unwrap_or(false);
        if is_log && path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
