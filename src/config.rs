use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::log::{
    file_sink::DEFAULT_LOG_FILE,
    log_class::LogClass,
    log_level::LogLevel,
    logger::{DEFAULT_LOGGER_NAME, Logger, LoggerBuilder},
    pattern::DEFAULT_PATTERN,
};

/// Section holding the logger settings.
pub const LOGGING_SECTION: &str = "Logging";
/// Section mapping class short names to their minimum level.
pub const FILTER_SECTION: &str = "Logging.Filter";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    InvalidValue { key: String, value: String },
    UnknownClass(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Error reading file {path}: {source}"),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
            ConfigError::UnknownClass(name) => write!(f, "unknown log class: {name}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// INI-style key/value file: `[section]` headers, `key = value` lines,
/// `#` comments. Keys before the first header are globals.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    #[must_use]
    pub fn section(&self, section: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(section)
    }
}

/// Logger settings, usually read from the `[Logging]` sections of a
/// [`Config`].
///
/// ```text
/// [Logging]
/// file = emulog.log
/// pattern = %L %^%v%$
/// level = trace
/// flush_on = debug
/// color = true
/// force_clear = false
///
/// [Logging.Filter]
/// fs = warn
/// cpu = info
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub name: String,
    pub file: PathBuf,
    pub pattern: String,
    pub level: LogLevel,
    pub flush_on: LogLevel,
    /// `None` follows whether stdout is a terminal.
    pub color: Option<bool>,
    pub force_clear: bool,
    pub class_levels: Vec<(LogClass, LogLevel)>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
            pattern: DEFAULT_PATTERN.to_string(),
            level: LogLevel::Trace,
            flush_on: LogLevel::Debug,
            color: None,
            force_clear: false,
            class_levels: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Reads the logging sections; missing keys keep their defaults.
    ///
    /// # Errors
    /// Fails on unparsable levels or booleans and on unknown class names.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(name) = config.get_non_empty(LOGGING_SECTION, "name") {
            out.name = name.to_string();
        }
        if let Some(file) = config.get_non_empty(LOGGING_SECTION, "file") {
            out.file = PathBuf::from(file);
        }
        if let Some(pattern) = config.get_non_empty(LOGGING_SECTION, "pattern") {
            out.pattern = pattern.to_string();
        }
        if let Some(v) = config.get_non_empty(LOGGING_SECTION, "level") {
            out.level = parse_level("level", v)?;
        }
        if let Some(v) = config.get_non_empty(LOGGING_SECTION, "flush_on") {
            out.flush_on = parse_level("flush_on", v)?;
        }
        if let Some(v) = config.get_non_empty(LOGGING_SECTION, "color") {
            out.color = Some(parse_bool("color", v)?);
        }
        if let Some(v) = config.get_non_empty(LOGGING_SECTION, "force_clear") {
            out.force_clear = parse_bool("force_clear", v)?;
        }

        if let Some(filters) = config.section(FILTER_SECTION) {
            let mut entries: Vec<_> = filters.iter().collect();
            // HashMap order is random; keep overrides deterministic.
            entries.sort();
            for (name, value) in entries {
                let class = LogClass::from_short_name(name)
                    .ok_or_else(|| ConfigError::UnknownClass(name.clone()))?;
                out.class_levels.push((class, parse_level(name, value)?));
            }
        }

        Ok(out)
    }

    /// Loads `path` and reads the logging sections from it.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::from_config(&Config::load(path)?)
    }

    /// A builder preloaded with these settings.
    #[must_use]
    pub fn builder(&self) -> LoggerBuilder {
        let mut builder = Logger::builder()
            .name(self.name.clone())
            .file_path(&self.file)
            .pattern(self.pattern.clone())
            .level(self.level)
            .flush_on(self.flush_on)
            .force_clear(self.force_clear);
        if let Some(color) = self.color {
            builder = builder.console_color(color);
        }
        for (class, level) in &self.class_levels {
            builder = builder.class_level(*class, *level);
        }
        builder
    }
}

fn parse_level(key: &str, value: &str) -> Result<LogLevel, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# global keys
app = "emu"

[Logging]
file = logs/run.log
pattern = "[%c] %v"
level = info
flush_on = warn
color = false
force_clear = yes

[Logging.Filter]
fs = warn
cpu = error
"#;

    #[test]
    fn parses_sections_and_globals() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_global("app"), Some("emu"));
        assert_eq!(cfg.get(LOGGING_SECTION, "level"), Some("info"));
        assert_eq!(cfg.get(LOGGING_SECTION, "missing"), None);
    }

    #[test]
    fn reads_logging_settings() {
        let lc = LogConfig::from_config(&Config::parse(SAMPLE)).unwrap();
        assert_eq!(lc.file, PathBuf::from("logs/run.log"));
        assert_eq!(lc.pattern, "[%c] %v");
        assert_eq!(lc.level, LogLevel::Info);
        assert_eq!(lc.flush_on, LogLevel::Warn);
        assert_eq!(lc.color, Some(false));
        assert!(lc.force_clear);
        assert_eq!(
            lc.class_levels,
            vec![
                (LogClass::CPU, LogLevel::Error),
                (LogClass::SERVICE_EFSRV, LogLevel::Warn)
            ]
        );
    }

    #[test]
    fn empty_config_gives_defaults() {
        let lc = LogConfig::from_config(&Config::empty()).unwrap();
        assert_eq!(lc, LogConfig::default());
        assert_eq!(lc.pattern, DEFAULT_PATTERN);
        assert_eq!(lc.flush_on, LogLevel::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_level = Config::parse("[Logging]\nlevel = loud\n");
        assert!(matches!(
            LogConfig::from_config(&bad_level),
            Err(ConfigError::InvalidValue { .. })
        ));

        let bad_class = Config::parse("[Logging.Filter]\ngpu = info\n");
        assert!(matches!(
            LogConfig::from_config(&bad_class),
            Err(ConfigError::UnknownClass(name)) if name == "gpu"
        ));

        let bad_bool = Config::parse("[Logging]\ncolor = maybe\n");
        assert!(LogConfig::from_config(&bad_bool).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here.conf").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.conf"));
    }
}
