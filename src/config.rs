use crate::error::CompilerError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    #[default]
    Text,
    Json,
}

impl TraceFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(TraceFormat::Text),
            "json" => Some(TraceFormat::Json),
            _ => None,
        }
    }
}

/// Settings for the `teeny` driver. The library itself takes none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trace_format: TraceFormat,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    String::from("warn")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trace_format: TraceFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Reads the config file, using defaults when it does not exist.
    /// `TEENY_TRACE_FORMAT` wins over the file.
    pub fn load() -> Result<Self, CompilerError> {
        let config_path = Self::get_config_path();
        let mut config = match fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_json(&contents).map_err(|err| {
                CompilerError::Config(format!("{}: {}", config_path.display(), err))
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(err) => return Err(CompilerError::IO(err)),
        };

        if let Ok(name) = env::var("TEENY_TRACE_FORMAT") {
            config.trace_format = TraceFormat::from_name(&name).ok_or_else(|| {
                CompilerError::Config(format!("unknown TEENY_TRACE_FORMAT {:?}", name))
            })?;
        }

        Ok(config)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save(&self) -> io::Result<()> {
        let config_path = Self::get_config_path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_json()?;
        fs::write(&config_path, contents)
    }

    pub fn get_config_path() -> PathBuf {
        if let Ok(path) = env::var("TEENY_CONFIG") {
            return PathBuf::from(path);
        }

        let home = if cfg!(windows) {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };
        PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
            .join(".teeny")
            .join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn reads_trace_format() {
        let config = Config::from_json(r#"{"trace_format": "json", "log_filter": "debug"}"#).unwrap();
        assert_eq!(config.trace_format, TraceFormat::Json);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Config::from_json(r#"{"trace_format": "xml"}"#).is_err());
    }

    #[test]
    fn json_round_trip() {
        let config = Config {
            trace_format: TraceFormat::Json,
            log_filter: "teenytiny=trace".to_string(),
        };
        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(TraceFormat::from_name(" JSON "), Some(TraceFormat::Json));
        assert_eq!(TraceFormat::from_name("text"), Some(TraceFormat::Text));
        assert_eq!(TraceFormat::from_name("yaml"), None);
    }
}
