use crate::options::OptionMap;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Fan-out logging setup checker", long_about = None)]
pub struct Config {
    /// Sink to enable in addition to the always-on syslog sink (repeatable)
    #[arg(long = "sink", env = "LOG_SINKS", value_delimiter = ',')]
    pub sinks: Vec<String>,

    /// Sink option as <sink>.<key>=<value> (repeatable)
    #[arg(long = "log-opt", value_parser = parse_log_opt)]
    pub log_opts: Vec<(String, String)>,

    /// Tag attached to emitted records (defaults to the host name)
    #[arg(long, env = "LOG_TAG")]
    pub tag: Option<String>,

    /// Configuration file path (optional); command-line values take precedence
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

fn parse_log_opt(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected <sink>.<key>=<value>, got {raw:?}"));
    };
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// File-based counterpart of the command-line surface.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub sinks: Vec<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub options: OptionMap,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Fully resolved setup inputs: file values first, command-line values on top.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub sinks: Vec<String>,
    pub options: OptionMap,
    pub tag: String,
}

impl Config {
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let file = match &self.config_file {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let mut sinks = file.sinks;
        for sink in self.sinks {
            if !sinks.contains(&sink) {
                sinks.push(sink);
            }
        }

        let mut options = file.options;
        for (key, value) in self.log_opts {
            options.insert(key, value);
        }

        let tag = self.tag.or(file.tag).unwrap_or_else(default_tag);

        Ok(ResolvedConfig {
            sinks,
            options,
            tag,
        })
    }
}

fn default_tag() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
