//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;
use thiserror::Error;

use crate::{
    services::{CodeGenerator, DEFAULT_ENDPOINT, DEFAULT_MODEL},
    state::CadenceSettings,
    timer::{ConfigUpdate, TimerConfig},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read timer config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse timer config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "progressive-timer")]
#[command(about = "Live preview server for a progressive timer overlay and its plugin generator")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// TOML file with the initial timer config (camelCase keys)
    #[arg(short = 'c', long = "timer-config")]
    pub timer_config: Option<PathBuf>,

    /// Time limit in seconds, overrides the config file
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Count up without a time limit
    #[arg(long, conflicts_with = "limit")]
    pub no_limit: bool,

    /// Elapsed-time tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Final message blink period in milliseconds
    #[arg(long, default_value = "500", value_parser = clap::value_parser!(u64).range(1..))]
    pub blink_ms: u64,

    /// Base URL of the code generation service
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub gemini_endpoint: String,

    /// Model used for code generation
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// API key for the code generation service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial timer config: file (if any), then CLI overrides.
    pub fn load_timer_config(&self) -> Result<TimerConfig, ConfigError> {
        let mut config = match &self.timer_config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            None => TimerConfig::default(),
        };

        config.apply(ConfigUpdate {
            limit_enabled: self.no_limit.then_some(false).or(self.limit.map(|_| true)),
            limit_seconds: self.limit.map(|seconds| seconds as f64),
            ..ConfigUpdate::default()
        });
        Ok(config)
    }

    pub fn cadence_settings(&self) -> CadenceSettings {
        CadenceSettings {
            tick_interval: Duration::from_millis(self.tick_ms),
            blink_interval: Duration::from_millis(self.blink_ms),
        }
    }

    pub fn code_generator(&self) -> CodeGenerator {
        CodeGenerator::new(
            &self.gemini_endpoint,
            &self.gemini_model,
            self.gemini_api_key.clone(),
        )
    }
}
