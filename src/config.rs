use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_dir: PathBuf,
    pub store_quota_bytes: Option<u64>,
    pub fault_injection: bool,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub failure_rate: f64,
    pub reorder_failure_rate: f64,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            store_dir: PathBuf::from(get_env_or("STORE_DIR", "./data")),
            store_quota_bytes: get_env_opt_parse("STORE_QUOTA_BYTES")?,
            fault_injection: get_env_parse_or("FAULT_INJECTION", true)?,
            latency_min_ms: get_env_parse_or("LATENCY_MIN_MS", 200)?,
            latency_max_ms: get_env_parse_or("LATENCY_MAX_MS", 1000)?,
            failure_rate: get_env_parse_or("FAILURE_RATE", 0.1)?,
            reorder_failure_rate: get_env_parse_or("REORDER_FAILURE_RATE", 0.15)?,
            log_format: parse_log_format(&get_env_or("LOG_FORMAT", "pretty"))?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.latency_min_ms > self.latency_max_ms {
            return Err(Error::Config(format!(
                "LATENCY_MIN_MS ({}) exceeds LATENCY_MAX_MS ({})",
                self.latency_min_ms, self.latency_max_ms
            )));
        }
        for (name, rate) in [
            ("FAILURE_RATE", self.failure_rate),
            ("REORDER_FAILURE_RATE", self.reorder_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt_parse(name)? {
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

fn get_env_opt_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(Error::Config(format!("Invalid value for LOG_FORMAT: {}", other))),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
