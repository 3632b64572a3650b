use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{
    GeneralConfig, InterfaceDef, KafkaConfig, LogConfig, RedisConfig, ReviewConfig, S3Config,
    SqsConfig,
};
use crate::error_handling::types::ConfigError;

/// The full settings tree as read from the TOML file.
///
/// Every section is optional in the file; a missing section deserializes to
/// its zero value and is only validated if its subsystem is enabled. Values
/// are raw at this point: command-line overrides are merged with
/// [`apply_overrides`](Config::apply_overrides), then defaults and
/// cross-field rules are applied by the `validate` module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub s3: S3Config,
    #[serde(default)]
    pub sqs: SqsConfig,
    #[serde(default)]
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<InterfaceDef>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::TomlError(e.to_string()))
    }

    /// Merges command-line overrides on top of the file values. A flag that
    /// was not given leaves the file value untouched.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(ref host) = overrides.redis_host {
            self.redis.host = host.clone();
        }
        if let Some(port) = overrides.redis_port {
            self.redis.port = port;
        }
        if let Some(ref channel) = overrides.redis_channel {
            self.redis.channel = channel.clone();
        }

        if let Some(ref host) = overrides.review_host {
            self.review.host = host.clone();
        }
        if let Some(ref token) = overrides.review_token {
            self.review.token = token.clone();
        }
        if let Some(ref scheme) = overrides.review_scheme {
            self.review.scheme = scheme.clone();
        }
        if let Some(port) = overrides.review_port {
            self.review.port = port;
        }
        if let Some(timeout) = overrides.review_timeout {
            self.review.timeout_secs = timeout;
        }
        if overrides.upload {
            self.s3.upload = true;
        }

        if let Some(max_packets) = overrides.max_packets {
            self.general.max_packets = max_packets;
        }
        if overrides.write_local {
            self.general.write_local = true;
            if let Some(ref dir) = overrides.dest_dir {
                self.general.local_dir = dir.clone();
            }
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub review_host: Option<String>,
    pub review_token: Option<String>,
    pub review_scheme: Option<String>,
    pub review_port: Option<u16>,
    pub review_timeout: Option<u64>,
    /// Toggles the object store destination on.
    pub upload: bool,
    pub redis_host: Option<String>,
    pub redis_port: Option<u16>,
    pub redis_channel: Option<String>,
    pub max_packets: Option<u32>,
    pub write_local: bool,
    pub dest_dir: Option<String>,
}
