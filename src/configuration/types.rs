use serde::Deserialize;

/// Object store upload settings.
///
/// Numeric and string fields left at their zero value are treated as unset
/// and replaced during [`apply_defaults`](super::validate::apply_defaults).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Config {
    #[serde(default)]
    pub upload: bool,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub acl: Option<String>,
    pub encryption: Option<bool>,
    /// Key prefix for uploaded captures.
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqsConfig {
    #[serde(default)]
    pub listen: bool,
    pub region: Option<String>,
    pub queue_url: Option<String>,
    /// Long-poll wait in seconds. 0 means unset.
    #[serde(default)]
    pub wait_seconds: u32,
    /// Messages fetched per poll. 0 means unset.
    #[serde(default)]
    pub chunk_size: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KafkaConfig {
    #[serde(default)]
    pub listen: bool,
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(default)]
    pub topic: String,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisConfig {
    #[serde(default)]
    pub listen: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub channel: String,
    pub auth: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub upload: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub max_packets: u32,
    #[serde(default)]
    pub snap_len: u32,
    #[serde(default)]
    pub default_timeout_secs: u64,
    #[serde(default)]
    pub max_timeout_secs: u64,
    #[serde(default)]
    pub max_duration_secs: u64,
    #[serde(default)]
    pub max_bytes: u64,
    #[serde(default)]
    pub write_local: bool,
    #[serde(default)]
    pub local_dir: String,
    /// Compatibility switch: stop the daemon as soon as the first listener
    /// loop returns instead of waiting for the last one.
    #[serde(default)]
    pub exit_on_first_listener: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub tag: String,
}

/// One `[[interface]]` block: a host device plus the aliases pointing at it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterfaceDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
