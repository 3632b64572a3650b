//! Startup gate for the merged configuration.
//!
//! `apply_defaults` fills every zero-valued field with its documented default
//! and returns a fully populated tree; `validate` cross-checks the enabled
//! sections against each other and against the host interface registry. Both
//! are pure: the caller decides what to do with the error (the daemon logs it
//! and exits non-zero before any listener starts).

use std::collections::HashMap;
use std::path::Path;

use log::warn;

use super::config::Config;
use crate::error_handling::types::ConfigError;
use crate::interfaces::registry::InterfaceRegistry;

/// Alias string to the canonical device names it maps to. An alias mapping
/// to more than one device is kept as-is here; resolution surfaces the
/// ambiguity per message.
pub type AliasMap = HashMap<String, Vec<String>>;

/// Returns the configuration with every unset field replaced by its default.
///
/// Zero is indistinguishable from unset for numeric fields, matching the
/// config file format where omitted numbers deserialize to zero.
pub fn apply_defaults(mut config: Config) -> Config {
    if config.s3.acl.is_none() {
        config.s3.acl = Some("private".to_string());
    }
    if config.s3.encryption.is_none() {
        config.s3.encryption = Some(false);
    }
    if config.s3.folder.is_none() {
        config.s3.folder = Some("pcap".to_string());
    }

    if config.sqs.wait_seconds == 0 {
        config.sqs.wait_seconds = 20;
    }
    if config.sqs.chunk_size == 0 {
        config.sqs.chunk_size = 10;
    }

    if config.kafka.group.is_none() {
        config.kafka.group = Some("pcapd".to_string());
    }

    if config.redis.port == 0 {
        config.redis.port = 6379;
    }

    if config.review.scheme.is_empty() {
        config.review.scheme = "https".to_string();
    }
    if config.review.port == 0 {
        config.review.port = 443;
    }
    if config.review.timeout_secs == 0 {
        config.review.timeout_secs = 60;
    }

    if config.general.max_packets == 0 {
        config.general.max_packets = 10000;
    }
    if config.general.snap_len == 0 {
        config.general.snap_len = 512;
    }
    if config.general.default_timeout_secs == 0 {
        config.general.default_timeout_secs = 60;
    }
    if config.general.max_timeout_secs == 0 {
        config.general.max_timeout_secs = 3600;
    }
    if config.general.max_duration_secs == 0 {
        config.general.max_duration_secs = 3600;
    }
    if config.general.max_bytes == 0 {
        // 100 megabytes if no max set
        config.general.max_bytes = 100_000_000;
    }

    if config.log.priority == 0 {
        config.log.priority = 85;
    }
    if config.log.tag.is_empty() {
        config.log.tag = "pcapdaemon".to_string();
    }

    config
}

/// Cross-checks the enabled sections and builds the alias map.
///
/// Rules are evaluated independently; the first unsatisfiable one is
/// returned. Disabled sections are not inspected at all.
pub fn validate(config: &Config, registry: &InterfaceRegistry) -> Result<AliasMap, ConfigError> {
    if !config.s3.upload && !config.review.upload && !config.general.write_local {
        return Err(ConfigError::NoDestination);
    }

    if !config.sqs.listen && !config.kafka.listen && !config.redis.listen {
        return Err(ConfigError::NoTriggerSource);
    }

    if config.s3.upload && config.s3.bucket.is_none() {
        return Err(ConfigError::MissingField("s3", "bucket"));
    }

    if config.sqs.listen {
        if config.sqs.region.is_none() {
            return Err(ConfigError::MissingField("sqs", "region"));
        }
        if config.sqs.queue_url.is_none() {
            return Err(ConfigError::MissingField("sqs", "queue_url"));
        }
    }

    if config.kafka.listen {
        if config.kafka.servers.is_empty() {
            return Err(ConfigError::MissingField("kafka", "servers"));
        }
        if config.kafka.topic.is_empty() {
            return Err(ConfigError::MissingField("kafka", "topic"));
        }
    }

    if config.redis.listen {
        if config.redis.host.is_empty() {
            return Err(ConfigError::MissingField("redis", "host"));
        }
        if config.redis.channel.is_empty() {
            return Err(ConfigError::MissingField("redis", "channel"));
        }
    }

    if config.review.upload {
        if config.review.host.is_empty() {
            return Err(ConfigError::MissingField("review", "host"));
        }
        if config.review.token.is_empty() {
            return Err(ConfigError::MissingField("review", "token"));
        }
    }

    if config.general.write_local && !Path::new(&config.general.local_dir).is_dir() {
        return Err(ConfigError::MissingDirectory(config.general.local_dir.clone()));
    }

    let mut aliases = AliasMap::new();
    for def in &config.interfaces {
        if def.name.is_empty() {
            return Err(ConfigError::MissingField("interface", "name"));
        }
        if !registry.contains(&def.name) {
            return Err(ConfigError::MissingInterface(def.name.clone()));
        }
        if def.aliases.is_empty() {
            warn!("interface [{}] has no aliases", def.name);
            continue;
        }
        for alias in &def.aliases {
            aliases
                .entry(alias.clone())
                .or_insert_with(Vec::new)
                .push(def.name.clone());
        }
    }

    Ok(aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::types::InterfaceDef;
    use crate::interfaces::registry::NetInterface;

    fn host_registry() -> InterfaceRegistry {
        InterfaceRegistry::from_entries(vec![
            NetInterface {
                name: "eth0".to_string(),
                description: "first".to_string(),
            },
            NetInterface {
                name: "eth1".to_string(),
                description: "second".to_string(),
            },
        ])
    }

    /// Smallest tree satisfying both existence invariants.
    fn base_config() -> Config {
        let mut config = Config::default();
        config.redis.listen = true;
        config.redis.host = "localhost".to_string();
        config.redis.channel = "capture".to_string();
        config.review.upload = true;
        config.review.host = "review.internal".to_string();
        config.review.token = "token".to_string();
        config
    }

    #[test]
    fn defaults_fill_every_unset_field() {
        let config = apply_defaults(Config::default());

        assert_eq!(config.s3.acl.as_deref(), Some("private"));
        assert_eq!(config.s3.encryption, Some(false));
        assert_eq!(config.sqs.wait_seconds, 20);
        assert_eq!(config.sqs.chunk_size, 10);
        assert_eq!(config.redis.port, 6379);
        assert_eq!(config.review.scheme, "https");
        assert_eq!(config.review.port, 443);
        assert_eq!(config.general.max_packets, 10000);
        assert_eq!(config.general.snap_len, 512);
        assert_eq!(config.general.default_timeout_secs, 60);
        assert_eq!(config.general.max_timeout_secs, 3600);
        assert_eq!(config.general.max_duration_secs, 3600);
        assert_eq!(config.general.max_bytes, 100_000_000);
        assert_eq!(config.log.priority, 85);
        assert_eq!(config.log.tag, "pcapdaemon");
    }

    #[test]
    fn explicit_zero_is_the_same_as_unset() {
        let mut config = Config::default();
        config.sqs.wait_seconds = 0;
        config.sqs.chunk_size = 0;
        let config = apply_defaults(config);
        assert_eq!(config.sqs.wait_seconds, 20);
        // chunk_size keeps its own default, independent of wait_seconds
        assert_eq!(config.sqs.chunk_size, 10);
    }

    #[test]
    fn defaults_do_not_clobber_set_values() {
        let mut config = Config::default();
        config.sqs.wait_seconds = 5;
        config.general.max_packets = 200;
        config.review.scheme = "http".to_string();
        let config = apply_defaults(config);
        assert_eq!(config.sqs.wait_seconds, 5);
        assert_eq!(config.general.max_packets, 200);
        assert_eq!(config.review.scheme, "http");
    }

    #[test]
    fn rejects_config_without_a_destination() {
        let mut config = base_config();
        config.review.upload = false;
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::NoDestination));
    }

    #[test]
    fn rejects_config_without_a_trigger_source() {
        let mut config = base_config();
        config.redis.listen = false;
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::NoTriggerSource));
    }

    #[test]
    fn s3_upload_requires_a_bucket() {
        let mut config = base_config();
        config.s3.upload = true;
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("s3", "bucket")));

        config.s3.bucket = Some("captures".to_string());
        assert!(validate(&config, &host_registry()).is_ok());
    }

    #[test]
    fn disabled_s3_section_is_not_inspected() {
        let mut config = base_config();
        config.s3.upload = false;
        config.s3.bucket = None;
        assert!(validate(&config, &host_registry()).is_ok());
    }

    #[test]
    fn sqs_listener_requires_region_and_queue_url() {
        let mut config = base_config();
        config.sqs.listen = true;
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("sqs", "region")));

        config.sqs.region = Some("us-east-1".to_string());
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("sqs", "queue_url")));

        config.sqs.queue_url = Some("https://sqs.example/queue".to_string());
        assert!(validate(&config, &host_registry()).is_ok());
    }

    #[test]
    fn kafka_listener_requires_brokers_and_topic() {
        let mut config = base_config();
        config.kafka.listen = true;
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("kafka", "servers")));

        config.kafka.servers = vec!["broker1:9092".to_string()];
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("kafka", "topic")));

        config.kafka.topic = "capture".to_string();
        assert!(validate(&config, &host_registry()).is_ok());
    }

    #[test]
    fn redis_listener_requires_host_and_channel() {
        let mut config = base_config();
        config.redis.host = String::new();
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("redis", "host")));

        config.redis.host = "localhost".to_string();
        config.redis.channel = String::new();
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("redis", "channel")));
    }

    #[test]
    fn review_upload_requires_host_and_token() {
        let mut config = base_config();
        config.review.host = String::new();
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("review", "host")));

        config.review.host = "review.internal".to_string();
        config.review.token = String::new();
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("review", "token")));
    }

    #[test]
    fn write_local_requires_an_existing_directory() {
        let mut config = base_config();
        config.review.upload = false;
        config.general.write_local = true;
        config.general.local_dir = "/nonexistent/pcapd-caps".to_string();
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDirectory(_)));

        let dir = tempfile::tempdir().unwrap();
        config.general.local_dir = dir.path().to_string_lossy().to_string();
        assert!(validate(&config, &host_registry()).is_ok());
    }

    #[test]
    fn interface_definitions_must_exist_on_host() {
        let mut config = base_config();
        config.interfaces = vec![InterfaceDef {
            name: "wlan9".to_string(),
            aliases: vec!["wifi".to_string()],
        }];
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInterface(ref name) if name == "wlan9"));
    }

    #[test]
    fn interface_definition_requires_a_name() {
        let mut config = base_config();
        config.interfaces = vec![InterfaceDef::default()];
        let err = validate(&config, &host_registry()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("interface", "name")));
    }

    #[test]
    fn interface_without_aliases_is_accepted() {
        let mut config = base_config();
        config.interfaces = vec![InterfaceDef {
            name: "eth0".to_string(),
            aliases: Vec::new(),
        }];
        let aliases = validate(&config, &host_registry()).unwrap();
        assert!(aliases.is_empty());
    }

    #[test]
    fn alias_map_collects_every_mapping() {
        let mut config = base_config();
        config.interfaces = vec![
            InterfaceDef {
                name: "eth0".to_string(),
                aliases: vec!["lan".to_string(), "uplink".to_string()],
            },
            InterfaceDef {
                name: "eth1".to_string(),
                aliases: vec!["lan".to_string()],
            },
        ];
        let aliases = validate(&config, &host_registry()).unwrap();
        assert_eq!(
            aliases.get("lan"),
            Some(&vec!["eth0".to_string(), "eth1".to_string()])
        );
        assert_eq!(aliases.get("uplink"), Some(&vec!["eth0".to_string()]));
    }
}
