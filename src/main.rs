use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use pcapd::capture::PcapEngine;
use pcapd::configuration::{apply_defaults, validate, Config, Overrides};
use pcapd::delivery::Delivery;
use pcapd::interfaces::{AliasResolver, InterfaceRegistry};
use pcapd::trigger::{ListenerSupervisor, TriggerHandler};

#[derive(Parser)]
#[command(name = "pcapd")]
#[command(version = "0.1.0")]
#[command(about = "Trigger-driven packet capture daemon")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Review service host
    #[arg(long)]
    review_host: Option<String>,

    /// Review service API token
    #[arg(long)]
    review_token: Option<String>,

    /// Review service scheme, http or https
    #[arg(long)]
    review_scheme: Option<String>,

    /// Review service port
    #[arg(long)]
    review_port: Option<u16>,

    /// Review service request timeout in seconds
    #[arg(long)]
    review_timeout: Option<u64>,

    /// Upload captures to the object store
    #[arg(long)]
    upload: bool,

    /// Redis server hostname or IP
    #[arg(long)]
    redis_host: Option<String>,

    /// Redis server port
    #[arg(long)]
    redis_port: Option<u16>,

    /// Redis channel to subscribe to
    #[arg(long)]
    redis_channel: Option<String>,

    /// Maximum number of packets per capture
    #[arg(long)]
    max_packets: Option<u32>,

    /// Write capture files locally, requires --dest-dir or a configured local_dir
    #[arg(long)]
    write_local: bool,

    /// Destination directory for local capture files
    #[arg(long)]
    dest_dir: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            review_host: self.review_host.clone(),
            review_token: self.review_token.clone(),
            review_scheme: self.review_scheme.clone(),
            review_port: self.review_port,
            review_timeout: self.review_timeout,
            upload: self.upload,
            redis_host: self.redis_host.clone(),
            redis_port: self.redis_port,
            redis_channel: self.redis_channel.clone(),
            max_packets: self.max_packets,
            write_local: self.write_local,
            dest_dir: self.dest_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => match Config::from_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("unable to read configuration {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Command line parameters, if set, override the config file.
    config.apply_overrides(&args.overrides());

    let registry = InterfaceRegistry::enumerate();

    // Defaults and overrides are in place; gate on the merged result.
    let config = apply_defaults(config);
    let aliases = match validate(&config, &registry) {
        Ok(aliases) => aliases,
        Err(e) => {
            error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "configuration validated, logging as {} (priority {})",
        config.log.tag, config.log.priority
    );

    let resolver = AliasResolver::new(&registry, aliases);
    let delivery = match Delivery::from_config(&config).await {
        Ok(delivery) => delivery,
        Err(e) => {
            error!("unable to initialize delivery clients: {}", e);
            std::process::exit(1);
        }
    };

    let config = Arc::new(config);
    let handler = Arc::new(TriggerHandler::new(
        Arc::clone(&config),
        Arc::new(resolver),
        Arc::new(PcapEngine::new()),
        Arc::new(delivery),
    ));

    ListenerSupervisor::new(config, handler).run().await;
    info!("exiting");
}
