//! Spawns one independent listener task per enabled transport and tracks
//! their lifetimes.
//!
//! Listeners share nothing mutable: each owns its transport connection and
//! holds read-only references to the configuration, resolver and delivery
//! sinks through the [`TriggerHandler`]. By default the daemon stays up
//! while at least one listener is alive; `general.exit_on_first_listener`
//! restores the legacy behavior of stopping as soon as any one loop
//! returns.

use std::sync::Arc;

use log::{error, info, warn};
use tokio::task::JoinSet;

use super::worker::TriggerHandler;
use super::{kafka_listener, redis_listener, sqs_listener};
use crate::configuration::Config;
use crate::error_handling::types::TransportError;

pub struct ListenerSupervisor {
    config: Arc<Config>,
    handler: Arc<TriggerHandler>,
}

impl ListenerSupervisor {
    pub fn new(config: Arc<Config>, handler: Arc<TriggerHandler>) -> Self {
        Self { config, handler }
    }

    /// Runs until the listeners are done. Validation guarantees at least
    /// one transport is enabled on the normal startup path.
    pub async fn run(self) {
        let mut listeners: JoinSet<(&'static str, Result<(), TransportError>)> = JoinSet::new();

        if self.config.redis.listen {
            let config = self.config.redis.clone();
            let handler = Arc::clone(&self.handler);
            info!("starting redis listener");
            listeners.spawn(async move { ("redis", redis_listener::run(&config, handler).await) });
        }

        if self.config.kafka.listen {
            let config = self.config.kafka.clone();
            let handler = Arc::clone(&self.handler);
            info!("starting kafka listener");
            listeners.spawn(async move { ("kafka", kafka_listener::run(&config, handler).await) });
        }

        if self.config.sqs.listen {
            let config = self.config.sqs.clone();
            let handler = Arc::clone(&self.handler);
            info!("starting sqs listener");
            listeners.spawn(async move { ("sqs", sqs_listener::run(&config, handler).await) });
        }

        while let Some(joined) = listeners.join_next().await {
            match joined {
                Ok((transport, Ok(()))) => warn!("{} listener stopped", transport),
                Ok((transport, Err(e))) => error!("{} listener failed: {}", transport, e),
                Err(e) => error!("listener task died: {}", e),
            }
            if self.config.general.exit_on_first_listener {
                warn!("exit_on_first_listener set, shutting down remaining listeners");
                listeners.abort_all();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::{CaptureEngine, CaptureOutput, CaptureSpec};
    use crate::configuration::AliasMap;
    use crate::delivery::Delivery;
    use crate::error_handling::types::CaptureError;
    use crate::interfaces::registry::InterfaceRegistry;
    use crate::interfaces::resolver::AliasResolver;

    struct NullEngine;

    impl CaptureEngine for NullEngine {
        fn capture(&self, _spec: &CaptureSpec) -> Result<CaptureOutput, CaptureError> {
            Ok(CaptureOutput {
                data: Vec::new(),
                filename: "null.pcap".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn returns_once_no_listener_is_configured() {
        let config = Arc::new(Config::default());
        let resolver = AliasResolver::new(&InterfaceRegistry::default(), AliasMap::new());
        let handler = Arc::new(TriggerHandler::new(
            Arc::clone(&config),
            Arc::new(resolver),
            Arc::new(NullEngine),
            Arc::new(Delivery::new(None, None, None)),
        ));

        // No transports enabled: the join set is empty and run() completes.
        ListenerSupervisor::new(config, handler).run().await;
    }
}
