use std::sync::Arc;

use futures_util::StreamExt;
use log::{info, warn};

use super::worker::TriggerHandler;
use crate::configuration::types::RedisConfig;
use crate::error_handling::types::TransportError;

fn connection_url(config: &RedisConfig) -> String {
    match config.auth {
        Some(ref auth) => format!("redis://:{}@{}:{}/", auth, config.host, config.port),
        None => format!("redis://{}:{}/", config.host, config.port),
    }
}

/// Subscribes to the configured channel and feeds every published payload
/// to the trigger handler. Returns when the subscription stream ends
/// (server disconnect), which the supervisor treats as this listener
/// having stopped.
pub async fn run(config: &RedisConfig, handler: Arc<TriggerHandler>) -> Result<(), TransportError> {
    let client = redis::Client::open(connection_url(config))?;
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.subscribe(&config.channel).await?;
    info!(
        "subscribed to redis channel {} on {}:{}",
        config.channel, config.host, config.port
    );

    let mut messages = pubsub.on_message();
    while let Some(message) = messages.next().await {
        let payload: Vec<u8> = match message.get_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("redis: unreadable payload: {}", e);
                continue;
            }
        };
        handler.handle_payload("redis", &payload).await;
    }

    warn!("redis subscription on channel {} ended", config.channel);
    Ok(())
}
