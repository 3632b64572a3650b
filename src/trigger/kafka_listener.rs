use std::sync::Arc;

use log::{info, warn};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::Message;

use super::worker::TriggerHandler;
use crate::configuration::types::KafkaConfig;
use crate::error_handling::types::TransportError;

/// Consumes the configured topic across the broker list. Individual
/// consume errors are logged and the loop keeps receiving; only consumer
/// construction or subscription failures end the listener.
pub async fn run(config: &KafkaConfig, handler: Arc<TriggerHandler>) -> Result<(), TransportError> {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("group.id", config.group.as_deref().unwrap_or("pcapd"))
        .set("bootstrap.servers", config.servers.join(","))
        .set("enable.auto.commit", "true")
        .create()?;
    consumer.subscribe(&[config.topic.as_str()])?;
    info!(
        "subscribed to kafka topic {} on {}",
        config.topic,
        config.servers.join(",")
    );

    loop {
        match consumer.recv().await {
            Ok(message) => match message.payload() {
                Some(payload) => handler.handle_payload("kafka", payload).await,
                None => warn!("kafka: message without payload on {}", config.topic),
            },
            Err(e) => warn!("kafka consume error: {}", e),
        }
    }
}
