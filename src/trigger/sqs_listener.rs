use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use log::{info, warn};

use super::worker::TriggerHandler;
use crate::configuration::types::SqsConfig;
use crate::error_handling::types::TransportError;

/// Long-polls the configured queue. Each received message is processed and
/// then deleted (at-most-once delivery); a failed receive ends the listener
/// and is surfaced as a transport error.
pub async fn run(config: &SqsConfig, handler: Arc<TriggerHandler>) -> Result<(), TransportError> {
    let region = config.region.clone().unwrap_or_default();
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .load()
        .await;
    let client = aws_sdk_sqs::Client::new(&shared);
    let queue_url = config.queue_url.clone().unwrap_or_default();
    info!(
        "polling sqs queue {} (wait {}s, chunk {})",
        queue_url, config.wait_seconds, config.chunk_size
    );

    loop {
        let received = client
            .receive_message()
            .queue_url(&queue_url)
            .wait_time_seconds(config.wait_seconds as i32)
            .max_number_of_messages(config.chunk_size as i32)
            .send()
            .await
            .map_err(|e| TransportError::SqsError(DisplayErrorContext(&e).to_string()))?;

        for message in received.messages.unwrap_or_default() {
            if let Some(ref body) = message.body {
                handler.handle_payload("sqs", body.as_bytes()).await;
            }
            let Some(receipt) = message.receipt_handle else {
                continue;
            };
            if let Err(e) = client
                .delete_message()
                .queue_url(&queue_url)
                .receipt_handle(receipt)
                .send()
                .await
            {
                warn!("sqs: failed to delete message: {}", DisplayErrorContext(&e));
            }
        }
    }
}
