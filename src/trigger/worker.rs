//! Per-message worker protocol, shared by every transport listener.
//!
//! A trigger is decoded, its interface resolved, its bounds clamped, and
//! the capture plus delivery run synchronously within the owning listener's
//! flow of control. Every failure on this path is per-message: it is logged
//! and the listener's receive loop keeps going.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use uuid::Uuid;

use super::message::TriggerMessage;
use crate::capture::types::{CaptureEngine, CaptureResult, CaptureSpec};
use crate::configuration::types::GeneralConfig;
use crate::configuration::Config;
use crate::delivery::Delivery;
use crate::interfaces::resolver::AliasResolver;

/// Clamps the requested bounds against the configured maxima. A request can
/// only tighten a bound, never widen it; absent overrides fall back to the
/// configured values.
pub fn effective_bounds(
    general: &GeneralConfig,
    message: &TriggerMessage,
    device: String,
) -> CaptureSpec {
    let max_packets = message
        .max_packets
        .map_or(general.max_packets, |v| v.min(general.max_packets));
    let max_bytes = message
        .max_bytes
        .map_or(general.max_bytes, |v| v.min(general.max_bytes));
    let duration_cap = general.max_timeout_secs.min(general.max_duration_secs);
    let duration_secs = message
        .duration_secs
        .map_or(duration_cap, |v| v.min(duration_cap));
    let snap_len = message.snap_len.unwrap_or(general.snap_len);

    CaptureSpec {
        device,
        snap_len,
        max_packets,
        max_bytes,
        max_duration: Duration::from_secs(duration_secs),
        filter: message.filter.clone(),
    }
}

/// Immutable per-process state shared read-only by all listeners.
pub struct TriggerHandler {
    config: Arc<Config>,
    resolver: Arc<AliasResolver>,
    engine: Arc<dyn CaptureEngine>,
    delivery: Arc<Delivery>,
}

impl TriggerHandler {
    pub fn new(
        config: Arc<Config>,
        resolver: Arc<AliasResolver>,
        engine: Arc<dyn CaptureEngine>,
        delivery: Arc<Delivery>,
    ) -> Self {
        Self {
            config,
            resolver,
            engine,
            delivery,
        }
    }

    /// Decodes and processes one raw transport payload.
    pub async fn handle_payload(&self, transport: &str, payload: &[u8]) {
        let message = match TriggerMessage::decode(payload) {
            Ok(message) => message,
            Err(e) => {
                warn!("{}: dropping malformed trigger payload: {}", transport, e);
                return;
            }
        };
        self.handle_trigger(transport, message).await;
    }

    pub async fn handle_trigger(&self, transport: &str, message: TriggerMessage) {
        let device = match self.resolver.resolve(&message.interface) {
            Ok(device) => device,
            Err(e) => {
                warn!("{}: dropping trigger: {}", transport, e);
                return;
            }
        };

        let spec = effective_bounds(&self.config.general, &message, device);
        let job = Uuid::new_v4();
        info!(
            "[{}] {} trigger: capturing on {} (filter: {})",
            job,
            transport,
            spec.device,
            spec.filter.as_deref().unwrap_or("none")
        );

        let engine = Arc::clone(&self.engine);
        let engine_spec = spec.clone();
        let output =
            match tokio::task::spawn_blocking(move || engine.capture(&engine_spec)).await {
                Ok(Ok(output)) => output,
                Ok(Err(e)) => {
                    error!("[{}] capture on {} failed: {}", job, spec.device, e);
                    return;
                }
                Err(e) => {
                    error!("[{}] capture task on {} died: {}", job, spec.device, e);
                    return;
                }
            };

        let result = CaptureResult::new(output, message.tag);
        info!(
            "[{}] capture complete: {} ({} bytes)",
            job, result.filename, result.size
        );
        self.delivery.dispatch(&result).await;
    }
}
