use std::time::Duration;

use crate::error_handling::types::CaptureError;

/// Contract for the live capture backend.
///
/// The caller supplies validated, already-clamped bounds; the engine owns
/// device-open, filter compilation and the read loop. Implementations must
/// be safe to invoke from several workers at once.
pub trait CaptureEngine: Send + Sync {
    fn capture(&self, spec: &CaptureSpec) -> Result<CaptureOutput, CaptureError>;
}

/// Bounds for a single capture session. Whatever trips first ends it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSpec {
    pub device: String,
    pub snap_len: u32,
    pub max_packets: u32,
    pub max_bytes: u64,
    pub max_duration: Duration,
    pub filter: Option<String>,
}

/// What the engine hands back: the raw capture file bytes and the filename
/// it generated for them.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    pub data: Vec<u8>,
    pub filename: String,
}

/// A completed capture on its way to delivery. Produced once per trigger,
/// consumed exactly once, then discarded.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub data: Vec<u8>,
    pub filename: String,
    pub tag: String,
    pub size: u64,
}

impl CaptureResult {
    pub fn new(output: CaptureOutput, tag: String) -> Self {
        let size = output.data.len() as u64;
        Self {
            data: output.data,
            filename: output.filename,
            tag,
            size,
        }
    }
}
