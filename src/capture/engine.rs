//! libpcap-backed implementation of the capture contract.
//!
//! Frames are written through a pcap savefile into a scratch file, then the
//! file bytes are returned as the capture buffer. The read loop stops at
//! whichever bound trips first: packet count, byte count or duration.

use std::fs;
use std::time::Instant;

use chrono::Utc;
use log::{debug, info};
use pcap::Capture;
use uuid::Uuid;

use super::types::{CaptureEngine, CaptureOutput, CaptureSpec};
use crate::error_handling::types::CaptureError;

pub struct PcapEngine;

impl PcapEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PcapEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn capture_filename(device: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}.pcap",
        device,
        Utc::now().format("%Y%m%d%H%M%S"),
        &id[..8]
    )
}

impl CaptureEngine for PcapEngine {
    fn capture(&self, spec: &CaptureSpec) -> Result<CaptureOutput, CaptureError> {
        let mut cap = Capture::from_device(spec.device.as_str())?
            .promisc(true)
            .snaplen(spec.snap_len as i32)
            // short read timeout so duration bounds are checked regularly
            .timeout(1000)
            .open()?;

        if let Some(ref filter) = spec.filter {
            cap.filter(filter, true)?;
        }

        let scratch = tempfile::Builder::new()
            .prefix("pcapd-")
            .suffix(".pcap")
            .tempfile()?;
        let mut savefile = cap.savefile(scratch.path())?;

        info!(
            "starting capture on {} (snap {}, max {} packets, {} bytes, {:?})",
            spec.device, spec.snap_len, spec.max_packets, spec.max_bytes, spec.max_duration
        );

        let deadline = Instant::now() + spec.max_duration;
        let mut packets: u32 = 0;
        let mut bytes: u64 = 0;

        while Instant::now() < deadline {
            match cap.next_packet() {
                Ok(packet) => {
                    savefile.write(&packet);
                    packets += 1;
                    bytes += packet.header.len as u64;
                    if packets >= spec.max_packets || bytes >= spec.max_bytes {
                        break;
                    }
                }
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        savefile.flush()?;
        drop(savefile);

        let data = fs::read(scratch.path())?;
        let filename = capture_filename(&spec.device);
        debug!(
            "capture on {} done: {} packets, {} wire bytes, {} file bytes -> {}",
            spec.device,
            packets,
            bytes,
            data.len(),
            filename
        );

        Ok(CaptureOutput { data, filename })
    }
}
