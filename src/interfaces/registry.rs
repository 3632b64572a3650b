use log::{error, info};
use pcap::Device;

/// One capture-capable device as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct NetInterface {
    pub name: String,
    pub description: String,
}

/// Snapshot of the host's capture-capable devices.
///
/// Populated once at startup and read-only afterwards; workers and the
/// validator receive it by reference. There is no hot-reload.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    entries: Vec<NetInterface>,
}

impl InterfaceRegistry {
    /// Enumerates the host devices via libpcap.
    ///
    /// Enumeration failure is logged but not fatal: the daemon continues
    /// with an empty registry, and validation reports the fatal error if
    /// any interface definition references a device.
    pub fn enumerate() -> Self {
        let devices = match Device::list() {
            Ok(devices) => devices,
            Err(e) => {
                println!("Error loading interfaces: {}", e);
                error!("Error loading interfaces: {}", e);
                return Self::default();
            }
        };

        let entries = devices
            .into_iter()
            .map(|d| {
                let desc = d.desc.unwrap_or_default();
                println!("Found interface {} description: {}", d.name, desc);
                info!("Found interface {} description: {}", d.name, desc);
                NetInterface {
                    name: d.name,
                    description: desc,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn from_entries(entries: Vec<NetInterface>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn entries(&self) -> &[NetInterface] {
        &self.entries
    }
}
