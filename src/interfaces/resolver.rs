use std::collections::HashSet;

use crate::configuration::AliasMap;
use crate::error_handling::types::ResolveError;
use crate::interfaces::registry::InterfaceRegistry;

/// Maps a requested interface-or-alias to one canonical device name.
///
/// Lookup tries an exact device-name match first, then the alias map. An
/// alias pointing at more than one device is reported as ambiguous rather
/// than picking one; the trigger worker drops that message.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    devices: HashSet<String>,
    aliases: AliasMap,
}

impl AliasResolver {
    pub fn new(registry: &InterfaceRegistry, aliases: AliasMap) -> Self {
        let devices = registry
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        Self { devices, aliases }
    }

    pub fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        if self.devices.contains(name) {
            return Ok(name.to_string());
        }

        match self.aliases.get(name) {
            Some(devices) if devices.len() == 1 => Ok(devices[0].clone()),
            Some(devices) => Err(ResolveError::Ambiguous(name.to_string(), devices.clone())),
            None => Err(ResolveError::NotFound(name.to_string())),
        }
    }
}
