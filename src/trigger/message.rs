use serde::Deserialize;

/// A capture request as decoded from a transport payload (JSON).
///
/// `interface` may be a device name or an alias. The optional bounds can
/// only tighten the configured maxima; the worker clamps them before the
/// engine sees anything.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerMessage {
    pub interface: String,
    pub filter: Option<String>,
    #[serde(default)]
    pub tag: String,
    pub max_packets: Option<u32>,
    pub max_bytes: Option<u64>,
    pub duration_secs: Option<u64>,
    pub snap_len: Option<u32>,
}

impl TriggerMessage {
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_payload() {
        let msg = TriggerMessage::decode(
            br#"{"interface": "lan", "filter": "port 53", "tag": "dns-debug",
                 "max_packets": 100, "max_bytes": 4096, "duration_secs": 30,
                 "snap_len": 128}"#,
        )
        .unwrap();
        assert_eq!(msg.interface, "lan");
        assert_eq!(msg.filter.as_deref(), Some("port 53"));
        assert_eq!(msg.tag, "dns-debug");
        assert_eq!(msg.max_packets, Some(100));
        assert_eq!(msg.max_bytes, Some(4096));
        assert_eq!(msg.duration_secs, Some(30));
        assert_eq!(msg.snap_len, Some(128));
    }

    #[test]
    fn interface_is_the_only_required_field() {
        let msg = TriggerMessage::decode(br#"{"interface": "eth0"}"#).unwrap();
        assert_eq!(msg.interface, "eth0");
        assert!(msg.filter.is_none());
        assert_eq!(msg.tag, "");
        assert!(msg.max_packets.is_none());
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert!(TriggerMessage::decode(b"not json").is_err());
        assert!(TriggerMessage::decode(br#"{"tag": "no-interface"}"#).is_err());
    }
}
