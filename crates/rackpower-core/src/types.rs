//! Shared state and summary types.

use std::fmt;

use serde::Serialize;

/// Desired power state for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTarget {
    On,
    Off,
}

impl PowerTarget {
    /// The word used in progress output ("on"/"off").
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerTarget::On => "on",
            PowerTarget::Off => "off",
        }
    }
}

impl fmt::Display for PowerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified state of a PDU outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PduState {
    On,
    Off,
    /// The outlet answered with a value that is neither the on nor the off
    /// encoding for its vendor.
    Other(i32),
    /// The outlet could not be read.
    Unknown,
}

impl fmt::Display for PduState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduState::On => f.write_str("on"),
            PduState::Off => f.write_str("off"),
            PduState::Other(raw) => write!(f, "status={}", raw),
            PduState::Unknown => f.write_str("unknown"),
        }
    }
}

/// Power state reported by a BMC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IpmiState {
    On,
    Off,
    /// The session answered but the state could not be determined.
    Unknown,
}

impl fmt::Display for IpmiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpmiState::On => f.write_str("on"),
            IpmiState::Off => f.write_str("off"),
            IpmiState::Unknown => f.write_str("?"),
        }
    }
}

/// One-line status summary for a host.
#[derive(Debug, Clone, Serialize)]
pub struct HostStatus {
    pub host: String,
    pub pdu: String,
    pub outlet: u32,
    pub pdu_state: PduState,
    /// `None` when no IPMI path is configured or no session could be opened.
    pub ipmi_state: Option<IpmiState>,
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "host={} pdu={} outlet={} pdu_state={} ipmi_state={}",
            self.host,
            self.pdu,
            self.outlet,
            self.pdu_state,
            match self.ipmi_state {
                Some(state) => state.to_string(),
                None => "none".to_string(),
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdu_state_display() {
        assert_eq!(PduState::On.to_string(), "on");
        assert_eq!(PduState::Off.to_string(), "off");
        assert_eq!(PduState::Other(7).to_string(), "status=7");
        assert_eq!(PduState::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_summary_line_without_ipmi() {
        let status = HostStatus {
            host: "h2".to_string(),
            pdu: "10.0.0.5".to_string(),
            outlet: 3,
            pdu_state: PduState::Off,
            ipmi_state: None,
        };
        assert_eq!(
            status.to_string(),
            "host=h2 pdu=10.0.0.5 outlet=3 pdu_state=off ipmi_state=none"
        );
    }

    #[test]
    fn test_states_serialize_as_words() {
        let status = HostStatus {
            host: "h1".to_string(),
            pdu: "pdu1".to_string(),
            outlet: 3,
            pdu_state: PduState::On,
            ipmi_state: Some(IpmiState::Off),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["pdu_state"], "on");
        assert_eq!(value["ipmi_state"], "off");
        assert_eq!(value["outlet"], 3);
    }

    #[test]
    fn test_summary_line_with_ipmi() {
        let status = HostStatus {
            host: "h1".to_string(),
            pdu: "pdu1".to_string(),
            outlet: 12,
            pdu_state: PduState::On,
            ipmi_state: Some(IpmiState::Unknown),
        };
        assert_eq!(
            status.to_string(),
            "host=h1 pdu=pdu1 outlet=12 pdu_state=on ipmi_state=?"
        );
    }
}
