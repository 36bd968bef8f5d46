//! PDU outlet control.
//!
//! A PDU is identified by its self-reported system description, which selects
//! the vendor-specific outlet-control OID family and on/off encodings. The
//! profile is recomputed per operation so a firmware or vendor swap never
//! serves stale OIDs.

pub mod snmp;

pub use snmp::SnmpOutletControl;

use crate::error::PduError;
use crate::types::{PduState, PowerTarget};

/// Known PDU vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// CyberPower, "CPS Power Distributed Unit..."
    Cps,
    /// APC, "APC Switched Rack PDU..."
    Apc,
}

/// Vendor-specific outlet addressing and value encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorProfile {
    pub vendor: Vendor,
    pub base_oid: &'static str,
    pub on_value: i32,
    pub off_value: i32,
}

const CPS_PROFILE: VendorProfile = VendorProfile {
    vendor: Vendor::Cps,
    base_oid: "1.3.6.1.4.1.3808.1.1.3.3.3.1.1.4",
    on_value: 1,
    off_value: 2,
};

const APC_PROFILE: VendorProfile = VendorProfile {
    vendor: Vendor::Apc,
    base_oid: "1.3.6.1.4.1.318.1.1.12.3.3.1.1.4",
    on_value: 1,
    off_value: 2,
};

impl VendorProfile {
    /// Select a profile from a PDU's sysDescr string.
    pub fn from_description(description: &str) -> Option<Self> {
        if description.starts_with("CPS Power Distributed Unit") {
            Some(CPS_PROFILE)
        } else if description.starts_with("APC Switched Rack PDU") {
            Some(APC_PROFILE)
        } else {
            None
        }
    }

    /// OID addressing a single outlet's control value.
    pub fn outlet_oid(&self, outlet: u32) -> String {
        format!("{}.{}", self.base_oid, outlet)
    }

    /// Classify a raw outlet value against this vendor's encodings.
    pub fn classify(&self, raw: i32) -> PduState {
        if raw == self.on_value {
            PduState::On
        } else if raw == self.off_value {
            PduState::Off
        } else {
            PduState::Other(raw)
        }
    }

    /// The raw value encoding a target state.
    pub fn value_for(&self, target: PowerTarget) -> i32 {
        match target {
            PowerTarget::On => self.on_value,
            PowerTarget::Off => self.off_value,
        }
    }
}

/// SNMP access to a PDU's outlets.
///
/// Reads and writes use distinct community strings; implementations must keep
/// that separation.
#[allow(async_fn_in_trait)]
pub trait OutletControl {
    /// Fetch the PDU's system description (sysDescr.0).
    async fn system_description(&self, pdu: &str) -> Result<String, PduError>;

    /// Read the raw control value of one outlet.
    async fn outlet_value(
        &self,
        pdu: &str,
        profile: &VendorProfile,
        outlet: u32,
    ) -> Result<i32, PduError>;

    /// Write the raw control value of one outlet and return the value echoed
    /// by the PDU.
    async fn set_outlet_value(
        &self,
        pdu: &str,
        profile: &VendorProfile,
        outlet: u32,
        value: i32,
    ) -> Result<i32, PduError>;
}
