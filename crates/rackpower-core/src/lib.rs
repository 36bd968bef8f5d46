//! Shared core library for rackpower host power control.
//!
//! A host's power is controlled through two independent planes: an
//! SNMP-managed PDU outlet and an IPMI BMC. This crate provides the host
//! registry, both protocol clients, the reachability probe and the
//! orchestrator that sequences them.

pub mod bmc;
pub mod error;
pub mod pdu;
pub mod power;
pub mod probe;
pub mod registry;
pub mod report;
pub mod types;

pub use bmc::{BmcConnector, BmcPool, BmcSession, RmcpConnector};
pub use error::{CoreError, IpmiError, PduError, RegistryError, Result};
pub use pdu::{OutletControl, SnmpOutletControl, Vendor, VendorProfile};
pub use power::PowerControl;
pub use probe::{PingProbe, Probe};
pub use registry::{default_registry_path, HostConfig, HostRegistry, IpmiCredentials};
pub use report::{Report, StdoutReport};
pub use types::{HostStatus, IpmiState, PduState, PowerTarget};

/// Orchestrator wired to the real SNMP, IPMI and ping backends.
pub type DefaultPowerControl = PowerControl<SnmpOutletControl, RmcpConnector, PingProbe>;

impl DefaultPowerControl {
    /// Build an orchestrator with default backends for `registry`.
    pub fn with_defaults(registry: HostRegistry) -> Self {
        PowerControl::new(
            registry,
            SnmpOutletControl::default(),
            RmcpConnector::default(),
            PingProbe,
        )
    }
}
