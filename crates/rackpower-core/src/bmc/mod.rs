//! BMC power control over IPMI.
//!
//! BMCs commonly allow a single concurrent session per credential set, so
//! sessions are opened at most once and cached for the process lifetime.
//! The cache is keyed by BMC host, never shared across hosts.

use std::collections::HashMap;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ipmi::blocking::Client;
use ipmi::{ChassisControl, PrivilegeLevel};

use crate::error::IpmiError;
use crate::registry::IpmiCredentials;
use crate::types::{IpmiState, PowerTarget};

/// RMCP+ UDP port.
const IPMI_PORT: u16 = 623;

/// An established session to one BMC.
pub trait BmcSession {
    /// Current chassis power state.
    fn power_state(&self) -> Result<IpmiState, IpmiError>;

    /// Issue a power command without waiting for completion; returns the
    /// pending state.
    fn request_power(&self, target: PowerTarget) -> Result<IpmiState, IpmiError>;
}

/// Opens BMC sessions. The seam that lets tests run without a BMC.
pub trait BmcConnector {
    type Session: BmcSession;

    fn connect(&self, creds: &IpmiCredentials) -> Result<Self::Session, IpmiError>;
}

enum CacheEntry<S> {
    Open(S),
    Failed(String),
}

/// Per-host session cache.
///
/// The first `session` call per BMC host attempts one open; both outcomes are
/// cached, so a failed open is never retried within the process.
pub struct BmcPool<C: BmcConnector> {
    connector: C,
    sessions: HashMap<String, CacheEntry<C::Session>>,
}

impl<C: BmcConnector> BmcPool<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            sessions: HashMap::new(),
        }
    }

    /// Cached session for this BMC, opening one on first use.
    pub fn session(&mut self, creds: &IpmiCredentials) -> Result<&C::Session, IpmiError> {
        if !self.sessions.contains_key(&creds.host) {
            let entry = match self.connector.connect(creds) {
                Ok(session) => CacheEntry::Open(session),
                Err(e) => {
                    tracing::warn!(bmc = %creds.host, error = %e, "session open failed");
                    CacheEntry::Failed(e.to_string())
                }
            };
            self.sessions.insert(creds.host.clone(), entry);
        }

        match self.sessions.get(&creds.host) {
            Some(CacheEntry::Open(session)) => Ok(session),
            Some(CacheEntry::Failed(message)) => Err(IpmiError::SessionOpen {
                bmc: creds.host.clone(),
                message: message.clone(),
            }),
            None => unreachable!("entry inserted above"),
        }
    }
}

/// A live RMCP+ session wrapping the blocking `ipmi` client.
pub struct RmcpSession {
    bmc: String,
    client: Client,
}

impl BmcSession for RmcpSession {
    fn power_state(&self) -> Result<IpmiState, IpmiError> {
        let status = tokio::task::block_in_place(|| self.client.get_chassis_status())
            .map_err(|e| IpmiError::Call {
                bmc: self.bmc.clone(),
                message: e.to_string(),
            })?;

        Ok(if status.system_power_on {
            IpmiState::On
        } else {
            IpmiState::Off
        })
    }

    fn request_power(&self, target: PowerTarget) -> Result<IpmiState, IpmiError> {
        let control = match target {
            PowerTarget::On => ChassisControl::PowerUp,
            PowerTarget::Off => ChassisControl::PowerDown,
        };

        tokio::task::block_in_place(|| self.client.chassis_control(control)).map_err(|e| {
            IpmiError::Call {
                bmc: self.bmc.clone(),
                message: e.to_string(),
            }
        })?;

        // Chassis Control does not wait for the transition; report the
        // requested state as pending.
        Ok(match target {
            PowerTarget::On => IpmiState::On,
            PowerTarget::Off => IpmiState::Off,
        })
    }
}

/// Connector building [`RmcpSession`]s with username/password at
/// administrator privilege.
pub struct RmcpConnector {
    timeout: Duration,
    retries: u32,
}

impl RmcpConnector {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    fn resolve(bmc: &str) -> Result<SocketAddr, IpmiError> {
        (bmc, IPMI_PORT)
            .to_socket_addrs()
            .map_err(|e| IpmiError::SessionOpen {
                bmc: bmc.to_string(),
                message: e.to_string(),
            })?
            .next()
            .ok_or_else(|| IpmiError::SessionOpen {
                bmc: bmc.to_string(),
                message: "no address resolved".to_string(),
            })
    }
}

impl Default for RmcpConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), 3)
    }
}

impl BmcConnector for RmcpConnector {
    type Session = RmcpSession;

    fn connect(&self, creds: &IpmiCredentials) -> Result<RmcpSession, IpmiError> {
        tokio::task::block_in_place(|| {
            let target = Self::resolve(&creds.host)?;

            let client = Client::builder(target)
                .username(&creds.username)
                .password(&creds.password)
                .privilege_level(PrivilegeLevel::Administrator)
                .timeout(self.timeout)
                .retries(self.retries)
                .build()
                .map_err(|e| IpmiError::SessionOpen {
                    bmc: creds.host.clone(),
                    message: e.to_string(),
                })?;

            Ok(RmcpSession {
                bmc: creds.host.clone(),
                client,
            })
        })
    }
}
