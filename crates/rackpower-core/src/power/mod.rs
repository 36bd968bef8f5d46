//! Host power orchestration.
//!
//! Combines the PDU outlet path and the IPMI path into unified
//! `status` / `power_on` / `power_off` operations. The one hard ordering
//! rule: a BMC's standby rail is fed by the PDU outlet, so no IPMI call may
//! happen until the PDU confirms the outlet is on.

use crate::bmc::{BmcConnector, BmcPool, BmcSession};
use crate::error::{CoreError, PduError};
use crate::pdu::{OutletControl, VendorProfile};
use crate::probe::{wait_for_reachable, Probe};
use crate::registry::{HostConfig, HostRegistry, IpmiCredentials};
use crate::report::Report;
use crate::types::{HostStatus, IpmiState, PduState, PowerTarget};

/// Orchestration context for one invocation.
///
/// Owns the loaded registry, the PDU client, the BMC session pool and the
/// reachability probe; nothing is ambient.
pub struct PowerControl<P, C, R>
where
    P: OutletControl,
    C: BmcConnector,
    R: Probe,
{
    registry: HostRegistry,
    pdu: P,
    bmc: BmcPool<C>,
    probe: R,
}

impl<P, C, R> PowerControl<P, C, R>
where
    P: OutletControl,
    C: BmcConnector,
    R: Probe,
{
    pub fn new(registry: HostRegistry, pdu: P, connector: C, probe: R) -> Self {
        Self {
            registry,
            pdu,
            bmc: BmcPool::new(connector),
            probe,
        }
    }

    /// Query and report the combined power state of `host`. Read-only.
    pub async fn status(
        &mut self,
        host: &str,
        report: &mut dyn Report,
    ) -> Result<HostStatus, CoreError> {
        let config = self.registry.lookup(host)?;
        let profile = self.resolve_profile(&config.pdu).await?;

        let pdu_state = self.read_outlet(&config, &profile, report).await;
        let ipmi_state = self.current_ipmi_state(&config, report);

        let status = HostStatus {
            host: config.name.clone(),
            pdu: config.pdu.clone(),
            outlet: config.outlet,
            pdu_state,
            ipmi_state,
        };
        report.line(&status.to_string());
        Ok(status)
    }

    /// Power the host on: PDU outlet first, then the BMC once its standby
    /// rail is up, then wait for the host itself to answer pings.
    pub async fn power_on(&mut self, host: &str, report: &mut dyn Report) -> Result<(), CoreError> {
        self.transition(host, PowerTarget::On, report).await
    }

    /// Power the host off at the PDU outlet.
    pub async fn power_off(
        &mut self,
        host: &str,
        report: &mut dyn Report,
    ) -> Result<(), CoreError> {
        self.transition(host, PowerTarget::Off, report).await
    }

    async fn transition(
        &mut self,
        host: &str,
        target: PowerTarget,
        report: &mut dyn Report,
    ) -> Result<(), CoreError> {
        let config = self.registry.lookup(host)?;
        let profile = self.resolve_profile(&config.pdu).await?;

        let current = self.read_outlet(&config, &profile, report).await;
        let wanted = match target {
            PowerTarget::On => PduState::On,
            PowerTarget::Off => PduState::Off,
        };

        if current == wanted {
            report.line(&format!(
                "PDU already {}: pdu={} outlet={} pdu_state={}",
                target, config.pdu, config.outlet, current
            ));
        } else {
            report.line(&format!(
                "Turning {} pdu={} outlet={}",
                target, config.pdu, config.outlet
            ));

            let echoed = match self
                .pdu
                .set_outlet_value(&config.pdu, &profile, config.outlet, profile.value_for(target))
                .await
            {
                Ok(value) => Some(value),
                Err(e) => {
                    report.line(&e.to_string());
                    None
                }
            };

            // Confirm by re-reading; the SET response alone is not trusted.
            let confirmed = self.read_outlet(&config, &profile, report).await;
            if confirmed == wanted {
                report.line(&format!(
                    "Success: pdu={} outlet={}",
                    config.pdu, config.outlet
                ));
            } else {
                report.line(&format!(
                    "Error: pdu={} outlet={} pdu_state={} raw_status={}",
                    config.pdu,
                    config.outlet,
                    confirmed,
                    echoed.map_or_else(|| "none".to_string(), |v| v.to_string()),
                ));
                // A dead outlet makes any IPMI request meaningless.
                return Err(CoreError::Pdu(PduError::ConfirmationFailed {
                    pdu: config.pdu.clone(),
                    outlet: config.outlet,
                }));
            }
        }

        if target == PowerTarget::Off {
            return Ok(());
        }

        let ipmi_state = match &config.ipmi {
            Some(creds) => {
                let creds = creds.clone();
                self.power_on_via_bmc(&creds, report).await
            }
            None => None,
        };

        let status = HostStatus {
            host: config.name.clone(),
            pdu: config.pdu.clone(),
            outlet: config.outlet,
            pdu_state: PduState::On,
            ipmi_state,
        };
        report.line(&status.to_string());

        wait_for_reachable(&self.probe, host, report).await;
        Ok(())
    }

    /// Bring the BMC side up once the PDU has confirmed power.
    ///
    /// The BMC may take a while to boot after its outlet is energized, so
    /// reachability is polled before the session open.
    async fn power_on_via_bmc(
        &mut self,
        creds: &IpmiCredentials,
        report: &mut dyn Report,
    ) -> Option<IpmiState> {
        // Even an unreachable BMC gets one session attempt; the open has its
        // own timeout and the failure is reported either way.
        wait_for_reachable(&self.probe, &creds.host, report).await;

        report.line(&format!("Getting IPMI session from {}", creds.host));
        let session = match self.bmc.session(creds) {
            Ok(session) => session,
            Err(e) => {
                report.line(&format!("  Cannot get IPMI session: {}", e));
                return None;
            }
        };

        let mut state = session.power_state().unwrap_or(IpmiState::Unknown);
        report.line(&format!("  Found ipmi_power_state={}", state));

        if state != IpmiState::On {
            report.line("  Trying set ipmi_power_state=on");
            state = session
                .request_power(PowerTarget::On)
                .unwrap_or(IpmiState::Unknown);
            report.line(&format!("  Found ipmi_power_state={}", state));
        }
        Some(state)
    }

    /// Identify the PDU vendor; recomputed per operation, never cached.
    async fn resolve_profile(&self, pdu: &str) -> Result<VendorProfile, CoreError> {
        let description = self.pdu.system_description(pdu).await.map_err(CoreError::Pdu)?;

        VendorProfile::from_description(&description).ok_or_else(|| {
            CoreError::Pdu(PduError::UnknownVendor {
                pdu: pdu.to_string(),
                description,
            })
        })
    }

    /// Read and classify the outlet; failures degrade to `Unknown`.
    async fn read_outlet(
        &self,
        config: &HostConfig,
        profile: &VendorProfile,
        report: &mut dyn Report,
    ) -> PduState {
        match self
            .pdu
            .outlet_value(&config.pdu, profile, config.outlet)
            .await
        {
            Ok(raw) => profile.classify(raw),
            Err(e) => {
                report.line(&e.to_string());
                PduState::Unknown
            }
        }
    }

    /// IPMI power state for `status`; `None` when unconfigured or the
    /// session cannot be opened, `Unknown` when an open session misbehaves.
    fn current_ipmi_state(
        &mut self,
        config: &HostConfig,
        report: &mut dyn Report,
    ) -> Option<IpmiState> {
        let creds = config.ipmi.as_ref()?;
        match self.bmc.session(creds) {
            Ok(session) => Some(session.power_state().unwrap_or(IpmiState::Unknown)),
            Err(e) => {
                report.line(&e.to_string());
                None
            }
        }
    }
}
