//! SNMP implementation of [`OutletControl`].

use std::time::Duration;

use async_snmp::{Auth, Client, Error as SnmpError, Oid, UdpClient, Value};

use crate::error::PduError;
use crate::pdu::{OutletControl, VendorProfile};

/// sysDescr.0, used to identify the PDU vendor.
const SYS_DESCR_OID: &str = "1.3.6.1.2.1.1.1.0";

/// SNMP agent port.
const SNMP_PORT: u16 = 161;

/// Read community string.
const READ_COMMUNITY: &str = "public";

/// Write community string. Deliberately distinct from the read community.
const WRITE_COMMUNITY: &str = "private";

/// SNMPv1 outlet control client.
///
/// Clients are connected per request; a PDU operation is a handful of GETs
/// and at most one SET, so there is nothing worth pooling.
pub struct SnmpOutletControl {
    timeout: Duration,
}

impl SnmpOutletControl {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn connect(&self, pdu: &str, community: &str) -> Result<UdpClient, PduError> {
        Client::builder(format!("{}:{}", pdu, SNMP_PORT), Auth::v1(community))
            .timeout(self.timeout)
            .connect()
            .await
            .map_err(|e| PduError::Transport {
                pdu: pdu.to_string(),
                message: e.to_string(),
            })
    }

    fn parse_oid(pdu: &str, oid: &str) -> Result<Oid, PduError> {
        oid.parse().map_err(|e| PduError::Protocol {
            pdu: pdu.to_string(),
            message: format!("bad OID {}: {}", oid, e),
        })
    }

    fn map_error(pdu: &str, error: SnmpError) -> PduError {
        match error {
            SnmpError::Timeout { .. } => PduError::Transport {
                pdu: pdu.to_string(),
                message: error.to_string(),
            },
            other => PduError::Protocol {
                pdu: pdu.to_string(),
                message: other.to_string(),
            },
        }
    }

    fn integer_value(pdu: &str, value: &Value) -> Result<i32, PduError> {
        match value {
            Value::Integer(n) => Ok(*n as i32),
            other => Err(PduError::Protocol {
                pdu: pdu.to_string(),
                message: format!("expected INTEGER, got {:?}", other),
            }),
        }
    }
}

impl Default for SnmpOutletControl {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl OutletControl for SnmpOutletControl {
    async fn system_description(&self, pdu: &str) -> Result<String, PduError> {
        let client = self.connect(pdu, READ_COMMUNITY).await?;
        let oid = Self::parse_oid(pdu, SYS_DESCR_OID)?;

        let varbind = client
            .get(&oid)
            .await
            .map_err(|e| Self::map_error(pdu, *e))?;

        tracing::debug!(pdu, value = ?varbind.value, "sysDescr");
        Ok(varbind.value.as_str().unwrap_or_default().to_string())
    }

    async fn outlet_value(
        &self,
        pdu: &str,
        profile: &VendorProfile,
        outlet: u32,
    ) -> Result<i32, PduError> {
        let client = self.connect(pdu, READ_COMMUNITY).await?;
        let oid = Self::parse_oid(pdu, &profile.outlet_oid(outlet))?;

        let varbind = client
            .get(&oid)
            .await
            .map_err(|e| Self::map_error(pdu, *e))?;

        Self::integer_value(pdu, &varbind.value)
    }

    async fn set_outlet_value(
        &self,
        pdu: &str,
        profile: &VendorProfile,
        outlet: u32,
        value: i32,
    ) -> Result<i32, PduError> {
        let client = self.connect(pdu, WRITE_COMMUNITY).await?;
        let oid = Self::parse_oid(pdu, &profile.outlet_oid(outlet))?;

        tracing::debug!(pdu, outlet, value, "outlet SET");
        let varbind = client
            .set(&oid, Value::Integer(value))
            .await
            .map_err(|e| Self::map_error(pdu, *e))?;

        Self::integer_value(pdu, &varbind.value)
    }
}
