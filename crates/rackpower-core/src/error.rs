//! Error types for rackpower core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("PDU error: {0}")]
    Pdu(#[from] PduError),

    #[error("IPMI error: {0}")]
    Ipmi(#[from] IpmiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Host registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No configuration information for {0}")]
    NotFound(String),

    #[error("No \"{field}\" specified for {host}")]
    MissingField { host: String, field: &'static str },

    #[error("Invalid \"{field}\" for {host}: {value}")]
    InvalidField {
        host: String,
        field: &'static str,
        value: String,
    },

    #[error("Failed to parse registry file: {0}")]
    Parse(String),
}

/// PDU (SNMP outlet) errors
#[derive(Debug, Error)]
pub enum PduError {
    #[error("PDU {pdu} unreachable: {message}")]
    Transport { pdu: String, message: String },

    #[error("SNMP error from {pdu}: {message}")]
    Protocol { pdu: String, message: String },

    #[error("Cannot determine PDU type for {pdu}: {description:?}")]
    UnknownVendor { pdu: String, description: String },

    #[error("Outlet did not reach requested state: pdu={pdu} outlet={outlet}")]
    ConfirmationFailed { pdu: String, outlet: u32 },
}

/// IPMI (BMC) errors
#[derive(Debug, Error)]
pub enum IpmiError {
    #[error("Cannot open session to {bmc}: {message}")]
    SessionOpen { bmc: String, message: String },

    #[error("IPMI command failed on {bmc}: {message}")]
    Call { bmc: String, message: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::NotFound("h1".to_string());
        assert_eq!(format!("{}", err), "No configuration information for h1");

        let err = RegistryError::MissingField {
            host: "h1".to_string(),
            field: "outlet",
        };
        assert_eq!(format!("{}", err), "No \"outlet\" specified for h1");
    }

    #[test]
    fn test_core_error_from_pdu_error() {
        let err = CoreError::Pdu(PduError::ConfirmationFailed {
            pdu: "10.0.0.5".to_string(),
            outlet: 3,
        });
        assert!(format!("{}", err).contains("pdu=10.0.0.5 outlet=3"));
    }

    #[test]
    fn test_unknown_vendor_display() {
        let err = PduError::UnknownVendor {
            pdu: "10.0.0.5".to_string(),
            description: "Acme PDU 9000".to_string(),
        };
        assert!(format!("{}", err).contains("Cannot determine PDU type"));
    }
}
