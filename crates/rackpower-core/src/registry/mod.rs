//! Host registry.
//!
//! Maps a logical host name to its PDU outlet and optional BMC credentials.
//! Backed by an INI file with one section per host, read once at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::RegistryError;

/// Default per-user registry path (`~/.rackpower`).
pub fn default_registry_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".rackpower"))
}

/// BMC login for a host's out-of-band path.
///
/// Present only when `ipmi_host`, `ipmi_username` and `ipmi_password` are all
/// configured; a partial set is treated as "no IPMI path".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpmiCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
}

/// Resolved configuration for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub name: String,
    /// PDU address or hostname.
    pub pdu: String,
    /// Outlet index on the PDU.
    pub outlet: u32,
    pub ipmi: Option<IpmiCredentials>,
}

/// Immutable host registry loaded from an INI file.
pub struct HostRegistry {
    hosts: HashMap<String, HashMap<String, String>>,
}

impl HostRegistry {
    /// Load the registry from `path`.
    ///
    /// A missing file yields an empty registry; every lookup then fails with
    /// `NotFound` instead of aborting the process. An unreadable or
    /// unparsable file is a `Parse` error.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Ok(Self::empty());
        }

        let ini =
            Ini::load_from_file(path).map_err(|e| RegistryError::Parse(e.to_string()))?;

        let mut hosts = HashMap::new();
        for (section, properties) in ini.iter() {
            let Some(name) = section else {
                // Keys outside any [host] section have no meaning here.
                continue;
            };

            let entries = properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            hosts.insert(name.to_string(), entries);
        }

        Ok(Self { hosts })
    }

    /// A registry with no hosts, as produced by a missing file.
    pub fn empty() -> Self {
        Self {
            hosts: HashMap::new(),
        }
    }

    /// Build a registry directly from host sections (test fixtures).
    #[cfg(test)]
    pub fn from_sections(hosts: HashMap<String, HashMap<String, String>>) -> Self {
        Self { hosts }
    }

    /// Number of configured hosts.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Resolve a host name to its configuration.
    pub fn lookup(&self, host: &str) -> Result<HostConfig, RegistryError> {
        let section = self
            .hosts
            .get(host)
            .ok_or_else(|| RegistryError::NotFound(host.to_string()))?;

        let pdu = section
            .get("pdu")
            .ok_or_else(|| RegistryError::MissingField {
                host: host.to_string(),
                field: "pdu",
            })?
            .clone();

        let outlet_raw = section
            .get("outlet")
            .ok_or_else(|| RegistryError::MissingField {
                host: host.to_string(),
                field: "outlet",
            })?;
        let outlet: u32 = outlet_raw
            .trim()
            .parse()
            .map_err(|_| RegistryError::InvalidField {
                host: host.to_string(),
                field: "outlet",
                value: outlet_raw.clone(),
            })?;

        let ipmi = match (
            section.get("ipmi_host"),
            section.get("ipmi_username"),
            section.get("ipmi_password"),
        ) {
            (Some(bmc), Some(username), Some(password)) => Some(IpmiCredentials {
                host: bmc.clone(),
                username: username.clone(),
                password: password.clone(),
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!(host, "incomplete IPMI credentials, treating as no IPMI path");
                None
            }
        };

        Ok(HostConfig {
            name: host.to_string(),
            pdu,
            outlet,
            ipmi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_registry(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let registry = HostRegistry::load(&dir.path().join("nonexistent")).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup("h1"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_lookup_full_host() {
        let file = write_registry(
            "[h1]\n\
             pdu = 10.0.0.5\n\
             outlet = 3\n\
             ipmi_host = bmc1\n\
             ipmi_username = admin\n\
             ipmi_password = secret\n",
        );
        let registry = HostRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 1);

        let config = registry.lookup("h1").unwrap();
        assert_eq!(config.pdu, "10.0.0.5");
        assert_eq!(config.outlet, 3);
        let ipmi = config.ipmi.unwrap();
        assert_eq!(ipmi.host, "bmc1");
        assert_eq!(ipmi.username, "admin");
        assert_eq!(ipmi.password, "secret");
    }

    #[test]
    fn test_lookup_without_ipmi() {
        let file = write_registry("[h2]\npdu = pdu2\noutlet = 12\n");
        let registry = HostRegistry::load(file.path()).unwrap();

        let config = registry.lookup("h2").unwrap();
        assert_eq!(config.ipmi, None);
    }

    #[test]
    fn test_partial_ipmi_is_treated_as_absent() {
        let file = write_registry("[h3]\npdu = pdu3\noutlet = 1\nipmi_host = bmc3\n");
        let registry = HostRegistry::load(file.path()).unwrap();

        let config = registry.lookup("h3").unwrap();
        assert_eq!(config.ipmi, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let file = write_registry("[h4]\noutlet = 2\n[h5]\npdu = pdu5\n");
        let registry = HostRegistry::load(file.path()).unwrap();

        assert!(matches!(
            registry.lookup("h4"),
            Err(RegistryError::MissingField { field: "pdu", .. })
        ));
        assert!(matches!(
            registry.lookup("h5"),
            Err(RegistryError::MissingField { field: "outlet", .. })
        ));
    }

    #[test]
    fn test_non_numeric_outlet() {
        let file = write_registry("[h6]\npdu = pdu6\noutlet = twelve\n");
        let registry = HostRegistry::load(file.path()).unwrap();

        assert!(matches!(
            registry.lookup("h6"),
            Err(RegistryError::InvalidField { field: "outlet", .. })
        ));
    }
}
