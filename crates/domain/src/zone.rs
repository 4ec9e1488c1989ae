use crate::dns_name::{names_equal, to_fqdn, validate_domain_name};
use crate::errors::DomainError;
use crate::resource_record::{RData, ResourceRecord, SoaData};
use std::net::IpAddr;

pub const SOA_TTL: u32 = 3_600;
pub const SOA_REFRESH: u32 = 3_600;
pub const SOA_RETRY: u32 = 1_800;
pub const SOA_EXPIRE: u32 = 604_800;
pub const SOA_MINIMUM: u32 = 604_800;
pub const NAMESERVER_TTL: u32 = 604_800;

/// The single zone served by this process.
///
/// The serial is drawn once per process and is neither persisted nor
/// monotonic across restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    apex: String,
    nameserver: String,
    hostmaster: String,
    serial: u32,
}

impl Zone {
    pub fn new(domain: &str) -> Result<Self, DomainError> {
        Self::with_serial(domain, random_serial())
    }

    pub fn with_serial(domain: &str, serial: u32) -> Result<Self, DomainError> {
        let trimmed = domain.trim().trim_start_matches('.');
        let apex = to_fqdn(trimmed);
        if apex != "." {
            validate_domain_name(&apex)?;
        }

        Ok(Self {
            nameserver: child_of(&apex, "ns"),
            hostmaster: child_of(&apex, "admin"),
            apex,
            serial,
        })
    }

    /// Lower-case apex with a trailing dot.
    pub fn apex(&self) -> &str {
        &self.apex
    }

    /// `ns.<apex>`
    pub fn nameserver(&self) -> &str {
        &self.nameserver
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn is_apex(&self, name: &str) -> bool {
        names_equal(name, &self.apex)
    }

    pub fn is_nameserver(&self, name: &str) -> bool {
        names_equal(name, &self.nameserver)
    }

    pub fn soa_record(&self) -> ResourceRecord {
        ResourceRecord::new(
            &self.apex,
            SOA_TTL,
            RData::SOA(SoaData {
                mname: self.nameserver.clone(),
                rname: self.hostmaster.clone(),
                serial: self.serial,
                refresh: SOA_REFRESH,
                retry: SOA_RETRY,
                expire: SOA_EXPIRE,
                minimum: SOA_MINIMUM,
            }),
        )
    }

    pub fn ns_record(&self) -> ResourceRecord {
        ResourceRecord::new(
            &self.apex,
            NAMESERVER_TTL,
            RData::NS(self.nameserver.clone()),
        )
    }

    pub fn nameserver_address_record(&self, ip: IpAddr) -> ResourceRecord {
        let data = match ip {
            IpAddr::V4(v4) => RData::A(v4),
            IpAddr::V6(v6) => RData::AAAA(v6),
        };
        ResourceRecord::new(&self.nameserver, NAMESERVER_TTL, data)
    }
}

/// Uniform in `[1, 2^32 - 2]`.
pub fn random_serial() -> u32 {
    fastrand::u32(1..u32::MAX)
}

fn child_of(apex: &str, label: &str) -> String {
    if apex == "." {
        format!("{}.", label)
    } else {
        format!("{}.{}", label, apex)
    }
}
