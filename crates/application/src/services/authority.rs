use addd_domain::{DomainError, ResourceRecord, Zone};
use std::sync::Arc;
use tracing::warn;

use crate::ports::AddressProvider;

/// Builds the records the zone answers without consulting the store: its SOA,
/// its NS and the addresses of `ns.<apex>`.
pub struct AuthoritySynthesizer {
    zone: Arc<Zone>,
    addresses: Arc<dyn AddressProvider>,
}

impl AuthoritySynthesizer {
    pub fn new(zone: Arc<Zone>, addresses: Arc<dyn AddressProvider>) -> Self {
        Self { zone, addresses }
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn soa(&self) -> ResourceRecord {
        self.zone.soa_record()
    }

    pub fn ns(&self) -> ResourceRecord {
        self.zone.ns_record()
    }

    /// One record per advertised address, both families.
    pub async fn nameserver_records(&self) -> Result<Vec<ResourceRecord>, DomainError> {
        let ips = self.addresses.addresses().await?;
        if ips.is_empty() {
            return Err(DomainError::NoAdvertisableAddress);
        }
        Ok(ips
            .into_iter()
            .map(|ip| self.zone.nameserver_address_record(ip))
            .collect())
    }

    /// IPv4 records only. A provider failure yields an empty set.
    pub async fn nameserver_ipv4_records(&self) -> Vec<ResourceRecord> {
        match self.addresses.addresses().await {
            Ok(ips) => ips
                .into_iter()
                .filter(|ip| ip.is_ipv4())
                .map(|ip| self.zone.nameserver_address_record(ip))
                .collect(),
            Err(e) => {
                warn!(error = %e, "No nameserver address available");
                Vec::new()
            }
        }
    }
}
