use addd_application::ports::AddressProvider;
use addd_domain::DomainError;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Routable public address used only to pick the outbound interface.
/// Connecting a UDP socket sends nothing.
const PROBE_TARGET: &str = "8.8.8.8:80";

/// This host's outbound IPv4 address plus operator-configured extras.
pub struct SelfAddressProvider {
    external: Vec<IpAddr>,
    discover: bool,
}

impl SelfAddressProvider {
    pub fn new(external: Vec<IpAddr>) -> Self {
        Self {
            external,
            discover: true,
        }
    }

    /// Only the configured addresses, no interface probing.
    pub fn configured_only(external: Vec<IpAddr>) -> Self {
        Self {
            external,
            discover: false,
        }
    }

    async fn outbound_ipv4() -> Option<IpAddr> {
        let socket = UdpSocket::bind("0.0.0.0:0").await.ok()?;
        socket.connect(PROBE_TARGET).await.ok()?;
        match socket.local_addr().ok()? {
            SocketAddr::V4(addr) if !addr.ip().is_loopback() && !addr.ip().is_unspecified() => {
                Some(IpAddr::V4(*addr.ip()))
            }
            other => {
                debug!(addr = %other, "Ignoring non-routable local address");
                None
            }
        }
    }
}

#[async_trait]
impl AddressProvider for SelfAddressProvider {
    async fn addresses(&self) -> Result<Vec<IpAddr>, DomainError> {
        let mut addresses = Vec::new();

        if self.discover {
            if let Some(ip) = Self::outbound_ipv4().await {
                addresses.push(ip);
            }
        }
        for ip in &self.external {
            if !addresses.contains(ip) {
                addresses.push(*ip);
            }
        }

        if addresses.is_empty() {
            return Err(DomainError::NoAdvertisableAddress);
        }
        Ok(addresses)
    }
}
