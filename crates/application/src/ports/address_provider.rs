use addd_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Source of the addresses advertised for the zone's nameserver.
///
/// Implementations are queried on every call; results must not be cached by
/// callers.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn addresses(&self) -> Result<Vec<IpAddr>, DomainError>;
}
