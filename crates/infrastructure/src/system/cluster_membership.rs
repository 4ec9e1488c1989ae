//! Nameserver addresses drawn from rqlite cluster membership.

use addd_application::ports::AddressProvider;
use addd_domain::DomainError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct NodeInfo {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    api_addr: Option<String>,
    #[serde(default)]
    reachable: bool,
}

/// `/nodes` answers either a map keyed by node id or, with `ver=2`, a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodesResponse {
    List { nodes: Vec<NodeInfo> },
    Map(HashMap<String, NodeInfo>),
}

impl NodesResponse {
    fn into_nodes(self) -> Vec<NodeInfo> {
        match self {
            NodesResponse::List { nodes } => nodes,
            NodesResponse::Map(map) => {
                let mut nodes: Vec<NodeInfo> = map
                    .into_iter()
                    .map(|(id, mut node)| {
                        node.id.get_or_insert(id);
                        node
                    })
                    .collect();
                nodes.sort_by(|a, b| a.id.cmp(&b.id));
                nodes
            }
        }
    }
}

pub struct ClusterMembershipProvider {
    client: reqwest::Client,
    base_url: String,
    local: Arc<dyn AddressProvider>,
}

impl ClusterMembershipProvider {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        local: Arc<dyn AddressProvider>,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::StoreUnavailable(format!("rqlite client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            local,
        })
    }

    async fn member_addresses(&self) -> Result<Vec<IpAddr>, String> {
        let url = format!("{}/nodes", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("{} returned {}", url, response.status()));
        }

        let nodes: NodesResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(nodes
            .into_nodes()
            .into_iter()
            .filter(|node| node.reachable)
            .filter_map(|node| node.api_addr.as_deref().and_then(host_ip))
            .collect())
    }
}

#[async_trait]
impl AddressProvider for ClusterMembershipProvider {
    async fn addresses(&self) -> Result<Vec<IpAddr>, DomainError> {
        let members = match self.member_addresses().await {
            Ok(members) => members,
            Err(e) => {
                warn!(error = %e, "Cluster membership unavailable, using local addresses");
                return self.local.addresses().await;
            }
        };
        debug!(members = members.len(), "Cluster members resolved");

        let mut addresses = members;
        match self.local.addresses().await {
            Ok(local) => addresses.extend(local),
            Err(e) if addresses.is_empty() => return Err(e),
            Err(e) => debug!(error = %e, "No local addresses to add"),
        }

        let mut unique = Vec::with_capacity(addresses.len());
        for ip in addresses {
            if !unique.contains(&ip) {
                unique.push(ip);
            }
        }

        if unique.is_empty() {
            return Err(DomainError::NoAdvertisableAddress);
        }
        Ok(unique)
    }
}

/// Host part of an `api_addr` such as `http://10.0.0.2:4001`, when it is an IP.
fn host_ip(api_addr: &str) -> Option<IpAddr> {
    let without_scheme = api_addr
        .split_once("://")
        .map_or(api_addr, |(_, rest)| rest);
    let authority = without_scheme.split('/').next()?;

    if let Some(rest) = authority.strip_prefix('[') {
        return rest.split(']').next()?.parse().ok();
    }
    let host = authority.rsplit_once(':').map_or(authority, |(host, _)| host);
    host.parse().ok()
}
