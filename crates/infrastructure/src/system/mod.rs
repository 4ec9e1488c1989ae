pub mod cluster_membership;
pub mod self_address;

pub use cluster_membership::ClusterMembershipProvider;
pub use self_address::SelfAddressProvider;
