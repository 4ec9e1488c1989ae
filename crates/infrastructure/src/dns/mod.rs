pub mod server;
pub mod tsig;
pub mod wire;

pub use server::DnsServerHandler;
pub use tsig::{split_tsig, SignedMessage, TsigError, TsigKey, TsigRecord};
