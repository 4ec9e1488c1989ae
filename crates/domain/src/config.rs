pub mod api;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod store;
pub mod zone;

pub use api::ApiConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
pub use zone::{TsigKeyConfig, ZoneConfig};
