mod logging;
mod pid;
mod signals;
mod store;

pub use logging::init_logging;
pub use pid::PidFile;
pub use signals::wait_for_shutdown;
pub use store::open_store;

use addd_domain::config::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}
