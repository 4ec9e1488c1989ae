use addd_domain::config::{CliOverrides, StoreBackend};
use addd_infrastructure::dns::DnsServerHandler;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "addd")]
#[command(version)]
#[command(about = "addd - authoritative dynamic DNS server with RFC 2136 updates")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Zone apex to serve
    #[arg(long)]
    domain: Option<String>,

    /// DNS server port
    #[arg(long)]
    port: Option<u16>,

    /// DNS bind address
    #[arg(long)]
    bind: Option<String>,

    /// TSIG key as name:base64secret
    #[arg(long)]
    tsig: Option<String>,

    /// Management API bind address
    #[arg(long)]
    api: Option<String>,

    /// Management API token (empty disables authentication)
    #[arg(long)]
    token: Option<String>,

    /// Disable the management API
    #[arg(long)]
    no_api: bool,

    /// SQLite database path
    #[arg(long)]
    db_path: Option<String>,

    /// Record store backend (sqlite, rqlite, memory)
    #[arg(long)]
    store: Option<StoreBackend>,

    /// rqlite node URL
    #[arg(long)]
    rqlite_url: Option<String>,

    /// Extra address advertised for the nameserver (repeatable)
    #[arg(long = "external-ip", value_name = "IP")]
    external_ips: Vec<String>,

    /// PID file path (empty disables it)
    #[arg(long)]
    pid: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            domain: self.domain.clone(),
            tsig: self.tsig.clone(),
            external_addresses: self.external_ips.clone(),
            dns_port: self.port,
            bind_address: self.bind.clone(),
            pid_file: self.pid.clone(),
            api_bind_address: self.api.clone(),
            api_token: self.token.clone(),
            api_disabled: self.no_api,
            store_backend: self.store,
            store_path: self.db_path.clone(),
            rqlite_url: self.rqlite_url.clone(),
            log_level: self.level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        zone = %config.zone.domain,
        "Starting addd"
    );

    let store = bootstrap::open_store(&config).await?;
    let services = di::Services::new(&config, store.clone())?;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let dns_socket = server::bind_dns_socket(&dns_addr)?;
    let pid_file = bootstrap::PidFile::create(config.server.pid_file())?;

    let dns_handler = DnsServerHandler::new(services.zone_engine.clone(), services.tsig_key.clone());
    let mut dns_task = tokio::spawn(server::start_dns_server(dns_socket, dns_handler));

    let api_task = if config.api.enabled {
        let web_addr: SocketAddr = config.api.bind_address.parse()?;
        let app_state = services.app_state(&config);
        Some(tokio::spawn(async move {
            if let Err(e) = server::start_web_server(web_addr, app_state).await {
                error!(error = %e, "API server error");
            }
        }))
    } else {
        info!("Management API disabled");
        None
    };

    let outcome = tokio::select! {
        _ = bootstrap::wait_for_shutdown() => Ok(()),
        result = &mut dns_task => {
            let err = match result {
                Ok(Ok(())) => anyhow::anyhow!("DNS server stopped"),
                Ok(Err(e)) => e,
                Err(e) => anyhow::anyhow!("DNS server task failed: {}", e),
            };
            error!(error = %err, "DNS server exited, shutting down");
            Err(err)
        }
    };

    dns_task.abort();
    if let Some(task) = api_task {
        task.abort();
    }
    drop(pid_file);
    store.close().await;

    info!("Server shutdown complete");
    outcome
}
