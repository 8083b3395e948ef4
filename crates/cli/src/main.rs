use clap::Parser;
use resilient_dns_domain::CliOverrides;
use resilient_dns_infrastructure::dns::DnsServerHandler;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "resilient-dns")]
#[command(version)]
#[command(about = "Resilient DNS - local proxy that remembers every address it has seen")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Upstream resolver (ip or ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Record store file
    #[arg(long, value_name = "FILE")]
    store: Option<String>,

    /// Per-port TCP probe timeout in milliseconds
    #[arg(long)]
    probe_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind,
        dns_port: cli.dns_port,
        upstream: cli.upstream,
        store_path: cli.store,
        probe_timeout_ms: cli.probe_timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        bind = %config.server.listen_addr(),
        upstream = %config.upstream.server,
        store = %config.store.path,
        "Starting Resilient DNS v{}",
        env!("CARGO_PKG_VERSION")
    );

    let dns_services = di::DnsServices::new(&config).await?;
    let dns_handler = DnsServerHandler::new(dns_services.resolver.clone());

    tokio::select! {
        result = server::start_dns_server(config.server.listen_addr(), dns_handler) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
