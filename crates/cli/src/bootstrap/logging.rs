use resilient_dns_domain::Config;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Resolver library chatter is
/// held at `warn` unless asked for explicitly.
pub fn init_logging(config: &Config) {
    let default_directive = format!(
        "{},hickory_server=warn,hickory_proto=warn",
        config.logging.level
    );
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .ok();
}
