pub mod errors;
pub mod logging;
pub mod probe;
pub mod root;
pub mod server;
pub mod store;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use probe::{ProbeConfig, ProbeGroup};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use store::StoreConfig;
pub use upstream::UpstreamConfig;
