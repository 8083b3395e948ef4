mod port_connector;
mod query_resolver;
mod reachability_probe;
mod record_store;
mod upstream_resolver;

pub use port_connector::PortConnector;
pub use query_resolver::QueryResolver;
pub use reachability_probe::ReachabilityProbe;
pub use record_store::{MergeOutcome, RecordStore};
pub use upstream_resolver::UpstreamResolver;
