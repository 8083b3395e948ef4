use anyhow::Context;
use resilient_dns_application::ports::{
    PortConnector, QueryResolver, ReachabilityProbe, RecordStore, UpstreamResolver,
};
use resilient_dns_application::services::HealthProbe;
use resilient_dns_application::use_cases::ResolveQueryUseCase;
use resilient_dns_domain::Config;
use resilient_dns_infrastructure::dns::UpstreamForwarder;
use resilient_dns_infrastructure::probe::TcpPortConnector;
use resilient_dns_infrastructure::repositories::JsonRecordStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<dyn QueryResolver>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(
            JsonRecordStore::open(&config.store.path, config.store.max_values_per_key).await,
        );

        let probe = Self::build_probe(config);
        let upstream = Self::build_upstream(config)?;

        let resolver = Arc::new(ResolveQueryUseCase::new(
            store as Arc<dyn RecordStore>,
            probe,
            upstream,
            config.server.answer_ttl,
        ));

        Ok(Self {
            resolver: resolver as Arc<dyn QueryResolver>,
        })
    }

    fn build_probe(config: &Config) -> Arc<dyn ReachabilityProbe> {
        let connector: Arc<dyn PortConnector> = Arc::new(TcpPortConnector::new());
        let probe = HealthProbe::new(
            connector,
            config.probe.groups.clone(),
            Duration::from_millis(config.probe.timeout_ms),
        );

        info!(
            groups = config.probe.groups.len(),
            ports = config.probe.total_ports(),
            timeout_ms = config.probe.timeout_ms,
            worst_case_ms = probe.worst_case().as_millis() as u64,
            "Reachability probe configured"
        );

        Arc::new(probe)
    }

    fn build_upstream(config: &Config) -> anyhow::Result<Arc<dyn UpstreamResolver>> {
        let server = config
            .upstream
            .socket_addr()
            .with_context(|| format!("Invalid upstream server '{}'", config.upstream.server))?;
        let forwarder =
            UpstreamForwarder::new(server, Duration::from_millis(config.upstream.timeout_ms));

        info!(server = %forwarder.server(), timeout_ms = config.upstream.timeout_ms, "Upstream configured");

        Ok(Arc::new(forwarder))
    }
}
