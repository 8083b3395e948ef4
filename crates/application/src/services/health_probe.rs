use crate::ports::{PortConnector, ReachabilityProbe};
use async_trait::async_trait;
use resilient_dns_domain::config::ProbeGroup;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Any-port liveness check.
///
/// Walks the groups in priority order and the ports of each group in listed
/// order, one attempt at a time. The first successful connection ends the
/// check; every kind of connection error just moves on to the next port.
pub struct HealthProbe {
    connector: Arc<dyn PortConnector>,
    groups: Vec<ProbeGroup>,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(connector: Arc<dyn PortConnector>, groups: Vec<ProbeGroup>, timeout: Duration) -> Self {
        Self {
            connector,
            groups,
            timeout,
        }
    }

    /// Upper bound on the time a fully dead address costs.
    pub fn worst_case(&self) -> Duration {
        let attempts: u32 = self.groups.iter().map(|g| g.ports.len() as u32).sum();
        self.timeout * attempts
    }

    async fn try_group(&self, ip: IpAddr, group: &ProbeGroup) -> Option<u16> {
        for &port in &group.ports {
            let addr = SocketAddr::new(ip, port);
            match self.connector.connect(addr, self.timeout).await {
                Ok(()) => return Some(port),
                Err(e) => {
                    trace!(%addr, group = %group.name, error = %e, "Probe attempt failed");
                }
            }
        }
        None
    }
}

#[async_trait]
impl ReachabilityProbe for HealthProbe {
    async fn is_reachable(&self, ip: IpAddr) -> bool {
        for group in &self.groups {
            if let Some(port) = self.try_group(ip, group).await {
                debug!(%ip, port, group = %group.name, "Address reachable");
                return true;
            }
        }

        debug!(%ip, "Address unreachable on every probe port");
        false
    }
}
