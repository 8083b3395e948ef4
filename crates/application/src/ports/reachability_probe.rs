use async_trait::async_trait;
use std::net::IpAddr;

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self, ip: IpAddr) -> bool;
}
