use crate::ports::{QueryResolver, ReachabilityProbe, RecordStore, UpstreamResolver};
use async_trait::async_trait;
use resilient_dns_domain::{Answer, DnsReply, DnsRequest, MailExchange, RecordKey, RecordType};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ResolveQueryUseCase {
    store: Arc<dyn RecordStore>,
    probe: Arc<dyn ReachabilityProbe>,
    upstream: Arc<dyn UpstreamResolver>,
    answer_ttl: u32,
}

impl ResolveQueryUseCase {
    pub fn new(
        store: Arc<dyn RecordStore>,
        probe: Arc<dyn ReachabilityProbe>,
        upstream: Arc<dyn UpstreamResolver>,
        answer_ttl: u32,
    ) -> Self {
        Self {
            store,
            probe,
            upstream,
            answer_ttl,
        }
    }

    pub async fn execute(&self, request: &DnsRequest) -> DnsReply {
        match request.record_type {
            rt if rt.is_suppressed() => {
                debug!(domain = %request.domain, record_type = %rt, "Suppressed record type");
                DnsReply::empty()
            }
            RecordType::A => self.resolve_addresses(&request.domain).await,
            RecordType::MX => self.resolve_mail_exchangers(&request.domain).await,
            other => {
                debug!(domain = %request.domain, record_type = %other, "Pass-through record type");
                DnsReply::empty()
            }
        }
    }

    async fn resolve_addresses(&self, domain: &str) -> DnsReply {
        let key = RecordKey::address(domain);
        let cached = self.store.get(key.as_str()).await;

        let mut reachable = Vec::new();
        for entry in &cached {
            let Ok(ip) = entry.parse::<Ipv4Addr>() else {
                debug!(key = %key, entry = %entry, "Skipping unparseable cached address");
                continue;
            };
            if self.probe.is_reachable(IpAddr::V4(ip)).await {
                reachable.push(ip);
            }
        }

        if !reachable.is_empty() {
            debug!(domain = %domain, reachable = reachable.len(), cached = cached.len(), "Answering from store");
            return self.address_reply(reachable);
        }

        match self.upstream.resolve_addresses(domain).await {
            Ok(fresh) if !fresh.is_empty() => {
                let values: Vec<String> = fresh.iter().map(|ip| ip.to_string()).collect();
                self.store.update(key.as_str(), &values).await;
                debug!(domain = %domain, addresses = fresh.len(), "Answering from upstream");
                self.address_reply(fresh)
            }
            Ok(_) => {
                warn!(domain = %domain, "No reachable address and upstream returned nothing");
                DnsReply::server_failure()
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "No reachable address and upstream failed");
                DnsReply::server_failure()
            }
        }
    }

    async fn resolve_mail_exchangers(&self, domain: &str) -> DnsReply {
        let key = RecordKey::mail_exchange(domain);
        let mut entries = self.store.get(key.as_str()).await;

        if entries.is_empty() {
            match self.upstream.resolve_mail_exchangers(domain).await {
                Ok(fresh) if !fresh.is_empty() => {
                    entries = fresh.iter().map(MailExchange::encode).collect();
                    self.store.update(key.as_str(), &entries).await;
                }
                Ok(_) => debug!(domain = %domain, "Upstream has no mail exchangers"),
                Err(e) => debug!(domain = %domain, error = %e, "Mail exchange lookup failed"),
            }
        }

        let answers: Vec<Answer> = entries
            .iter()
            .filter_map(|entry| match entry.parse::<MailExchange>() {
                Ok(mx) => Some(Answer::MailExchange(mx)),
                Err(e) => {
                    debug!(key = %key, error = %e, "Dropping malformed mail exchange entry");
                    None
                }
            })
            .collect();

        if answers.is_empty() {
            return DnsReply::empty();
        }
        DnsReply::with_answers(answers, self.answer_ttl)
    }

    fn address_reply(&self, addresses: Vec<Ipv4Addr>) -> DnsReply {
        let answers = addresses.into_iter().map(Answer::Address).collect();
        DnsReply::with_answers(answers, self.answer_ttl)
    }
}

#[async_trait]
impl QueryResolver for ResolveQueryUseCase {
    async fn resolve(&self, request: &DnsRequest) -> DnsReply {
        self.execute(request).await
    }
}
