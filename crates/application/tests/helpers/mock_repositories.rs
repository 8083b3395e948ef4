#![allow(dead_code)]

use async_trait::async_trait;
use resilient_dns_application::ports::{
    MergeOutcome, PortConnector, ReachabilityProbe, RecordStore, UpstreamResolver,
};
use resilient_dns_domain::{DomainError, MailExchange};
use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Store

#[derive(Clone, Default)]
pub struct MockRecordStore {
    records: Arc<Mutex<HashMap<String, Vec<String>>>>,
    writes: Arc<AtomicUsize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, values: &[&str]) {
        self.records.lock().unwrap().insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
    }

    pub fn snapshot(&self, key: &str) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn get(&self, key: &str) -> Vec<String> {
        self.snapshot(key)
    }

    async fn update(&self, key: &str, candidates: &[String]) -> MergeOutcome {
        let mut records = self.records.lock().unwrap();
        let existing = records.entry(key.to_string()).or_default();
        let mut added = Vec::new();
        for candidate in candidates {
            if !existing.contains(candidate) && !added.contains(candidate) {
                added.push(candidate.clone());
            }
        }
        if added.is_empty() {
            return MergeOutcome::Unchanged;
        }
        existing.extend(added.iter().cloned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        MergeOutcome::Merged {
            added,
            persisted: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Reachability

/// Reports the configured addresses as alive and records every probe.
#[derive(Clone, Default)]
pub struct MockReachabilityProbe {
    alive: Arc<Mutex<HashSet<IpAddr>>>,
    probed: Arc<Mutex<Vec<IpAddr>>>,
}

impl MockReachabilityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_alive(&self, ip: &str) {
        self.alive.lock().unwrap().insert(ip.parse().unwrap());
    }

    pub fn probed(&self) -> Vec<IpAddr> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReachabilityProbe for MockReachabilityProbe {
    async fn is_reachable(&self, ip: IpAddr) -> bool {
        self.probed.lock().unwrap().push(ip);
        self.alive.lock().unwrap().contains(&ip)
    }
}

// ---------------------------------------------------------------------------
// Upstream

#[derive(Clone, Default)]
pub struct MockUpstreamResolver {
    addresses: Arc<Mutex<HashMap<String, Vec<Ipv4Addr>>>>,
    mail_exchangers: Arc<Mutex<HashMap<String, Vec<MailExchange>>>>,
    should_fail: Arc<Mutex<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_addresses(&self, domain: &str, ips: &[&str]) {
        self.addresses.lock().unwrap().insert(
            domain.to_string(),
            ips.iter().map(|ip| ip.parse().unwrap()).collect(),
        );
    }

    pub fn set_mail_exchangers(&self, domain: &str, entries: Vec<MailExchange>) {
        self.mail_exchangers
            .lock()
            .unwrap()
            .insert(domain.to_string(), entries);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::NetworkFailure(
                "Mock upstream failed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve_addresses(&self, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.addresses
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .ok_or(DomainError::NxDomain)
    }

    async fn resolve_mail_exchangers(
        &self,
        domain: &str,
    ) -> Result<Vec<MailExchange>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.mail_exchangers
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .ok_or(DomainError::NxDomain)
    }
}

// ---------------------------------------------------------------------------
// Port connector

/// Fake port opener: a connection succeeds only for the configured ports.
#[derive(Clone, Default)]
pub struct MockPortConnector {
    open: Arc<Mutex<HashSet<SocketAddr>>>,
    attempts: Arc<Mutex<Vec<SocketAddr>>>,
}

impl MockPortConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_port(&self, ip: &str, port: u16) {
        let addr = SocketAddr::new(ip.parse().unwrap(), port);
        self.open.lock().unwrap().insert(addr);
    }

    pub fn attempts(&self) -> Vec<SocketAddr> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempted_ports(&self) -> Vec<u16> {
        self.attempts().iter().map(|a| a.port()).collect()
    }
}

#[async_trait]
impl PortConnector for MockPortConnector {
    async fn connect(&self, addr: SocketAddr, _timeout: Duration) -> Result<(), DomainError> {
        self.attempts.lock().unwrap().push(addr);
        if self.open.lock().unwrap().contains(&addr) {
            Ok(())
        } else {
            Err(DomainError::NetworkFailure(format!(
                "Connection refused by {}",
                addr
            )))
        }
    }
}
