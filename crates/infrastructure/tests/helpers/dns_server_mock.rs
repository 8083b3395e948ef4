#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use resilient_dns_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// What the fake upstream answers to every question.
#[derive(Debug, Clone)]
pub struct MockAnswer {
    pub rcode: ResponseCode,
    pub addresses: Vec<Ipv4Addr>,
    pub mail_exchangers: Vec<(u16, String)>,
    /// Set TC and drop the answers on UDP; answer fully over TCP.
    pub truncate_udp: bool,
    pub mismatched_id: bool,
}

impl MockAnswer {
    pub fn addresses(ips: &[&str]) -> Self {
        Self {
            addresses: ips.iter().map(|ip| ip.parse().unwrap()).collect(),
            ..Self::rcode(ResponseCode::NoError)
        }
    }

    pub fn mail_exchangers(entries: &[(u16, &str)]) -> Self {
        Self {
            mail_exchangers: entries
                .iter()
                .map(|(pref, host)| (*pref, host.to_string()))
                .collect(),
            ..Self::rcode(ResponseCode::NoError)
        }
    }

    pub fn rcode(rcode: ResponseCode) -> Self {
        Self {
            rcode,
            addresses: Vec::new(),
            mail_exchangers: Vec::new(),
            truncate_udp: false,
            mismatched_id: false,
        }
    }

    pub fn truncated(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    pub fn with_mismatched_id(mut self) -> Self {
        self.mismatched_id = true;
        self
    }
}

/// Loopback upstream serving the same answer over UDP and TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answer: MockAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let tcp_counter = tcp_queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = build_response(&buf[..len], &answer, false);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            tcp_counter.fetch_add(1, Ordering::SeqCst);
                            let answer = answer.clone();
                            tokio::spawn(async move {
                                if let Ok(query) = read_with_length_prefix(&mut stream).await {
                                    let response = build_response(&query, &answer, true);
                                    let _ = send_with_length_prefix(&mut stream, &response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_response(query_bytes: &[u8], answer: &MockAnswer, over_tcp: bool) -> Vec<u8> {
    let request = match Message::from_vec(query_bytes) {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };

    let id = if answer.mismatched_id {
        request.id().wrapping_add(1)
    } else {
        request.id()
    };

    let mut response = Message::new();
    response
        .set_id(id)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true)
        .set_response_code(answer.rcode);

    let Some(query) = request.queries().first().cloned() else {
        return Vec::new();
    };
    let owner = query.name().clone();
    response.add_query(query);

    if answer.truncate_udp && !over_tcp {
        response.set_truncated(true);
    } else {
        for ip in &answer.addresses {
            response.add_answer(Record::from_rdata(owner.clone(), 300, RData::A(A(*ip))));
        }
        for (preference, host) in &answer.mail_exchangers {
            let exchange = Name::from_str(host).unwrap();
            response.add_answer(Record::from_rdata(
                owner.clone(),
                300,
                RData::MX(MX::new(*preference, exchange)),
            ));
        }
    }

    response.to_vec().unwrap_or_default()
}
