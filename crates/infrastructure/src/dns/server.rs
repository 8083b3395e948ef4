use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use resilient_dns_application::ports::QueryResolver;
use resilient_dns_domain::{Answer, DnsReply, DnsRequest, ResponseStatus};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

/// Bridges `hickory-server` to a [`QueryResolver`].
#[derive(Clone)]
pub struct DnsServerHandler {
    resolver: Arc<dyn QueryResolver>,
}

impl DnsServerHandler {
    pub fn new(resolver: Arc<dyn QueryResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let original = request.query().original();
        let owner = original.name().clone();
        let record_type = RecordTypeMapper::from_hickory(original.query_type());
        let dns_request = DnsRequest::new(owner.to_utf8(), record_type, request.src().ip());

        debug!(
            domain = %dns_request.domain,
            record_type = %record_type,
            client = %dns_request.client_ip,
            "DNS query received"
        );

        let reply = self.resolver.resolve(&dns_request).await;

        if reply.status != ResponseStatus::NoError {
            return send_status(request, &mut response_handle, response_code(reply.status)).await;
        }

        let answers = answer_records(&reply, &owner);
        debug!(domain = %dns_request.domain, answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);
        let no_records: &[Record] = &[];
        let response = builder.build(
            header,
            answers.iter(),
            no_records.iter(),
            no_records.iter(),
            no_records.iter(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

/// Encode reply answers as wire records owned by the queried name.
///
/// A null exchange is encoded as the root name. Other hosts that do not
/// form a valid name are skipped.
pub fn answer_records(reply: &DnsReply, owner: &Name) -> Vec<Record> {
    reply
        .answers
        .iter()
        .filter_map(|answer| {
            let rdata = match answer {
                Answer::Address(ip) => RData::A(A(*ip)),
                Answer::MailExchange(mx) if mx.is_null() => {
                    RData::MX(MX::new(mx.preference, Name::root()))
                }
                Answer::MailExchange(mx) => {
                    let mut exchange = match Name::from_str(&mx.exchange) {
                        Ok(name) => name,
                        Err(e) => {
                            debug!(exchange = %mx.exchange, error = %e, "Skipping invalid exchange host");
                            return None;
                        }
                    };
                    exchange.set_fqdn(true);
                    RData::MX(MX::new(mx.preference, exchange))
                }
            };
            Some(Record::from_rdata(owner.clone(), reply.ttl, rdata))
        })
        .collect()
}

pub fn response_code(status: ResponseStatus) -> ResponseCode {
    match status {
        ResponseStatus::NoError => ResponseCode::NoError,
        ResponseStatus::ServFail => ResponseCode::ServFail,
    }
}

async fn send_status<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending empty response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build_no_records(header);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}
