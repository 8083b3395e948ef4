use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::BinEncodable;
use resilient_dns_domain::{DomainError, RecordType};
use std::str::FromStr;

/// A recursive question ready for the wire, with the id its answer must echo.
#[derive(Debug, Clone)]
pub struct QueryMessage {
    pub id: u16,
    pub bytes: Vec<u8>,
}

impl QueryMessage {
    pub fn new(domain: &str, record_type: &RecordType) -> Result<Self, DomainError> {
        let name = Name::from_str(domain)
            .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", domain, e)))?;

        let mut question = Query::query(name, RecordTypeMapper::to_hickory(record_type));
        question.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(question);

        let bytes = message
            .to_vec()
            .map_err(|e| DomainError::ParseFailure(format!("encode query for {}: {}", domain, e)))?;

        Ok(Self { id, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(query: &QueryMessage) -> Message {
        Message::from_vec(&query.bytes).unwrap()
    }

    #[test]
    fn test_recursion_desired_is_set() {
        let query = QueryMessage::new("example.com", &RecordType::A).unwrap();
        assert!(decode(&query).recursion_desired());
    }

    #[test]
    fn test_encoded_id_is_reported() {
        let query = QueryMessage::new("example.com", &RecordType::MX).unwrap();
        assert_eq!(decode(&query).id(), query.id);
    }

    #[test]
    fn test_single_question_carries_name_and_type() {
        let query = QueryMessage::new("mail.example.com", &RecordType::MX).unwrap();
        let message = decode(&query);

        assert_eq!(message.queries().len(), 1);
        assert_eq!(
            message.queries()[0].query_type(),
            hickory_proto::rr::RecordType::MX
        );
        assert_eq!(message.queries()[0].name().to_utf8(), "mail.example.com.");
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let label = "x".repeat(64);
        let result = QueryMessage::new(&label, &RecordType::A);
        assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    }
}
