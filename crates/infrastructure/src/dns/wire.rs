//! DNS wire-format codec built on `hickory-proto`.
//!
//! The relay treats message contents opaquely: parsing only establishes that
//! the bytes are a well-formed DNS message, and serialization produces the
//! bytes sent upstream or returned in the HTTP body.

use doh_relay_domain::RelayError;
use hickory_proto::error::ProtoError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Parse an inbound HTTP body as a DNS query message.
pub fn decode_query(bytes: &[u8]) -> Result<Message, RelayError> {
    Message::from_vec(bytes).map_err(|e| RelayError::MalformedQuery(e.to_string()))
}

/// Parse the bytes returned by the upstream resolver.
pub fn decode_reply(bytes: &[u8]) -> Result<Message, RelayError> {
    Message::from_vec(bytes).map_err(|e| RelayError::MalformedUpstreamReply(e.to_string()))
}

/// Serialize a message to wire format bytes.
///
/// Callers decide which `RelayError` kind an encode failure maps to, since
/// the same codec serves both the query and the reply side.
pub fn encode(message: &Message) -> Result<Vec<u8>, ProtoError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder)?;

    Ok(buf)
}

/// Build an A-record query for `domain` and serialize it to wire format.
///
/// Creates a standard recursive query with a random ID and the RD flag set.
/// Returns the ID alongside the bytes so callers can match the response.
pub fn build_query(domain: &str) -> Result<(u16, Vec<u8>), RelayError> {
    let name = Name::from_str(domain)
        .map_err(|e| RelayError::MalformedQuery(format!("invalid domain '{}': {}", domain, e)))?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(RecordType::A);
    query.set_query_class(DNSClass::IN);

    let id = fastrand::u16(..);

    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    let bytes = encode(&message).map_err(|e| RelayError::MalformedQuery(e.to_string()))?;
    Ok((id, bytes))
}

/// One-line human-readable summary of a response, for the smoke client.
pub fn summarize(message: &Message) -> String {
    let question = message
        .queries()
        .first()
        .map(|q| format!("{} {}", q.name(), q.query_type()))
        .unwrap_or_else(|| "<no question>".to_string());

    let answers: Vec<String> = message
        .answers()
        .iter()
        .map(|record| match record.data() {
            Some(RData::A(a)) => a.to_string(),
            Some(RData::AAAA(aaaa)) => aaaa.to_string(),
            Some(RData::CNAME(cname)) => format!("CNAME {}", cname),
            Some(other) => format!("{:?}", other),
            None => "<empty>".to_string(),
        })
        .collect();

    format!(
        "id={} status={:?} question=[{}] answers=[{}]",
        message.id(),
        message.response_code(),
        question,
        answers.join(", ")
    )
}
