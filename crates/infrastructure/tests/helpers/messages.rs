use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use hmac::{Hmac, Mac};
use md5::Md5;
use std::net::IpAddr;

pub const ZONE: &str = "example.com.";
pub const KEY_NAME: &str = "update-key.";
pub const SECRET: &[u8] = b"0123456789abcdef";
/// base64 of `SECRET`.
pub const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZg==";
const ALGORITHM: &str = "hmac-md5.sig-alg.reg.int.";

pub fn name(value: &str) -> Name {
    Name::from_ascii(value).unwrap()
}

pub fn query_bytes(id: u16, qname: &str, qtype: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name(qname), qtype));
    message.to_vec().unwrap()
}

/// Same as [`query_bytes`] with an OPT record advertising a 1232-byte payload.
pub fn edns_query_bytes(id: u16, qname: &str, qtype: RecordType) -> Vec<u8> {
    let mut message = Message::from_vec(&query_bytes(id, qname, qtype)).unwrap();
    let mut edns = Edns::new();
    edns.set_max_payload(1232);
    message.set_edns(edns);
    message.to_vec().unwrap()
}

pub fn address_record(owner: &str, ip: &str, ttl: u32) -> Record {
    let rdata = match ip.parse::<IpAddr>().unwrap() {
        IpAddr::V4(v4) => RData::A(A::from(v4)),
        IpAddr::V6(v6) => RData::AAAA(AAAA::from(v6)),
    };
    Record::from_rdata(name(owner), ttl, rdata)
}

/// Class NONE: remove one specific record.
pub fn delete_record(owner: &str, ip: &str) -> Record {
    let mut record = address_record(owner, ip, 0);
    record.set_dns_class(DNSClass::NONE);
    record
}

/// Class ANY with no data: remove the RRset.
pub fn delete_rrset(owner: &str, rtype: RecordType) -> Record {
    let mut record = Record::with(name(owner), rtype, 0);
    record.set_dns_class(DNSClass::ANY);
    record
}

pub fn update_bytes(id: u16, updates: Vec<Record>) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Update)
        .add_query(Query::query(name(ZONE), RecordType::SOA));
    for record in updates {
        message.add_name_server(record);
    }
    message.to_vec().unwrap()
}

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

fn wire_name(value: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in value.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend(label.to_ascii_lowercase().bytes());
    }
    out.push(0);
    out
}

fn variables(key: &str, time_signed: u64, fudge: u16) -> Vec<u8> {
    let mut out = wire_name(key);
    out.extend_from_slice(&255u16.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&wire_name(ALGORITHM));
    out.extend_from_slice(&time_signed.to_be_bytes()[2..]);
    out.extend_from_slice(&fudge.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out
}

fn hmac_md5(secret: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut mac = Hmac::<Md5>::new_from_slice(secret).unwrap();
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().to_vec()
}

/// Signs an encoded request the way an RFC 8945 client would.
/// Returns the signed datagram and the request MAC.
pub fn sign_request(
    message: &[u8],
    key: &str,
    secret: &[u8],
    time_signed: u64,
    fudge: u16,
) -> (Vec<u8>, Vec<u8>) {
    let mac = hmac_md5(secret, &[message, &variables(key, time_signed, fudge)]);

    let mut rdata = wire_name(ALGORITHM);
    rdata.extend_from_slice(&time_signed.to_be_bytes()[2..]);
    rdata.extend_from_slice(&fudge.to_be_bytes());
    rdata.extend_from_slice(&(mac.len() as u16).to_be_bytes());
    rdata.extend_from_slice(&mac);
    rdata.extend_from_slice(&message[..2]);
    rdata.extend_from_slice(&0u16.to_be_bytes());
    rdata.extend_from_slice(&0u16.to_be_bytes());

    let mut signed = message.to_vec();
    signed.extend_from_slice(&wire_name(key));
    signed.extend_from_slice(&250u16.to_be_bytes());
    signed.extend_from_slice(&255u16.to_be_bytes());
    signed.extend_from_slice(&0u32.to_be_bytes());
    signed.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    signed.extend_from_slice(&rdata);

    let arcount = u16::from_be_bytes([signed[10], signed[11]]) + 1;
    signed[10..12].copy_from_slice(&arcount.to_be_bytes());

    (signed, mac)
}

/// MAC a server should produce over `response` (TSIG already removed).
pub fn expected_response_mac(
    response: &[u8],
    request_mac: &[u8],
    key: &str,
    secret: &[u8],
    time_signed: u64,
    fudge: u16,
) -> Vec<u8> {
    hmac_md5(
        secret,
        &[
            &(request_mac.len() as u16).to_be_bytes(),
            request_mac,
            response,
            &variables(key, time_signed, fudge),
        ],
    )
}
