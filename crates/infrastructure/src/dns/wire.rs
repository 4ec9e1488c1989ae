//! Translation between hickory messages and the zone engine's model.

use addd_domain::{
    DnsClass, Opcode, QueryType, Question, RData as ZoneRData, ResourceRecord, TsigStatus,
    UpdateData, UpdateRecord, ZoneRequest, ZoneResponse,
};
use hickory_proto::error::ProtoResult;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, NS, SOA};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::IpAddr;

const HEADER_LEN: usize = 12;
const QR_BIT: u8 = 0x80;
const MAX_PAYLOAD: u16 = 4096;

/// Fields readable from the fixed header alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub id: u16,
    pub is_response: bool,
    pub opcode: Opcode,
}

impl RawHeader {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        Some(Self {
            id: u16::from_be_bytes([bytes[0], bytes[1]]),
            is_response: bytes[2] & QR_BIT != 0,
            opcode: Opcode::from_u8((bytes[2] >> 3) & 0x0F),
        })
    }
}

pub fn decode_request(message: &Message, tsig: TsigStatus) -> ZoneRequest {
    let questions = message.queries().iter().map(to_question).collect();

    let request = match message.op_code() {
        OpCode::Update => ZoneRequest {
            id: message.id(),
            opcode: Opcode::Update,
            questions,
            updates: message.name_servers().iter().map(to_update_record).collect(),
            tsig: TsigStatus::Absent,
        },
        OpCode::Query => ZoneRequest::query(message.id(), questions),
        other => ZoneRequest {
            id: message.id(),
            opcode: Opcode::from_u8(u8::from(other)),
            questions,
            updates: Vec::new(),
            tsig: TsigStatus::Absent,
        },
    };

    request.with_tsig(tsig)
}

fn to_question(query: &Query) -> Question {
    Question::new(
        query.name().to_ascii(),
        QueryType::from_u16(u16::from(query.query_type())),
    )
}

fn to_update_record(record: &Record) -> UpdateRecord {
    UpdateRecord {
        name: record.name().to_ascii(),
        rtype: u16::from(record.record_type()),
        class: DnsClass::from_u16(u16::from(record.dns_class())),
        ttl: record.ttl(),
        data: update_data(record.data()),
    }
}

fn update_data(data: Option<&RData>) -> UpdateData {
    match data {
        None => UpdateData::Empty,
        Some(RData::A(a)) => UpdateData::Address(IpAddr::V4(a.0)),
        Some(RData::AAAA(aaaa)) => UpdateData::Address(IpAddr::V6(aaaa.0)),
        Some(other) => {
            if encoded_len(other) == 0 {
                UpdateData::Empty
            } else {
                UpdateData::Other
            }
        }
    }
}

fn encoded_len(rdata: &RData) -> usize {
    let mut buffer = Vec::new();
    let mut encoder = BinEncoder::new(&mut buffer);
    match rdata.emit(&mut encoder) {
        Ok(()) => buffer.len(),
        Err(_) => usize::MAX,
    }
}

/// Encodes `response`, echoing `queries` in the question section.
///
/// An OPT record is only added when the request carried one (`edns`). Codes
/// above 15 need it for their high bits; without it they are sent as SERVFAIL.
pub fn encode_response(
    response: &ZoneResponse,
    queries: &[Query],
    edns: bool,
) -> ProtoResult<Vec<u8>> {
    let mut rcode: ResponseCode = response.rcode.to_u16().into();
    if !edns && u16::from(rcode) > 0x0F {
        rcode = ResponseCode::ServFail;
    }

    let mut message = Message::new();
    message
        .set_id(response.id)
        .set_message_type(MessageType::Response)
        .set_op_code(hickory_opcode(response.opcode))
        .set_authoritative(response.authoritative)
        .set_response_code(rcode);

    if edns {
        let mut opt = Edns::new();
        opt.set_max_payload(MAX_PAYLOAD);
        opt.set_rcode_high(rcode.high());
        message.set_edns(opt);
    }

    message.add_queries(queries.iter().cloned());
    for rr in &response.answers {
        message.add_answer(to_hickory_record(rr)?);
    }
    for rr in &response.authority {
        message.add_name_server(to_hickory_record(rr)?);
    }
    for rr in &response.additional {
        message.add_additional(to_hickory_record(rr)?);
    }

    let mut buffer = Vec::with_capacity(512);
    {
        let mut encoder = BinEncoder::new(&mut buffer);
        encoder.set_canonical_names(!response.compress);
        message.emit(&mut encoder)?;
    }

    if let Opcode::Other(value) = response.opcode {
        buffer[2] = (buffer[2] & 0x87) | ((value & 0x0F) << 3);
    }
    Ok(buffer)
}

/// Minimal reply carrying only a header.
pub fn error_reply(id: u16, code: ResponseCode) -> ProtoResult<Vec<u8>> {
    Message::error_msg(id, OpCode::Query, code).to_vec()
}

fn hickory_opcode(opcode: Opcode) -> OpCode {
    match opcode {
        Opcode::Update => OpCode::Update,
        Opcode::Query | Opcode::Other(_) => OpCode::Query,
    }
}

fn to_hickory_record(rr: &ResourceRecord) -> ProtoResult<Record> {
    let rdata = match &rr.data {
        ZoneRData::A(ip) => RData::A(A::from(*ip)),
        ZoneRData::AAAA(ip) => RData::AAAA(AAAA::from(*ip)),
        ZoneRData::NS(target) => RData::NS(NS(Name::from_ascii(target)?)),
        ZoneRData::SOA(soa) => RData::SOA(SOA::new(
            Name::from_ascii(&soa.mname)?,
            Name::from_ascii(&soa.rname)?,
            soa.serial,
            soa.refresh as i32,
            soa.retry as i32,
            soa.expire as i32,
            soa.minimum,
        )),
    };

    Ok(Record::from_rdata(Name::from_ascii(&rr.name)?, rr.ttl, rdata))
}
