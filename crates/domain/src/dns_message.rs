//! Protocol-level message model exchanged between the wire adapter and the
//! zone engine. Nothing here depends on a DNS library.

use crate::dns_name::normalize_name;
use crate::resource_record::ResourceRecord;
use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_ANY: u16 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Query,
    Update,
    Other(u8),
}

impl Opcode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Opcode::Query,
            5 => Opcode::Update,
            other => Opcode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::Update => 5,
            Opcode::Other(value) => *value,
        }
    }
}

/// Response codes the engine produces.
///
/// Ordering follows the numeric protocol value, which is also the severity
/// used when several outcomes are combined into one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rcode {
    Success,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    BadName,
}

impl Rcode {
    pub fn to_u16(&self) -> u16 {
        match self {
            Rcode::Success => 0,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::NotImplemented => 4,
            Rcode::Refused => 5,
            Rcode::BadName => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rcode::Success => "NOERROR",
            Rcode::ServerFailure => "SERVFAIL",
            Rcode::NameError => "NXDOMAIN",
            Rcode::NotImplemented => "NOTIMP",
            Rcode::Refused => "REFUSED",
            Rcode::BadName => "BADNAME",
        }
    }

    /// The more severe of two outcomes.
    pub fn aggregate(self, other: Rcode) -> Rcode {
        self.max(other)
    }
}

impl PartialOrd for Rcode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rcode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u16().cmp(&other.to_u16())
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    SOA,
    NS,
    A,
    AAAA,
    ANY,
    Other(u16),
}

impl QueryType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            TYPE_A => QueryType::A,
            TYPE_NS => QueryType::NS,
            TYPE_SOA => QueryType::SOA,
            TYPE_AAAA => QueryType::AAAA,
            TYPE_ANY => QueryType::ANY,
            other => QueryType::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsClass {
    IN,
    NONE,
    ANY,
    Other(u16),
}

impl DnsClass {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => DnsClass::IN,
            254 => DnsClass::NONE,
            255 => DnsClass::ANY,
            other => DnsClass::Other(other),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::NONE => 254,
            DnsClass::ANY => 255,
            DnsClass::Other(value) => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: QueryType,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: QueryType) -> Self {
        Self {
            name: name.into(),
            qtype,
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// RDATA of an update-section record, reduced to what the engine inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateData {
    Empty,
    Address(IpAddr),
    Other,
}

/// One resource record from the update section of an UPDATE message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub name: String,
    pub rtype: u16,
    pub class: DnsClass,
    pub ttl: u32,
    pub data: UpdateData,
}

impl UpdateRecord {
    /// Class NONE deletes the matching record; class ANY with an empty payload
    /// deletes the whole RRset.
    pub fn is_delete(&self) -> bool {
        match self.class {
            DnsClass::NONE => true,
            DnsClass::ANY => self.data == UpdateData::Empty,
            _ => false,
        }
    }
}

/// Outcome of TSIG verification, decided before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TsigStatus {
    #[default]
    Absent,
    Verified {
        key_name: String,
    },
    Failed {
        key_name: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsigAlgorithm {
    HmacMd5,
}

impl TsigAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            TsigAlgorithm::HmacMd5 => "hmac-md5.sig-alg.reg.int.",
        }
    }
}

/// Instruction to sign the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigSigning {
    pub key_name: String,
    pub algorithm: TsigAlgorithm,
    pub fudge: u16,
    pub time_signed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRequest {
    pub id: u16,
    pub opcode: Opcode,
    pub questions: Vec<Question>,
    pub updates: Vec<UpdateRecord>,
    pub tsig: TsigStatus,
}

impl ZoneRequest {
    pub fn query(id: u16, questions: Vec<Question>) -> Self {
        Self {
            id,
            opcode: Opcode::Query,
            questions,
            updates: Vec::new(),
            tsig: TsigStatus::Absent,
        }
    }

    pub fn update(id: u16, zone: Question, updates: Vec<UpdateRecord>) -> Self {
        Self {
            id,
            opcode: Opcode::Update,
            questions: vec![zone],
            updates,
            tsig: TsigStatus::Absent,
        }
    }

    pub fn with_tsig(mut self, tsig: TsigStatus) -> Self {
        self.tsig = tsig;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneResponse {
    pub id: u16,
    pub opcode: Opcode,
    pub rcode: Rcode,
    pub authoritative: bool,
    pub compress: bool,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
    pub tsig: Option<TsigSigning>,
}

impl ZoneResponse {
    pub fn new(id: u16, opcode: Opcode) -> Self {
        Self {
            id,
            opcode,
            rcode: Rcode::Success,
            authoritative: true,
            compress: false,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            tsig: None,
        }
    }
}
